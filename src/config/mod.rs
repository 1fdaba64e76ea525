//! Configuration layer for ipkit.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML config file** - Values from the configuration file
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! Headers are merged: TOML headers are applied first and CLI headers with
//! the same name replace them.
//!
//! # Boolean Flag Semantics
//!
//! `--sequential` uses OR semantics: once set `true` in TOML, the CLI cannot
//! turn it back off.
//!
//! # TOML-Only Options
//!
//! Probe lists (`public.ipv4`, `public.ipv6`, `local.ipv4`, `local.ipv6`),
//! `local.port`, `http.pool_max_idle_per_host` and `http.user_agent` can only
//! be set in a config file. A configured list replaces the built-in one.
//!
//! # Config File Location
//!
//! `--config` names the file explicitly (a leading `~` is expanded).
//! Without it, [`default_config_path`] is read when it exists.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod cli_tests;
#[cfg(test)]
mod validated_tests;

pub use cli::{Cli, Command, FamilyArg, ScopeArg};
pub use error::{ConfigError, field};
pub use toml::{EndpointEntry, EndpointTable, TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, default_config_path, expand_home, write_default_config};
