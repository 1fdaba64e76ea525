//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::network::IpFamily;
use crate::resolve::Scope;

/// ipkit: public and local IP address discovery
///
/// Races IP-echo services and local routing probes, printing the first
/// address each lookup finds.
#[derive(Debug, Parser)]
#[command(name = "ipkit")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Which addresses to look up
    #[arg(long, value_enum)]
    pub scope: Option<ScopeArg>,

    /// Which address families to look up
    #[arg(long, value_enum)]
    pub family: Option<FamilyArg>,

    /// Try probes one at a time in list order instead of racing them
    #[arg(long)]
    pub sequential: bool,

    /// HTTP request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// HTTP headers in 'Key=Value' or 'Key: Value' format (can be specified multiple times)
    #[arg(long = "header", value_name = "K=V")]
    pub headers: Vec<String>,

    /// Path to configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Print results as a JSON object
    #[arg(long)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

/// Subcommands for ipkit
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "ipkit.toml")]
        output: PathBuf,
    },
}

/// Scope argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScopeArg {
    /// Public addresses only
    Public,
    /// Local addresses only
    Local,
    /// Public and local addresses
    All,
}

impl ScopeArg {
    /// Expands into the scopes to look up, public first.
    #[must_use]
    pub fn scopes(self) -> Vec<Scope> {
        match self {
            Self::Public => vec![Scope::Public],
            Self::Local => vec![Scope::Local],
            Self::All => vec![Scope::Public, Scope::Local],
        }
    }
}

/// Family argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FamilyArg {
    /// IPv4 addresses only
    #[value(name = "ipv4")]
    V4,
    /// IPv6 addresses only
    #[value(name = "ipv6")]
    V6,
    /// IPv4 and IPv6 addresses
    #[value(name = "both")]
    Both,
}

impl FamilyArg {
    /// Expands into the families to look up, IPv4 first.
    #[must_use]
    pub fn families(self) -> Vec<IpFamily> {
        match self {
            Self::V4 => vec![IpFamily::V4],
            Self::V6 => vec![IpFamily::V6],
            Self::Both => vec![IpFamily::V4, IpFamily::V6],
        }
    }
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }
}
