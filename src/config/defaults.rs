//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use crate::probe::LocalProbe;
use crate::transport::TransportOptions;

/// Default lookup scope.
pub const SCOPE: &str = "all";

/// Default address family.
pub const FAMILY: &str = "both";

/// Default request timeout in seconds.
pub const TIMEOUT_SECS: u64 = TransportOptions::DEFAULT_TIMEOUT.as_secs();

/// Default idle connection bound per host.
pub const POOL_MAX_IDLE_PER_HOST: usize = TransportOptions::DEFAULT_POOL_MAX_IDLE_PER_HOST;

/// Default port local probes connect to.
pub const LOCAL_PORT: u16 = LocalProbe::DEFAULT_PORT;

/// Directory under the platform config dir holding the config file.
pub const CONFIG_DIR: &str = "ipkit";

/// Config file name, also used by `ipkit init`.
pub const CONFIG_FILE: &str = "ipkit.toml";
