//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Lookup selection
    #[serde(default)]
    pub lookup: LookupSection,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpSection,

    /// Public address endpoints
    #[serde(default)]
    pub public: PublicSection,

    /// Local probe targets
    #[serde(default)]
    pub local: LocalSection,
}

/// Lookup selection section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LookupSection {
    /// "public", "local", or "all"
    pub scope: Option<String>,

    /// "ipv4", "ipv6", or "both"
    pub family: Option<String>,

    /// Try probes one at a time in list order
    #[serde(default)]
    pub sequential: bool,
}

/// HTTP client section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpSection {
    /// Request timeout in seconds
    pub timeout: Option<u64>,

    /// Idle pooled connections kept per host
    pub pool_max_idle_per_host: Option<usize>,

    /// `User-Agent` header value
    pub user_agent: Option<String>,

    /// Extra headers sent with every request
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

/// Public endpoint lists. A list replaces the built-in one entirely.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PublicSection {
    /// Endpoints answering with an IPv4 address, in priority order
    pub ipv4: Option<Vec<EndpointEntry>>,

    /// Endpoints answering with an IPv6 address, in priority order
    pub ipv6: Option<Vec<EndpointEntry>>,
}

/// One public endpoint: a bare URL or a table with a response format.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum EndpointEntry {
    /// URL answering with the bare address
    Url(String),
    /// URL with an explicit response format
    Detailed(EndpointTable),
}

/// Table form of an [`EndpointEntry`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EndpointTable {
    /// Endpoint URL
    pub url: String,

    /// "plain" (default) or "dyndns"
    pub format: Option<String>,
}

impl EndpointEntry {
    /// The endpoint URL.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Url(url) => url,
            Self::Detailed(table) => &table.url,
        }
    }

    /// The declared response format, if any.
    #[must_use]
    pub fn format(&self) -> Option<&str> {
        match self {
            Self::Url(_) => None,
            Self::Detailed(table) => table.format.as_deref(),
        }
    }
}

/// Local probe target section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocalSection {
    /// IPv4 addresses local probes route toward
    pub ipv4: Option<Vec<String>>,

    /// IPv6 addresses local probes route toward
    pub ipv6: Option<Vec<String>>,

    /// Port local probes connect to
    pub port: Option<u16>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# ipkit configuration file
# CLI flags override values set here.

[lookup]
# Which addresses to look up: "public", "local", or "all" (default: all)
# scope = "all"

# Address families: "ipv4"/"v4"/"4", "ipv6"/"v6"/"6", or "both" (default: both)
# family = "both"

# Try probes one at a time in list order instead of racing them
# sequential = false

[http]
# Request timeout in seconds, also bounds each public probe (default: 5)
timeout = 5

# Idle pooled connections kept per host (default: 2)
# pool_max_idle_per_host = 2

# User-Agent header (default: ipkit/<version>)
# user_agent = "ipkit"

# Extra headers sent with every request
# [http.headers]
# X-Custom-Header = "value"

[public]
# Endpoints replace the built-in list entirely. An entry is a URL whose
# body is the bare address, or a table naming the response format.
# ipv4 = [
#     "http://checkip.amazonaws.com/",
#     { url = "http://checkip.dyndns.com/", format = "dyndns" },
# ]
# ipv6 = ["http://ipv6.icanhazip.com/"]

[local]
# Addresses local probes route toward. Nothing is sent to them.
# ipv4 = ["8.8.8.8", "1.1.1.1"]
# ipv6 = ["2001:4860:4860::8888", "2606:4700:4700::1111"]

# Port used for route selection (default: 65530)
# port = 65530
"#
    .to_string()
}
