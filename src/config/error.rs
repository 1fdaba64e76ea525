//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for configuration operations.
///
/// Covers errors from parsing, validation, and file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to write configuration file (for init command).
    #[error("Failed to write config file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Invalid endpoint URL.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The invalid URL string
        url: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Invalid local probe target.
    #[error("Invalid address '{value}' in {field}: {reason}")]
    InvalidAddress {
        /// Name of the list holding the address
        field: &'static str,
        /// The invalid address string
        value: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Unknown response format for an endpoint.
    #[error("Invalid endpoint format '{value}': expected plain or dyndns")]
    InvalidFormat {
        /// The invalid value provided
        value: String,
    },

    /// Invalid duration value (zero or too large).
    #[error("Invalid duration for {field}: {reason}")]
    InvalidDuration {
        /// Name of the field
        field: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// Invalid port value.
    #[error("Invalid port for {field}: must be greater than 0")]
    InvalidPort {
        /// Name of the field
        field: &'static str,
    },

    /// Invalid scope value.
    #[error("Invalid scope '{value}': expected public, local, or all")]
    InvalidScope {
        /// The invalid value provided
        value: String,
    },

    /// Invalid address family value.
    #[error("Invalid family '{value}': expected ipv4, ipv6, or both")]
    InvalidFamily {
        /// The invalid value provided
        value: String,
    },

    /// A probe list that would leave a lookup with nothing to race.
    #[error("Empty list: {field} must name at least one entry")]
    EmptyList {
        /// Name of the list
        field: &'static str,
    },

    /// Invalid header format.
    #[error("Invalid header format '{value}': expected 'Key=Value' or 'Key: Value'")]
    InvalidHeader {
        /// The invalid header string
        value: String,
    },

    /// Invalid header name.
    #[error("Invalid header name '{name}': {reason}")]
    InvalidHeaderName {
        /// The invalid header name
        name: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Invalid header value.
    #[error("Invalid header value for '{name}': {reason}")]
    InvalidHeaderValue {
        /// The header name
        name: String,
        /// Reason for invalidity
        reason: String,
    },
}

/// Well-known field names used in error variants.
///
/// Use these constants for compile-time safety when matching field names.
pub mod field {
    /// Request timeout.
    pub const TIMEOUT: &str = "http.timeout";
    /// User-Agent header value.
    pub const USER_AGENT: &str = "http.user_agent";
    /// Public IPv4 endpoint list.
    pub const PUBLIC_IPV4: &str = "public.ipv4";
    /// Public IPv6 endpoint list.
    pub const PUBLIC_IPV6: &str = "public.ipv6";
    /// Local IPv4 target list.
    pub const LOCAL_IPV4: &str = "local.ipv4";
    /// Local IPv6 target list.
    pub const LOCAL_IPV6: &str = "local.ipv6";
    /// Local probe port.
    pub const LOCAL_PORT: &str = "local.port";
}
