//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use http::HeaderMap;
use http::header::{HeaderName, HeaderValue};
use url::Url;

use crate::network::IpFamily;
use crate::probe::{Extractor, RemoteEndpoint, catalog};
use crate::resolve::{RaceMode, ResolverSettings, Scope};
use crate::transport::TransportOptions;

use super::cli::{Cli, FamilyArg, ScopeArg};
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::{EndpointEntry, TomlConfig};

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Scopes to look up, public first
    pub scopes: Vec<Scope>,

    /// Families to look up, IPv4 first
    pub families: Vec<IpFamily>,

    /// Probe scheduling
    pub mode: RaceMode,

    /// Probe lists and transport settings for the resolver
    pub settings: ResolverSettings,

    /// Print results as JSON
    pub json: bool,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |items: Vec<String>| items.join("+");

        write!(
            f,
            "Config {{ scopes: {}, families: {}, mode: {:?}, timeout: {}s, \
             public endpoints: {}/{}, local targets: {}/{}, local port: {} }}",
            join(self.scopes.iter().map(ToString::to_string).collect()),
            join(self.families.iter().map(ToString::to_string).collect()),
            self.mode,
            self.settings.transport.timeout.as_secs(),
            self.settings.public_ipv4.len(),
            self.settings.public_ipv6.len(),
            self.settings.local_ipv4.len(),
            self.settings.local_ipv6.len(),
            self.settings.local_port,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Scope or family strings are unknown
    /// - Timeout or port is zero
    /// - An endpoint URL or local target is invalid
    /// - A configured probe list is empty
    /// - Header format is invalid
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let scopes = Self::resolve_scopes(cli, toml)?;
        let families = Self::resolve_families(cli, toml)?;

        // Flags only enable: true in either source wins
        let sequential = cli.sequential || toml.is_some_and(|t| t.lookup.sequential);
        let mode = if sequential {
            RaceMode::Sequential
        } else {
            RaceMode::Concurrent
        };

        let settings = ResolverSettings {
            transport: Self::build_transport(cli, toml)?,
            public_ipv4: Self::resolve_endpoints(toml, IpFamily::V4)?,
            public_ipv6: Self::resolve_endpoints(toml, IpFamily::V6)?,
            local_ipv4: Self::resolve_targets(toml, IpFamily::V4)?,
            local_ipv6: Self::resolve_targets(toml, IpFamily::V6)?,
            local_port: Self::resolve_port(toml)?,
        };

        Ok(Self {
            scopes,
            families,
            mode,
            settings,
            json: cli.json,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// With `--config`, that file must exist (a leading `~` is expanded).
    /// Otherwise the default config file is used if present.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let path = match cli.config {
            Some(ref path) => Some(expand_home(path)),
            None => default_config_path().filter(|p| p.is_file()),
        };

        let toml = match path {
            Some(ref path) => {
                tracing::debug!("Loading config from {}", path.display());
                Some(TomlConfig::load(path)?)
            }
            None => None,
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_scopes(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Vec<Scope>, ConfigError> {
        // CLI takes precedence
        if let Some(scope) = cli.scope {
            return Ok(scope.scopes());
        }

        let value = toml
            .and_then(|t| t.lookup.scope.as_deref())
            .unwrap_or(defaults::SCOPE);
        parse_scope(value).map(ScopeArg::scopes)
    }

    fn resolve_families(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Vec<IpFamily>, ConfigError> {
        if let Some(family) = cli.family {
            return Ok(family.families());
        }

        let value = toml
            .and_then(|t| t.lookup.family.as_deref())
            .unwrap_or(defaults::FAMILY);
        parse_family(value).map(FamilyArg::families)
    }

    fn build_transport(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<TransportOptions, ConfigError> {
        let http = toml.map(|t| &t.http);

        // Priority: CLI explicit > TOML > default
        let seconds = cli
            .timeout
            .or_else(|| http.and_then(|h| h.timeout))
            .unwrap_or(defaults::TIMEOUT_SECS);

        if seconds == 0 {
            return Err(ConfigError::InvalidDuration {
                field: field::TIMEOUT,
                reason: "must be greater than 0".to_string(),
            });
        }

        let user_agent = match http.and_then(|h| h.user_agent.as_deref()) {
            Some(agent) => {
                parse_header_value(field::USER_AGENT, agent)?;
                agent.to_string()
            }
            None => TransportOptions::default_user_agent(),
        };

        Ok(TransportOptions {
            timeout: Duration::from_secs(seconds),
            pool_max_idle_per_host: http
                .and_then(|h| h.pool_max_idle_per_host)
                .unwrap_or(defaults::POOL_MAX_IDLE_PER_HOST),
            user_agent,
            headers: Self::resolve_headers(cli, toml)?,
        })
    }

    fn resolve_headers(cli: &Cli, toml: Option<&TomlConfig>) -> Result<HeaderMap, ConfigError> {
        let mut headers = HeaderMap::new();

        // Add TOML headers first (CLI can override)
        if let Some(toml) = toml {
            for (name, value) in &toml.http.headers {
                let header_name = parse_header_name(name)?;
                let header_value = parse_header_value(name, value)?;
                headers.insert(header_name, header_value);
            }
        }

        for header_str in &cli.headers {
            let (name, value) = parse_header_string(header_str)?;
            let header_name = parse_header_name(&name)?;
            let header_value = parse_header_value(&name, &value)?;
            headers.insert(header_name, header_value);
        }

        Ok(headers)
    }

    fn resolve_endpoints(
        toml: Option<&TomlConfig>,
        family: IpFamily,
    ) -> Result<Vec<RemoteEndpoint>, ConfigError> {
        let (name, entries) = match family {
            IpFamily::V4 => (field::PUBLIC_IPV4, toml.and_then(|t| t.public.ipv4.as_ref())),
            IpFamily::V6 => (field::PUBLIC_IPV6, toml.and_then(|t| t.public.ipv6.as_ref())),
        };

        let Some(entries) = entries else {
            return Ok(catalog::public_endpoints(family));
        };

        if entries.is_empty() {
            return Err(ConfigError::EmptyList { field: name });
        }

        entries.iter().map(parse_endpoint).collect()
    }

    fn resolve_targets(
        toml: Option<&TomlConfig>,
        family: IpFamily,
    ) -> Result<Vec<IpAddr>, ConfigError> {
        let (name, targets) = match family {
            IpFamily::V4 => (field::LOCAL_IPV4, toml.and_then(|t| t.local.ipv4.as_ref())),
            IpFamily::V6 => (field::LOCAL_IPV6, toml.and_then(|t| t.local.ipv6.as_ref())),
        };

        let Some(targets) = targets else {
            return Ok(catalog::local_targets(family));
        };

        if targets.is_empty() {
            return Err(ConfigError::EmptyList { field: name });
        }

        targets
            .iter()
            .map(|value| parse_target(name, family, value))
            .collect()
    }

    fn resolve_port(toml: Option<&TomlConfig>) -> Result<u16, ConfigError> {
        let port = toml
            .and_then(|t| t.local.port)
            .unwrap_or(defaults::LOCAL_PORT);

        if port == 0 {
            return Err(ConfigError::InvalidPort {
                field: field::LOCAL_PORT,
            });
        }

        Ok(port)
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

/// `<config_dir>/ipkit/ipkit.toml`, if the platform has a config dir.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(defaults::CONFIG_DIR).join(defaults::CONFIG_FILE))
}

/// Replaces a leading `~` with the home directory.
///
/// Paths without one, or hosts without a home directory, are returned as is.
#[must_use]
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };

    dirs::home_dir().map_or_else(|| path.to_path_buf(), |home| home.join(rest))
}

// Helper functions

fn parse_scope(s: &str) -> Result<ScopeArg, ConfigError> {
    match s.to_lowercase().as_str() {
        "public" => Ok(ScopeArg::Public),
        "local" => Ok(ScopeArg::Local),
        "all" | "both" => Ok(ScopeArg::All),
        _ => Err(ConfigError::InvalidScope {
            value: s.to_string(),
        }),
    }
}

fn parse_family(s: &str) -> Result<FamilyArg, ConfigError> {
    match s.to_lowercase().as_str() {
        "ipv4" | "v4" | "4" => Ok(FamilyArg::V4),
        "ipv6" | "v6" | "6" => Ok(FamilyArg::V6),
        "both" | "all" | "dual" => Ok(FamilyArg::Both),
        _ => Err(ConfigError::InvalidFamily {
            value: s.to_string(),
        }),
    }
}

fn parse_endpoint(entry: &EndpointEntry) -> Result<RemoteEndpoint, ConfigError> {
    let url_str = entry.url();
    let url = Url::parse(url_str).map_err(|e| ConfigError::InvalidUrl {
        url: url_str.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidUrl {
            url: url_str.to_string(),
            reason: "scheme must be http or https".to_string(),
        });
    }

    let extractor = match entry.format() {
        Some(format) => {
            Extractor::from_name(format).ok_or_else(|| ConfigError::InvalidFormat {
                value: format.to_string(),
            })?
        }
        None => Extractor::default(),
    };

    Ok(RemoteEndpoint::new(url, extractor))
}

fn parse_target(name: &'static str, family: IpFamily, value: &str) -> Result<IpAddr, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidAddress {
        field: name,
        value: value.to_string(),
        reason,
    };

    let addr: IpAddr = value.trim().parse().map_err(|e| invalid(format!("{e}")))?;

    if !family.matches(&addr) {
        return Err(invalid(format!("not an {family} address")));
    }

    if addr.is_unspecified() || addr.is_loopback() {
        return Err(invalid("must be a routable address".to_string()));
    }

    Ok(addr)
}

fn parse_header_string(s: &str) -> Result<(String, String), ConfigError> {
    // Try "Key=Value" format first
    if let Some((name, value)) = s.split_once('=') {
        return Ok((name.trim().to_string(), value.trim().to_string()));
    }

    // Try "Key: Value" format
    if let Some((name, value)) = s.split_once(':') {
        return Ok((name.trim().to_string(), value.trim().to_string()));
    }

    Err(ConfigError::InvalidHeader {
        value: s.to_string(),
    })
}

fn parse_header_name(name: &str) -> Result<HeaderName, ConfigError> {
    name.parse::<HeaderName>()
        .map_err(|e| ConfigError::InvalidHeaderName {
            name: name.to_string(),
            reason: e.to_string(),
        })
}

fn parse_header_value(name: &str, value: &str) -> Result<HeaderValue, ConfigError> {
    HeaderValue::from_str(value).map_err(|e| ConfigError::InvalidHeaderValue {
        name: name.to_string(),
        reason: e.to_string(),
    })
}
