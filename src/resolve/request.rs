//! Description of a single address lookup.

use std::fmt;

use crate::network::IpFamily;

/// Which address a lookup asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// The address the internet sees, learned from remote echo services.
    Public,
    /// An address bound to one of the host's adapters.
    Local,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Public => write!(f, "Public"),
            Self::Local => write!(f, "Local"),
        }
    }
}

/// How the probes of one lookup are run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RaceMode {
    /// One probe at a time, in list order.
    Sequential,
    /// All probes at once; the first success wins.
    #[default]
    Concurrent,
}

/// A single lookup: scope, family and race mode.
///
/// # Example
///
/// ```
/// use ipkit::network::IpFamily;
/// use ipkit::resolve::{RaceMode, ResolveRequest, Scope};
///
/// let request = ResolveRequest::new(Scope::Local, IpFamily::V6).with_mode(RaceMode::Sequential);
/// assert!(request.cross_family_fallback);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolveRequest {
    /// Public or local address.
    pub scope: Scope,
    /// Requested address family.
    pub family: IpFamily,
    /// Probe scheduling.
    pub mode: RaceMode,
    /// Whether a local lookup may derive its answer from the other
    /// family's address on the same adapter. Ignored for public lookups.
    pub cross_family_fallback: bool,
}

impl ResolveRequest {
    /// Creates a concurrent request with cross-family fallback enabled.
    #[must_use]
    pub const fn new(scope: Scope, family: IpFamily) -> Self {
        Self {
            scope,
            family,
            mode: RaceMode::Concurrent,
            cross_family_fallback: true,
        }
    }

    /// Sets the race mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: RaceMode) -> Self {
        self.mode = mode;
        self
    }

    /// Enables or disables cross-family fallback.
    #[must_use]
    pub const fn with_cross_family_fallback(mut self, enabled: bool) -> Self {
        self.cross_family_fallback = enabled;
        self
    }
}

impl fmt::Display for ResolveRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.scope, self.family)
    }
}
