//! Address discovery probes.
//!
//! A probe is one stateless attempt at learning an address from one fixed
//! target. Two kinds exist:
//! - [`RemoteProbe`]: GETs an IP-echo endpoint and extracts the address
//!   from the body with an [`Extractor`]
//! - [`LocalProbe`]: "connects" a UDP socket toward a public resolver and
//!   reads back the local address the OS picked, without sending anything
//!
//! Every failure inside a probe collapses to [`ProbeOutcome::Failure`];
//! the reason ([`ProbeError`]) is only logged.

pub mod catalog;
mod error;
mod extract;
mod local;
mod remote;

use std::future::Future;

use tokio_util::sync::CancellationToken;

pub use error::{ExtractError, ProbeError};
pub use extract::Extractor;
pub use local::LocalProbe;
pub use remote::{RemoteEndpoint, RemoteProbe};

/// Result of a single probe attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The probe produced an address.
    Success(String),
    /// The probe failed for any reason.
    Failure,
}

impl ProbeOutcome {
    /// Collapses a probe result, logging the failure reason against `target`.
    #[must_use]
    pub fn from_result(target: &str, result: Result<String, ProbeError>) -> Self {
        match result {
            Ok(address) => {
                tracing::debug!(probe = target, address = %address, "Probe succeeded");
                Self::Success(address)
            }
            Err(e) => {
                tracing::debug!(probe = target, "Probe failed: {e}");
                Self::Failure
            }
        }
    }

    /// Returns true for [`ProbeOutcome::Success`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns the address of a successful probe.
    #[must_use]
    pub fn into_address(self) -> Option<String> {
        match self {
            Self::Success(address) => Some(address),
            Self::Failure => None,
        }
    }
}

/// A single address discovery capability.
///
/// # Contract
///
/// - One attempt per call, no retries
/// - Never panics or errors for ordinary failures; returns
///   [`ProbeOutcome::Failure`] instead
/// - Observes `cancel` at its suspension points and reports
///   [`ProbeOutcome::Failure`] once cancelled
/// - Terminates on its own (bounded by a timeout) even if it ignores `cancel`
pub trait Probe: Send + Sync {
    /// Human-readable target (URL or socket address), used for logging.
    fn target(&self) -> &str;

    /// Runs the probe once.
    fn probe(&self, cancel: CancellationToken) -> impl Future<Output = ProbeOutcome> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_result_maps_ok_to_success() {
        let outcome = ProbeOutcome::from_result("test", Ok("10.0.0.2".to_string()));

        assert_eq!(outcome, ProbeOutcome::Success("10.0.0.2".to_string()));
        assert!(outcome.is_success());
    }

    #[test]
    fn from_result_maps_err_to_failure() {
        let outcome = ProbeOutcome::from_result("test", Err(ProbeError::Cancelled));

        assert_eq!(outcome, ProbeOutcome::Failure);
        assert!(outcome.into_address().is_none());
    }

    #[test]
    fn into_address_returns_success_value() {
        let outcome = ProbeOutcome::Success("fe80::1".to_string());

        assert_eq!(outcome.into_address().as_deref(), Some("fe80::1"));
    }
}
