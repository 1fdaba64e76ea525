//! Error types for probes and extractors.

use std::net::IpAddr;
use std::time::Duration;

use thiserror::Error;

use crate::transport::HttpError;

/// Error type for extracting an address from a response body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// Nothing but whitespace was left after extraction.
    #[error("Response body contains no address")]
    Empty,

    /// The body does not carry the markup the extractor expects.
    #[error("Response body is missing the '{marker}' marker")]
    MissingMarker {
        /// The text that was searched for
        marker: &'static str,
    },
}

/// Reason a probe failed.
///
/// Never crosses the probe boundary; used for debug logging only.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The HTTP request failed at the transport level.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The endpoint answered with a non-2xx status.
    #[error("Unexpected HTTP status {0}")]
    Status(http::StatusCode),

    /// The response body is not valid UTF-8.
    #[error("Response body is not valid UTF-8")]
    InvalidBody,

    /// The extractor rejected the body.
    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// Socket creation or connection failed.
    #[error("Socket error: {0}")]
    Socket(#[from] std::io::Error),

    /// The OS bound the socket to an address that cannot be reported.
    #[error("Socket bound to unusable local address {0}")]
    UnusableLocalAddress(IpAddr),

    /// The probe did not finish within its time budget.
    #[error("Probe timed out after {0:?}")]
    Timeout(Duration),

    /// The probe was cancelled before it finished.
    #[error("Probe cancelled")]
    Cancelled,
}
