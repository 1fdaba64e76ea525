//! Probes that ask a third-party IP-echo service over HTTP.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use url::Url;

use super::{Extractor, Probe, ProbeError, ProbeOutcome};
use crate::transport::{HttpClient, HttpRequest, TransportOptions};

/// An IP-echo endpoint together with the extractor for its body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEndpoint {
    /// URL to GET.
    pub url: Url,
    /// How to read the address out of the response body.
    pub extractor: Extractor,
}

impl RemoteEndpoint {
    /// Creates an endpoint.
    #[must_use]
    pub const fn new(url: Url, extractor: Extractor) -> Self {
        Self { url, extractor }
    }

    /// Creates an endpoint that answers with the bare address.
    #[must_use]
    pub const fn plain(url: Url) -> Self {
        Self::new(url, Extractor::PlainText)
    }
}

/// Probe that GETs an [`RemoteEndpoint`] through an injected [`HttpClient`].
///
/// The probe fails on transport errors, non-2xx statuses, non-UTF-8 bodies,
/// extractor errors, its own timeout and cancellation.
///
/// # Example
///
/// ```no_run
/// use ipkit::probe::{Probe, RemoteEndpoint, RemoteProbe};
/// use ipkit::transport::{ReqwestClient, TransportOptions};
/// use tokio_util::sync::CancellationToken;
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ReqwestClient::with_options(&TransportOptions::default())?;
/// let endpoint = RemoteEndpoint::plain(Url::parse("http://checkip.amazonaws.com/")?);
/// let probe = RemoteProbe::new(client, endpoint);
///
/// let outcome = probe.probe(CancellationToken::new()).await;
/// println!("{outcome:?}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RemoteProbe<H> {
    client: H,
    endpoint: RemoteEndpoint,
    timeout: Duration,
}

impl<H> RemoteProbe<H> {
    /// Creates a probe with the default transport timeout.
    #[must_use]
    pub const fn new(client: H, endpoint: RemoteEndpoint) -> Self {
        Self {
            client,
            endpoint,
            timeout: TransportOptions::DEFAULT_TIMEOUT,
        }
    }

    /// Sets the upper bound on one probe attempt.
    ///
    /// Applied on top of whatever timeout the client enforces, so a probe
    /// always terminates even with a client that never gives up.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the probed endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &RemoteEndpoint {
        &self.endpoint
    }

    /// Returns the time budget of one attempt.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl<H: HttpClient> RemoteProbe<H> {
    async fn fetch(&self) -> Result<String, ProbeError> {
        let response = self
            .client
            .request(HttpRequest::get(self.endpoint.url.clone()))
            .await?;

        if !response.is_success() {
            return Err(ProbeError::Status(response.status));
        }

        let body = response.body_text().ok_or(ProbeError::InvalidBody)?;
        Ok(self.endpoint.extractor.extract(body)?)
    }
}

impl<H: HttpClient> Probe for RemoteProbe<H> {
    fn target(&self) -> &str {
        self.endpoint.url.as_str()
    }

    async fn probe(&self, cancel: CancellationToken) -> ProbeOutcome {
        let result = tokio::select! {
            biased;
            () = cancel.cancelled() => Err(ProbeError::Cancelled),
            result = tokio::time::timeout(self.timeout, self.fetch()) => {
                result.unwrap_or_else(|_| Err(ProbeError::Timeout(self.timeout)))
            }
        };

        ProbeOutcome::from_result(self.target(), result)
    }
}

#[cfg(test)]
#[path = "remote_tests.rs"]
mod tests;
