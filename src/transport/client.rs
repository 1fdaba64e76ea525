//! Production HTTP client implementation using reqwest.

use std::time::Duration;

use super::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// Settings for constructing a [`ReqwestClient`].
///
/// # Defaults
///
/// - `timeout`: 5 seconds per request
/// - `pool_max_idle_per_host`: 2 idle connections per host
/// - `user_agent`: `ipkit/<version>`
/// - `headers`: none
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportOptions {
    /// Total time allowed for one request, including reading the body.
    pub timeout: Duration,
    /// Upper bound on idle pooled connections kept per host.
    pub pool_max_idle_per_host: usize,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
    /// Extra headers sent with every request.
    pub headers: http::HeaderMap,
}

impl TransportOptions {
    /// Default request timeout (5 seconds).
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Default idle connection bound per host.
    pub const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 2;

    /// Returns the default `User-Agent` value.
    #[must_use]
    pub fn default_user_agent() -> String {
        format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            timeout: Self::DEFAULT_TIMEOUT,
            pool_max_idle_per_host: Self::DEFAULT_POOL_MAX_IDLE_PER_HOST,
            user_agent: Self::default_user_agent(),
            headers: http::HeaderMap::new(),
        }
    }
}

/// Production HTTP client using reqwest.
///
/// A thin wrapper around `reqwest::Client` implementing [`HttpClient`].
/// Clones share one connection pool, so a single client is constructed by
/// the caller and handed to every remote probe. System proxies are never
/// used: the address seen by the echo service must be the host's own.
///
/// # Example
///
/// ```no_run
/// use ipkit::transport::{HttpClient, HttpRequest, ReqwestClient, TransportOptions};
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ReqwestClient::with_options(&TransportOptions::default())?;
/// let url = Url::parse("http://checkip.amazonaws.com/")?;
/// let response = client.request(HttpRequest::get(url)).await?;
/// println!("Status: {}", response.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    /// Creates a client configured from `options`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Build`] if the TLS backend or resolver cannot
    /// be initialized.
    pub fn with_options(options: &TransportOptions) -> Result<Self, HttpError> {
        let client = reqwest::Client::builder()
            .timeout(options.timeout)
            .pool_max_idle_per_host(options.pool_max_idle_per_host)
            .user_agent(options.user_agent.as_str())
            .default_headers(options.headers.clone())
            .no_proxy()
            .build()
            .map_err(|e| HttpError::Build(Box::new(e)))?;

        Ok(Self { inner: client })
    }
}

impl HttpClient for ReqwestClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let response = self
            .inner
            .request(req.method, req.url.as_str())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(map_reqwest_error)?
            .to_vec();

        Ok(HttpResponse::new(status, body))
    }
}

fn map_reqwest_error(e: reqwest::Error) -> HttpError {
    if e.is_timeout() {
        HttpError::Timeout
    } else if e.is_builder() {
        HttpError::InvalidUrl(e.to_string())
    } else {
        HttpError::Connection(Box::new(e))
    }
}
