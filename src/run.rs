//! Application execution logic.
//!
//! This module runs the requested lookups and renders their results.

use serde::Serialize;
use thiserror::Error;
use tokio::signal;
use tokio_util::sync::CancellationToken;

use ipkit::config::ValidatedConfig;
use ipkit::network::{AddressFetcher, IpFamily};
use ipkit::probe::Probe;
use ipkit::resolve::{IpResolver, ResolveRequest, Scope};
use ipkit::transport::HttpError;

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to build the HTTP client.
    #[error("Failed to create HTTP client: {0}")]
    Transport(#[source] HttpError),

    /// Failed to render JSON output.
    #[error("Failed to render output: {0}")]
    Output(#[source] serde_json::Error),
}

/// Outcome of one scope × family lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupResult {
    scope: Scope,
    family: IpFamily,
    address: Option<String>,
}

impl LookupResult {
    fn request(&self) -> ResolveRequest {
        ResolveRequest::new(self.scope, self.family)
    }
}

/// Executes the requested lookups and prints the results to stdout.
///
/// Ctrl+C (or SIGTERM) cancels in-flight lookups; those report "not found".
///
/// # Errors
///
/// Returns an error if:
/// - The HTTP client cannot be built
/// - JSON output cannot be rendered
///
/// # Coverage Note
///
/// This function is excluded from coverage because it requires:
/// - Real network access
/// - Real async runtime with signal handling
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig) -> Result<(), RunError> {
    let resolver = IpResolver::from_settings(&config.settings).map_err(RunError::Transport)?;

    let cancel = CancellationToken::new();
    let watcher = tokio::spawn(cancel_on_shutdown(cancel.clone()));

    let results = lookup_all(&resolver, &config, &cancel).await;
    watcher.abort();

    let output = if config.json {
        render_json(&results).map_err(RunError::Output)?
    } else {
        render_text(&results)
    };
    println!("{output}");

    Ok(())
}

/// Runs every scope × family lookup named by `config`, in order.
async fn lookup_all<R, L, F>(
    resolver: &IpResolver<R, L, F>,
    config: &ValidatedConfig,
    cancel: &CancellationToken,
) -> Vec<LookupResult>
where
    R: Probe + 'static,
    L: Probe + 'static,
    F: AddressFetcher,
{
    let mut results = Vec::with_capacity(config.scopes.len() * config.families.len());

    for &scope in &config.scopes {
        for &family in &config.families {
            let request = ResolveRequest::new(scope, family).with_mode(config.mode);
            let address = resolver.resolve(request, cancel).await;
            results.push(LookupResult {
                scope,
                family,
                address,
            });
        }
    }

    results
}

/// One `Public IPv4: 203.0.113.7` line per lookup.
fn render_text(results: &[LookupResult]) -> String {
    results
        .iter()
        .map(|result| {
            format!(
                "{}: {}",
                result.request(),
                result.address.as_deref().unwrap_or("not found")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Default, Serialize)]
struct JsonReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    public: Option<FamilyReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    local: Option<FamilyReport>,
}

/// Requested families only; an address that was not found is `null`.
#[derive(Debug, Default, Serialize)]
struct FamilyReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    ipv4: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ipv6: Option<Option<String>>,
}

fn render_json(results: &[LookupResult]) -> Result<String, serde_json::Error> {
    let mut report = JsonReport::default();

    for result in results {
        let scope = match result.scope {
            Scope::Public => report.public.get_or_insert_with(FamilyReport::default),
            Scope::Local => report.local.get_or_insert_with(FamilyReport::default),
        };
        let slot = match result.family {
            IpFamily::V4 => &mut scope.ipv4,
            IpFamily::V6 => &mut scope.ipv6,
        };
        *slot = Some(result.address.clone());
    }

    serde_json::to_string_pretty(&report)
}

/// Cancels `token` when a shutdown signal is received.
///
/// Excluded from coverage - requires OS signal handling.
#[cfg(not(tarpaulin_include))]
async fn cancel_on_shutdown(token: CancellationToken) {
    shutdown_signal().await;
    tracing::info!("Shutdown signal received, cancelling lookups...");
    token.cancel();
}

/// Returns a future that completes when a shutdown signal is received.
///
/// A handler that cannot be installed never fires.
#[cfg(not(tarpaulin_include))]
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
