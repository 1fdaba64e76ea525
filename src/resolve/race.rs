//! The "first success wins" race over a list of probes.

use std::sync::Arc;

use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use super::RaceMode;
use crate::probe::{Probe, ProbeOutcome};

/// Runs `probes` according to `mode` and returns the first address found.
///
/// - [`RaceMode::Sequential`]: probes run one after another in list order;
///   probes after the winner are never started.
/// - [`RaceMode::Concurrent`]: every probe runs in its own task; outcomes
///   are taken in completion order. When a winner appears, one shared
///   token is cancelled and the remaining tasks are detached rather than
///   awaited. They observe the token (or their own timeout) and finish on
///   their own.
///
/// The winner is trimmed; an address that trims to nothing counts as a
/// failure. `None` means every probe failed, or `cancel` fired.
pub async fn race<P>(probes: &[Arc<P>], mode: RaceMode, cancel: &CancellationToken) -> Option<String>
where
    P: Probe + 'static,
{
    match mode {
        RaceMode::Sequential => race_sequential(probes, cancel).await,
        RaceMode::Concurrent => race_concurrent(probes, cancel).await,
    }
}

async fn race_sequential<P: Probe>(probes: &[Arc<P>], cancel: &CancellationToken) -> Option<String> {
    for probe in probes {
        if cancel.is_cancelled() {
            return None;
        }

        if let Some(address) = accept(probe.target(), probe.probe(cancel.child_token()).await) {
            return Some(address);
        }
    }

    None
}

async fn race_concurrent<P>(probes: &[Arc<P>], cancel: &CancellationToken) -> Option<String>
where
    P: Probe + 'static,
{
    let race_token = cancel.child_token();
    let mut pending = JoinSet::new();

    for probe in probes {
        let probe = Arc::clone(probe);
        let token = race_token.clone();
        pending.spawn(async move {
            let outcome = probe.probe(token).await;
            accept(probe.target(), outcome)
        });
    }

    let winner = loop {
        let joined = tokio::select! {
            biased;
            () = cancel.cancelled() => break None,
            joined = pending.join_next() => joined,
        };

        match joined {
            None => break None,
            Some(Ok(Some(address))) => break Some(address),
            Some(Ok(None)) => {}
            Some(Err(e)) => tracing::warn!("Probe task failed: {e}"),
        }
    };

    race_token.cancel();
    pending.detach_all();
    winner
}

/// Turns a probe outcome into a winner candidate.
fn accept(target: &str, outcome: ProbeOutcome) -> Option<String> {
    let address = outcome.into_address()?;
    let trimmed = address.trim();

    if trimmed.is_empty() {
        tracing::debug!(probe = target, "Probe returned a blank address");
        return None;
    }

    Some(trimmed.to_string())
}

#[cfg(test)]
#[path = "race_tests.rs"]
mod tests;
