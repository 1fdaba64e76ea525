//! Shared test fixtures for the race and the resolver.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::probe::{Probe, ProbeOutcome};

/// Probe stub with a fixed delay and outcome that records what happened.
#[derive(Debug)]
pub struct StubProbe {
    name: &'static str,
    delay: Duration,
    outcome: ProbeOutcome,
    honors_cancel: bool,
    panics: bool,
    calls: AtomicUsize,
    saw_cancel: AtomicBool,
    completed: AtomicBool,
}

impl StubProbe {
    pub fn new(name: &'static str, delay_ms: u64, outcome: ProbeOutcome) -> Arc<Self> {
        Arc::new(Self {
            name,
            delay: Duration::from_millis(delay_ms),
            outcome,
            honors_cancel: true,
            panics: false,
            calls: AtomicUsize::new(0),
            saw_cancel: AtomicBool::new(false),
            completed: AtomicBool::new(false),
        })
    }

    pub fn success(name: &'static str, delay_ms: u64, address: &str) -> Arc<Self> {
        Self::new(name, delay_ms, ProbeOutcome::Success(address.to_string()))
    }

    pub fn failure(name: &'static str, delay_ms: u64) -> Arc<Self> {
        Self::new(name, delay_ms, ProbeOutcome::Failure)
    }

    pub fn stubborn(name: &'static str, delay_ms: u64, address: &str) -> Arc<Self> {
        let mut stub = Arc::try_unwrap(Self::success(name, delay_ms, address)).unwrap();
        stub.honors_cancel = false;
        Arc::new(stub)
    }

    pub fn panicking(name: &'static str) -> Arc<Self> {
        let mut stub = Arc::try_unwrap(Self::failure(name, 0)).unwrap();
        stub.panics = true;
        Arc::new(stub)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn saw_cancel(&self) -> bool {
        self.saw_cancel.load(Ordering::SeqCst)
    }

    pub fn completed(&self) -> bool {
        self.completed.load(Ordering::SeqCst)
    }

    async fn finish(&self) -> ProbeOutcome {
        tokio::time::sleep(self.delay).await;
        assert!(!self.panics, "stub probe {} panicked on purpose", self.name);
        self.completed.store(true, Ordering::SeqCst);
        self.outcome.clone()
    }
}

impl Probe for StubProbe {
    fn target(&self) -> &str {
        self.name
    }

    async fn probe(&self, cancel: CancellationToken) -> ProbeOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if !self.honors_cancel {
            return self.finish().await;
        }

        tokio::select! {
            () = cancel.cancelled() => {
                self.saw_cancel.store(true, Ordering::SeqCst);
                ProbeOutcome::Failure
            }
            outcome = self.finish() => outcome,
        }
    }
}

/// Lets detached stragglers run to completion.
pub async fn settle() {
    tokio::time::sleep(Duration::from_secs(5)).await;
}

