//! Address fetching trait and error types.

use super::AdapterSnapshot;
use thiserror::Error;

/// Error type for adapter enumeration.
///
/// Describes what went wrong without dictating recovery strategy.
/// The resolver downgrades every variant to an empty correlation table.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The operating system refused or failed the enumeration call.
    #[error("Adapter enumeration failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for fetching network adapter address information.
///
/// # Design
///
/// - Enables dependency injection for testing with mock implementations
/// - Platform implementations live in [`super::platform`]
///
/// # Example
///
/// ```ignore
/// use ipkit::network::{AddressFetcher, AdapterSnapshot, FetchError};
///
/// struct FixedFetcher(Vec<AdapterSnapshot>);
///
/// impl AddressFetcher for FixedFetcher {
///     fn fetch(&self) -> Result<Vec<AdapterSnapshot>, FetchError> {
///         Ok(self.0.clone())
///     }
/// }
/// ```
pub trait AddressFetcher: Send + Sync {
    /// Fetches the current state of all network adapters.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the platform enumeration call fails.
    ///
    /// # Implementation Notes
    ///
    /// - Implementations should return ALL adapters, loopback included;
    ///   filtering is done by the caller
    /// - Address order within each adapter should follow the OS order
    /// - This is a synchronous snapshot
    fn fetch(&self) -> Result<Vec<AdapterSnapshot>, FetchError>;
}

impl<T: AddressFetcher + ?Sized> AddressFetcher for std::sync::Arc<T> {
    fn fetch(&self) -> Result<Vec<AdapterSnapshot>, FetchError> {
        (**self).fetch()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::AdapterKind;
    use std::sync::{Arc, Mutex};

    /// Returns predefined results, then empty lists once exhausted.
    struct MockFetcher {
        results: Mutex<std::collections::VecDeque<Result<Vec<AdapterSnapshot>, FetchError>>>,
    }

    impl MockFetcher {
        fn new(results: Vec<Result<Vec<AdapterSnapshot>, FetchError>>) -> Self {
            Self {
                results: Mutex::new(results.into()),
            }
        }
    }

    impl AddressFetcher for MockFetcher {
        fn fetch(&self) -> Result<Vec<AdapterSnapshot>, FetchError> {
            self.results
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(vec![]))
        }
    }

    #[test]
    fn arc_fetcher_delegates_to_inner() {
        let snapshot = AdapterSnapshot::new(
            "eth0",
            AdapterKind::Network,
            vec!["192.168.1.1".parse().unwrap()],
            vec![],
        );
        let fetcher = Arc::new(MockFetcher::new(vec![Ok(vec![snapshot.clone()])]));

        let result = fetcher.fetch().unwrap();

        assert_eq!(result, vec![snapshot]);
    }

    #[test]
    fn arc_fetcher_passes_errors_through() {
        let inner = Arc::new(MockFetcher::new(vec![Err(FetchError::from(
            std::io::Error::other("permission denied"),
        ))]));
        let shared: Arc<dyn AddressFetcher> = inner.clone();

        let error = shared.fetch().unwrap_err();

        assert!(matches!(error, FetchError::Io(_)));
        assert!(error.to_string().contains("permission denied"));
        // The queued error was consumed by the inner fetcher
        assert_eq!(inner.fetch().unwrap(), vec![]);
    }

    #[test]
    fn io_error_displays_source_message() {
        let error = FetchError::from(std::io::Error::other("netlink unavailable"));

        assert!(error.to_string().contains("Adapter enumeration failed"));
        assert!(error.to_string().contains("netlink unavailable"));
    }
}
