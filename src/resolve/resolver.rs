//! The public resolver facade.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::{RaceMode, ResolveRequest, ResolverSettings, Scope, race};
use crate::network::platform::PlatformFetcher;
use crate::network::{AddressFetcher, CorrelationTable, IpFamily};
use crate::probe::{LocalProbe, Probe, RemoteProbe};
use crate::transport::{HttpError, ReqwestClient};

/// The four ordered probe lists a resolver races over.
#[derive(Debug)]
pub struct ProbeLists<R, L> {
    /// Remote probes answering with an IPv4 address.
    pub public_ipv4: Vec<Arc<R>>,
    /// Remote probes answering with an IPv6 address.
    pub public_ipv6: Vec<Arc<R>>,
    /// Local probes for IPv4.
    pub local_ipv4: Vec<Arc<L>>,
    /// Local probes for IPv6.
    pub local_ipv6: Vec<Arc<L>>,
}

impl<R, L> ProbeLists<R, L> {
    fn public(&self, family: IpFamily) -> &[Arc<R>] {
        match family {
            IpFamily::V4 => &self.public_ipv4,
            IpFamily::V6 => &self.public_ipv6,
        }
    }

    fn local(&self, family: IpFamily) -> &[Arc<L>] {
        match family {
            IpFamily::V4 => &self.local_ipv4,
            IpFamily::V6 => &self.local_ipv6,
        }
    }
}

impl<R, L> Default for ProbeLists<R, L> {
    fn default() -> Self {
        Self {
            public_ipv4: Vec::new(),
            public_ipv6: Vec::new(),
            local_ipv4: Vec::new(),
            local_ipv6: Vec::new(),
        }
    }
}

impl<R, L> Clone for ProbeLists<R, L> {
    fn clone(&self) -> Self {
        Self {
            public_ipv4: self.public_ipv4.clone(),
            public_ipv6: self.public_ipv6.clone(),
            local_ipv4: self.local_ipv4.clone(),
            local_ipv6: self.local_ipv6.clone(),
        }
    }
}

/// Discovers public and local IP addresses by racing probes.
///
/// Every lookup returns `Option<String>`: `None` means nothing was found
/// (or the lookup was cancelled), never an error.
///
/// Local lookups fall through three tiers:
/// 1. race the family's local probes
/// 2. resolve the other family (probes, then its first adapter address)
///    and map the answer through the adapter correlation table
/// 3. the family's first adapter address from the table
///
/// The correlation table is built lazily, at most once per lookup.
///
/// # Example
///
/// ```no_run
/// use ipkit::resolve::IpResolver;
/// use tokio_util::sync::CancellationToken;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let resolver = IpResolver::with_defaults()?;
/// let cancel = CancellationToken::new();
///
/// if let Some(address) = resolver.public_ipv4(&cancel).await {
///     println!("public IPv4: {address}");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct IpResolver<R = RemoteProbe<ReqwestClient>, L = LocalProbe, F = PlatformFetcher> {
    probes: ProbeLists<R, L>,
    fetcher: F,
}

impl IpResolver {
    /// Creates a resolver with the built-in catalogue, a default
    /// [`ReqwestClient`] and the platform adapter fetcher.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Build`] if the HTTP client cannot be built.
    pub fn with_defaults() -> Result<Self, HttpError> {
        Self::from_settings(&ResolverSettings::default())
    }

    /// Creates a resolver from `settings`, sharing one [`ReqwestClient`]
    /// between all remote probes.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Build`] if the HTTP client cannot be built.
    pub fn from_settings(settings: &ResolverSettings) -> Result<Self, HttpError> {
        let client = ReqwestClient::with_options(&settings.transport)?;
        Ok(Self::new(
            settings.probe_lists(&client),
            PlatformFetcher::new(),
        ))
    }
}

impl<R, L, F> IpResolver<R, L, F>
where
    R: Probe + 'static,
    L: Probe + 'static,
    F: AddressFetcher,
{
    /// Creates a resolver from explicit probe lists and adapter fetcher.
    #[must_use]
    pub const fn new(probes: ProbeLists<R, L>, fetcher: F) -> Self {
        Self { probes, fetcher }
    }

    /// Returns the probe lists.
    #[must_use]
    pub const fn probes(&self) -> &ProbeLists<R, L> {
        &self.probes
    }

    /// Public IPv4 address, probes raced concurrently.
    pub async fn public_ipv4(&self, cancel: &CancellationToken) -> Option<String> {
        self.resolve(ResolveRequest::new(Scope::Public, IpFamily::V4), cancel)
            .await
    }

    /// Public IPv6 address, probes raced concurrently.
    pub async fn public_ipv6(&self, cancel: &CancellationToken) -> Option<String> {
        self.resolve(ResolveRequest::new(Scope::Public, IpFamily::V6), cancel)
            .await
    }

    /// Local IPv4 address, probes raced concurrently.
    pub async fn local_ipv4(&self, cancel: &CancellationToken) -> Option<String> {
        self.resolve(ResolveRequest::new(Scope::Local, IpFamily::V4), cancel)
            .await
    }

    /// Local IPv6 address, probes raced concurrently.
    pub async fn local_ipv6(&self, cancel: &CancellationToken) -> Option<String> {
        self.resolve(ResolveRequest::new(Scope::Local, IpFamily::V6), cancel)
            .await
    }

    /// Runs one lookup.
    ///
    /// Returns `None` once `cancel` fires, whatever tier the lookup is in.
    pub async fn resolve(
        &self,
        request: ResolveRequest,
        cancel: &CancellationToken,
    ) -> Option<String> {
        let address = match request.scope {
            Scope::Public => {
                race(self.probes.public(request.family), request.mode, cancel).await
            }
            Scope::Local => {
                let mut table = None;
                self.resolve_local(request, cancel, &mut table).await
            }
        };

        match &address {
            Some(address) => tracing::info!("{request} address: {address}"),
            None if cancel.is_cancelled() => tracing::debug!("{request} lookup cancelled"),
            None => tracing::info!("{request} address not found"),
        }

        address
    }

    async fn resolve_local(
        &self,
        request: ResolveRequest,
        cancel: &CancellationToken,
        table: &mut Option<CorrelationTable>,
    ) -> Option<String> {
        let family = request.family;

        if let Some(address) = race(self.probes.local(family), request.mode, cancel).await {
            return Some(address);
        }

        if request.cross_family_fallback {
            let opposite = family.opposite();
            if let Some(other) = self.local_direct(opposite, request.mode, cancel, table).await {
                if let Some(address) = self.table(table).counterpart(family, &other) {
                    tracing::info!("{family} derived from {opposite} address {other}");
                    return Some(address.to_string());
                }
                tracing::debug!("No {family} address paired with {other}");
            }
        }

        self.adapter_address(family, cancel, table)
    }

    /// Tiers 1 and 3 only.
    async fn local_direct(
        &self,
        family: IpFamily,
        mode: RaceMode,
        cancel: &CancellationToken,
        table: &mut Option<CorrelationTable>,
    ) -> Option<String> {
        match race(self.probes.local(family), mode, cancel).await {
            Some(address) => Some(address),
            None => self.adapter_address(family, cancel, table),
        }
    }

    fn adapter_address(
        &self,
        family: IpFamily,
        cancel: &CancellationToken,
        table: &mut Option<CorrelationTable>,
    ) -> Option<String> {
        if cancel.is_cancelled() {
            return None;
        }

        let address = self.table(table).first(family).map(str::to_string);
        if let Some(address) = &address {
            tracing::info!("{family} {address} taken from adapter enumeration");
        }
        address
    }

    fn table<'t>(&self, slot: &'t mut Option<CorrelationTable>) -> &'t CorrelationTable {
        slot.get_or_insert_with(|| CorrelationTable::build(&self.fetcher))
    }

    /// Blocking [`public_ipv4`](Self::public_ipv4), probes tried in order.
    #[must_use]
    pub fn public_ipv4_blocking(&self) -> Option<String> {
        self.resolve_blocking(Scope::Public, IpFamily::V4)
    }

    /// Blocking [`public_ipv6`](Self::public_ipv6), probes tried in order.
    #[must_use]
    pub fn public_ipv6_blocking(&self) -> Option<String> {
        self.resolve_blocking(Scope::Public, IpFamily::V6)
    }

    /// Blocking [`local_ipv4`](Self::local_ipv4), probes tried in order.
    #[must_use]
    pub fn local_ipv4_blocking(&self) -> Option<String> {
        self.resolve_blocking(Scope::Local, IpFamily::V4)
    }

    /// Blocking [`local_ipv6`](Self::local_ipv6), probes tried in order.
    #[must_use]
    pub fn local_ipv6_blocking(&self) -> Option<String> {
        self.resolve_blocking(Scope::Local, IpFamily::V6)
    }

    /// Drives a sequential lookup on a private current-thread runtime.
    ///
    /// Inside an existing runtime the lookup moves to a scoped thread,
    /// since a runtime cannot block on another from its own threads.
    fn resolve_blocking(&self, scope: Scope, family: IpFamily) -> Option<String> {
        if tokio::runtime::Handle::try_current().is_err() {
            return self.block_on_private_runtime(scope, family);
        }

        std::thread::scope(|s| {
            s.spawn(|| self.block_on_private_runtime(scope, family))
                .join()
                .unwrap_or_else(|_| {
                    tracing::error!("Blocking {scope:?} {family} lookup thread panicked");
                    None
                })
        })
    }

    fn block_on_private_runtime(&self, scope: Scope, family: IpFamily) -> Option<String> {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(e) => {
                tracing::error!("Failed to create runtime for blocking lookup: {e}");
                return None;
            }
        };

        let request = ResolveRequest::new(scope, family).with_mode(RaceMode::Sequential);
        runtime.block_on(self.resolve(request, &CancellationToken::new()))
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
