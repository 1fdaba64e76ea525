//! Plain-data description of a resolver's probes and transport.

use std::net::IpAddr;
use std::sync::Arc;

use super::ProbeLists;
use crate::network::IpFamily;
use crate::probe::{LocalProbe, RemoteEndpoint, RemoteProbe, catalog};
use crate::transport::{HttpClient, TransportOptions};

/// Everything needed to build the probe lists of an [`IpResolver`].
///
/// [`Default`] uses the built-in catalogue and [`TransportOptions::default`].
///
/// [`IpResolver`]: super::IpResolver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverSettings {
    /// HTTP client settings. The request timeout doubles as the remote
    /// probe timeout.
    pub transport: TransportOptions,
    /// Remote endpoints answering with an IPv4 address, in priority order.
    pub public_ipv4: Vec<RemoteEndpoint>,
    /// Remote endpoints answering with an IPv6 address, in priority order.
    pub public_ipv6: Vec<RemoteEndpoint>,
    /// IPv4 targets for local probes.
    pub local_ipv4: Vec<IpAddr>,
    /// IPv6 targets for local probes.
    pub local_ipv6: Vec<IpAddr>,
    /// Port local probes "connect" to.
    pub local_port: u16,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            transport: TransportOptions::default(),
            public_ipv4: catalog::public_endpoints(IpFamily::V4),
            public_ipv6: catalog::public_endpoints(IpFamily::V6),
            local_ipv4: catalog::local_targets(IpFamily::V4),
            local_ipv6: catalog::local_targets(IpFamily::V6),
            local_port: LocalProbe::DEFAULT_PORT,
        }
    }
}

impl ResolverSettings {
    /// Builds the four probe lists, sharing `client` between remote probes.
    #[must_use]
    pub fn probe_lists<H>(&self, client: &H) -> ProbeLists<RemoteProbe<H>, LocalProbe>
    where
        H: HttpClient + Clone,
    {
        let remote = |endpoints: &[RemoteEndpoint]| {
            endpoints
                .iter()
                .map(|endpoint| {
                    Arc::new(
                        RemoteProbe::new(client.clone(), endpoint.clone())
                            .with_timeout(self.transport.timeout),
                    )
                })
                .collect()
        };
        let local = |targets: &[IpAddr]| {
            targets
                .iter()
                .map(|target| Arc::new(LocalProbe::with_port(*target, self.local_port)))
                .collect()
        };

        ProbeLists {
            public_ipv4: remote(&self.public_ipv4),
            public_ipv6: remote(&self.public_ipv6),
            local_ipv4: local(&self.local_ipv4),
            local_ipv6: local(&self.local_ipv6),
        }
    }
}
