//! Probes that ask the OS which local address routes toward a target.

use std::net::{IpAddr, SocketAddr};

use tokio::net::UdpSocket;
use tokio_util::sync::CancellationToken;

use super::{Probe, ProbeError, ProbeOutcome};
use crate::network::IpFamily;

/// Probe that discovers the outbound local address for one family.
///
/// A UDP socket is bound to the family's wildcard address and "connected"
/// to `target`. Connecting a datagram socket sends nothing; it only makes
/// the OS choose a route and therefore a local interface address, which
/// is then read back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalProbe {
    target: SocketAddr,
    label: String,
}

impl LocalProbe {
    /// Port used for interface selection. Never receives traffic.
    pub const DEFAULT_PORT: u16 = 65530;

    /// Creates a probe toward `target` on [`Self::DEFAULT_PORT`].
    #[must_use]
    pub fn new(target: IpAddr) -> Self {
        Self::with_port(target, Self::DEFAULT_PORT)
    }

    /// Creates a probe toward `target:port`.
    #[must_use]
    pub fn with_port(target: IpAddr, port: u16) -> Self {
        let target = SocketAddr::new(target, port);
        Self {
            target,
            label: target.to_string(),
        }
    }

    /// Returns the family this probe discovers.
    #[must_use]
    pub const fn family(&self) -> IpFamily {
        IpFamily::of(&self.target.ip())
    }

    async fn bound_address(&self) -> Result<IpAddr, ProbeError> {
        let family = self.family();
        let socket = UdpSocket::bind(SocketAddr::new(family.unspecified(), 0)).await?;
        socket.connect(self.target).await?;

        let local = socket.local_addr()?.ip();
        if local.is_unspecified() || !family.matches(&local) {
            return Err(ProbeError::UnusableLocalAddress(local));
        }

        Ok(local)
    }
}

impl Probe for LocalProbe {
    fn target(&self) -> &str {
        &self.label
    }

    async fn probe(&self, cancel: CancellationToken) -> ProbeOutcome {
        let result = tokio::select! {
            biased;
            () = cancel.cancelled() => Err(ProbeError::Cancelled),
            result = self.bound_address() => result.map(|addr| addr.to_string()),
        };

        ProbeOutcome::from_result(self.target(), result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    #[test]
    fn family_follows_target_address() {
        assert_eq!(LocalProbe::new(IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8))).family(), IpFamily::V4);
        assert_eq!(
            LocalProbe::new("2001:4860:4860::8888".parse().unwrap()).family(),
            IpFamily::V6
        );
    }

    #[test]
    fn target_includes_port() {
        let v4 = LocalProbe::new(IpAddr::V4(Ipv4Addr::new(1, 1, 1, 1)));
        let v6 = LocalProbe::with_port(IpAddr::V6(Ipv6Addr::LOCALHOST), 53);

        assert_eq!(v4.target(), "1.1.1.1:65530");
        assert_eq!(v6.target(), "[::1]:53");
    }

    #[tokio::test]
    async fn loopback_target_reports_loopback_source() {
        let probe = LocalProbe::new(IpAddr::V4(Ipv4Addr::LOCALHOST));

        let outcome = probe.probe(CancellationToken::new()).await;

        assert_eq!(outcome, ProbeOutcome::Success("127.0.0.1".to_string()));
    }

    #[tokio::test]
    async fn unroutable_target_is_failure_or_family_address() {
        // Hosts without an IPv6 stack fail; hosts with one report an IPv6 source
        let probe = LocalProbe::new(IpAddr::V6(Ipv6Addr::LOCALHOST));

        match probe.probe(CancellationToken::new()).await {
            ProbeOutcome::Success(address) => {
                assert!(address.parse::<Ipv6Addr>().is_ok(), "got {address}");
            }
            ProbeOutcome::Failure => {}
        }
    }

    #[tokio::test]
    async fn cancelled_probe_is_failure() {
        let probe = LocalProbe::new(IpAddr::V4(Ipv4Addr::LOCALHOST));
        let cancel = CancellationToken::new();
        cancel.cancel();

        assert_eq!(probe.probe(cancel).await, ProbeOutcome::Failure);
    }

    #[test]
    fn probe_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LocalProbe>();
    }
}
