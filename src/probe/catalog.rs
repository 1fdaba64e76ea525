//! Built-in probe targets.
//!
//! Lists are in priority order: sequential lookups try them front to back,
//! concurrent lookups start them all at once.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use url::Url;

use super::{Extractor, RemoteEndpoint};
use crate::network::IpFamily;

/// Public IPv4 echo services.
pub const PUBLIC_IPV4_ENDPOINTS: &[(&str, Extractor)] = &[
    ("http://checkip.amazonaws.com/", Extractor::PlainText),
    ("http://ipv4.icanhazip.com/", Extractor::PlainText),
    ("http://api.ipify.org", Extractor::PlainText),
    ("http://api4.my-ip.io/ip.txt", Extractor::PlainText),
    ("http://wtfismyip.com/text", Extractor::PlainText),
    ("http://checkip.dyndns.com/", Extractor::DynDns),
];

/// Public IPv6 echo services.
pub const PUBLIC_IPV6_ENDPOINTS: &[(&str, Extractor)] = &[
    ("http://ipv6.icanhazip.com/", Extractor::PlainText),
    ("http://api6.ipify.org", Extractor::PlainText),
    ("http://api6.my-ip.io/ip.txt", Extractor::PlainText),
];

/// Google and Cloudflare public resolvers, IPv4.
pub const LOCAL_IPV4_TARGETS: [Ipv4Addr; 4] = [
    Ipv4Addr::new(8, 8, 8, 8),
    Ipv4Addr::new(8, 8, 4, 4),
    Ipv4Addr::new(1, 1, 1, 1),
    Ipv4Addr::new(1, 0, 0, 1),
];

/// Google and Cloudflare public resolvers, IPv6.
pub const LOCAL_IPV6_TARGETS: [Ipv6Addr; 4] = [
    Ipv6Addr::new(0x2001, 0x4860, 0x4860, 0, 0, 0, 0, 0x8888),
    Ipv6Addr::new(0x2001, 0x4860, 0x4860, 0, 0, 0, 0, 0x8844),
    Ipv6Addr::new(0x2606, 0x4700, 0x4700, 0, 0, 0, 0, 0x1111),
    Ipv6Addr::new(0x2606, 0x4700, 0x4700, 0, 0, 0, 0, 0x1001),
];

/// Default remote endpoints for `family`.
#[must_use]
pub fn public_endpoints(family: IpFamily) -> Vec<RemoteEndpoint> {
    let table = match family {
        IpFamily::V4 => PUBLIC_IPV4_ENDPOINTS,
        IpFamily::V6 => PUBLIC_IPV6_ENDPOINTS,
    };

    table
        .iter()
        .filter_map(|(url, extractor)| {
            Url::parse(url)
                .ok()
                .map(|url| RemoteEndpoint::new(url, *extractor))
        })
        .collect()
}

/// Default local probe targets for `family`.
#[must_use]
pub fn local_targets(family: IpFamily) -> Vec<IpAddr> {
    match family {
        IpFamily::V4 => LOCAL_IPV4_TARGETS.iter().copied().map(IpAddr::V4).collect(),
        IpFamily::V6 => LOCAL_IPV6_TARGETS.iter().copied().map(IpAddr::V6).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_builtin_endpoint_parses() {
        assert_eq!(public_endpoints(IpFamily::V4).len(), PUBLIC_IPV4_ENDPOINTS.len());
        assert_eq!(public_endpoints(IpFamily::V6).len(), PUBLIC_IPV6_ENDPOINTS.len());
    }

    #[test]
    fn amazon_is_first_ipv4_endpoint() {
        let endpoints = public_endpoints(IpFamily::V4);

        assert_eq!(endpoints[0].url.as_str(), "http://checkip.amazonaws.com/");
    }

    #[test]
    fn only_dyndns_needs_markup_extraction() {
        let markup: Vec<_> = public_endpoints(IpFamily::V4)
            .into_iter()
            .filter(|e| e.extractor == Extractor::DynDns)
            .collect();

        assert_eq!(markup.len(), 1);
        assert_eq!(markup[0].url.host_str(), Some("checkip.dyndns.com"));
        assert!(
            public_endpoints(IpFamily::V6)
                .iter()
                .all(|e| e.extractor == Extractor::PlainText)
        );
    }

    #[test]
    fn local_targets_match_family() {
        for family in [IpFamily::V4, IpFamily::V6] {
            let targets = local_targets(family);
            assert_eq!(targets.len(), 4);
            assert!(targets.iter().all(|t| family.matches(t)));
        }
    }

    #[test]
    fn ipv6_targets_are_public_resolvers() {
        let targets: Vec<String> = local_targets(IpFamily::V6).iter().map(ToString::to_string).collect();

        assert_eq!(
            targets,
            [
                "2001:4860:4860::8888",
                "2001:4860:4860::8844",
                "2606:4700:4700::1111",
                "2606:4700:4700::1001"
            ]
        );
    }
}
