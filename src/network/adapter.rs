//! Core network types for adapter representation.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// IP address family a lookup targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IpFamily {
    /// IPv4 addresses.
    V4,
    /// IPv6 addresses.
    V6,
}

impl IpFamily {
    /// Returns the family of `addr`.
    #[must_use]
    pub const fn of(addr: &IpAddr) -> Self {
        match addr {
            IpAddr::V4(_) => Self::V4,
            IpAddr::V6(_) => Self::V6,
        }
    }

    /// Returns the other family.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::V4 => Self::V6,
            Self::V6 => Self::V4,
        }
    }

    /// Returns true if `addr` belongs to this family.
    #[must_use]
    pub const fn matches(self, addr: &IpAddr) -> bool {
        matches!(
            (self, addr),
            (Self::V4, IpAddr::V4(_)) | (Self::V6, IpAddr::V6(_))
        )
    }

    /// Returns the unspecified (wildcard) address of this family.
    #[must_use]
    pub const fn unspecified(self) -> IpAddr {
        match self {
            Self::V4 => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            Self::V6 => IpAddr::V6(Ipv6Addr::UNSPECIFIED),
        }
    }
}

impl fmt::Display for IpFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4 => write!(f, "IPv4"),
            Self::V6 => write!(f, "IPv6"),
        }
    }
}

/// Network adapter classification.
///
/// Only the distinction the resolver acts on is modelled: loopback
/// adapters never contribute to address correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdapterKind {
    /// Loopback adapter (localhost).
    Loopback,
    /// Any adapter that can carry traffic off the host.
    Network,
}

impl AdapterKind {
    /// Returns true if this is a loopback adapter.
    #[must_use]
    pub const fn is_loopback(&self) -> bool {
        matches!(self, Self::Loopback)
    }
}

/// A snapshot of a single network adapter's addresses at a point in time.
///
/// Address order follows the platform's enumeration order, so the first
/// entry of each list is the adapter's primary address for that family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterSnapshot {
    /// The adapter name (e.g., "eth0", "Wi-Fi").
    pub name: String,
    /// The type of adapter.
    pub kind: AdapterKind,
    /// All IPv4 unicast addresses assigned to this adapter.
    pub ipv4_addresses: Vec<Ipv4Addr>,
    /// All IPv6 unicast addresses assigned to this adapter.
    pub ipv6_addresses: Vec<Ipv6Addr>,
}

impl AdapterSnapshot {
    /// Creates a new adapter snapshot.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        kind: AdapterKind,
        ipv4_addresses: Vec<Ipv4Addr>,
        ipv6_addresses: Vec<Ipv6Addr>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            ipv4_addresses,
            ipv6_addresses,
        }
    }

    /// Returns the first IPv4 address, if any.
    #[must_use]
    pub fn primary_ipv4(&self) -> Option<Ipv4Addr> {
        self.ipv4_addresses.first().copied()
    }

    /// Returns the first IPv6 address, if any.
    #[must_use]
    pub fn primary_ipv6(&self) -> Option<Ipv6Addr> {
        self.ipv6_addresses.first().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod ip_family {
        use super::*;

        #[test]
        fn opposite_swaps_family() {
            assert_eq!(IpFamily::V4.opposite(), IpFamily::V6);
            assert_eq!(IpFamily::V6.opposite(), IpFamily::V4);
        }

        #[test]
        fn matches_checks_address_family() {
            let v4: IpAddr = "10.0.0.1".parse().unwrap();
            let v6: IpAddr = "fe80::1".parse().unwrap();

            assert!(IpFamily::V4.matches(&v4));
            assert!(!IpFamily::V4.matches(&v6));
            assert!(IpFamily::V6.matches(&v6));
            assert!(!IpFamily::V6.matches(&v4));
        }

        #[test]
        fn unspecified_is_wildcard_of_family() {
            assert_eq!(IpFamily::V4.unspecified().to_string(), "0.0.0.0");
            assert_eq!(IpFamily::V6.unspecified().to_string(), "::");
        }

        #[test]
        fn display_formats_correctly() {
            assert_eq!(format!("{}", IpFamily::V4), "IPv4");
            assert_eq!(format!("{}", IpFamily::V6), "IPv6");
        }
    }

    mod adapter_snapshot {
        use super::*;

        #[test]
        fn primary_addresses_are_first_entries() {
            let snapshot = AdapterSnapshot::new(
                "eth0",
                AdapterKind::Network,
                vec!["10.0.0.2".parse().unwrap(), "10.0.0.3".parse().unwrap()],
                vec!["fe80::1".parse().unwrap(), "2001:db8::1".parse().unwrap()],
            );

            assert_eq!(snapshot.primary_ipv4(), Some("10.0.0.2".parse().unwrap()));
            assert_eq!(snapshot.primary_ipv6(), Some("fe80::1".parse().unwrap()));
        }

        #[test]
        fn primary_addresses_absent_when_empty() {
            let snapshot = AdapterSnapshot::new("eth0", AdapterKind::Network, vec![], vec![]);

            assert!(snapshot.primary_ipv4().is_none());
            assert!(snapshot.primary_ipv6().is_none());
        }

        #[test]
        fn loopback_kind_is_loopback() {
            assert!(AdapterKind::Loopback.is_loopback());
            assert!(!AdapterKind::Network.is_loopback());
        }
    }
}
