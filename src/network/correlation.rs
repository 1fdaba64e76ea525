//! Per-query pairing of each adapter's IPv4 and IPv6 addresses.

use std::collections::HashMap;

use super::{AdapterSnapshot, AddressFetcher, IpFamily};

/// Bidirectional IPv4 ↔ IPv6 lookup built from one adapter snapshot.
///
/// Each non-loopback adapter contributes its first IPv4 and first IPv6
/// address as a pair. A missing side is left out of the mapping it would
/// have keyed, so an IPv4-only adapter still appears in [`all_ipv4`] but
/// never in [`all_ipv6`]. Duplicate keys follow last-write-wins.
///
/// The table is immutable once built and is meant to live for a single
/// local-address query.
///
/// [`all_ipv4`]: Self::all_ipv4
/// [`all_ipv6`]: Self::all_ipv6
#[derive(Debug, Clone, Default)]
pub struct CorrelationTable {
    four_to_six: HashMap<String, Option<String>>,
    six_to_four: HashMap<String, Option<String>>,
    ipv4_order: Vec<String>,
    ipv6_order: Vec<String>,
    adapters: Vec<AdapterSnapshot>,
}

impl CorrelationTable {
    /// Builds a table from a live adapter enumeration.
    ///
    /// An enumeration failure is logged and produces an empty table;
    /// callers treat that the same as "nothing found".
    pub fn build<F: AddressFetcher + ?Sized>(fetcher: &F) -> Self {
        match fetcher.fetch() {
            Ok(adapters) => {
                let table = Self::from_adapters(adapters);
                tracing::debug!(
                    ipv4 = table.ipv4_order.len(),
                    ipv6 = table.ipv6_order.len(),
                    "Built address correlation table"
                );
                table
            }
            Err(e) => {
                tracing::warn!("Adapter enumeration unavailable: {e}");
                Self::default()
            }
        }
    }

    /// Builds a table from an already enumerated adapter list.
    ///
    /// Loopback adapters are skipped but kept in [`adapters`](Self::adapters).
    #[must_use]
    pub fn from_adapters(adapters: Vec<AdapterSnapshot>) -> Self {
        let mut table = Self::default();

        for adapter in adapters.iter().filter(|a| !a.kind.is_loopback()) {
            let ipv4 = adapter.primary_ipv4().map(|a| a.to_string());
            let ipv6 = adapter.primary_ipv6().map(|a| a.to_string());
            table.insert(ipv4, ipv6);
        }

        table.adapters = adapters;
        table
    }

    fn insert(&mut self, ipv4: Option<String>, ipv6: Option<String>) {
        if let Some(ref v4) = ipv4 {
            if self
                .four_to_six
                .insert(v4.clone(), ipv6.clone())
                .is_none()
            {
                self.ipv4_order.push(v4.clone());
            }
        }

        if let Some(v6) = ipv6 {
            if self.six_to_four.insert(v6.clone(), ipv4).is_none() {
                self.ipv6_order.push(v6);
            }
        }
    }

    /// Returns the IPv4 address paired with `ipv6`, if any.
    #[must_use]
    pub fn ipv4_for(&self, ipv6: &str) -> Option<&str> {
        self.six_to_four.get(ipv6)?.as_deref()
    }

    /// Returns the IPv6 address paired with `ipv4`, if any.
    #[must_use]
    pub fn ipv6_for(&self, ipv4: &str) -> Option<&str> {
        self.four_to_six.get(ipv4)?.as_deref()
    }

    /// Returns the `family` address paired with `address` (which belongs to
    /// the opposite family).
    #[must_use]
    pub fn counterpart(&self, family: IpFamily, address: &str) -> Option<&str> {
        match family {
            IpFamily::V4 => self.ipv4_for(address),
            IpFamily::V6 => self.ipv6_for(address),
        }
    }

    /// All known IPv4 addresses, in first-insertion order.
    #[must_use]
    pub fn all_ipv4(&self) -> &[String] {
        &self.ipv4_order
    }

    /// All known IPv6 addresses, in first-insertion order.
    #[must_use]
    pub fn all_ipv6(&self) -> &[String] {
        &self.ipv6_order
    }

    /// The first known address of `family`.
    #[must_use]
    pub fn first(&self, family: IpFamily) -> Option<&str> {
        let addresses = match family {
            IpFamily::V4 => &self.ipv4_order,
            IpFamily::V6 => &self.ipv6_order,
        };
        addresses.first().map(String::as_str)
    }

    /// The raw adapter list the table was built from.
    #[must_use]
    pub fn adapters(&self) -> &[AdapterSnapshot] {
        &self.adapters
    }

    /// Returns true if no addresses of either family are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ipv4_order.is_empty() && self.ipv6_order.is_empty()
    }
}
