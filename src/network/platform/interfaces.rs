//! Cross-platform adapter fetching using the `if-addrs` crate.

use std::net::IpAddr;

use crate::network::{AdapterKind, AdapterSnapshot, AddressFetcher, FetchError};

/// [`AddressFetcher`] backed by [`if_addrs::get_if_addrs`].
///
/// The OS reports one entry per (interface, address) pair; entries are
/// grouped by interface name into [`AdapterSnapshot`]s, keeping both the
/// interface order and the per-interface address order.
///
/// # Example
///
/// ```no_run
/// use ipkit::network::{AddressFetcher, platform::IfAddrsFetcher};
///
/// let fetcher = IfAddrsFetcher::new();
/// let adapters = fetcher.fetch().expect("Failed to fetch adapters");
///
/// for adapter in adapters {
///     println!("{}: {:?}", adapter.name, adapter.ipv4_addresses);
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct IfAddrsFetcher;

impl IfAddrsFetcher {
    /// Creates a new adapter fetcher.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl AddressFetcher for IfAddrsFetcher {
    fn fetch(&self) -> Result<Vec<AdapterSnapshot>, FetchError> {
        let interfaces = if_addrs::get_if_addrs()?;

        Ok(group_by_adapter(interfaces.iter().map(|iface| {
            (iface.name.as_str(), iface.is_loopback(), iface.ip())
        })))
    }
}

/// Folds `(name, is_loopback, address)` entries into one snapshot per name.
fn group_by_adapter<'a>(
    entries: impl IntoIterator<Item = (&'a str, bool, IpAddr)>,
) -> Vec<AdapterSnapshot> {
    let mut adapters: Vec<AdapterSnapshot> = Vec::new();

    for (name, loopback, addr) in entries {
        let index = if let Some(index) = adapters.iter().position(|a| a.name == name) {
            index
        } else {
            let kind = if loopback {
                AdapterKind::Loopback
            } else {
                AdapterKind::Network
            };
            adapters.push(AdapterSnapshot::new(name, kind, vec![], vec![]));
            adapters.len() - 1
        };

        let adapter = &mut adapters[index];
        // One loopback address marks the whole adapter
        if loopback {
            adapter.kind = AdapterKind::Loopback;
        }
        match addr {
            IpAddr::V4(v4) => adapter.ipv4_addresses.push(v4),
            IpAddr::V6(v6) => adapter.ipv6_addresses.push(v6),
        }
    }

    adapters
}
