//! Platform network adapter fetcher implementations.
//!
//! # Platform Support
//!
//! - **All platforms**: [`IfAddrsFetcher`] enumerates interfaces through the
//!   `if-addrs` crate (`getifaddrs` on Unix, `GetAdaptersAddresses` on Windows).

mod interfaces;

pub use self::interfaces::IfAddrsFetcher;

/// The fetcher used by default on the current platform.
pub use self::interfaces::IfAddrsFetcher as PlatformFetcher;
