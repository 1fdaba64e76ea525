//! Network layer for adapter information and address correlation.
//!
//! This module provides types and traits for:
//! - Representing network adapter snapshots ([`AdapterSnapshot`])
//! - IP family selection ([`IpFamily`])
//! - Fetching adapter information ([`AddressFetcher`])
//! - Pairing adapter addresses across families ([`CorrelationTable`])
//! - Platform implementations ([`platform`])

mod adapter;
mod correlation;
mod fetcher;
pub mod platform;

pub use adapter::{AdapterKind, AdapterSnapshot, IpFamily};
pub use correlation::CorrelationTable;
pub use fetcher::{AddressFetcher, FetchError};
