//! Race-based address resolution.
//!
//! This module provides:
//! - The race primitive over an ordered probe list ([`race`])
//! - Lookup descriptions ([`ResolveRequest`], [`Scope`], [`RaceMode`])
//! - The resolver facade with its local fallback tiers ([`IpResolver`])
//! - Probe list construction from plain settings ([`ResolverSettings`])

mod race;
mod request;
mod resolver;
mod settings;

#[cfg(test)]
mod test_fixtures;

pub use race::race;
pub use request::{RaceMode, ResolveRequest, Scope};
pub use resolver::{IpResolver, ProbeLists};
pub use settings::ResolverSettings;
