//! ipkit: public and local IP address discovery
//!
//! A library for learning a host's public IPv4/IPv6 addresses from
//! IP-echo services and its local addresses from the OS routing table,
//! by racing independent probes and taking the first answer.

pub mod config;
pub mod network;
pub mod probe;
pub mod resolve;
pub mod transport;
