//! HTTP transport used by remote probes.
//!
//! This module provides types and traits for:
//! - Building HTTP requests ([`HttpRequest`])
//! - Handling HTTP responses ([`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`])
//! - Production HTTP client implementation ([`ReqwestClient`])
//! - Client construction settings ([`TransportOptions`])

mod client;
mod error;
mod http;


pub use client::{ReqwestClient, TransportOptions};
pub use error::HttpError;
pub use http::{HttpClient, HttpRequest, HttpResponse};
