//! HTTP transport
//!
//! [`HttpClient`] is the only place the crate talks to `reqwest` directly.

pub mod client;
pub mod error;

pub use client::{HttpClient, HttpClientBuilder, RetryPolicy};
pub use error::TransportError;
