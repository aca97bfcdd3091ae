//! # StickyBoard Infrastructure
//!
//! Networking side of the StickyBoard client.
//!
//! This crate contains:
//! - HTTP transport over `reqwest`
//! - The authenticated API client, token refresh and error taxonomy
//! - Typed services for auth, boards, tabs, sections, cards and users
//! - Configuration loading and tracing setup
//! - [`AppContext`], the explicitly wired client stack
//!
//! ## Architecture
//! - Wire types come from `stickyboard-domain`
//! - Token persistence comes from `stickyboard-common`
//! - All I/O lives here

pub mod api;
pub mod config;
pub mod context;
pub mod http;
pub mod logging;
pub mod services;

// Re-export commonly used items
pub use api::{with_timeout, ApiClient, ApiError, ApiErrorKind, AuthManager, Endpoint};
pub use context::AppContext;
pub use http::{HttpClient, RetryPolicy, TransportError};
pub use services::*;
