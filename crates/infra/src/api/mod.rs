//! StickyBoard REST client core
//!
//! # Architecture
//!
//! - [`Endpoint`]: immutable description of one call
//! - [`ApiClient`]: request construction, envelope decoding, 401 retry
//! - [`AuthManager`]: token pair ownership and serialized refresh
//! - [`ApiError`]: closed error taxonomy
//! - [`with_timeout`]: caller deadlines that never cancel a token commit

pub mod auth;
pub mod client;
pub mod endpoint;
pub mod errors;
pub mod timeout;

pub use auth::{AuthManager, TokenRefresher};
pub use client::ApiClient;
pub use endpoint::Endpoint;
pub use errors::{ApiError, ApiErrorKind};
pub use timeout::with_timeout;
