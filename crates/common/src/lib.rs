//! Shared building blocks for StickyBoard crates.
//!
//! # Feature Tiers
//!
//! - default: token pair model, `TokenStore` / `SecretStore` seams and the
//!   keychain-backed token store
//! - `platform`: `KeychainProvider` backed by the OS keychain (`keyring`)
//! - `test-utils`: in-memory `MockKeychainProvider`

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod auth;
pub mod security;

// Testing utilities
// ---------------------------------------------------------------
#[cfg(any(feature = "test-utils", test))]
pub mod testing;

pub use auth::{KeychainTokenStore, TokenPair, TokenStore};
#[cfg(feature = "platform")]
pub use security::KeychainProvider;
pub use security::{KeychainError, SecretStore};
