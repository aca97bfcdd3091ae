//! Access/refresh token persistence
//!
//! ```text
//! AuthManager (infra) ──► TokenStore ──► KeychainTokenStore ──► SecretStore
//!                                                                  │
//!                                        KeychainProvider / MockKeychainProvider
//! ```

pub mod token_store;
pub mod types;

pub use token_store::{KeychainTokenStore, TokenStore};
pub use types::TokenPair;
