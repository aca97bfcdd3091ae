//! Secure secret storage
//!
//! [`SecretStore`] is the seam between token persistence and the platform
//! keychain. The real implementation lives in [`keychain`] behind the
//! `platform` feature; tests use `testing::MockKeychainProvider`.

#[cfg(feature = "platform")]
pub mod keychain;

use thiserror::Error;

#[cfg(feature = "platform")]
pub use keychain::KeychainProvider;

/// Keychain error types
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeychainError {
    /// Keychain access failed (permission denied, not available, etc.)
    #[error("Keychain access failed: {0}")]
    AccessFailed(String),

    /// Entry not found in keychain
    #[error("Entry not found")]
    NotFound,
}

/// Key/value secret storage scoped to one service namespace
pub trait SecretStore: Send + Sync {
    /// Read one secret.
    ///
    /// # Errors
    /// `KeychainError::NotFound` when the entry does not exist.
    fn get_secret(&self, key: &str) -> Result<String, KeychainError>;

    /// Write one secret, replacing any previous value.
    ///
    /// # Errors
    /// `KeychainError::AccessFailed` when the backend rejects the write.
    fn set_secret(&self, key: &str, value: &str) -> Result<(), KeychainError>;

    /// Remove one secret. Deleting a missing entry succeeds.
    ///
    /// # Errors
    /// `KeychainError::AccessFailed` when the backend rejects the delete.
    fn delete_secret(&self, key: &str) -> Result<(), KeychainError>;
}
