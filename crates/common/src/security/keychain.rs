//! Platform keychain provider
//!
//! Thin wrapper over `keyring` that stores secrets in macOS Keychain
//! Access, Windows Credential Manager, or the Linux Secret Service.
//!
//! ## Usage
//!
//! ```no_run
//! use stickyboard_common::security::{KeychainProvider, SecretStore};
//!
//! let keychain = KeychainProvider::new("pro.aedev.stickyboard");
//! keychain.set_secret("accessToken", "eyJ...")?;
//! assert_eq!(keychain.get_secret("accessToken")?, "eyJ...");
//! # Ok::<(), stickyboard_common::security::KeychainError>(())
//! ```

use keyring::Entry;
use tracing::debug;

use super::{KeychainError, SecretStore};

/// Secrets stored in the OS keychain under one service name
#[derive(Debug, Clone)]
pub struct KeychainProvider {
    service_name: String,
}

impl KeychainProvider {
    /// Create a provider for `service_name` (e.g. `pro.aedev.stickyboard`)
    pub fn new(service_name: impl Into<String>) -> Self {
        Self { service_name: service_name.into() }
    }

    /// Service namespace every entry is stored under
    #[must_use]
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    fn create_entry(&self, account: &str) -> Result<Entry, KeychainError> {
        Entry::new(&self.service_name, account).map_err(|e| {
            KeychainError::AccessFailed(format!("Failed to create keychain entry: {e}"))
        })
    }
}

impl SecretStore for KeychainProvider {
    fn get_secret(&self, key: &str) -> Result<String, KeychainError> {
        debug!(service = %self.service_name, key = %key, "Retrieving secret from keychain");

        let entry = self.create_entry(key)?;
        entry.get_password().map_err(|e| {
            if matches!(e, keyring::Error::NoEntry) {
                KeychainError::NotFound
            } else {
                KeychainError::AccessFailed(format!("Failed to retrieve secret for {key}: {e}"))
            }
        })
    }

    fn set_secret(&self, key: &str, value: &str) -> Result<(), KeychainError> {
        debug!(service = %self.service_name, key = %key, "Storing secret in keychain");

        let entry = self.create_entry(key)?;
        entry.set_password(value).map_err(|e| {
            KeychainError::AccessFailed(format!("Failed to store secret for {key}: {e}"))
        })
    }

    fn delete_secret(&self, key: &str) -> Result<(), KeychainError> {
        debug!(service = %self.service_name, key = %key, "Deleting secret from keychain");

        let entry = self.create_entry(key)?;
        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(KeychainError::AccessFailed(format!(
                "Failed to delete secret for {key}: {e}"
            ))),
        }
    }
}
