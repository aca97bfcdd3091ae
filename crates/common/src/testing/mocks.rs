//! Mock implementations of common traits

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::security::{KeychainError, SecretStore};

type StorageData = Arc<Mutex<HashMap<String, String>>>;

/// In-memory keychain for tests
///
/// Clones share the same storage, so a test can keep a handle and inspect
/// what a token store wrote.
///
/// # Examples
///
/// ```
/// use stickyboard_common::security::SecretStore;
/// use stickyboard_common::testing::MockKeychainProvider;
///
/// let keychain = MockKeychainProvider::new("test");
/// keychain.set_secret("accessToken", "a").unwrap();
/// assert!(keychain.secret_exists("accessToken"));
/// ```
#[derive(Debug, Clone)]
pub struct MockKeychainProvider {
    storage: StorageData,
    service_name: String,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
    rejected_keys: Arc<Mutex<HashSet<String>>>,
}

impl MockKeychainProvider {
    /// Create a new mock keychain provider with a service name for namespacing.
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            storage: Arc::new(Mutex::new(HashMap::new())),
            service_name: service_name.into(),
            fail_reads: Arc::new(AtomicBool::new(false)),
            fail_writes: Arc::new(AtomicBool::new(false)),
            rejected_keys: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Service namespace this mock pretends to use
    #[must_use]
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Determine whether a secret exists.
    #[must_use]
    pub fn secret_exists(&self, key: &str) -> bool {
        self.storage.lock().contains_key(key)
    }

    /// Raw stored value, bypassing failure injection
    #[must_use]
    pub fn peek(&self, key: &str) -> Option<String> {
        self.storage.lock().get(key).cloned()
    }

    /// Make every subsequent read fail with `AccessFailed`
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent write and delete fail with `AccessFailed`
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Make `set_secret` fail for `key` only; deletes still succeed
    pub fn reject_writes_to(&self, key: &str) {
        self.rejected_keys.lock().insert(key.to_string());
    }

    fn check(&self, flag: &AtomicBool) -> Result<(), KeychainError> {
        if flag.load(Ordering::SeqCst) {
            Err(KeychainError::AccessFailed(format!("{}: injected failure", self.service_name)))
        } else {
            Ok(())
        }
    }
}

impl SecretStore for MockKeychainProvider {
    fn get_secret(&self, key: &str) -> Result<String, KeychainError> {
        self.check(&self.fail_reads)?;
        self.storage.lock().get(key).cloned().ok_or(KeychainError::NotFound)
    }

    fn set_secret(&self, key: &str, value: &str) -> Result<(), KeychainError> {
        self.check(&self.fail_writes)?;
        if self.rejected_keys.lock().contains(key) {
            return Err(KeychainError::AccessFailed(format!("{key}: write rejected")));
        }
        self.storage.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete_secret(&self, key: &str) -> Result<(), KeychainError> {
        self.check(&self.fail_writes)?;
        self.storage.lock().remove(key);
        Ok(())
    }
}
