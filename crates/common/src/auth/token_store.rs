//! Durable token persistence layered on a [`SecretStore`].

use parking_lot::Mutex;
use tracing::{debug, warn};

use super::types::TokenPair;
use crate::security::{KeychainError, SecretStore};

/// Keychain account holding the access token
pub const ACCESS_ACCOUNT: &str = "accessToken";
/// Keychain account holding the refresh token
pub const REFRESH_ACCOUNT: &str = "refreshToken";

/// Durable storage for the session's token pair
///
/// Calls are synchronous. Implementations serialize access internally so
/// concurrent callers in one process cannot interleave a save and a clear.
pub trait TokenStore: Send + Sync {
    /// Read the persisted pair. Unreadable slots come back as `None`.
    fn load(&self) -> TokenPair;

    /// Persist both slots. A `None` slot is erased, never written as `""`.
    ///
    /// # Errors
    /// Returns the first backend failure.
    fn save(&self, access: Option<&str>, refresh: Option<&str>) -> Result<(), KeychainError>;

    /// Erase both slots.
    ///
    /// # Errors
    /// Returns the first backend failure.
    fn clear(&self) -> Result<(), KeychainError>;
}

/// [`TokenStore`] writing the `accessToken` / `refreshToken` entries of a
/// [`SecretStore`]
pub struct KeychainTokenStore<S> {
    secrets: S,
    lock: Mutex<()>,
}

impl<S: SecretStore> KeychainTokenStore<S> {
    /// Wrap a secret store
    pub const fn new(secrets: S) -> Self {
        Self { secrets, lock: Mutex::new(()) }
    }

    /// Underlying secret store
    pub const fn secrets(&self) -> &S {
        &self.secrets
    }

    fn read_slot(&self, account: &str) -> Option<String> {
        match self.secrets.get_secret(account) {
            Ok(value) if !value.is_empty() => Some(value),
            Ok(_) | Err(KeychainError::NotFound) => None,
            Err(e) => {
                warn!(account, error = %e, "Failed to read token slot; treating as absent");
                None
            }
        }
    }

    fn write_slot(&self, account: &str, value: Option<&str>) -> Result<(), KeychainError> {
        match value {
            Some(value) if !value.is_empty() => self.secrets.set_secret(account, value),
            _ => self.secrets.delete_secret(account),
        }
    }
}

impl<S: SecretStore> TokenStore for KeychainTokenStore<S> {
    fn load(&self) -> TokenPair {
        let _guard = self.lock.lock();
        let pair = TokenPair::new(self.read_slot(ACCESS_ACCOUNT), self.read_slot(REFRESH_ACCOUNT));
        debug!(tokens = ?pair, "Loaded persisted tokens");
        pair
    }

    fn save(&self, access: Option<&str>, refresh: Option<&str>) -> Result<(), KeychainError> {
        let _guard = self.lock.lock();
        let written = self
            .write_slot(ACCESS_ACCOUNT, access)
            .and_then(|()| self.write_slot(REFRESH_ACCOUNT, refresh));

        if let Err(e) = &written {
            // Never leave one session's access token beside another's refresh token.
            warn!(error = %e, "Token save failed part-way; erasing both slots");
            let _ = self.secrets.delete_secret(ACCESS_ACCOUNT);
            let _ = self.secrets.delete_secret(REFRESH_ACCOUNT);
        }
        written
    }

    fn clear(&self) -> Result<(), KeychainError> {
        let _guard = self.lock.lock();
        let access = self.secrets.delete_secret(ACCESS_ACCOUNT);
        let refresh = self.secrets.delete_secret(REFRESH_ACCOUNT);
        access.and(refresh)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;
    use crate::testing::MockKeychainProvider;

    fn store() -> KeychainTokenStore<MockKeychainProvider> {
        KeychainTokenStore::new(MockKeychainProvider::new(format!(
            "StickyBoardTest.{}",
            uuid::Uuid::new_v4()
        )))
    }

    #[test]
    fn test_save_then_load() {
        let store = store();
        store.save(Some("a1"), Some("r1")).unwrap();

        let pair = store.load();
        assert_eq!(pair.access.as_deref(), Some("a1"));
        assert_eq!(pair.refresh.as_deref(), Some("r1"));
    }

    #[test]
    fn test_none_slot_erases_instead_of_writing_empty() {
        let store = store();
        store.save(Some("a1"), Some("r1")).unwrap();
        store.save(Some("a2"), None).unwrap();

        assert!(!store.secrets().secret_exists(REFRESH_ACCOUNT));
        assert_eq!(store.load(), TokenPair::new(Some("a2".into()), None));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let store = store();
        store.save(Some("a"), Some("r")).unwrap();
        store.clear().unwrap();
        store.clear().unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_read_failure_is_treated_as_absent() {
        let store = store();
        store.save(Some("a"), Some("r")).unwrap();
        store.secrets().fail_reads(true);
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_partial_save_erases_both_slots() {
        let store = store();
        store.save(Some("old-a"), Some("old-r")).unwrap();
        store.secrets().reject_writes_to(REFRESH_ACCOUNT);

        let result = store.save(Some("new-a"), Some("new-r"));

        assert!(matches!(result, Err(KeychainError::AccessFailed(_))));
        assert!(!store.secrets().secret_exists(ACCESS_ACCOUNT));
        assert!(!store.secrets().secret_exists(REFRESH_ACCOUNT));
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_concurrent_saves_keep_pairs_whole() {
        let store = Arc::new(store());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    let access = format!("access-{i}");
                    let refresh = format!("refresh-{i}");
                    store.save(Some(&access), Some(&refresh)).unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let pair = store.load();
        let access = pair.access.unwrap();
        let refresh = pair.refresh.unwrap();
        assert_eq!(access.trim_start_matches("access-"), refresh.trim_start_matches("refresh-"));
    }
}
