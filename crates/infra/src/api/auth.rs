//! Session token ownership and the refresh protocol
//!
//! [`AuthManager`] is the only writer of the token pair. Mutations are
//! linearized by a write gate and mirrored to the [`TokenStore`] before the
//! gate is released. Refreshes are serialized by a separate async gate; a
//! caller whose rejected access token has already been replaced skips the
//! network call and reuses the refreshed pair.
//!
//! The write gate also holds a session generation. `update_tokens` and
//! `clear` start a new generation; a refresh only commits (or clears on
//! failure) if the generation it started under is still current, so a login
//! or logout that lands while a refresh is in flight is never overwritten.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use stickyboard_common::auth::{TokenPair, TokenStore};
use stickyboard_domain::AuthRefreshResponse;
use tracing::{debug, info, warn};

use super::errors::ApiError;

/// Capability to exchange a refresh token for a new pair
///
/// Implemented by `ApiClient`; injected per call so the manager never holds a
/// reference back to the client.
#[async_trait]
pub trait TokenRefresher: Send + Sync {
    /// Issue the refresh request.
    async fn refresh(&self, refresh_token: &str) -> Result<AuthRefreshResponse, ApiError>;
}

/// What started a refresh
#[derive(Debug)]
enum Trigger {
    /// Explicit caller request; always hits the network
    Explicit,
    /// A 401 for a request sent with this access token
    Rejected(Option<String>),
}

/// Single authority over the current token pair
///
/// Token persistence goes through the synchronous [`TokenStore`] while the
/// write gate is held. Keychain calls are short local IPC, so they run
/// inline on the calling task rather than on the blocking pool.
pub struct AuthManager {
    tokens: RwLock<TokenPair>,
    /// Write gate; the value is the current session generation
    session: Mutex<u64>,
    refresh_gate: Arc<tokio::sync::Mutex<()>>,
    store: Arc<dyn TokenStore>,
}

impl AuthManager {
    /// Load the persisted pair from `store`
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        let tokens = store.load();
        debug!(tokens = ?tokens, "Auth manager initialized");
        Self {
            tokens: RwLock::new(tokens),
            session: Mutex::new(0),
            refresh_gate: Arc::new(tokio::sync::Mutex::new(())),
            store,
        }
    }

    /// Access token to attach to the next request (empty counts as absent)
    #[must_use]
    pub fn current_access_token(&self) -> Option<String> {
        self.tokens.read().access_token().map(str::to_owned)
    }

    /// Snapshot of the in-memory pair
    #[must_use]
    pub fn tokens(&self) -> TokenPair {
        self.tokens.read().clone()
    }

    #[must_use]
    pub fn has_refresh_token(&self) -> bool {
        self.tokens.read().refresh_token().is_some()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.tokens.read().access_token().is_some()
    }

    /// Replace the pair and persist it, starting a new session
    ///
    /// A refresh already in flight will not commit over this pair. A
    /// persistence failure is logged; the in-memory pair is updated either
    /// way.
    pub fn update_tokens(&self, access: Option<String>, refresh: Option<String>) {
        let mut generation = self.session.lock();
        *generation += 1;
        self.store_pair(TokenPair::new(access, refresh));
    }

    /// Wipe the in-memory pair and the persisted copy, ending the session
    ///
    /// A refresh already in flight will not resurrect the cleared session.
    pub fn clear(&self) {
        let mut generation = self.session.lock();
        *generation += 1;
        self.erase_pair();
    }

    /// Run the refresh protocol
    ///
    /// Without a refresh token this is a no-op. On failure the tokens are
    /// cleared and the refresh error is returned. If the session was replaced
    /// or cleared while the call was in flight, its outcome is discarded.
    ///
    /// # Errors
    /// The refresher's error, or `ApiError::Cancelled` if the refresh task
    /// was aborted.
    pub async fn refresh_if_possible(
        self: &Arc<Self>,
        refresher: Arc<dyn TokenRefresher>,
    ) -> Result<(), ApiError> {
        self.run_refresh(Trigger::Explicit, refresher).await
    }

    /// Refresh after a 401 for a request that carried `rejected`
    pub(crate) async fn refresh_after_rejection(
        self: &Arc<Self>,
        rejected: Option<String>,
        refresher: Arc<dyn TokenRefresher>,
    ) -> Result<(), ApiError> {
        self.run_refresh(Trigger::Rejected(rejected), refresher).await
    }

    async fn run_refresh(
        self: &Arc<Self>,
        trigger: Trigger,
        refresher: Arc<dyn TokenRefresher>,
    ) -> Result<(), ApiError> {
        let gate = Arc::clone(&self.refresh_gate).lock_owned().await;

        let (generation, refresh_token) = {
            let generation = self.session.lock();
            let tokens = self.tokens.read();
            (*generation, tokens.refresh_token().map(str::to_owned))
        };
        let Some(refresh_token) = refresh_token else {
            debug!("No refresh token; skipping refresh");
            return Ok(());
        };

        if let Trigger::Rejected(rejected) = &trigger {
            if self.current_access_token() != *rejected {
                debug!("Access token already replaced; reusing refreshed session");
                return Ok(());
            }
        }

        // The task owns the gate, so a caller that stops waiting cannot
        // interrupt the exchange or its commit.
        let manager = Arc::clone(self);
        let task = tokio::spawn(async move {
            let _gate = gate;
            let outcome = refresher.refresh(&refresh_token).await;
            manager.finish_refresh(generation, outcome)
        });

        task.await.map_err(|e| {
            warn!(error = %e, "Refresh task did not complete");
            ApiError::Cancelled
        })?
    }

    /// Apply a refresh outcome if `generation` is still the current session
    fn finish_refresh(
        &self,
        generation: u64,
        outcome: Result<AuthRefreshResponse, ApiError>,
    ) -> Result<(), ApiError> {
        let current = self.session.lock();
        let superseded = *current != generation;

        match outcome {
            Ok(_) if superseded => {
                info!("Session changed during refresh; discarding refreshed tokens");
                Ok(())
            }
            Ok(response) => {
                self.store_pair(TokenPair::new(
                    Some(response.access_token),
                    Some(response.refresh_token),
                ));
                info!("Session refreshed");
                Ok(())
            }
            Err(e) => {
                if superseded {
                    warn!(error = %e, kind = %e.kind(), "Stale refresh failed; session kept");
                } else {
                    warn!(error = %e, kind = %e.kind(), "Token refresh failed; clearing session");
                    self.erase_pair();
                }
                Err(e)
            }
        }
    }

    /// Caller holds the write gate
    fn store_pair(&self, next: TokenPair) {
        *self.tokens.write() = next.clone();
        if let Err(e) = self.store.save(next.access.as_deref(), next.refresh.as_deref()) {
            warn!(error = %e, "Failed to persist tokens");
        }
        debug!(tokens = ?next, "Tokens updated");
    }

    /// Caller holds the write gate
    fn erase_pair(&self) {
        *self.tokens.write() = TokenPair::default();
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "Failed to clear persisted tokens");
        }
        info!("Session tokens cleared");
    }
}

impl fmt::Debug for AuthManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthManager").field("tokens", &*self.tokens.read()).finish_non_exhaustive()
    }
}
