//! Application context
//!
//! Explicitly constructed container wiring configuration, token storage,
//! the API client and every typed service. Consumers receive an
//! `Arc<AppContext>` (or clone the services they need) instead of reaching
//! for global state.

use std::sync::Arc;
use std::time::Duration;

use stickyboard_common::security::KeychainProvider;
use stickyboard_common::{KeychainTokenStore, TokenStore};
use stickyboard_domain::constants::{BOOTSTRAP_ME_TIMEOUT_SECS, BOOTSTRAP_REFRESH_TIMEOUT_SECS};
use stickyboard_domain::{ApiConfig, UserSelfDto};
use tracing::{info, instrument, warn};

use crate::api::{with_timeout, ApiClient, ApiError, AuthManager};
use crate::services::{
    AuthService, BoardService, CardService, SectionService, TabService, UserService,
};

/// Fully wired client stack
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: ApiConfig,
    pub auth_manager: Arc<AuthManager>,
    pub api: ApiClient,
    pub auth: AuthService,
    pub boards: BoardService,
    pub tabs: TabService,
    pub sections: SectionService,
    pub cards: CardService,
    pub users: UserService,
}

impl AppContext {
    /// Wire the stack with tokens persisted in the platform keychain under
    /// `config.keychain_service`
    ///
    /// # Errors
    /// `ApiError::Transport` when the HTTP client cannot be created.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let keychain = KeychainProvider::new(config.keychain_service.clone());
        Self::with_token_store(config, Arc::new(KeychainTokenStore::new(keychain)))
    }

    /// Wire the stack around an explicit token store
    ///
    /// # Errors
    /// `ApiError::Transport` when the HTTP client cannot be created.
    pub fn with_token_store(
        config: ApiConfig,
        store: Arc<dyn TokenStore>,
    ) -> Result<Self, ApiError> {
        let auth_manager = Arc::new(AuthManager::new(store));
        let api = ApiClient::new(config.clone(), Arc::clone(&auth_manager))?;

        Ok(Self {
            auth: AuthService::new(api.clone(), Arc::clone(&auth_manager)),
            boards: BoardService::new(api.clone()),
            tabs: TabService::new(api.clone()),
            sections: SectionService::new(api.clone()),
            cards: CardService::new(api.clone()),
            users: UserService::new(api.clone()),
            config,
            auth_manager,
            api,
        })
    }

    /// Restore the persisted session at startup
    ///
    /// Without a refresh token the session is cleared and `Ok(None)` is
    /// returned. Otherwise the tokens are refreshed and the profile loaded,
    /// each under its own deadline. Any failure clears the session.
    ///
    /// # Errors
    /// The refresh or profile call's [`ApiError`], including timeouts.
    #[instrument(skip_all)]
    pub async fn bootstrap(&self) -> Result<Option<UserSelfDto>, ApiError> {
        if !self.auth_manager.has_refresh_token() {
            self.auth_manager.clear();
            info!("No stored session");
            return Ok(None);
        }

        let restored = async {
            with_timeout(
                Duration::from_secs(BOOTSTRAP_REFRESH_TIMEOUT_SECS),
                self.auth.refresh(),
            )
            .await?;
            with_timeout(Duration::from_secs(BOOTSTRAP_ME_TIMEOUT_SECS), self.auth.me()).await
        }
        .await;

        match restored {
            Ok(user) => {
                info!(user_id = %user.id, "Session restored");
                Ok(Some(user))
            }
            Err(e) => {
                warn!(kind = %e.kind(), error = %e, "Session restore failed; signing out");
                self.auth_manager.clear();
                Err(e)
            }
        }
    }

    /// Reload the signed-in user's profile
    ///
    /// # Errors
    /// Any [`ApiError`].
    pub async fn reload_me(&self) -> Result<UserSelfDto, ApiError> {
        self.auth.me().await
    }

    /// Best-effort server logout followed by a local sign-out
    pub async fn logout(&self) {
        self.auth.logout().await;
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.auth_manager.is_authenticated()
    }
}
