//! API configuration
//!
//! `ApiConfig` is plain data: the infra crate loads it from the environment
//! or a JSON/TOML file and hands it to the client at construction time.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_ACCESS_HEADER_NAME, DEFAULT_ACCESS_HEADER_PREFIX, DEFAULT_BASE_URL,
    DEFAULT_KEYCHAIN_SERVICE, DEFAULT_MAX_ATTEMPTS, DEFAULT_REFRESH_PATH, DEFAULT_TIMEOUT_SECS,
};

/// Networking configuration for the StickyBoard API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL every endpoint path is joined onto
    pub base_url: String,
    /// Path of the token refresh endpoint (e.g. `Auth/refresh`)
    pub refresh_path: String,
    /// Header carrying the access token
    pub access_header_name: String,
    /// Prefix prepended to the access token in that header
    pub access_header_prefix: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Transport attempts per request (1 disables transport retries)
    pub max_attempts: usize,
    /// Keychain service namespace for persisted tokens
    pub keychain_service: String,
    pub user_agent: Option<String>,
}

impl ApiConfig {
    /// Create a configuration for `base_url` with the given refresh path and
    /// defaults for everything else.
    pub fn new(base_url: impl Into<String>, refresh_path: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), refresh_path: refresh_path.into(), ..Self::default() }
    }

    /// Per-request timeout as a `Duration`
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            refresh_path: DEFAULT_REFRESH_PATH.to_string(),
            access_header_name: DEFAULT_ACCESS_HEADER_NAME.to_string(),
            access_header_prefix: DEFAULT_ACCESS_HEADER_PREFIX.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            keychain_service: DEFAULT_KEYCHAIN_SERVICE.to_string(),
            user_agent: None,
        }
    }
}
