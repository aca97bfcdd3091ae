//! Application constants
//!
//! Centralized location for defaults shared by configuration, storage and
//! session bootstrap.

// API defaults
pub const DEFAULT_BASE_URL: &str = "https://stickyboard.aedev.pro/api";
pub const DEFAULT_REFRESH_PATH: &str = "Auth/refresh";
pub const DEFAULT_ACCESS_HEADER_NAME: &str = "Authorization";
pub const DEFAULT_ACCESS_HEADER_PREFIX: &str = "Bearer ";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MAX_ATTEMPTS: usize = 1;

// Secure storage namespace
pub const DEFAULT_KEYCHAIN_SERVICE: &str = "pro.aedev.stickyboard";

// Session bootstrap budgets
pub const BOOTSTRAP_REFRESH_TIMEOUT_SECS: u64 = 8;
pub const BOOTSTRAP_ME_TIMEOUT_SECS: u64 = 5;

// Envelope fallback when the server reports failure without a message
pub const UNKNOWN_SERVER_ERROR: &str = "Unknown server error";
