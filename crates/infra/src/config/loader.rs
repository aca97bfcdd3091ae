//! Configuration loader
//!
//! ## Loading Strategy
//! 1. Environment variables (requires `STICKYBOARD_BASE_URL`)
//! 2. Otherwise the first config file found by [`probe_config_paths`]
//! 3. JSON or TOML, chosen by file extension
//!
//! ## Environment Variables
//! - `STICKYBOARD_BASE_URL`: API base URL (required)
//! - `STICKYBOARD_REFRESH_PATH`: token refresh path
//! - `STICKYBOARD_AUTH_HEADER`: header carrying the access token
//! - `STICKYBOARD_AUTH_PREFIX`: value prefix for that header
//! - `STICKYBOARD_TIMEOUT_SECS`: per-request timeout
//! - `STICKYBOARD_MAX_ATTEMPTS`: transport attempts per request
//! - `STICKYBOARD_KEYCHAIN_SERVICE`: keychain namespace for tokens
//!
//! Every loaded configuration goes through [`validate`].

use std::path::{Path, PathBuf};
use std::str::FromStr;

use stickyboard_domain::{ApiConfig, Result, StickyBoardError};
use url::Url;

const ENV_BASE_URL: &str = "STICKYBOARD_BASE_URL";
const ENV_REFRESH_PATH: &str = "STICKYBOARD_REFRESH_PATH";
const ENV_AUTH_HEADER: &str = "STICKYBOARD_AUTH_HEADER";
const ENV_AUTH_PREFIX: &str = "STICKYBOARD_AUTH_PREFIX";
const ENV_TIMEOUT_SECS: &str = "STICKYBOARD_TIMEOUT_SECS";
const ENV_MAX_ATTEMPTS: &str = "STICKYBOARD_MAX_ATTEMPTS";
const ENV_KEYCHAIN_SERVICE: &str = "STICKYBOARD_KEYCHAIN_SERVICE";

const FILE_NAMES: [&str; 4] =
    ["stickyboard.json", "stickyboard.toml", "config.json", "config.toml"];

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `StickyBoardError::Config` if neither source yields a valid
/// configuration.
pub fn load() -> Result<ApiConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// Only the base URL is required; unset optional variables keep their
/// defaults.
///
/// # Errors
/// Returns `StickyBoardError::Config` if the base URL is missing or any
/// value is invalid.
pub fn load_from_env() -> Result<ApiConfig> {
    let mut config = ApiConfig { base_url: env_var(ENV_BASE_URL)?, ..ApiConfig::default() };

    if let Some(path) = optional_env(ENV_REFRESH_PATH) {
        config.refresh_path = path;
    }
    if let Some(header) = optional_env(ENV_AUTH_HEADER) {
        config.access_header_name = header;
    }
    // An empty prefix is meaningful (raw token), so only absence keeps the default.
    if let Ok(prefix) = std::env::var(ENV_AUTH_PREFIX) {
        config.access_header_prefix = prefix;
    }
    if let Some(secs) = optional_env(ENV_TIMEOUT_SECS) {
        config.timeout_secs = parse_number(ENV_TIMEOUT_SECS, &secs)?;
    }
    if let Some(attempts) = optional_env(ENV_MAX_ATTEMPTS) {
        config.max_attempts = parse_number(ENV_MAX_ATTEMPTS, &attempts)?;
    }
    if let Some(service) = optional_env(ENV_KEYCHAIN_SERVICE) {
        config.keychain_service = service;
    }

    validate(&config)?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations.
///
/// # Errors
/// Returns `StickyBoardError::Config` if the file is missing, unreadable,
/// malformed or invalid.
pub fn load_from_file(path: Option<PathBuf>) -> Result<ApiConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(StickyBoardError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            StickyBoardError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| StickyBoardError::Config(format!("Failed to read config file: {e}")))?;

    let config = parse_config(&contents, &config_path)?;
    validate(&config)?;
    Ok(config)
}

fn parse_config(contents: &str, path: &Path) -> Result<ApiConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| StickyBoardError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| StickyBoardError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(StickyBoardError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Check that a configuration can drive the client
///
/// # Errors
/// Returns `StickyBoardError::Config` naming the first invalid field.
pub fn validate(config: &ApiConfig) -> Result<()> {
    let url = Url::parse(&config.base_url).map_err(|e| {
        StickyBoardError::Config(format!("Invalid base URL '{}': {e}", config.base_url))
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(StickyBoardError::Config(format!(
            "Base URL must use http or https, got '{}'",
            url.scheme()
        )));
    }
    if config.refresh_path.trim_matches('/').is_empty() {
        return Err(StickyBoardError::Config("Refresh path must not be empty".to_string()));
    }
    if config.access_header_name.trim().is_empty() {
        return Err(StickyBoardError::Config("Access header name must not be empty".to_string()));
    }
    if config.timeout_secs == 0 {
        return Err(StickyBoardError::Config("Timeout must be at least one second".to_string()));
    }
    if config.max_attempts == 0 {
        return Err(StickyBoardError::Config("Max attempts must be at least 1".to_string()));
    }
    Ok(())
}

/// Probe standard locations for a configuration file
///
/// Looks in the working directory, then next to the executable, for
/// `stickyboard.{json,toml}` and `config.{json,toml}`.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }
    if let Some(exe_dir) =
        std::env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        dirs.push(exe_dir);
    }

    dirs.iter()
        .flat_map(|dir| FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

fn env_var(key: &str) -> Result<String> {
    optional_env(key).ok_or_else(|| {
        StickyBoardError::Config(format!("Missing required environment variable: {key}"))
    })
}

/// Set and non-blank
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_number<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse::<T>().map_err(|e| StickyBoardError::Config(format!("Invalid {key}: {e}")))
}
