//! Error types used throughout the workspace outside of request execution

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error raised while preparing a StickyBoard client
///
/// Request-level failures use the API error taxonomy in
/// `stickyboard-infra`; this type covers configuration loading and
/// validation, before any request is issued.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum StickyBoardError {
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for StickyBoard setup operations
pub type Result<T> = std::result::Result<T, StickyBoardError>;
