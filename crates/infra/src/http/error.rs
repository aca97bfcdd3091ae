//! Transport-level failures (nothing was received from the server)

use std::time::Duration;

use thiserror::Error;

/// Failure before an HTTP response was available
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection, DNS, TLS or body I/O failure reported by `reqwest`
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The caller's deadline elapsed first
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Base URL and path did not form a valid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A header name or value was not valid HTTP
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// The request body could not be serialized
    #[error("Failed to encode request body: {0}")]
    Encode(String),
}

impl TransportError {
    /// True for deadline expiry, whether ours or `reqwest`'s
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Timeout(_) => true,
            Self::Http(err) => err.is_timeout(),
            _ => false,
        }
    }
}
