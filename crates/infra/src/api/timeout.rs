//! Caller-imposed deadlines

use std::future::Future;
use std::time::Duration;

use super::errors::ApiError;
use crate::http::TransportError;

/// Await `operation` for at most `duration`
///
/// On expiry the operation is dropped and a transport timeout is returned.
/// A token refresh already in flight keeps running and still commits.
///
/// # Errors
/// `ApiError::Transport(TransportError::Timeout)` on expiry, otherwise the
/// operation's own error.
pub async fn with_timeout<T, F>(duration: Duration, operation: F) -> Result<T, ApiError>
where
    F: Future<Output = Result<T, ApiError>>,
{
    tokio::time::timeout(duration, operation)
        .await
        .map_err(|_| ApiError::Transport(TransportError::Timeout(duration)))?
}
