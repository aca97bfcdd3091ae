//! API error taxonomy
//!
//! Every failure surfaced by [`super::ApiClient`] is one of the
//! [`ApiError`] variants. Structured server payloads are mapped through
//! `From<ErrorPayload>`.

use std::fmt;

use stickyboard_domain::constants::UNKNOWN_SERVER_ERROR;
use stickyboard_domain::{ErrorCode, ErrorPayload};
use thiserror::Error;

use crate::http::TransportError;

/// Closed set of API failures
#[derive(Debug, Error)]
pub enum ApiError {
    /// Server reported failure (error payload or `success: false` envelope)
    #[error("Server error: {0}")]
    Server(String),

    #[error("Authentication invalid: {}", describe(.0))]
    AuthInvalid(Option<String>),

    #[error("Authentication expired: {}", describe(.0))]
    AuthExpired(Option<String>),

    #[error("Forbidden: {}", describe(.0))]
    Forbidden(Option<String>),

    #[error("Not found: {}", describe(.0))]
    NotFound(Option<String>),

    #[error("Validation failed: {message}")]
    Validation { message: String, details: Option<String> },

    /// No response was received
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A response was received but did not match the expected shape
    #[error("Decoding failed: {0}")]
    Decoding(String),

    #[error("Operation cancelled")]
    Cancelled,

    /// Non-2xx response without a structured error payload
    #[error("Unexpected response (status {}): {}", status_label(.status), describe(.body))]
    Unknown { status: Option<u16>, body: Option<String> },
}

/// Stable label for each [`ApiError`] variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    Server,
    AuthInvalid,
    AuthExpired,
    Forbidden,
    NotFound,
    Validation,
    Transport,
    Decoding,
    Cancelled,
    Unknown,
}

impl ApiErrorKind {
    /// snake_case name used as a structured log field
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Server => "server",
            Self::AuthInvalid => "auth_invalid",
            Self::AuthExpired => "auth_expired",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not_found",
            Self::Validation => "validation",
            Self::Transport => "transport",
            Self::Decoding => "decoding",
            Self::Cancelled => "cancelled",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ApiError {
    #[must_use]
    pub const fn kind(&self) -> ApiErrorKind {
        match self {
            Self::Server(_) => ApiErrorKind::Server,
            Self::AuthInvalid(_) => ApiErrorKind::AuthInvalid,
            Self::AuthExpired(_) => ApiErrorKind::AuthExpired,
            Self::Forbidden(_) => ApiErrorKind::Forbidden,
            Self::NotFound(_) => ApiErrorKind::NotFound,
            Self::Validation { .. } => ApiErrorKind::Validation,
            Self::Transport(_) => ApiErrorKind::Transport,
            Self::Decoding(_) => ApiErrorKind::Decoding,
            Self::Cancelled => ApiErrorKind::Cancelled,
            Self::Unknown { .. } => ApiErrorKind::Unknown,
        }
    }

    /// The session is no longer usable and the user has to sign in again
    #[must_use]
    pub const fn is_auth_failure(&self) -> bool {
        matches!(self, Self::AuthInvalid(_) | Self::AuthExpired(_))
    }

    /// A transport failure caused by a deadline
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(err) if err.is_timeout())
    }

    pub(crate) fn decoding(err: impl fmt::Display) -> Self {
        Self::Decoding(err.to_string())
    }

    pub(crate) fn server_message(message: Option<String>) -> Self {
        Self::Server(message.unwrap_or_else(|| UNKNOWN_SERVER_ERROR.to_string()))
    }
}

impl From<ErrorPayload> for ApiError {
    fn from(payload: ErrorPayload) -> Self {
        let ErrorPayload { code, message, details } = payload;
        match code {
            ErrorCode::ServerError => Self::Server(message),
            ErrorCode::AuthInvalid => Self::AuthInvalid(Some(message)),
            ErrorCode::AuthExpired => Self::AuthExpired(Some(message)),
            ErrorCode::Forbidden => Self::Forbidden(Some(message)),
            ErrorCode::NotFound => Self::NotFound(Some(message)),
            ErrorCode::ValidationError => Self::Validation { message, details },
        }
    }
}

fn describe(message: &Option<String>) -> &str {
    message.as_deref().unwrap_or("no message")
}

fn status_label(status: &Option<u16>) -> String {
    status.map_or_else(|| "none".to_string(), |s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(code: ErrorCode) -> ErrorPayload {
        ErrorPayload { code, message: "msg".into(), details: Some("field: title".into()) }
    }

    #[test]
    fn every_error_code_maps_to_its_kind() {
        let expected = [
            (ErrorCode::ServerError, ApiErrorKind::Server),
            (ErrorCode::AuthInvalid, ApiErrorKind::AuthInvalid),
            (ErrorCode::AuthExpired, ApiErrorKind::AuthExpired),
            (ErrorCode::NotFound, ApiErrorKind::NotFound),
            (ErrorCode::Forbidden, ApiErrorKind::Forbidden),
            (ErrorCode::ValidationError, ApiErrorKind::Validation),
        ];
        assert_eq!(expected.len(), ErrorCode::ALL.len());

        for (code, kind) in expected {
            assert_eq!(ApiError::from(payload(code)).kind(), kind, "{code:?}");
        }
    }

    #[test]
    fn validation_keeps_details() {
        match ApiError::from(payload(ErrorCode::ValidationError)) {
            ApiError::Validation { message, details } => {
                assert_eq!(message, "msg");
                assert_eq!(details.as_deref(), Some("field: title"));
            }
            other => panic!("expected validation, got {other:?}"),
        }
    }

    #[test]
    fn unknown_code_does_not_decode() {
        let result = serde_json::from_str::<ErrorPayload>(r#"{"code": 42, "message": "?"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn messages_are_human_readable() {
        assert_eq!(
            ApiError::server_message(None).to_string(),
            "Server error: Unknown server error"
        );
        assert_eq!(
            ApiError::Unknown { status: Some(418), body: Some("teapot".into()) }.to_string(),
            "Unexpected response (status 418): teapot"
        );
        assert!(ApiError::AuthExpired(None).is_auth_failure());
        assert_eq!(ApiError::Cancelled.kind().as_str(), "cancelled");
    }
}
