//! Authentication request/response bodies

use serde::{Deserialize, Serialize};

use super::user::UserSelfDto;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthLoginRequest {
    pub email: String,
    pub password: String,
}

impl AuthLoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self { email: email.into(), password: password.into() }
    }
}

/// Tokens plus the authenticated user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthLoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserSelfDto,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequestDto {
    pub email: String,
    pub password: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invite_token: Option<String>,
}

/// Registration answers with the same shape as login
pub type RegisterResponseDto = AuthLoginResponse;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthRefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthRefreshResponse {
    pub access_token: String,
    pub refresh_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_omits_missing_invite() {
        let request = RegisterRequestDto {
            email: "ada@example.com".to_string(),
            password: "secret".to_string(),
            display_name: "Ada".to_string(),
            invite_token: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"email":"ada@example.com","password":"secret","displayName":"Ada"})
        );
    }

    #[test]
    fn test_refresh_request_uses_camel_case() {
        let json =
            serde_json::to_string(&AuthRefreshRequest { refresh_token: "r1".to_string() }).unwrap();
        assert_eq!(json, r#"{"refreshToken":"r1"}"#);
    }
}
