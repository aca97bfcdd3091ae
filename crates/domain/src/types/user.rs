//! User profile DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::enums::UserRole;
use crate::utils::dates;

/// Public view of another user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    pub role: UserRole,
}

/// The authenticated user's own profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSelfDto {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub prefs: Option<Value>,
    #[serde(with = "dates")]
    pub created_at: DateTime<Utc>,
}

/// Partial profile update; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdateDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefs: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordDto {
    pub old_password: String,
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_self_accepts_legacy_created_at() {
        let json = r#"{
            "id": "0b8f2a52-3f0e-4c39-9d43-8d0f61f0b2a1",
            "email": "ada@example.com",
            "displayName": "Ada",
            "avatarUrl": null,
            "prefs": {"theme": "dark"},
            "createdAt": "2024-01-15 10:30:00"
        }"#;
        let user: UserSelfDto = serde_json::from_str(json).unwrap();
        assert_eq!(user.display_name, "Ada");
        assert_eq!(user.created_at.to_rfc3339(), "2024-01-15T10:30:00+00:00");
        assert_eq!(user.prefs, Some(serde_json::json!({"theme": "dark"})));
    }

    #[test]
    fn test_empty_update_serializes_to_empty_object() {
        assert_eq!(serde_json::to_string(&UserUpdateDto::default()).unwrap(), "{}");
    }
}
