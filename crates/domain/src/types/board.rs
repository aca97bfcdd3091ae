//! Board DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::enums::BoardVisibility;
use crate::utils::dates;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardDto {
    pub id: Uuid,
    pub title: String,
    pub visibility: BoardVisibility,
    pub owner_id: Uuid,
    #[serde(default)]
    pub org_id: Option<Uuid>,
    #[serde(default)]
    pub folder_id: Option<Uuid>,
    #[serde(default)]
    pub theme: Option<Value>,
    #[serde(default)]
    pub meta: Option<Value>,
    #[serde(with = "dates")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "dates")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardCreateDto {
    pub title: String,
    pub visibility: BoardVisibility,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

impl BoardCreateDto {
    /// Minimal board with no folder, organization or styling
    pub fn new(title: impl Into<String>, visibility: BoardVisibility) -> Self {
        Self {
            title: title.into(),
            visibility,
            org_id: None,
            folder_id: None,
            theme: None,
            meta: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardUpdateDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<BoardVisibility>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameBoardDto {
    pub title: String,
}

/// `folderId: null` detaches the board from its folder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveBoardFolderDto {
    pub folder_id: Option<Uuid>,
}

/// `orgId: null` moves the board back to personal space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveBoardOrgDto {
    pub org_id: Option<Uuid>,
}
