//! Tab DTOs

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::enums::TabType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabDto {
    pub id: Uuid,
    pub board_id: Uuid,
    pub title: String,
    pub tab_type: TabType,
    pub position: i32,
    #[serde(default)]
    pub layout: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabCreateDto {
    pub board_id: Uuid,
    pub title: String,
    pub tab_type: TabType,
    pub position: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabUpdateDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tab_type: Option<TabType>,
    pub position: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabMoveDto {
    pub new_position: i32,
}
