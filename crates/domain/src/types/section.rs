//! Section DTOs (sections nest through `parentSectionId`)

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionDto {
    pub id: Uuid,
    pub tab_id: Uuid,
    #[serde(default)]
    pub parent_section_id: Option<Uuid>,
    pub title: String,
    pub position: i32,
    #[serde(default)]
    pub layout: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionCreateDto {
    pub tab_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_section_id: Option<Uuid>,
    pub title: String,
    pub position: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionUpdateDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub position: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_section_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<Value>,
}

/// Reorder and/or reparent a section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionMoveDto {
    pub new_position: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_section_id: Option<Uuid>,
}
