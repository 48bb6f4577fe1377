use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

use crate::render::Medium;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRow {
    pub id: Uuid,
    pub title: String,
    pub content: Value,
    /// Template key as stored; may be unknown if templates were removed since.
    pub template: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateResumeRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: Option<Value>,
    #[serde(default)]
    pub template: Option<String>,
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateResumeRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<Value>,
    #[serde(default)]
    pub template: Option<String>,
}

impl UpdateResumeRequest {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.template.is_none()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PreviewQuery {
    #[serde(default)]
    pub medium: Option<Medium>,
    #[serde(default)]
    pub template: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RenderPreviewRequest {
    pub content: Value,
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default)]
    pub medium: Option<Medium>,
}

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    #[serde(default)]
    pub template: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResponse {
    pub bucket: String,
    pub key: String,
    pub template: String,
    pub page_count: usize,
}
