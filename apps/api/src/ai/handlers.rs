use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::ai::ats::AtsReport;
use crate::ai::import::import_resume_text;
use crate::ai::pdf_text::extract_text;
use crate::ai::upload::{check_upload, UploadedFile};
use crate::errors::AppError;
use crate::resume::validation::{describe_issues, validate_content};
use crate::resume::ResumeContent;
use crate::state::AppState;

const FILE_FIELD: &str = "file";

// ────────────────────────────────────────────────────────────────────────────
// POST /api/v1/ai/import
// ────────────────────────────────────────────────────────────────────────────

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Validation(format!("malformed multipart body: {}", e.body_text()))
    }
}

/// Pulls the `file` field out of the form; other fields are ignored.
async fn read_file_field(multipart: &mut Multipart) -> Result<UploadedFile, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(multipart_error)?;
        return Ok(UploadedFile {
            file_name,
            content_type,
            bytes,
        });
    }
    Err(AppError::Validation(format!(
        "multipart field '{FILE_FIELD}' is required"
    )))
}

/// POST /api/v1/ai/import
///
/// Accepts a PDF resume and returns the structured content the editor can load.
pub async fn handle_import(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ResumeContent>, AppError> {
    let file = read_file_field(&mut multipart).await?;
    check_upload(&file, state.config.max_upload_bytes)?;
    info!(
        bytes = file.bytes.len(),
        file_name = file.file_name.as_deref().unwrap_or("-"),
        "Importing resume PDF"
    );

    let bytes = file.bytes;
    let text = tokio::task::spawn_blocking(move || extract_text(&bytes))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in import: {e}")))??;

    let content = import_resume_text(&text, &state.llm).await?;
    Ok(Json(content))
}

// ────────────────────────────────────────────────────────────────────────────
// POST /api/v1/ai/ats-score
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtsScoreRequest {
    pub content: Value,
    pub job_description: Option<String>,
}

/// POST /api/v1/ai/ats-score
pub async fn handle_ats_score(
    State(state): State<AppState>,
    Json(req): Json<AtsScoreRequest>,
) -> Result<Json<AtsReport>, AppError> {
    let content = validate_content(&req.content)
        .map_err(|issues| AppError::Validation(describe_issues(&issues)))?;
    let report = state
        .ats_scorer
        .score(&content, req.job_description.as_deref())
        .await?;
    Ok(Json(report))
}
