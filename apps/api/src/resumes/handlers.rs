use aws_sdk_s3::primitives::ByteStream;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use serde_json::{json, Value};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::layout::pagination::PaginationReport;
use crate::render::{DocumentContainer, Medium, TemplateId};
use crate::resume::validation::{describe_issues, validate_content, validate_title};
use crate::resume::ResumeContent;
use crate::resumes::models::{
    CreateResumeRequest, ExportRequest, ExportResponse, PreviewQuery, RenderPreviewRequest,
    ResumeRow, UpdateResumeRequest,
};
use crate::resumes::store;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Input checks
// ────────────────────────────────────────────────────────────────────────────

fn checked_content(value: &Value) -> Result<ResumeContent, AppError> {
    validate_content(value).map_err(|issues| AppError::Validation(describe_issues(&issues)))
}

fn checked_title(title: &str) -> Result<(), AppError> {
    validate_title(title).map_err(|i| AppError::Validation(format!("{}: {}", i.path, i.reason)))
}

/// Template keys must be known when a client writes them.
fn checked_template(key: &str) -> Result<TemplateId, AppError> {
    TemplateId::parse(key)
        .ok_or_else(|| AppError::Validation(format!("template: unknown template '{key}'")))
}

/// Reads stored content back. Rows were validated on write, so a failure here
/// means the row was edited out of band.
fn stored_content(row: &ResumeRow) -> Result<ResumeContent, AppError> {
    ResumeContent::from_json(row.content.clone()).map_err(|e| {
        AppError::Internal(anyhow::anyhow!("stored content for resume {} is unreadable: {e}", row.id))
    })
}

async fn require_resume(state: &AppState, id: Uuid) -> Result<ResumeRow, AppError> {
    store::get_resume(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))
}

// ────────────────────────────────────────────────────────────────────────────
// Rendering off the async runtime
// ────────────────────────────────────────────────────────────────────────────

async fn render_html(
    state: &AppState,
    content: ResumeContent,
    template: Option<String>,
    medium: Medium,
) -> Result<String, AppError> {
    let measurer = state.measurer.clone();
    let page = state.page;
    tokio::task::spawn_blocking(move || {
        DocumentContainer::new(template.as_deref())
            .with_page(page)
            .render_html(&content, medium, measurer.as_ref())
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in render: {e}")))
}

async fn pagination_report(
    state: &AppState,
    content: ResumeContent,
    template: Option<String>,
) -> Result<PaginationReport, AppError> {
    let measurer = state.measurer.clone();
    let page = state.page;
    tokio::task::spawn_blocking(move || {
        DocumentContainer::new(template.as_deref())
            .with_page(page)
            .paginate(&content, measurer.as_ref())
            .report()
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in pagination: {e}")))
}

// ────────────────────────────────────────────────────────────────────────────
// CRUD
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
) -> Result<Json<Vec<ResumeRow>>, AppError> {
    Ok(Json(store::list_resumes(&state.db).await?))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeRow>, AppError> {
    Ok(Json(require_resume(&state, id).await?))
}

/// POST /api/v1/resumes
pub async fn handle_create_resume(
    State(state): State<AppState>,
    Json(req): Json<CreateResumeRequest>,
) -> Result<(StatusCode, Json<ResumeRow>), AppError> {
    checked_title(&req.title)?;
    let content = checked_content(&req.content.unwrap_or_else(|| json!({})))?;
    let template = match req.template.as_deref() {
        Some(key) => checked_template(key)?,
        None => TemplateId::DEFAULT,
    };

    let normalized = serde_json::to_value(&content)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("content serialization failed: {e}")))?;
    let row =
        store::insert_resume(&state.db, req.title.trim(), &normalized, template.as_str()).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// PATCH /api/v1/resumes/:id
pub async fn handle_update_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateResumeRequest>,
) -> Result<Json<ResumeRow>, AppError> {
    if req.is_empty() {
        return Err(AppError::Validation(
            "at least one of title, content or template is required".to_string(),
        ));
    }
    if let Some(title) = &req.title {
        checked_title(title)?;
    }
    let content = req.content.as_ref().map(checked_content).transpose()?;
    let normalized = content
        .as_ref()
        .map(serde_json::to_value)
        .transpose()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("content serialization failed: {e}")))?;
    let template = req.template.as_deref().map(checked_template).transpose()?;

    let row = store::update_resume(
        &state.db,
        id,
        req.title.as_deref().map(str::trim),
        normalized.as_ref(),
        template.map(|t| t.as_str()),
    )
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;

    // A running draft saver must compare later drafts against this write.
    if let Some(content) = content {
        state.drafts.rebase(id, content).await;
    }
    Ok(Json(row))
}

/// DELETE /api/v1/resumes/:id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if store::delete_resume(&state.db, id).await? {
        state.drafts.forget(id);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Resume {id} not found")))
    }
}

/// PUT /api/v1/resumes/:id/draft
///
/// Queues an editor snapshot; it is written after the edits go quiet, and only
/// if it differs from what was last saved.
pub async fn handle_save_draft(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(content): Json<Value>,
) -> Result<StatusCode, AppError> {
    let content = checked_content(&content)?;
    let row = require_resume(&state, id).await?;
    let saved = stored_content(&row)?;
    state.drafts.push_draft(&state.db, id, saved, content).await?;
    Ok(StatusCode::ACCEPTED)
}

// ────────────────────────────────────────────────────────────────────────────
// Rendering endpoints
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/resumes/:id/preview?medium=screen|print&template=
pub async fn handle_preview_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<PreviewQuery>,
) -> Result<Html<String>, AppError> {
    let row = require_resume(&state, id).await?;
    let content = stored_content(&row)?;
    let template = query.template.or(Some(row.template));
    let html = render_html(&state, content, template, query.medium.unwrap_or_default()).await?;
    Ok(Html(html))
}

/// GET /api/v1/resumes/:id/pages?template=
pub async fn handle_resume_pages(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<PreviewQuery>,
) -> Result<Json<PaginationReport>, AppError> {
    let row = require_resume(&state, id).await?;
    let content = stored_content(&row)?;
    let template = query.template.or(Some(row.template));
    Ok(Json(pagination_report(&state, content, template).await?))
}

/// POST /api/v1/resumes/:id/export
///
/// Renders the print version and stores it under `exports/{id}/{template}.html`.
pub async fn handle_export_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Option<Json<ExportRequest>>,
) -> Result<Json<ExportResponse>, AppError> {
    let row = require_resume(&state, id).await?;
    let content = stored_content(&row)?;
    let requested = body.and_then(|Json(b)| b.template);
    let template =
        DocumentContainer::new(requested.as_deref().or(Some(row.template.as_str()))).template();

    let report = pagination_report(&state, content.clone(), Some(template.as_str().to_string())).await?;
    let html = render_html(
        &state,
        content,
        Some(template.as_str().to_string()),
        Medium::Print,
    )
    .await?;

    let key = format!("exports/{id}/{}.html", template.as_str());
    state
        .s3
        .put_object()
        .bucket(&state.config.s3_bucket)
        .key(&key)
        .body(ByteStream::from(html.into_bytes()))
        .content_type("text/html; charset=utf-8")
        .send()
        .await
        .map_err(|e| {
            warn!(resume_id = %id, "Export upload failed");
            AppError::Storage(format!("upload of {key} failed: {e}"))
        })?;

    info!("Exported resume {id} to s3://{}/{}", state.config.s3_bucket, key);

    Ok(Json(ExportResponse {
        bucket: state.config.s3_bucket.clone(),
        key,
        template: template.as_str().to_string(),
        page_count: report.page_count,
    }))
}

/// POST /api/v1/render/preview
///
/// Renders content that has not been saved yet, e.g. the editor's live draft.
pub async fn handle_render_preview(
    State(state): State<AppState>,
    Json(req): Json<RenderPreviewRequest>,
) -> Result<Html<String>, AppError> {
    let content = checked_content(&req.content)?;
    let html = render_html(&state, content, req.template, req.medium.unwrap_or_default()).await?;
    Ok(Html(html))
}
