use axum::Json;
use serde_json::{json, Value};

use crate::render::TemplateId;

/// GET /health
/// Returns the service status, version and the templates it can render.
pub async fn health_handler() -> Json<Value> {
    let templates: Vec<&str> = TemplateId::ALL.iter().map(|t| t.as_str()).collect();
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "resume-api",
        "templates": templates
    }))
}
