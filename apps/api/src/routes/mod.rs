pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::ai::handlers as ai;
use crate::rate_limit::limit_ai_requests;
use crate::resumes::handlers as resumes;
use crate::state::AppState;

/// Room for multipart boundaries and headers on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    // AI API: rate limited per client
    let ai_routes = Router::new()
        .route(
            "/api/v1/ai/import",
            post(ai::handle_import).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/v1/ai/ats-score", post(ai::handle_ats_score))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            limit_ai_requests,
        ));

    Router::new()
        .route("/health", get(health::health_handler))
        // Resume API
        .route(
            "/api/v1/resumes",
            get(resumes::handle_list_resumes).post(resumes::handle_create_resume),
        )
        .route(
            "/api/v1/resumes/:id",
            get(resumes::handle_get_resume)
                .patch(resumes::handle_update_resume)
                .delete(resumes::handle_delete_resume),
        )
        .route("/api/v1/resumes/:id/draft", put(resumes::handle_save_draft))
        .route(
            "/api/v1/resumes/:id/preview",
            get(resumes::handle_preview_resume),
        )
        .route("/api/v1/resumes/:id/pages", get(resumes::handle_resume_pages))
        .route(
            "/api/v1/resumes/:id/export",
            post(resumes::handle_export_resume),
        )
        // Render API
        .route("/api/v1/render/preview", post(resumes::handle_render_preview))
        .merge(ai_routes)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use aws_config::{BehaviorVersion, Region};
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use crate::ai::ats::LlmAtsScorer;
    use crate::autosave::DraftSavers;
    use crate::config::{Config, DEFAULT_MAX_UPLOAD_BYTES};
    use crate::layout::{MetricMeasurer, PageGeometry};
    use crate::llm_client::LlmClient;

    fn test_state() -> AppState {
        let config = Config {
            database_url: "postgres://localhost:1/resumes".to_string(),
            redis_url: "redis://127.0.0.1:1".to_string(),
            s3_bucket: "exports".to_string(),
            s3_endpoint: "http://127.0.0.1:1".to_string(),
            aws_access_key_id: "test".to_string(),
            aws_secret_access_key: "test".to_string(),
            anthropic_api_key: "test".to_string(),
            port: 0,
            rust_log: "info".to_string(),
            rate_limit_max_requests: 10,
            rate_limit_window_secs: 60,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            trusted_proxies: Vec::new(),
        };
        let db = PgPoolOptions::new()
            .connect_lazy(&config.database_url)
            .unwrap();
        let redis = redis::Client::open(config.redis_url.clone()).unwrap();
        let s3 = aws_sdk_s3::Client::from_conf(
            aws_sdk_s3::Config::builder()
                .behavior_version(BehaviorVersion::latest())
                .region(Region::new("us-east-1"))
                .build(),
        );
        let llm = LlmClient::new(config.anthropic_api_key.clone()).unwrap();
        let page = PageGeometry::a4();
        AppState {
            db,
            redis,
            s3,
            ats_scorer: Arc::new(LlmAtsScorer::new(llm.clone())),
            llm,
            config,
            measurer: Arc::new(MetricMeasurer::new(page)),
            page,
            drafts: DraftSavers::default(),
        }
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn multipart_request(part: &str) -> Request<Body> {
        let body = format!("--BOUNDARY\r\n{part}\r\n--BOUNDARY--\r\n");
        Request::post("/api/v1/ai/import")
            .header(
                header::CONTENT_TYPE,
                "multipart/form-data; boundary=BOUNDARY",
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_service() {
        let app = build_router(test_state());
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["service"], "resume-api");
        assert_eq!(body["templates"].as_array().unwrap().len(), 8);
    }

    #[tokio::test]
    async fn test_render_preview_returns_html() {
        let app = build_router(test_state());
        let request = json_request(
            "/api/v1/render/preview",
            json!({
                "content": {"personalInfo": {"fullName": "Ada Lovelace"}, "skills": ["Analysis"]},
                "template": "modern",
                "medium": "print"
            }),
        );
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("data-template=\"modern\""));
        assert!(html.contains("Ada Lovelace"));
        assert!(html.contains("@page"));
    }

    #[tokio::test]
    async fn test_render_preview_rejects_malformed_content() {
        let app = build_router(test_state());
        let request = json_request(
            "/api/v1/render/preview",
            json!({"content": {"experience": "not a list"}}),
        );
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_ats_score_validates_before_scoring() {
        let app = build_router(test_state());
        let request = json_request(
            "/api/v1/ai/ats-score",
            json!({"content": ["not", "an", "object"]}),
        );
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_import_rejects_non_pdf_upload() {
        let app = build_router(test_state());
        let request = multipart_request(
            "Content-Disposition: form-data; name=\"file\"; filename=\"cv.txt\"\r\n\
             Content-Type: text/plain\r\n\r\nplain text resume",
        );
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn test_import_requires_file_field() {
        let app = build_router(test_state());
        let request =
            multipart_request("Content-Disposition: form-data; name=\"note\"\r\n\r\nhello");
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(response).await.contains("'file' is required"));
    }
}
