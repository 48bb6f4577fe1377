use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use redis::Client as RedisClient;
use sqlx::PgPool;

use crate::ai::ats::AtsScorer;
use crate::autosave::DraftSavers;
use crate::config::Config;
use crate::layout::{HeightMeasurer, PageGeometry};
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Fixed-window counters for the AI rate limiter.
    pub redis: RedisClient,
    /// Object storage for exported documents.
    pub s3: S3Client,
    pub llm: LlmClient,
    pub config: Config,
    /// Pluggable ATS scorer. Default: LlmAtsScorer.
    pub ats_scorer: Arc<dyn AtsScorer>,
    /// Section height estimates for pagination. Default: MetricMeasurer.
    pub measurer: Arc<dyn HeightMeasurer>,
    /// Page the paginator fills; A4 at 96 dpi.
    pub page: PageGeometry,
    pub drafts: DraftSavers,
}
