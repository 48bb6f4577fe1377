//! ATS scoring: pluggable, trait-based scorer for a resume against an optional job description.
//!
//! `AppState` holds an `Arc<dyn AtsScorer>`; `LlmAtsScorer` is the production backend.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::ai::prompts::{
    ATS_GENERAL_SECTION, ATS_JOB_SECTION_TEMPLATE, ATS_PROMPT_TEMPLATE, ATS_SYSTEM,
};
use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::resume::ResumeContent;

// ────────────────────────────────────────────────────────────────────────────
// Report
// ────────────────────────────────────────────────────────────────────────────

/// Score report returned to callers. `score` is always within 0..=100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtsReport {
    pub score: u8,
    pub feedback: String,
    pub suggestions: Vec<String>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

/// The model's reply before clamping. Every field may be missing.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawAtsReport {
    pub score: Option<f64>,
    pub feedback: Option<String>,
    pub suggestions: Option<Vec<String>>,
    pub strengths: Option<Vec<String>>,
    pub weaknesses: Option<Vec<String>>,
}

impl From<RawAtsReport> for AtsReport {
    fn from(raw: RawAtsReport) -> Self {
        AtsReport {
            score: clamp_score(raw.score),
            feedback: raw.feedback.unwrap_or_default().trim().to_string(),
            suggestions: clean(raw.suggestions),
            strengths: clean(raw.strengths),
            weaknesses: clean(raw.weaknesses),
        }
    }
}

/// Rounds to the nearest integer and clamps into 0..=100; non-numbers score 0.
pub fn clamp_score(score: Option<f64>) -> u8 {
    match score {
        Some(s) if s.is_finite() => s.round().clamp(0.0, 100.0) as u8,
        _ => 0,
    }
}

fn clean(list: Option<Vec<String>>) -> Vec<String> {
    list.unwrap_or_default()
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Implement this to swap scoring backends without touching the handler.
#[async_trait]
pub trait AtsScorer: Send + Sync {
    async fn score(
        &self,
        content: &ResumeContent,
        job_description: Option<&str>,
    ) -> Result<AtsReport, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// LlmAtsScorer
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmAtsScorer {
    llm: LlmClient,
}

impl LlmAtsScorer {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

pub fn build_ats_prompt(
    content: &ResumeContent,
    job_description: Option<&str>,
) -> Result<String, AppError> {
    let resume_json = serde_json::to_string_pretty(content)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("resume serialization failed: {e}")))?;
    let job_section = match job_description.map(str::trim).filter(|j| !j.is_empty()) {
        Some(job) => ATS_JOB_SECTION_TEMPLATE.replace("{job_description}", job),
        None => ATS_GENERAL_SECTION.to_string(),
    };
    Ok(ATS_PROMPT_TEMPLATE
        .replace("{job_section}", &job_section)
        .replace("{resume_json}", &resume_json))
}

#[async_trait]
impl AtsScorer for LlmAtsScorer {
    async fn score(
        &self,
        content: &ResumeContent,
        job_description: Option<&str>,
    ) -> Result<AtsReport, AppError> {
        let prompt = build_ats_prompt(content, job_description)?;
        let raw: RawAtsReport = self.llm.call_json(&prompt, ATS_SYSTEM).await?;
        let report = AtsReport::from(raw);
        info!(
            score = report.score,
            with_job = job_description.is_some(),
            "ATS score computed"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::templates::fixtures::full_content;

    #[test]
    fn test_score_is_clamped() {
        assert_eq!(clamp_score(Some(142.0)), 100);
        assert_eq!(clamp_score(Some(-5.0)), 0);
        assert_eq!(clamp_score(Some(71.6)), 72);
        assert_eq!(clamp_score(Some(f64::NAN)), 0);
        assert_eq!(clamp_score(None), 0);
    }

    #[test]
    fn test_raw_report_tolerates_missing_fields() {
        let raw: RawAtsReport = serde_json::from_str(r#"{"score": 88, "strengths": [" Clear ", ""]}"#).unwrap();
        let report = AtsReport::from(raw);
        assert_eq!(report.score, 88);
        assert_eq!(report.feedback, "");
        assert_eq!(report.strengths, vec!["Clear"]);
        assert!(report.suggestions.is_empty());
    }

    #[test]
    fn test_prompt_includes_job_description_when_given() {
        let content = full_content();
        let with_job = build_ats_prompt(&content, Some("Senior Rust engineer")).unwrap();
        assert!(with_job.contains("Senior Rust engineer"));
        assert!(with_job.contains("Ada Lovelace"));

        let general = build_ats_prompt(&content, Some("   ")).unwrap();
        assert!(general.contains("No job description was supplied"));
        assert!(!general.contains("{job_section}"));
    }

    struct FixedScorer(u8);

    #[async_trait]
    impl AtsScorer for FixedScorer {
        async fn score(
            &self,
            _content: &ResumeContent,
            _job_description: Option<&str>,
        ) -> Result<AtsReport, AppError> {
            Ok(AtsReport {
                score: self.0,
                feedback: "ok".to_string(),
                suggestions: vec![],
                strengths: vec![],
                weaknesses: vec![],
            })
        }
    }

    #[tokio::test]
    async fn test_scorer_is_usable_as_trait_object() {
        let scorer: std::sync::Arc<dyn AtsScorer> = std::sync::Arc::new(FixedScorer(64));
        let report = scorer.score(&ResumeContent::default(), None).await.unwrap();
        assert_eq!(report.score, 64);
    }
}
