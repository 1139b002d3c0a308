//! Evidence assessment: the advisory, LLM-backed half of scoring.
//!
//! An `EvidenceAssessor` proposes a job title and four raw 0–100 evidence
//! values. Its output is never trusted for skill matching, and any failure is
//! recovered with `EvidenceAssessment::fallback()` by the caller.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::debug;

use super::prompts::{EVIDENCE_PROMPT_TEMPLATE, EVIDENCE_SYSTEM};
use super::scoring::EvidenceScores;
use super::title::meaningful_title;
use crate::llm_client::prompts::{render, JSON_ONLY_SYSTEM};
use crate::llm_client::{LlmClient, LlmError};
use crate::models::resume::ResumeData;

/// Neutral raw evidence used when no assessment is available.
pub const FALLBACK_EVIDENCE: f64 = 50.0;

#[derive(Debug, Error)]
pub enum EvidenceError {
    #[error("Evidence assessment is disabled (no API token configured)")]
    Disabled,

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Evidence assessment timed out after {0}s")]
    Timeout(u64),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EvidenceAssessment {
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(flatten)]
    pub scores: EvidenceScores,
}

impl EvidenceAssessment {
    pub fn fallback() -> Self {
        Self {
            job_title: None,
            scores: EvidenceScores::uniform(FALLBACK_EVIDENCE),
        }
    }

    /// Drops placeholder titles echoed back from the prompt schema.
    fn sanitized(self) -> Self {
        Self {
            job_title: self.job_title.as_deref().and_then(meaningful_title),
            scores: self.scores,
        }
    }
}

/// Proposes a job title and qualitative evidence for a resume against a JD.
#[async_trait]
pub trait EvidenceAssessor: Send + Sync {
    async fn assess(
        &self,
        jd_text: &str,
        resume: &ResumeData,
    ) -> Result<EvidenceAssessment, EvidenceError>;
}

// ────────────────────────────────────────────────────────────────────────────
// LlmEvidenceAssessor
// ────────────────────────────────────────────────────────────────────────────

pub struct LlmEvidenceAssessor(pub LlmClient);

#[async_trait]
impl EvidenceAssessor for LlmEvidenceAssessor {
    async fn assess(
        &self,
        jd_text: &str,
        resume: &ResumeData,
    ) -> Result<EvidenceAssessment, EvidenceError> {
        let prompt = build_prompt(jd_text, resume)?;
        let system = format!("{EVIDENCE_SYSTEM} {JSON_ONLY_SYSTEM}");

        let assessment: EvidenceAssessment = self.0.call_json(&prompt, &system).await?;
        debug!(
            "Evidence assessment from {}: title={:?}",
            self.0.model(),
            assessment.job_title
        );
        Ok(assessment.sanitized())
    }
}

/// Only the evidence-bearing parts of the resume go to the model; skills are
/// matched locally.
fn build_prompt(jd_text: &str, resume: &ResumeData) -> Result<String, EvidenceError> {
    let resume_json = serde_json::to_string_pretty(&json!({
        "job_title": resume.job_title,
        "summary": resume.summary,
        "experience": resume.experience,
        "education": resume.education,
        "projects": resume.projects,
    }))
    .map_err(LlmError::from)?;

    Ok(render(
        EVIDENCE_PROMPT_TEMPLATE,
        &[("resume_json", resume_json.as_str()), ("jd_text", jd_text)],
    ))
}

// ────────────────────────────────────────────────────────────────────────────
// DisabledEvidenceAssessor
// ────────────────────────────────────────────────────────────────────────────

/// Used when no API token is configured. Always reports `Disabled`, so every
/// request is scored with fallback evidence.
pub struct DisabledEvidenceAssessor;

#[async_trait]
impl EvidenceAssessor for DisabledEvidenceAssessor {
    async fn assess(
        &self,
        _jd_text: &str,
        _resume: &ResumeData,
    ) -> Result<EvidenceAssessment, EvidenceError> {
        Err(EvidenceError::Disabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::parse_json_reply;

    #[test]
    fn test_assessment_parses_flat_reply() {
        let reply = "```json\n{\"job_title\": \"SDE Intern\", \"experience_relevance\": 80, \
                     \"role_alignment\": 70.5, \"education_match\": 60, \"recency_continuity\": 90}\n```";
        let assessment: EvidenceAssessment = parse_json_reply(reply).unwrap();
        assert_eq!(assessment.job_title.as_deref(), Some("SDE Intern"));
        assert_eq!(assessment.scores.role_alignment, 70.5);
    }

    #[test]
    fn test_missing_dimensions_default_to_zero() {
        let assessment: EvidenceAssessment = parse_json_reply(r#"{"role_alignment": 40}"#).unwrap();
        assert_eq!(assessment.job_title, None);
        assert_eq!(assessment.scores.experience_relevance, 0.0);
        assert_eq!(assessment.scores.role_alignment, 40.0);
    }

    #[test]
    fn test_placeholder_titles_discarded() {
        for title in ["string", "Job Title", "  ", "Unknown Target"] {
            let assessment = EvidenceAssessment {
                job_title: Some(title.to_string()),
                scores: EvidenceScores::default(),
            }
            .sanitized();
            assert_eq!(assessment.job_title, None, "{title}");
        }
    }

    #[test]
    fn test_fallback_is_neutral() {
        let fallback = EvidenceAssessment::fallback();
        assert_eq!(fallback.job_title, None);
        assert_eq!(fallback.scores, EvidenceScores::uniform(50.0));
    }

    #[test]
    fn test_prompt_excludes_skills() {
        let resume = ResumeData {
            job_title: Some("Backend Developer".into()),
            skills: vec![serde_json::Value::String("Kubernetes".into())],
            ..Default::default()
        };
        let prompt = build_prompt("Hiring a Rust engineer", &resume).unwrap();
        assert!(prompt.contains("Backend Developer"));
        assert!(prompt.contains("Hiring a Rust engineer"));
        assert!(!prompt.contains("Kubernetes"));
        assert!(!prompt.contains("{jd_text}"));
    }

    #[tokio::test]
    async fn test_disabled_assessor_always_errors() {
        let result = DisabledEvidenceAssessor.assess("jd", &ResumeData::default()).await;
        assert!(matches!(result, Err(EvidenceError::Disabled)));
    }
}
