//! ATS service: parse → canonicalize → assess evidence → score.
//!
//! Built once at startup with its collaborators injected and shared through
//! `AppState`. Evidence failures never reach the caller: they are logged and
//! replaced with neutral fallback evidence.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use super::canonical::canonicalize;
use super::evidence::{EvidenceAssessment, EvidenceAssessor, EvidenceError};
use super::jd_parser::{JdParser, StructuredRequirements};
use super::normalizer::normalize;
use super::scoring::{
    score, CandidateProfile, EvidenceSource, ScoreRecord, ScoreRequest, ScoringConfig, ScoringError,
    NO_SKILL_SECTION_NOTICE,
};
use super::title::JobTitle;
use crate::models::resume::ResumeData;

pub struct AtsService {
    parser: JdParser,
    assessor: Arc<dyn EvidenceAssessor>,
    config: ScoringConfig,
    evidence_timeout: Duration,
}

impl AtsService {
    pub fn new(
        parser: JdParser,
        assessor: Arc<dyn EvidenceAssessor>,
        config: ScoringConfig,
        evidence_timeout: Duration,
    ) -> Self {
        Self {
            parser,
            assessor,
            config,
            evidence_timeout,
        }
    }

    pub fn parse_jd(&self, jd_text: &str) -> StructuredRequirements {
        self.parser.parse(jd_text)
    }

    /// Scores a resume against a JD. Always returns a well-formed record.
    pub async fn evaluate(
        &self,
        jd_text: &str,
        jd_title: Option<&str>,
        resume: &ResumeData,
    ) -> ScoreRecord {
        let requirements = self.parser.parse(jd_text);

        // No point paying for an assessment that cannot produce a score.
        if requirements.all_required_canonical().is_empty() {
            info!("JD has no identifiable skill requirements; returning low-confidence record");
            let title = JobTitle::resolve(jd_title, None, jd_text);
            return ScoreRecord::low_confidence(
                title.text,
                EvidenceSource::Fallback,
                NO_SKILL_SECTION_NOTICE,
            );
        }

        let resume_skills = canonicalize(normalize(&resume.skills));
        let (assessment, evidence_source) = self.assess_evidence(jd_text, resume).await;
        let title = JobTitle::resolve(jd_title, assessment.job_title.as_deref(), jd_text);

        let request = ScoreRequest {
            candidate: CandidateProfile {
                skills: &resume_skills,
                title: resume.title(),
                summary: resume.summary(),
                has_experience: resume.has_experience(),
            },
            requirements: &requirements,
            evidence: &assessment.scores,
            evidence_source,
            jd_title: &title,
        };

        match score(&request, &self.config) {
            Ok(record) => {
                info!(
                    "ATS score {} for '{}' ({} matched, {} missing, evidence: {:?})",
                    record.ats_score,
                    record.job_title,
                    record.matched_skills.len(),
                    record.missing_skills.len(),
                    record.evidence_source
                );
                record
            }
            Err(ScoringError::InsufficientJdSignal) => {
                ScoreRecord::low_confidence(title.text, evidence_source, NO_SKILL_SECTION_NOTICE)
            }
            Err(e) => {
                warn!("Scoring failed: {e}");
                ScoreRecord::low_confidence(title.text, evidence_source, &e.to_string())
            }
        }
    }

    async fn assess_evidence(
        &self,
        jd_text: &str,
        resume: &ResumeData,
    ) -> (EvidenceAssessment, EvidenceSource) {
        let assessment = self.assessor.assess(jd_text, resume);
        let result = tokio::time::timeout(self.evidence_timeout, assessment)
            .await
            .unwrap_or(Err(EvidenceError::Timeout(self.evidence_timeout.as_secs())));

        match result {
            Ok(assessment) => (assessment, EvidenceSource::Assessor),
            Err(EvidenceError::Disabled) => {
                (EvidenceAssessment::fallback(), EvidenceSource::Fallback)
            }
            Err(e) => {
                warn!("Evidence assessment failed, using fallback: {e}");
                (EvidenceAssessment::fallback(), EvidenceSource::Fallback)
            }
        }
    }
}
