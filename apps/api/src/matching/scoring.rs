//! Scoring engine: combines local skill matching with advisory evidence into
//! a bounded, explainable ATS score.
//!
//! Everything here is pure and synchronous. The evidence values come from an
//! `EvidenceAssessor` (or its fallback) and are rescaled into a narrow band;
//! skill matching is always recomputed from canonical tokens.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use super::jd_parser::StructuredRequirements;
use super::title::{is_title_mismatch, JobTitle};

#[derive(Debug, Error, PartialEq)]
pub enum ScoringError {
    #[error("JD has no identifiable required skills")]
    InsufficientJdSignal,

    #[error("Scoring weights must sum to 1.0 (got {sum})")]
    InvalidWeights { sum: f64 },
}

// ────────────────────────────────────────────────────────────────────────────
// Configuration
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub skill_match: f64,
    pub experience_relevance: f64,
    pub role_alignment: f64,
    pub education_match: f64,
    pub recency_continuity: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skill_match: 0.55,
            experience_relevance: 0.20,
            role_alignment: 0.10,
            education_match: 0.05,
            recency_continuity: 0.10,
        }
    }
}

impl ScoringWeights {
    pub fn sum(&self) -> f64 {
        self.skill_match
            + self.experience_relevance
            + self.role_alignment
            + self.education_match
            + self.recency_continuity
    }
}

/// Tunable scoring constants. Defaults are the production values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub weights: ScoringWeights,
    /// Subtracted from the skill score per unmet requirement.
    pub missing_skill_penalty: f64,
    pub missing_penalty_cap: f64,
    pub skill_base: f64,
    pub skill_floor: f64,
    pub depth_bonus_cap: f64,
    /// Evidence dimensions are rescaled to `evidence_floor + raw * evidence_scale`.
    pub evidence_floor: f64,
    pub evidence_scale: f64,
    /// Experience score when the resume lists no experience at all.
    pub no_experience_score: f64,
    pub title_mismatch_penalty: f64,
    /// Applied when no requirement matched and role alignment is weak.
    pub no_match_penalty: f64,
    pub no_match_role_threshold: f64,
    pub soft_ceiling: f64,
    pub ceiling_compression: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            missing_skill_penalty: 7.0,
            missing_penalty_cap: 20.0,
            skill_base: 40.0,
            skill_floor: 15.0,
            depth_bonus_cap: 10.0,
            evidence_floor: 60.0,
            evidence_scale: 0.4,
            no_experience_score: 20.0,
            title_mismatch_penalty: 15.0,
            no_match_penalty: 30.0,
            no_match_role_threshold: 30.0,
            soft_ceiling: 90.0,
            ceiling_compression: 0.3,
        }
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<(), ScoringError> {
        let sum = self.weights.sum();
        if (sum - 1.0).abs() > 1e-6 {
            return Err(ScoringError::InvalidWeights { sum });
        }
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Inputs
// ────────────────────────────────────────────────────────────────────────────

/// Raw 0–100 evidence values from the assessor. Out-of-range values are
/// clamped when scored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvidenceScores {
    #[serde(default)]
    pub experience_relevance: f64,
    #[serde(default)]
    pub role_alignment: f64,
    #[serde(default)]
    pub education_match: f64,
    #[serde(default)]
    pub recency_continuity: f64,
}

impl EvidenceScores {
    pub fn uniform(value: f64) -> Self {
        Self {
            experience_relevance: value,
            role_alignment: value,
            education_match: value,
            recency_continuity: value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceSource {
    Assessor,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Low,
}

#[derive(Debug, Clone, Copy)]
pub struct CandidateProfile<'a> {
    /// Canonical resume skills.
    pub skills: &'a BTreeSet<String>,
    pub title: &'a str,
    pub summary: &'a str,
    pub has_experience: bool,
}

pub struct ScoreRequest<'a> {
    pub candidate: CandidateProfile<'a>,
    pub requirements: &'a StructuredRequirements,
    pub evidence: &'a EvidenceScores,
    pub evidence_source: EvidenceSource,
    pub jd_title: &'a JobTitle,
}

// ────────────────────────────────────────────────────────────────────────────
// Output
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Breakdown {
    pub skill_match: f64,
    pub experience_relevance: f64,
    pub role_alignment: f64,
    pub education_match: f64,
    pub recency_continuity: f64,
}

impl Breakdown {
    fn weighted_sum(&self, w: &ScoringWeights) -> f64 {
        self.skill_match * w.skill_match
            + self.experience_relevance * w.experience_relevance
            + self.role_alignment * w.role_alignment
            + self.education_match * w.education_match
            + self.recency_continuity * w.recency_continuity
    }

    fn rounded(self) -> Self {
        Self {
            skill_match: round1(self.skill_match),
            experience_relevance: round1(self.experience_relevance),
            role_alignment: round1(self.role_alignment),
            education_match: round1(self.education_match),
            recency_continuity: round1(self.recency_continuity),
        }
    }
}

/// The final, immutable result of one scoring request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub job_title: String,
    pub ats_score: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub strong_matches: Vec<String>,
    pub weak_areas: Vec<String>,
    pub breakdown: Breakdown,
    pub confidence: Confidence,
    pub evidence_source: EvidenceSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

pub const NO_SKILL_SECTION_NOTICE: &str =
    "No skill requirements could be identified in the job description; no score was computed.";

impl ScoreRecord {
    /// A zero score flagged as low confidence. Used when the JD carries no
    /// usable requirements.
    pub fn low_confidence(
        job_title: String,
        evidence_source: EvidenceSource,
        notice: &str,
    ) -> Self {
        Self {
            job_title,
            ats_score: 0.0,
            matched_skills: Vec::new(),
            missing_skills: Vec::new(),
            strong_matches: Vec::new(),
            weak_areas: Vec::new(),
            breakdown: Breakdown::default(),
            confidence: Confidence::Low,
            evidence_source,
            notice: Some(notice.to_string()),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Scoring
// ────────────────────────────────────────────────────────────────────────────

pub fn score(
    request: &ScoreRequest<'_>,
    config: &ScoringConfig,
) -> Result<ScoreRecord, ScoringError> {
    let requirements = request.requirements;
    let resume_skills = request.candidate.skills;

    let all_required = requirements.all_required_canonical();
    if all_required.is_empty() {
        return Err(ScoringError::InsufficientJdSignal);
    }

    let matched: Vec<String> = all_required.intersection(resume_skills).cloned().collect();
    let missing: Vec<String> = all_required.difference(resume_skills).cloned().collect();
    debug_assert!(
        matched.iter().all(|s| !missing.contains(s)),
        "matched and missing skills overlap"
    );

    let matched_required = count_matched_requirements(requirements, resume_skills);
    let skill_match = compute_skill_match(
        matched_required,
        requirements.requirement_count(),
        matched.len(),
        config,
    );

    let evidence = request.evidence;
    let experience_relevance = if request.candidate.has_experience {
        rescale_evidence(evidence.experience_relevance, config)
    } else {
        config.no_experience_score
    };

    let breakdown = Breakdown {
        skill_match,
        experience_relevance,
        role_alignment: rescale_evidence(evidence.role_alignment, config),
        education_match: rescale_evidence(evidence.education_match, config),
        recency_continuity: rescale_evidence(evidence.recency_continuity, config),
    };

    let mut total = breakdown.weighted_sum(&config.weights);

    if is_title_mismatch(
        request.jd_title.for_alignment(),
        request.candidate.title,
        request.candidate.summary,
    ) {
        total -= config.title_mismatch_penalty;
    }

    if matched_required == 0
        && evidence.role_alignment.clamp(0.0, 100.0) < config.no_match_role_threshold
    {
        total -= config.no_match_penalty;
    }

    if total > config.soft_ceiling {
        total = config.soft_ceiling + (total - config.soft_ceiling) * config.ceiling_compression;
    }

    Ok(ScoreRecord {
        job_title: request.jd_title.text.clone(),
        ats_score: round1(total.clamp(0.0, 100.0)),
        strong_matches: matched.clone(),
        weak_areas: missing.clone(),
        matched_skills: matched,
        missing_skills: missing,
        breakdown: breakdown.rounded(),
        confidence: Confidence::High,
        evidence_source: request.evidence_source,
        notice: None,
    })
}

/// Satisfied OR-groups plus present standalone tokens.
fn count_matched_requirements(
    requirements: &StructuredRequirements,
    skills: &BTreeSet<String>,
) -> usize {
    let groups = requirements
        .required_or_groups
        .iter()
        .filter(|g| g.is_satisfied_by(skills))
        .count();
    let standalone = requirements
        .required_standalone
        .iter()
        .filter(|t| skills.contains(*t))
        .count();
    groups + standalone
}

/// Skill sub-score from requirement coverage, with a capped missing penalty,
/// a floor, and a small bonus for overlap depth.
pub fn compute_skill_match(
    matched_required: usize,
    total_required: usize,
    matched_skill_count: usize,
    config: &ScoringConfig,
) -> f64 {
    if total_required == 0 {
        warn!("compute_skill_match called with zero requirements");
    }
    let total = total_required.max(1);
    let matched_required = matched_required.min(total);

    let ratio = matched_required as f64 / total as f64;
    let base = config.skill_base + ratio * (100.0 - config.skill_base);

    let missing = (total - matched_required) as f64;
    let penalty = (missing * config.missing_skill_penalty).min(config.missing_penalty_cap);
    let penalized = (base - penalty).max(config.skill_floor);

    let bonus = ((matched_skill_count / 2) as f64).min(config.depth_bonus_cap);
    (penalized + bonus).min(100.0)
}

fn rescale_evidence(raw: f64, config: &ScoringConfig) -> f64 {
    let raw = if raw.is_finite() { raw.clamp(0.0, 100.0) } else { 0.0 };
    config.evidence_floor + raw * config.evidence_scale
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
