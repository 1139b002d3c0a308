//! Axum route handlers for the matching API.

use std::collections::BTreeSet;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::matching::canonical::canonicalize;
use crate::matching::jd_parser::StructuredRequirements;
use crate::matching::normalizer::normalize;
use crate::matching::scoring::ScoreRecord;
use crate::models::resume::ResumeData;
use crate::state::AppState;

/// Larger bodies are not job descriptions.
const MAX_JD_CHARS: usize = 50_000;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ScoreRequestBody {
    pub jd_text: String,
    #[serde(default)]
    pub jd_title: Option<String>,
    #[serde(default)]
    pub resume_data: ResumeData,
}

#[derive(Debug, Deserialize)]
pub struct ParseJdRequest {
    pub jd_text: String,
}

#[derive(Debug, Serialize)]
pub struct ParseJdResponse {
    #[serde(flatten)]
    pub requirements: StructuredRequirements,
    pub all_required_canonical: BTreeSet<String>,
}

#[derive(Debug, Deserialize)]
pub struct NormalizeSkillsRequest {
    pub skills: Vec<Value>,
}

#[derive(Debug, Serialize)]
pub struct NormalizeSkillsResponse {
    /// Display list: de-duplicated, first-seen casing.
    pub skills: Vec<String>,
    /// Canonical tokens used for matching.
    pub canonical: BTreeSet<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/ats/score
///
/// Scores a structured resume against a raw JD. A JD with no recognizable
/// skill section yields a low-confidence record, not an error.
pub async fn handle_score(
    State(state): State<AppState>,
    body: Result<Json<ScoreRequestBody>, JsonRejection>,
) -> Result<Json<ScoreRecord>, AppError> {
    let Json(request) = body?;
    check_jd_len(&request.jd_text)?;
    let record = state
        .ats
        .evaluate(&request.jd_text, request.jd_title.as_deref(), &request.resume_data)
        .await;
    Ok(Json(record))
}

/// POST /api/v1/jd/parse
///
/// Returns the structured requirements extracted from a JD.
pub async fn handle_parse_jd(
    State(state): State<AppState>,
    body: Result<Json<ParseJdRequest>, JsonRejection>,
) -> Result<Json<ParseJdResponse>, AppError> {
    let Json(request) = body?;
    check_jd_len(&request.jd_text)?;
    let requirements = state.ats.parse_jd(&request.jd_text);
    let all_required_canonical = requirements.all_required_canonical();
    Ok(Json(ParseJdResponse {
        requirements,
        all_required_canonical,
    }))
}

/// POST /api/v1/resume/skills/normalize
pub async fn handle_normalize_skills(
    body: Result<Json<NormalizeSkillsRequest>, JsonRejection>,
) -> Result<Json<NormalizeSkillsResponse>, AppError> {
    let Json(request) = body?;
    let skills = normalize(&request.skills);
    let canonical = canonicalize(&skills);
    Ok(Json(NormalizeSkillsResponse { skills, canonical }))
}

fn check_jd_len(jd_text: &str) -> Result<(), AppError> {
    if jd_text.chars().count() > MAX_JD_CHARS {
        return Err(AppError::Validation(format!(
            "jd_text exceeds {MAX_JD_CHARS} characters"
        )));
    }
    Ok(())
}
