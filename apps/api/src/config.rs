use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use thiserror::Error;

use crate::llm_client::{DEFAULT_API_URL, DEFAULT_MODEL};
use crate::matching::scoring::{ScoringConfig, ScoringError};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Environment variable '{key}' has invalid value '{value}'")]
    InvalidValue { key: String, value: String },

    #[error(transparent)]
    Scoring(#[from] ScoringError),
}

/// Application configuration loaded from environment variables.
/// Fails at startup if a set variable cannot be parsed or the scoring
/// weights do not sum to 1.0.
#[derive(Debug, Clone)]
pub struct Config {
    /// Evidence assessment is disabled when unset.
    pub hf_api_token: Option<String>,
    pub llm_model: String,
    pub llm_api_url: String,
    pub evidence_timeout: Duration,
    pub scoring: ScoringConfig,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok()).context("Invalid configuration")
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let scoring = scoring_from_lookup(&get)?;
        scoring.validate()?;

        Ok(Config {
            hf_api_token: get("HF_API_TOKEN").filter(|t| !t.trim().is_empty()),
            llm_model: get("LLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            llm_api_url: get("LLM_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            evidence_timeout: Duration::from_secs(parse_or(&get, "EVIDENCE_TIMEOUT_SECS", 30)?),
            scoring,
            port: parse_or(&get, "PORT", 8080)?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn scoring_from_lookup(
    get: &impl Fn(&str) -> Option<String>,
) -> Result<ScoringConfig, ConfigError> {
    let mut scoring = ScoringConfig::default();
    let w = &mut scoring.weights;
    w.skill_match = parse_or(get, "ATS_WEIGHT_SKILL_MATCH", w.skill_match)?;
    w.experience_relevance = parse_or(get, "ATS_WEIGHT_EXPERIENCE", w.experience_relevance)?;
    w.role_alignment = parse_or(get, "ATS_WEIGHT_ROLE_ALIGNMENT", w.role_alignment)?;
    w.education_match = parse_or(get, "ATS_WEIGHT_EDUCATION", w.education_match)?;
    w.recency_continuity = parse_or(get, "ATS_WEIGHT_RECENCY", w.recency_continuity)?;

    scoring.missing_skill_penalty =
        parse_or(get, "ATS_MISSING_SKILL_PENALTY", scoring.missing_skill_penalty)?;
    scoring.title_mismatch_penalty =
        parse_or(get, "ATS_TITLE_MISMATCH_PENALTY", scoring.title_mismatch_penalty)?;
    scoring.no_match_penalty = parse_or(get, "ATS_NO_MATCH_PENALTY", scoring.no_match_penalty)?;
    Ok(scoring)
}

fn parse_or<T: FromStr>(
    get: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError> {
    match get(key) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.hf_api_token, None);
        assert_eq!(config.llm_model, DEFAULT_MODEL);
        assert_eq!(config.evidence_timeout, Duration::from_secs(30));
        assert_eq!(config.scoring.missing_skill_penalty, 7.0);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("PORT", "9000"),
            ("HF_API_TOKEN", "hf_abc"),
            ("ATS_TITLE_MISMATCH_PENALTY", "10"),
            ("ATS_WEIGHT_SKILL_MATCH", "0.45"),
            ("ATS_WEIGHT_EXPERIENCE", "0.30"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.hf_api_token.as_deref(), Some("hf_abc"));
        assert_eq!(config.scoring.title_mismatch_penalty, 10.0);
    }

    #[test]
    fn test_blank_token_is_unset() {
        let config = Config::from_lookup(lookup(&[("HF_API_TOKEN", "  ")])).unwrap();
        assert_eq!(config.hf_api_token, None);
    }

    #[test]
    fn test_invalid_number_rejected() {
        let err = Config::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "PORT"));
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        let err = Config::from_lookup(lookup(&[("ATS_WEIGHT_SKILL_MATCH", "0.9")])).unwrap_err();
        assert!(matches!(err, ConfigError::Scoring(ScoringError::InvalidWeights { .. })));
    }
}
