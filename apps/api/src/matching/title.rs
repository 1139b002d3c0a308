//! Job-title alignment: keyword extraction and mismatch detection.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Shortest resume title worth judging.
const MIN_RESUME_TITLE_CHARS: usize = 3;

/// Lines scanned when guessing a title from the JD body.
const TITLE_SCAN_LINES: usize = 3;
const MAX_TITLE_WORDS: usize = 6;

/// Displayed when no title could be resolved.
pub const UNKNOWN_TITLE: &str = "Unknown Target";

/// Placeholder titles an assessor may echo back from its schema.
const PLACEHOLDER_TITLES: &[&str] = &[
    "string",
    "job title",
    "title",
    "unknown",
    "unknown target",
    "n/a",
];

const TITLE_STOPWORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "of", "for", "in", "at", "to", "with", "on", "as", "by",
    "from", "i", "am", "is", "my", "we", "sr", "jr", "senior", "junior", "lead", "intern",
    "internship", "trainee", "ii", "iii", "iv", "level", "entry",
];

/// Spelling families collapsed before tokenizing.
static TITLE_FAMILIES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"full[\s-]*stack", "fullstack"),
        (r"front[\s-]*end", "frontend"),
        (r"back[\s-]*end", "backend"),
        (r"dev[\s-]*ops", "devops"),
        (r"machine\s+learning", "ml"),
    ]
    .into_iter()
    .map(|(pattern, family)| {
        (
            Regex::new(&format!("(?i){pattern}")).expect("title family regex is valid"),
            family,
        )
    })
    .collect()
});

static TITLE_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:job\s+title|position|role|title)\s*[:\-–]\s*")
        .expect("title prefix regex is valid")
});

/// Where the JD title came from. Only titles supplied by the caller or the
/// evidence assessor are trusted for the mismatch penalty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleSource {
    Request,
    Assessor,
    Heuristic,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobTitle {
    pub text: String,
    pub source: TitleSource,
}

impl JobTitle {
    /// Request title, then assessor title, then a guess from the JD's first
    /// lines, then `UNKNOWN_TITLE`.
    pub fn resolve(requested: Option<&str>, assessed: Option<&str>, jd_text: &str) -> Self {
        if let Some(text) = requested.and_then(meaningful_title) {
            return Self {
                text,
                source: TitleSource::Request,
            };
        }
        if let Some(text) = assessed.and_then(meaningful_title) {
            return Self {
                text,
                source: TitleSource::Assessor,
            };
        }
        if let Some(text) = extract_role_intent(jd_text) {
            return Self {
                text,
                source: TitleSource::Heuristic,
            };
        }
        Self {
            text: UNKNOWN_TITLE.to_string(),
            source: TitleSource::Unknown,
        }
    }

    /// The title to judge alignment against, if it is trusted.
    pub fn for_alignment(&self) -> Option<&str> {
        matches!(self.source, TitleSource::Request | TitleSource::Assessor)
            .then_some(self.text.as_str())
    }
}

/// Trimmed title, or `None` for blanks and schema placeholders.
pub fn meaningful_title(raw: &str) -> Option<String> {
    let title = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if title.is_empty() || PLACEHOLDER_TITLES.contains(&title.to_lowercase().as_str()) {
        return None;
    }
    Some(title)
}

/// Lowercase keyword set of a title or free text.
pub fn title_keywords(text: &str) -> BTreeSet<String> {
    let mut normalized = text.to_lowercase();
    for (pattern, family) in TITLE_FAMILIES.iter() {
        normalized = pattern.replace_all(&normalized, *family).into_owned();
    }

    normalized
        .split(|c: char| !(c.is_alphanumeric() || c == '+' || c == '#'))
        .filter(|w| w.chars().count() >= 2 && !TITLE_STOPWORDS.contains(w))
        .map(str::to_string)
        .collect()
}

/// True when the JD title and the resume title + summary share no keyword.
///
/// Never true without a JD title, or when the resume title is too short to
/// judge.
pub fn is_title_mismatch(jd_title: Option<&str>, resume_title: &str, resume_summary: &str) -> bool {
    let Some(jd_title) = jd_title else {
        return false;
    };
    if resume_title.trim().chars().count() < MIN_RESUME_TITLE_CHARS {
        return false;
    }

    let jd_keywords = title_keywords(jd_title);
    if jd_keywords.is_empty() {
        return false;
    }

    let mut resume_keywords = title_keywords(resume_title);
    resume_keywords.extend(title_keywords(resume_summary));
    jd_keywords.is_disjoint(&resume_keywords)
}

/// Guesses the role from the first lines of a JD: short, not a sentence.
pub fn extract_role_intent(jd_text: &str) -> Option<String> {
    jd_text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .take(TITLE_SCAN_LINES)
        .filter(|l| !l.starts_with(['-', '*', '•']))
        .map(|l| TITLE_PREFIX.replace(l, "").trim().to_string())
        .find(|l| {
            !l.is_empty()
                && l.split_whitespace().count() <= MAX_TITLE_WORDS
                && !l.ends_with('.')
                && !l.ends_with(':')
        })
        .and_then(|l| meaningful_title(&l))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_stack_spellings_collapse() {
        for title in ["Full-Stack Engineer", "Fullstack Engineer", "Full Stack Engineer"] {
            assert_eq!(
                title_keywords(title),
                BTreeSet::from(["engineer".to_string(), "fullstack".to_string()])
            );
        }
    }

    #[test]
    fn test_seniority_words_dropped() {
        assert_eq!(
            title_keywords("Senior Backend Developer Intern"),
            BTreeSet::from(["backend".to_string(), "developer".to_string()])
        );
    }

    #[test]
    fn test_backend_vs_fullstack_is_mismatch() {
        assert!(is_title_mismatch(Some("Full-Stack Engineer"), "Backend Developer", ""));
    }

    #[test]
    fn test_summary_keywords_count_as_overlap() {
        assert!(!is_title_mismatch(
            Some("Full-Stack Engineer"),
            "Backend Developer",
            "Backend developer moving into full stack work"
        ));
    }

    #[test]
    fn test_no_penalty_without_jd_title_or_resume_title() {
        assert!(!is_title_mismatch(None, "Backend Developer", ""));
        assert!(!is_title_mismatch(Some("Data Scientist"), "", ""));
        assert!(!is_title_mismatch(Some("Data Scientist"), "QA", ""));
    }

    #[test]
    fn test_resolve_prefers_request_then_assessor() {
        let jd = "Frontend Developer\nWe build things.";
        let t = JobTitle::resolve(Some("Platform Engineer"), Some("Other"), jd);
        assert_eq!(t.source, TitleSource::Request);

        let t = JobTitle::resolve(Some("  "), Some("Job Title"), jd);
        assert_eq!(
            t,
            JobTitle {
                text: "Frontend Developer".to_string(),
                source: TitleSource::Heuristic,
            }
        );
        assert_eq!(t.for_alignment(), None);

        let t = JobTitle::resolve(None, Some("SDE Intern"), jd);
        assert_eq!(t.for_alignment(), Some("SDE Intern"));
    }

    #[test]
    fn test_role_intent_skips_sentences() {
        let jd = "We are hiring across many teams right now for growth.\nJob Title: Data Analyst\n";
        assert_eq!(extract_role_intent(jd), Some("Data Analyst".to_string()));
        assert_eq!(extract_role_intent(""), None);
    }

    #[test]
    fn test_unknown_when_nothing_resolves() {
        let t = JobTitle::resolve(None, None, "");
        assert_eq!(t.text, UNKNOWN_TITLE);
        assert_eq!(t.source, TitleSource::Unknown);
    }
}
