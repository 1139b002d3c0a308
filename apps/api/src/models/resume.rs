use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Structured resume as produced by the upstream resume parser.
///
/// List entries are untrusted: anything may show up in `skills`, and the
/// experience/education/project entries are passed to the evidence assessor
/// as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResumeData {
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub skills: Vec<Value>,
    #[serde(default)]
    pub experience: Vec<Value>,
    #[serde(default)]
    pub education: Vec<Value>,
    #[serde(default)]
    pub projects: Vec<Value>,
}

impl ResumeData {
    /// True if at least one experience entry carries content.
    pub fn has_experience(&self) -> bool {
        self.experience.iter().any(|entry| match entry {
            Value::Null => false,
            Value::String(s) => !s.trim().is_empty(),
            Value::Array(a) => !a.is_empty(),
            Value::Object(o) => !o.is_empty(),
            Value::Bool(_) | Value::Number(_) => true,
        })
    }

    pub fn title(&self) -> &str {
        self.job_title.as_deref().unwrap_or_default()
    }

    pub fn summary(&self) -> &str {
        self.summary.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_fields_default() {
        let resume: ResumeData = serde_json::from_value(json!({})).unwrap();
        assert!(resume.skills.is_empty());
        assert!(!resume.has_experience());
        assert_eq!(resume.title(), "");
    }

    #[test]
    fn test_blank_experience_entries_ignored() {
        let resume: ResumeData =
            serde_json::from_value(json!({"experience": [null, "  ", {}]})).unwrap();
        assert!(!resume.has_experience());

        let experience = json!({"experience": [{"company": "Acme", "role": "SDE"}]});
        let resume: ResumeData = serde_json::from_value(experience).unwrap();
        assert!(resume.has_experience());
    }
}
