//! Resume skill normalizer: a display/hygiene layer over the skill list an
//! upstream resume parser produced. Matching uses `canonical`, not this.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

static ENTRY_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,;|•]").expect("entry separator regex is valid"));

/// String entries of an untrusted list; everything else is dropped.
pub fn string_entries(raw: &[Value]) -> Vec<&str> {
    raw.iter().filter_map(Value::as_str).collect()
}

/// Cleans a raw skill list for display.
///
/// - non-string and blank entries are dropped
/// - category prefixes ("Languages: ...") are stripped
/// - composite entries are split on `,` `;` `|` `•`
/// - case-insensitive de-duplication keeps the first-seen casing
pub fn normalize(raw_skills: &[Value]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut skills = Vec::new();

    for entry in string_entries(raw_skills) {
        let body = match entry.split_once(':') {
            Some((_, rest)) => rest,
            None => entry,
        };
        for piece in ENTRY_SEPARATOR.split(body) {
            let skill = piece.split_whitespace().collect::<Vec<_>>().join(" ");
            if skill.is_empty() {
                continue;
            }
            if seen.insert(skill.to_lowercase()) {
                skills.push(skill);
            }
        }
    }

    skills
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn values(v: Value) -> Vec<Value> {
        v.as_array().cloned().unwrap_or_default()
    }

    #[test]
    fn test_dedup_keeps_first_casing() {
        let raw = values(json!(["React", "react", "REACT", "Node.js"]));
        assert_eq!(normalize(&raw), vec!["React", "Node.js"]);
    }

    #[test]
    fn test_non_strings_and_blanks_dropped() {
        let raw = values(json!(["Python", 42, null, "   ", {"name": "Go"}, ["Rust"]]));
        assert_eq!(normalize(&raw), vec!["Python"]);
    }

    #[test]
    fn test_category_prefix_and_composites_split() {
        let raw = values(json!([
            "Languages: Python, Java",
            "Databases: PostgreSQL | MongoDB",
            "python"
        ]));
        assert_eq!(normalize(&raw), vec!["Python", "Java", "PostgreSQL", "MongoDB"]);
    }

    #[test]
    fn test_whitespace_collapsed() {
        let raw = values(json!(["  Spring   Boot "]));
        assert_eq!(normalize(&raw), vec!["Spring Boot"]);
    }

    #[test]
    fn test_string_entries_filters_types() {
        let raw = values(json!(["a", 1, "b", false]));
        assert_eq!(string_entries(&raw), vec!["a", "b"]);
    }
}
