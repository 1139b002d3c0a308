//! JD section boundary detection.
//!
//! A `SectionLocator` finds the skill-bearing bodies of a job description.
//! The default `HeadingSectionLocator` recognizes heading lines by regex; a
//! section runs until the next recognized heading (of any kind) or end of text.

#![allow(dead_code)]

use regex::Regex;
use serde::Serialize;

/// What a recognized heading opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    /// Mandatory skills, requirements, responsibilities.
    Required,
    /// Good-to-have / preferred / not mandatory.
    Optional,
    /// Any other heading. Only bounds the previous section.
    Other,
}

/// Raw body lines of the skill-bearing sections, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JdSections {
    pub required: Vec<String>,
    pub optional: Vec<String>,
}

impl JdSections {
    pub fn is_empty(&self) -> bool {
        self.required.is_empty() && self.optional.is_empty()
    }
}

/// Locates skill-bearing sections in a JD.
pub trait SectionLocator: Send + Sync {
    fn locate(&self, jd_text: &str) -> JdSections;

    /// True if the line is nothing but a recognized heading.
    fn is_heading(&self, line: &str) -> bool;
}

const REQUIRED_HEADINGS: &[&str] = &[
    r"(?:required|mandatory|must[\s-]*have|key|core|primary|technical|tech)\s+skills?(?:\s+required)?",
    r"skills?(?:\s*(?:set|required|needed|&\s*qualifications|and\s+qualifications))?",
    r"(?:basic\s+|minimum\s+|required\s+)?qualifications?",
    r"(?:technical\s+)?requirements?",
    r"must[\s-]*haves?",
    r"(?:key\s+|roles?\s+(?:and|&)\s+)?responsibilities",
    r"what\s+you(?:'|’)?(?:ll| will)\s+(?:need|do|bring)",
    r"what\s+we(?:'|’)?(?:re| are)\s+looking\s+for",
    r"you\s+should\s+have",
    r"fundamental\s+knowledge",
    r"tech(?:nology|nical)?\s+stack",
    r"technologies",
];

const OPTIONAL_HEADINGS: &[&str] = &[
    r"(?:good|nice)[\s-]+to[\s-]+have(?:\s+skills?)?",
    r"preferred(?:\s+(?:skills?|qualifications?|experience))?",
    r"bonus(?:\s+points?)?",
    r"(?:added\s+)?advantage",
    r"plus\s+points?",
    r"not\s+mandatory",
    r"optional(?:\s+skills?)?",
];

const OTHER_HEADINGS: &[&str] = &[
    r"about\s+(?:us|the\s+(?:role|company|job|team|internship))",
    r"job\s+(?:description|summary|type|title)",
    r"(?:role\s+)?overview",
    r"benefits",
    r"perks(?:\s+(?:and|&)\s+benefits)?",
    r"what\s+we\s+offer",
    r"why\s+join\s+us",
    r"location",
    r"duration",
    r"stipend",
    r"salary",
    r"compensation",
    r"ctc",
    r"education",
    r"eligibility(?:\s+criteria)?",
    r"who\s+can\s+apply",
    r"how\s+to\s+apply",
    r"start\s+date",
    r"apply\s+by",
    r"(?:number\s+of\s+)?openings",
    r"work\s+mode",
    r"soft\s+skills",
    r"selection\s+process",
];

/// Markers that turn a heading into an optional one, e.g. "Skills (good to have)".
const OPTIONAL_MARKERS: &[&str] = &[
    "good to have",
    "good-to-have",
    "nice to have",
    "nice-to-have",
    "preferred",
    "not mandatory",
    "optional",
    "bonus",
];

struct HeadingPattern {
    kind: SectionKind,
    regex: Regex,
}

/// Regex-driven heading recognizer.
pub struct HeadingSectionLocator {
    patterns: Vec<HeadingPattern>,
}

impl Default for HeadingSectionLocator {
    fn default() -> Self {
        let mut locator = Self {
            patterns: Vec::new(),
        };
        // Optional first: "Preferred Qualifications" must not read as "Qualifications".
        for (kind, phrases) in [
            (SectionKind::Optional, OPTIONAL_HEADINGS),
            (SectionKind::Other, OTHER_HEADINGS),
            (SectionKind::Required, REQUIRED_HEADINGS),
        ] {
            for phrase in phrases {
                locator.push(kind, phrase);
            }
        }
        locator
    }
}

impl HeadingSectionLocator {
    /// Adds a heading pattern (a regex fragment, matched case-insensitively
    /// against the whole heading text).
    pub fn with_heading(mut self, kind: SectionKind, phrase: &str) -> Result<Self, regex::Error> {
        // Extensions take precedence over the built-in patterns.
        let pattern = Self::compile(kind, phrase)?;
        self.patterns.insert(0, pattern);
        Ok(self)
    }

    fn push(&mut self, kind: SectionKind, phrase: &str) {
        let pattern = Self::compile(kind, phrase).expect("built-in heading patterns are valid");
        self.patterns.push(pattern);
    }

    fn compile(kind: SectionKind, phrase: &str) -> Result<HeadingPattern, regex::Error> {
        let source = format!(
            r"(?i)^(?:{phrase})\s*(?:\([^)]*\))?\s*[*_]*\s*(?:[:\-–—]\s*(?P<rest>.*))?$"
        );
        Ok(HeadingPattern {
            kind,
            regex: Regex::new(&source)?,
        })
    }

    /// Classifies a line as a heading, returning its kind and any inline
    /// content after the heading's colon.
    pub fn classify(&self, line: &str) -> Option<(SectionKind, String)> {
        let text = strip_heading_decoration(line);
        if text.is_empty() || text.chars().count() > 80 {
            return None;
        }

        let (kind, rest) = self.patterns.iter().find_map(|pattern| {
            pattern.regex.captures(text).map(|caps| {
                let rest = caps
                    .name("rest")
                    .map(|m| m.as_str().trim().to_string())
                    .unwrap_or_default();
                (pattern.kind, rest)
            })
        })?;

        let heading_lower = text[..text.len() - rest.len()].to_lowercase();
        let kind = if kind == SectionKind::Required
            && OPTIONAL_MARKERS.iter().any(|m| heading_lower.contains(m))
        {
            SectionKind::Optional
        } else {
            kind
        };
        Some((kind, rest))
    }
}

impl SectionLocator for HeadingSectionLocator {
    fn locate(&self, jd_text: &str) -> JdSections {
        let mut sections = JdSections::default();
        let mut current: Option<SectionKind> = None;

        for line in jd_text.lines() {
            // "- Education: B.Tech" is a metadata bullet inside the body, not a boundary.
            let heading = self.classify(line).filter(|(kind, rest)| {
                !(*kind == SectionKind::Other && !rest.is_empty() && is_bulleted(line))
            });
            if let Some((kind, rest)) = heading {
                current = Some(kind);
                if !rest.is_empty() {
                    push_body_line(&mut sections, kind, rest);
                }
                continue;
            }
            if let Some(kind) = current {
                if !line.trim().is_empty() {
                    push_body_line(&mut sections, kind, line.trim().to_string());
                }
            }
        }

        sections
    }

    fn is_heading(&self, line: &str) -> bool {
        matches!(self.classify(line), Some((_, rest)) if rest.is_empty())
    }
}

fn push_body_line(sections: &mut JdSections, kind: SectionKind, line: String) {
    match kind {
        SectionKind::Required => sections.required.push(line),
        SectionKind::Optional => sections.optional.push(line),
        SectionKind::Other => {}
    }
}

/// A list item: a dash-like or dot bullet, or `*` followed by a space.
fn is_bulleted(line: &str) -> bool {
    let line = line.trim_start();
    line.starts_with(['-', '•', '●', '▪', '◦', '–', '—']) || line.starts_with("* ")
}

/// Strips markdown heading marks, emphasis and leading bullets from a line.
fn strip_heading_decoration(line: &str) -> &str {
    line.trim()
        .trim_start_matches(|c: char| matches!(c, '#' | '*' | '_' | '•' | '-' | '>'))
        .trim_end_matches(|c: char| matches!(c, '*' | '_'))
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERNSHIP_JD: &str = "Full Stack Developer Intern\n\
        About the role:\n\
        You will build features across our web platform with Python and Go.\n\
        Required Skills:\n\
        - React.js / Next.js / Angular / Vue.js\n\
        - Node.js\n\
        - SQL\n\
        Good to have (not mandatory):\n\
        - Docker\n\
        Stipend: 20k/month\n\
        - Kubernetes\n";

    #[test]
    fn test_required_and_optional_sections_split() {
        let sections = HeadingSectionLocator::default().locate(INTERNSHIP_JD);
        assert_eq!(
            sections.required,
            vec!["- React.js / Next.js / Angular / Vue.js", "- Node.js", "- SQL"]
        );
        assert_eq!(sections.optional, vec!["- Docker"]);
    }

    #[test]
    fn test_other_heading_bounds_section() {
        // "Kubernetes" follows the Stipend heading and belongs to no section.
        let sections = HeadingSectionLocator::default().locate(INTERNSHIP_JD);
        assert!(!sections.optional.iter().any(|l| l.contains("Kubernetes")));
        assert!(!sections.required.iter().any(|l| l.contains("Python")));
    }

    #[test]
    fn test_metadata_bullet_does_not_end_section() {
        let jd = "Requirements:\n- Python\n- Education: B.Tech in CS\n- SQL\n\
                  Location: Pune\n- Go\n";
        let sections = HeadingSectionLocator::default().locate(jd);
        assert_eq!(
            sections.required,
            vec!["- Python", "- Education: B.Tech in CS", "- SQL"]
        );
    }

    #[test]
    fn test_inline_heading_content_kept() {
        let jd = "Requirements: Python, SQL\nPreferred: Kafka";
        let sections = HeadingSectionLocator::default().locate(jd);
        assert_eq!(sections.required, vec!["Python, SQL"]);
        assert_eq!(sections.optional, vec!["Kafka"]);
    }

    #[test]
    fn test_prose_only_jd_has_no_sections() {
        let jd = "We are a fast growing startup looking for great engineers who love Python.";
        assert!(HeadingSectionLocator::default().locate(jd).is_empty());
    }

    #[test]
    fn test_markdown_headings_recognized() {
        let locator = HeadingSectionLocator::default();
        assert_eq!(
            locator.classify("## Key Responsibilities"),
            Some((SectionKind::Required, String::new()))
        );
        assert_eq!(
            locator.classify("**Preferred Qualifications**"),
            Some((SectionKind::Optional, String::new()))
        );
        assert_eq!(
            locator.classify("Skills (Good to have):"),
            Some((SectionKind::Optional, String::new()))
        );
    }

    #[test]
    fn test_sentences_are_not_headings() {
        let locator = HeadingSectionLocator::default();
        assert!(locator.classify("Requirements gathering with stakeholders").is_none());
        assert!(!locator.is_heading("Python"));
        assert!(locator.is_heading("Technical Skills"));
    }

    #[test]
    fn test_custom_heading_extension() {
        let locator = HeadingSectionLocator::default()
            .with_heading(SectionKind::Required, r"what\s+you\s+know")
            .unwrap();
        let sections = locator.locate("What you know:\n- Rust\nBenefits\n- Snacks");
        assert_eq!(sections.required, vec!["- Rust"]);
    }
}
