//! JD structural parser: turns a raw job description into structured,
//! canonical skill requirements.
//!
//! Pipeline:
//! 1. `SectionLocator` finds required / optional section bodies. No section,
//!    no requirements: the whole JD is never treated as a skill list.
//! 2. Bodies are split into lines; heading-only and metadata lines dropped.
//! 3. OR-groups: "at least one of" cues (inline or over the next bulleted
//!    lines), slash runs (`React / Vue / Angular`) and `X or Y` runs. Only
//!    the skills adjacent to a `/` or `or` join a group.
//! 4. Everything else is exploded into atomic canonical tokens.
//! 5. Optional tokens demote required ones; required tokens must be in the
//!    canonical vocabulary.

#![allow(dead_code)]

use std::collections::BTreeSet;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::matching::canonical::{
    alias_hits, canonicalize_one, clean_skill, has_valid_shape, is_vocabulary_token, lookup,
};
use crate::matching::sections::{HeadingSectionLocator, SectionLocator};

/// Bulleted lines scanned after an "at least one of" cue.
const OR_CUE_LOOKAHEAD: usize = 5;

/// Words a group member may span ("spring boot", "ruby on rails").
const MAX_MEMBER_WORDS: usize = 3;

/// Probable-skill limits.
const MAX_SKILL_WORDS: usize = 4;
const MAX_SKILL_CHARS: usize = 40;

/// Fragment starts that mark a verb phrase or qualifier rather than a skill.
const NON_SKILL_PREFIXES: &[&str] = &[
    "work ",
    "working ",
    "develop",
    "design ",
    "designing ",
    "build ",
    "building ",
    "experience ",
    "experienced ",
    "knowledge ",
    "understanding ",
    "ability ",
    "familiarity ",
    "familiar ",
    "proficiency ",
    "proficient ",
    "strong ",
    "good ",
    "excellent ",
    "solid ",
    "basic ",
    "hands-on ",
    "exposure ",
    "collaborate",
    "write ",
    "writing ",
    "maintain",
    "implement",
    "create ",
    "ensure ",
    "manage",
    "participate",
    "assist",
    "help ",
    "learn",
    "use ",
    "using ",
    "debug",
    "optimi",
    "contribute",
];

const FUNCTION_WORDS: &[&str] = &[
    "a", "an", "the", "this", "that", "we", "you", "our", "your", "or", "and", "with", "in",
    "on", "to", "for", "of", "is", "are", "will", "must", "should", "be", "as", "at", "by",
];

static BULLET_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:[-*•●▪◦■>–—]+\s*|\d{1,2}[.)]\s+)").expect("bullet regex is valid")
});

static INLINE_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[•●▪◦■]|\s[–—-]\s").expect("separator regex is valid"));

static METADATA_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:location|duration|stipend|salary|ctc|education|qualification|about\s+(?:the\s+role|us|the\s+company)|job\s+type|start\s+date|apply\s+by|openings|work\s+mode|perks|benefits)\b",
    )
    .expect("metadata regex is valid")
});

static OR_CUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:at\s+least\s+one\s+of|any\s+one\s+of|one\s+of\s+the\s+following|any\s+of\s+the\s+following|one\s+or\s+more\s+of|either)\b",
    )
    .expect("or-cue regex is valid")
});

/// Tail of a cue line that opens a bulleted list rather than listing inline.
static LIST_TAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(?:the\s+following)?(?:\s*(?:skills|technologies|tools|frameworks|languages|stacks?))?\s*:?\s*$",
    )
    .expect("list-tail regex is valid")
});

static MEMBER_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*[,;/]\s*|\s+(?:or|and)\s+").expect("member separator regex is valid")
});

static FRAGMENT_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*[,;]\s*|\s+(?:and/or|and|or|&)\s+").expect("fragment regex is valid")
});

static SPACED_SLASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*/\s*").expect("slash regex is valid"));

static DEFAULT_PARSER: LazyLock<JdParser> = LazyLock::new(JdParser::default);

// ────────────────────────────────────────────────────────────────────────────
// Output data model
// ────────────────────────────────────────────────────────────────────────────

/// A requirement satisfied by any one of ≥2 canonical skills.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrGroup(BTreeSet<String>);

impl OrGroup {
    /// Returns `None` unless there are at least two distinct members.
    pub fn new<I: IntoIterator<Item = String>>(tokens: I) -> Option<Self> {
        let members: BTreeSet<String> = tokens.into_iter().collect();
        (members.len() >= 2).then_some(Self(members))
    }

    pub fn members(&self) -> &BTreeSet<String> {
        &self.0
    }

    pub fn is_satisfied_by(&self, skills: &BTreeSet<String>) -> bool {
        !self.0.is_disjoint(skills)
    }
}

/// Canonical skill requirements extracted from a JD.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredRequirements {
    pub required_or_groups: Vec<OrGroup>,
    pub required_standalone: BTreeSet<String>,
    pub optional: BTreeSet<String>,
}

impl StructuredRequirements {
    /// Each OR-group counts once, regardless of its size.
    pub fn requirement_count(&self) -> usize {
        self.required_or_groups.len() + self.required_standalone.len()
    }

    /// Flattened required tokens minus optional ones, restricted to the
    /// canonical vocabulary.
    pub fn all_required_canonical(&self) -> BTreeSet<String> {
        self.required_or_groups
            .iter()
            .flat_map(|g| g.members().iter())
            .chain(self.required_standalone.iter())
            .filter(|t| !self.optional.contains(*t))
            .filter(|t| is_vocabulary_token(t) && has_valid_shape(t))
            .cloned()
            .collect()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Parser
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
struct JdLine {
    text: String,
    bulleted: bool,
}

/// Structural JD parser over a pluggable section locator.
#[derive(Clone)]
pub struct JdParser {
    locator: Arc<dyn SectionLocator>,
}

impl Default for JdParser {
    fn default() -> Self {
        Self::new(Arc::new(HeadingSectionLocator::default()))
    }
}

impl JdParser {
    pub fn new(locator: Arc<dyn SectionLocator>) -> Self {
        Self { locator }
    }

    /// Parses a JD into structured requirements. Never fails: empty or
    /// prose-only text yields empty sets.
    pub fn parse(&self, jd_text: &str) -> StructuredRequirements {
        let sections = self.locator.locate(jd_text);
        if sections.is_empty() {
            debug!("No skill-bearing section found in JD; requirements left empty");
            return StructuredRequirements::default();
        }

        let required_lines = self.split_lines(&sections.required);
        let optional_lines = self.split_lines(&sections.optional);

        let (groups, standalone) = extract_required(&required_lines);
        let optional = optional_lines
            .iter()
            .flat_map(|line| line_tokens(&line.text))
            .collect();

        let requirements = finalize(groups, standalone, optional);
        debug!(
            or_groups = requirements.required_or_groups.len(),
            standalone = requirements.required_standalone.len(),
            optional = requirements.optional.len(),
            "Parsed JD requirements"
        );
        requirements
    }

    fn split_lines(&self, raw_lines: &[String]) -> Vec<JdLine> {
        let mut lines = Vec::new();
        for raw in raw_lines {
            for (i, piece) in INLINE_SEPARATOR.split(raw).enumerate() {
                let marker = BULLET_PREFIX.find(piece);
                let text = match marker {
                    Some(m) => &piece[m.end()..],
                    None => piece,
                }
                .trim();

                if text.is_empty()
                    || self.locator.is_heading(text)
                    || METADATA_PREFIX.is_match(text)
                {
                    continue;
                }
                lines.push(JdLine {
                    text: text.to_string(),
                    bulleted: marker.is_some() || i > 0,
                });
            }
        }
        lines
    }
}

/// Parses with the default heading-based locator.
pub fn parse_structured(jd_text: &str) -> StructuredRequirements {
    DEFAULT_PARSER.parse(jd_text)
}

fn extract_required(lines: &[JdLine]) -> (Vec<BTreeSet<String>>, BTreeSet<String>) {
    let mut groups = Vec::new();
    let mut standalone = BTreeSet::new();

    let mut i = 0;
    while i < lines.len() {
        let text = lines[i].text.as_str();

        if let Some(cue) = OR_CUE.find(text) {
            let tail = &text[cue.end()..];
            let inline = inline_members(tail);
            if inline.len() >= 2 {
                groups.push(inline);
                i += 1;
                continue;
            }
            if LIST_TAIL.is_match(tail) {
                let bullets: Vec<&JdLine> = lines[i + 1..]
                    .iter()
                    .take(OR_CUE_LOOKAHEAD)
                    .take_while(|l| l.bulleted)
                    .collect();
                let members: BTreeSet<String> =
                    bullets.iter().filter_map(|l| leading_skill(&l.text)).collect();
                if members.len() >= 2 {
                    groups.push(members);
                    i += 1 + bullets.len();
                    continue;
                }
            }
        }

        for fragment in text.split([',', ';']) {
            let (fragment_groups, tokens) = split_or_runs(fragment);
            groups.extend(fragment_groups);
            standalone.extend(tokens);
        }
        i += 1;
    }

    (groups, standalone)
}

/// Members listed inline after an OR cue: "one of Java, Kotlin or Scala".
fn inline_members(tail: &str) -> BTreeSet<String> {
    let tail = tail.trim_start_matches(|c: char| c == ':' || c.is_whitespace());
    MEMBER_SEPARATOR
        .split(tail)
        .filter_map(leading_skill)
        .collect()
}

/// The skill a bullet starts with: longest table match over its first words,
/// ambiguous short aliases included.
fn leading_skill(text: &str) -> Option<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    leading_member(&words).map(|(member, _)| member)
}

/// Canonical vocabulary token for an exact table key. Nothing is skipped as
/// ambiguous: the text already sits next to a separator.
fn skill_member(text: &str) -> Option<String> {
    let key = clean_skill(text.trim_matches(|c: char| matches!(c, '(' | ')')));
    lookup(&key)?
        .iter()
        .find(|t| is_vocabulary_token(t))
        .map(|t| t.to_string())
}

/// Longest member at the start of `words`, with the number of words it spans.
fn leading_member(words: &[&str]) -> Option<(String, usize)> {
    (1..=words.len().min(MAX_MEMBER_WORDS))
        .rev()
        .find_map(|len| skill_member(&words[..len].join(" ")).map(|m| (m, len)))
}

/// Longest member at the end of `words`, with the number of words it spans.
fn trailing_member(words: &[&str]) -> Option<(String, usize)> {
    (1..=words.len().min(MAX_MEMBER_WORDS)).rev().find_map(|len| {
        skill_member(&words[words.len() - len..].join(" ")).map(|m| (m, len))
    })
}

/// Splits one comma/semicolon fragment into OR-groups and standalone tokens.
///
/// Segments are the text between `/`, `or` and `and/or` separators. A group
/// is the run of skills touching those separators: the trailing skill of the
/// segment before, whole middle segments, the leading skill of the segment
/// after. Every other word stays standalone, so in
/// "Develop REST APIs using Node.js/Express and MongoDB" only node.js and
/// express are alternatives.
fn split_or_runs(fragment: &str) -> (Vec<BTreeSet<String>>, Vec<String>) {
    let collapsed = SPACED_SLASH.replace_all(fragment, "/");
    let mut groups = Vec::new();
    let mut segments: Vec<Vec<&str>> = vec![Vec::new()];

    for word in collapsed.split_whitespace() {
        if word.eq_ignore_ascii_case("or") || word.eq_ignore_ascii_case("and/or") {
            segments.push(Vec::new());
            continue;
        }
        if word.contains('/') && !word.contains("://") {
            match lookup(&clean_skill(word)) {
                // A catalogued slash term: "ci/cd" is one skill, "javascript/typescript" two.
                Some(tokens) => {
                    let members: BTreeSet<String> = tokens
                        .iter()
                        .filter(|t| is_vocabulary_token(t))
                        .map(|t| t.to_string())
                        .collect();
                    if members.len() >= 2 {
                        groups.push(members);
                    } else if let Some(segment) = segments.last_mut() {
                        segment.push(word);
                    }
                }
                None => {
                    for (j, part) in word.split('/').enumerate() {
                        if j > 0 {
                            segments.push(Vec::new());
                        }
                        if let Some(segment) = segments.last_mut() {
                            if !part.is_empty() {
                                segment.push(part);
                            }
                        }
                    }
                }
            }
            continue;
        }
        if let Some(segment) = segments.last_mut() {
            segment.push(word);
        }
    }

    let mut standalone = Vec::new();
    let mut leftover: Vec<String> = Vec::new();
    let mut run: BTreeSet<String> = BTreeSet::new();
    let last = segments.len() - 1;

    for (k, segment) in segments.iter().enumerate() {
        let mut start = 0;
        if k > 0 {
            if let Some((member, len)) = leading_member(segment) {
                run.insert(member);
                start = len;
            }
            // A bare member between two separators keeps the run going.
            if start == segment.len() && k < last {
                continue;
            }
            close_run(&mut run, &mut groups, &mut standalone);
        }

        let mut end = segment.len();
        if k < last {
            if let Some((member, len)) = trailing_member(&segment[start..]) {
                run.insert(member);
                end -= len;
            }
        }
        if start < end {
            leftover.push(segment[start..end].join(" "));
        }
    }

    standalone.extend(leftover.iter().flat_map(|piece| line_tokens(piece)));
    (groups, standalone)
}

/// Ends an OR run: two or more members form a group, a lone member is
/// just a requirement.
fn close_run(
    run: &mut BTreeSet<String>,
    groups: &mut Vec<BTreeSet<String>>,
    standalone: &mut Vec<String>,
) {
    let members = std::mem::take(run);
    if members.len() >= 2 {
        groups.push(members);
    } else {
        standalone.extend(members);
    }
}

/// Atomic vocabulary tokens of a non-OR line.
fn line_tokens(text: &str) -> Vec<String> {
    FRAGMENT_SEPARATOR
        .split(text)
        .flat_map(fragment_tokens)
        .collect()
}

/// A probable skill resolves whole; anything else is exploded via the alias
/// table so raw phrases never become tokens.
fn fragment_tokens(fragment: &str) -> Vec<String> {
    let fragment = fragment.trim();
    if fragment.is_empty() {
        return Vec::new();
    }

    if is_probable_skill(fragment) {
        let whole: Vec<String> = canonicalize_one(fragment)
            .into_iter()
            .filter(|t| is_vocabulary_token(t))
            .collect();
        if !whole.is_empty() {
            return whole;
        }
    }

    alias_hits(fragment)
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Rejects verb-phrase starts, function-word starts, and long or
/// sentence-like strings.
pub fn is_probable_skill(fragment: &str) -> bool {
    let text = fragment.trim().to_lowercase();
    if text.is_empty() || text.chars().count() > MAX_SKILL_CHARS {
        return false;
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() > MAX_SKILL_WORDS {
        return false;
    }
    if FUNCTION_WORDS.contains(&words[0]) {
        return false;
    }
    if NON_SKILL_PREFIXES.iter().any(|p| text.starts_with(p)) {
        return false;
    }
    if text.contains("year") || (words.len() > 2 && text.ends_with('.')) {
        return false;
    }
    true
}

/// Applies demotion and the vocabulary / shape guardrails.
fn finalize(
    groups: Vec<BTreeSet<String>>,
    standalone: BTreeSet<String>,
    optional: BTreeSet<String>,
) -> StructuredRequirements {
    let optional: BTreeSet<String> = optional.into_iter().filter(|t| admissible(t)).collect();

    let mut required_standalone: BTreeSet<String> = standalone
        .into_iter()
        .filter(|t| admissible(t) && !optional.contains(t))
        .collect();

    let mut or_groups = BTreeSet::new();
    for members in groups {
        let kept: Vec<String> = members
            .into_iter()
            .filter(|t| admissible(t) && !optional.contains(t))
            .collect();
        match kept.len() {
            0 => {}
            1 => required_standalone.extend(kept),
            _ => {
                if let Some(group) = OrGroup::new(kept) {
                    or_groups.insert(group);
                }
            }
        }
    }

    StructuredRequirements {
        required_or_groups: or_groups.into_iter().collect(),
        required_standalone,
        optional,
    }
}

fn admissible(token: &str) -> bool {
    if !has_valid_shape(token) {
        warn!(token, "Dropping skill token with disallowed whitespace");
        return false;
    }
    is_vocabulary_token(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::canonical::MULTI_WORD_ALLOWLIST;
    use crate::matching::sections::JdSections;

    fn set(tokens: &[&str]) -> BTreeSet<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    fn group(tokens: &[&str]) -> OrGroup {
        OrGroup::new(tokens.iter().map(|t| t.to_string())).unwrap()
    }

    const INTERNSHIP_JD: &str = r#"Full Stack Developer Intern
About the role:
You will work with Python and AWS on our platform.
Required Skills:
- React.js / Next.js / Angular / Vue.js
- Node.js
- SQL
- Strong communication skills
Good to have (not mandatory):
- Docker, Kubernetes
Stipend: 15,000/month
"#;

    #[test]
    fn test_slash_list_becomes_one_or_group() {
        let req = parse_structured(INTERNSHIP_JD);
        assert_eq!(
            req.required_or_groups,
            vec![group(&["angular", "next.js", "react", "vue"])]
        );
        assert_eq!(req.required_standalone, set(&["node.js", "sql"]));
        assert_eq!(req.optional, set(&["docker", "kubernetes"]));
        assert_eq!(req.requirement_count(), 3);
    }

    #[test]
    fn test_prose_outside_sections_ignored() {
        let req = parse_structured(INTERNSHIP_JD);
        let all = req.all_required_canonical();
        assert!(!all.contains("python"));
        assert!(!all.contains("aws"));
    }

    #[test]
    fn test_empty_jd_yields_empty_requirements() {
        assert_eq!(parse_structured(""), StructuredRequirements::default());
        assert_eq!(parse_structured("   \n\n "), StructuredRequirements::default());
    }

    #[test]
    fn test_prose_only_jd_yields_empty_requirements() {
        let jd = "We are looking for a passionate engineer to join our team. \
                  You will work with React, Node.js and PostgreSQL every day.";
        let req = parse_structured(jd);
        assert!(req.all_required_canonical().is_empty());
        assert_eq!(req.requirement_count(), 0);
    }

    #[test]
    fn test_cue_with_bulleted_members() {
        let jd = "Requirements:\n\
                  Strong grasp of at least one of:\n\
                  - Java\n\
                  - Python (Django)\n\
                  - Go\n\
                  Git and Linux\n";
        let req = parse_structured(jd);
        assert_eq!(req.required_or_groups, vec![group(&["go", "java", "python"])]);
        assert_eq!(req.required_standalone, set(&["git", "linux"]));
    }

    #[test]
    fn test_cue_with_inline_members() {
        let jd = "Technical Skills:\nHands-on experience in any one of Java, Kotlin or Scala\n";
        let req = parse_structured(jd);
        assert_eq!(req.required_or_groups, vec![group(&["java", "kotlin", "scala"])]);
        assert!(req.required_standalone.is_empty());
    }

    #[test]
    fn test_or_word_between_skills() {
        let req = parse_structured("Must Have:\n- MySQL or PostgreSQL\n");
        assert_eq!(req.required_or_groups, vec![group(&["mysql", "postgresql"])]);
    }

    #[test]
    fn test_composite_slash_term_is_group() {
        let req = parse_structured("Required Skills:\n- JavaScript/TypeScript\n");
        assert_eq!(req.required_or_groups, vec![group(&["javascript", "typescript"])]);
    }

    #[test]
    fn test_single_token_slash_term_is_standalone() {
        let req = parse_structured("Requirements:\n- Basic understanding of CI/CD pipelines\n");
        assert!(req.required_or_groups.is_empty());
        assert_eq!(req.required_standalone, set(&["ci/cd"]));
    }

    #[test]
    fn test_slash_in_prose_groups_only_adjacent_skills() {
        let req = parse_structured(
            "Requirements:\n- Develop REST APIs using Node.js/Express and MongoDB\n",
        );
        assert_eq!(req.required_or_groups, vec![group(&["express", "node.js"])]);
        assert_eq!(req.required_standalone, set(&["mongodb", "rest apis"]));
        assert_eq!(req.requirement_count(), 3);

        let req = parse_structured("Requirements:\n- Experience with Docker/Kubernetes and AWS\n");
        assert_eq!(req.required_or_groups, vec![group(&["docker", "kubernetes"])]);
        assert_eq!(req.required_standalone, set(&["aws"]));
    }

    #[test]
    fn test_or_in_prose_groups_only_adjacent_skills() {
        let req = parse_structured("Requirements:\n- Python or Java experience with Docker\n");
        assert_eq!(req.required_or_groups, vec![group(&["java", "python"])]);
        assert_eq!(req.required_standalone, set(&["docker"]));

        let req = parse_structured("Requirements:\n- Python and/or Go\n");
        assert_eq!(req.required_or_groups, vec![group(&["go", "python"])]);
        assert!(req.required_standalone.is_empty());
    }

    #[test]
    fn test_group_fragment_keeps_sibling_fragments() {
        let req = parse_structured("Requirements:\n- React / Vue, Docker, Kubernetes\n");
        assert_eq!(req.required_or_groups, vec![group(&["react", "vue"])]);
        assert_eq!(req.required_standalone, set(&["docker", "kubernetes"]));
        assert_eq!(req.requirement_count(), 3);
    }

    #[test]
    fn test_multi_word_slash_member() {
        let req = parse_structured("Tech Stack:\n- Spring Boot / Django\n");
        assert_eq!(req.required_or_groups, vec![group(&["django", "spring boot"])]);
        assert!(req.required_standalone.is_empty());
    }

    #[test]
    fn test_metadata_bullet_inside_section_dropped() {
        let req = parse_structured("Requirements:\n- Python\n- Education: B.Tech in CS\n- SQL\n");
        assert!(req.required_or_groups.is_empty());
        assert_eq!(req.required_standalone, set(&["python", "sql"]));
    }

    #[test]
    fn test_verb_phrases_exploded_into_atomic_tokens() {
        let jd = "Key Responsibilities:\n\
                  - Develop REST APIs using Node.js and Express\n\
                  - Work closely with designers to ship features\n";
        let req = parse_structured(jd);
        assert_eq!(req.required_standalone, set(&["express", "node.js", "rest apis"]));
    }

    #[test]
    fn test_optional_demotes_required() {
        let jd = "Required Skills:\n- Docker, Kubernetes\n- React / Vue\n\
                  Nice to have:\n- Kubernetes\n- Vue\n";
        let req = parse_structured(jd);
        assert_eq!(req.required_standalone, set(&["docker", "react"]));
        assert!(req.required_or_groups.is_empty());
        assert_eq!(req.all_required_canonical(), set(&["docker", "react"]));
        assert!(req.optional.contains("kubernetes"));
    }

    #[test]
    fn test_optional_tokens_never_grouped() {
        let req = parse_structured("Required Skills: SQL\nPreferred: React / Vue\n");
        assert!(req.required_or_groups.is_empty());
        assert_eq!(req.optional, set(&["react", "vue"]));
    }

    #[test]
    fn test_required_tokens_respect_whitespace_invariant() {
        let jds = [
            INTERNSHIP_JD,
            "Requirements:\n- Spring Boot microservices\n- REST APIs, Hibernate ORM\n- Machine Learning\n",
            "Skills: Data Structures and Algorithms, Object Oriented Programming, Google Cloud\n",
            "Tech Stack: MERN stack, Tailwind CSS, React Native\n",
        ];
        for jd in jds {
            for token in parse_structured(jd).all_required_canonical() {
                assert!(
                    !token.contains(' ') || MULTI_WORD_ALLOWLIST.contains(&token.as_str()),
                    "{token:?} leaked from {jd:?}"
                );
            }
        }
    }

    #[test]
    fn test_uncatalogued_tokens_filtered_from_required() {
        let req = parse_structured("Requirements:\n- Hibernate\n- Java\n");
        assert_eq!(req.all_required_canonical(), set(&["java"]));
    }

    struct FixedLocator(JdSections);

    impl SectionLocator for FixedLocator {
        fn locate(&self, _jd_text: &str) -> JdSections {
            self.0.clone()
        }

        fn is_heading(&self, line: &str) -> bool {
            line.eq_ignore_ascii_case("skills")
        }
    }

    #[test]
    fn test_parser_uses_injected_locator_and_drops_metadata() {
        let locator = FixedLocator(JdSections {
            required: vec![
                "Skills".to_string(),
                "Location: Bengaluru".to_string(),
                "Duration: 6 months".to_string(),
                "• Rust • Kafka".to_string(),
            ],
            optional: vec![],
        });
        let parser = JdParser::new(Arc::new(locator));
        let req = parser.parse("ignored");
        assert_eq!(req.required_standalone, set(&["kafka", "rust"]));
    }

    #[test]
    fn test_probable_skill_heuristic() {
        assert!(is_probable_skill("Node.js"));
        assert!(is_probable_skill("Spring Boot"));
        assert!(!is_probable_skill("Experience with Docker"));
        assert!(!is_probable_skill("develop scalable services"));
        assert!(!is_probable_skill("the ability to learn quickly and adapt"));
        assert!(!is_probable_skill("2+ years of Python"));
        assert!(!is_probable_skill(""));
    }

    #[test]
    fn test_or_group_satisfaction() {
        let g = group(&["javascript", "typescript"]);
        assert!(g.is_satisfied_by(&set(&["javascript", "react"])));
        assert!(!g.is_satisfied_by(&set(&["python"])));
        assert!(OrGroup::new(vec!["react".to_string(), "react".to_string()]).is_none());
    }
}
