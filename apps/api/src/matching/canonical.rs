//! Skill canonicalization: maps naming variants onto canonical skill tokens.
//!
//! Every canonical value maps to itself, so `canonicalize` is idempotent.
//! Canonical values are single words except for `MULTI_WORD_ALLOWLIST`.

#![allow(dead_code)]

use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

use regex::Regex;

/// Multi-word canonical tokens that are legitimate technical terms.
pub const MULTI_WORD_ALLOWLIST: &[&str] = &["rest apis", "spring boot"];

/// Canonical token → aliases. The canonical token is implicitly its own alias.
const CANONICAL_ALIASES: &[(&str, &[&str])] = &[
    // Languages
    ("python", &["python3", "python 3", "py"]),
    ("java", &["java8", "java 8", "java11", "java 11", "java17", "core java"]),
    ("javascript", &["js", "ecmascript", "es6", "vanilla js", "vanilla javascript"]),
    ("typescript", &["ts"]),
    ("c", &["c language", "c programming"]),
    ("c++", &["cpp", "c plus plus"]),
    ("c#", &["csharp", "c sharp"]),
    ("go", &["golang", "go lang"]),
    ("rust", &["rust lang", "rustlang"]),
    ("ruby", &[]),
    ("php", &["php7", "php8"]),
    ("swift", &[]),
    ("kotlin", &[]),
    ("scala", &[]),
    ("r", &["r programming", "r language"]),
    ("dart", &[]),
    ("sql", &["structured query language", "sql queries"]),
    ("html", &["html5"]),
    ("css", &["css3"]),
    ("bash", &["shell", "shell scripting", "bash scripting"]),
    ("matlab", &[]),
    ("perl", &[]),
    ("lua", &[]),
    ("elixir", &[]),
    ("haskell", &[]),
    // Frontend
    ("react", &["reactjs", "react.js", "react js"]),
    ("next.js", &["nextjs", "next js", "next"]),
    ("angular", &["angularjs", "angular.js", "angular js"]),
    ("vue", &["vuejs", "vue.js", "vue js"]),
    ("svelte", &["sveltejs", "svelte.js"]),
    ("nuxt", &["nuxtjs", "nuxt.js"]),
    ("redux", &["redux toolkit"]),
    ("tailwind", &["tailwindcss", "tailwind css"]),
    ("bootstrap", &[]),
    ("sass", &["scss"]),
    ("jquery", &[]),
    ("react-native", &["react native"]),
    ("flutter", &[]),
    ("webpack", &[]),
    ("vite", &[]),
    // Backend
    ("node.js", &["nodejs", "node js", "node"]),
    ("express", &["expressjs", "express.js", "express js"]),
    ("django", &["django rest framework", "drf"]),
    ("flask", &[]),
    ("fastapi", &["fast api"]),
    ("spring boot", &["springboot", "spring-boot", "spring"]),
    ("laravel", &[]),
    ("rails", &["ruby on rails", "ror"]),
    (".net", &["dotnet", "asp.net", ".net core", "asp.net core"]),
    ("nestjs", &["nest.js", "nest js"]),
    ("graphql", &[]),
    (
        "rest apis",
        &[
            "rest",
            "rest api",
            "restful",
            "restful api",
            "restful apis",
            "restful services",
            "rest services",
        ],
    ),
    ("grpc", &[]),
    ("microservices", &["microservice", "microservices architecture"]),
    ("websockets", &["websocket", "web sockets", "socket.io"]),
    // Databases
    ("postgresql", &["postgres", "postgre sql", "psql"]),
    ("mysql", &["my sql"]),
    ("mongodb", &["mongo", "mongo db"]),
    ("redis", &[]),
    ("sqlite", &["sqlite3"]),
    ("oracle", &["oracle db", "oracle database"]),
    ("mssql", &["sql server", "microsoft sql server", "ms sql"]),
    ("dynamodb", &["dynamo db"]),
    ("cassandra", &[]),
    ("elasticsearch", &["elastic search"]),
    ("firebase", &[]),
    ("supabase", &[]),
    ("nosql", &["no sql", "nosql databases"]),
    ("dbms", &["database management systems", "database management"]),
    // Cloud
    ("aws", &["amazon web services"]),
    ("gcp", &["google cloud", "google cloud platform"]),
    ("azure", &["microsoft azure"]),
    ("heroku", &[]),
    ("vercel", &[]),
    // DevOps & tooling
    ("docker", &[]),
    ("kubernetes", &["k8s"]),
    ("terraform", &[]),
    ("ansible", &[]),
    ("jenkins", &[]),
    ("ci/cd", &["cicd", "ci cd", "ci-cd", "continuous integration"]),
    ("git", &[]),
    ("github", &[]),
    ("gitlab", &[]),
    ("github-actions", &["github actions"]),
    ("linux", &["unix"]),
    ("nginx", &[]),
    ("postman", &[]),
    ("jira", &[]),
    ("figma", &[]),
    // Data & ML
    ("ml", &["machine learning"]),
    ("deep-learning", &["deep learning", "dl"]),
    ("nlp", &["natural language processing"]),
    ("llm", &["llms", "large language models", "large language model"]),
    ("pandas", &[]),
    ("numpy", &[]),
    ("tensorflow", &[]),
    ("pytorch", &["torch"]),
    ("scikit-learn", &["sklearn", "scikit learn"]),
    ("opencv", &[]),
    ("spark", &["apache spark", "pyspark"]),
    ("hadoop", &[]),
    ("kafka", &["apache kafka"]),
    ("airflow", &["apache airflow"]),
    ("tableau", &[]),
    ("powerbi", &["power bi"]),
    ("excel", &["ms excel", "microsoft excel"]),
    // Testing
    ("jest", &[]),
    ("pytest", &[]),
    ("selenium", &[]),
    ("cypress", &[]),
    ("junit", &[]),
    // Fundamentals & practices
    (
        "dsa",
        &[
            "data structures",
            "data structures and algorithms",
            "algorithms",
        ],
    ),
    (
        "oop",
        &[
            "oops",
            "object oriented programming",
            "object-oriented programming",
        ],
    ),
    ("system-design", &["system design"]),
    ("agile", &[]),
    ("scrum", &[]),
    ("oauth", &["oauth2", "oauth 2.0"]),
    ("jwt", &["json web tokens"]),
];

/// Composite aliases that expand to several canonical tokens.
const COMPOSITE_ALIASES: &[(&str, &[&str])] = &[
    ("javascript/typescript", &["javascript", "typescript"]),
    ("js/ts", &["javascript", "typescript"]),
    ("html/css", &["html", "css"]),
    ("html5/css3", &["html", "css"]),
    ("c/c++", &["c", "c++"]),
    ("mern", &["mongodb", "express", "react", "node.js"]),
    ("mern stack", &["mongodb", "express", "react", "node.js"]),
];

/// Aliases too ambiguous to pick out of running prose. They still resolve when
/// a whole fragment is exactly the alias.
const PROSE_AMBIGUOUS: &[&str] = &[
    "go", "c", "r", "next", "node", "rest", "spring", "express", "swift", "shell", "excel",
    "torch", "ts", "dl", "oops", "oracle", "algorithms", "py",
];

static ALIAS_TABLE: LazyLock<HashMap<&'static str, Vec<&'static str>>> = LazyLock::new(|| {
    let mut table = HashMap::new();
    for (canonical, aliases) in CANONICAL_ALIASES {
        table.insert(*canonical, vec![*canonical]);
        for alias in *aliases {
            table.insert(*alias, vec![*canonical]);
        }
    }
    for (alias, tokens) in COMPOSITE_ALIASES {
        table.insert(*alias, tokens.to_vec());
    }
    table
});

static VOCABULARY: LazyLock<BTreeSet<&'static str>> =
    LazyLock::new(|| CANONICAL_ALIASES.iter().map(|(canonical, _)| *canonical).collect());

/// Longest alias, in words. Bounds the prose scan window.
static MAX_ALIAS_WORDS: LazyLock<usize> = LazyLock::new(|| {
    ALIAS_TABLE
        .keys()
        .map(|k| k.split_whitespace().count())
        .max()
        .unwrap_or(1)
});

static PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)?").expect("parenthetical regex is valid"));

/// Lowercases, drops parenthetical text, collapses whitespace and trims
/// surrounding punctuation and whitespace together, so `"* - Python"` cleans
/// to `"python"` in one pass. Leading dots survive (`.net`).
pub fn clean_skill(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let without_parens = PARENTHETICAL.replace_all(&lowered, " ");
    let collapsed = without_parens.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .trim_start_matches(|c: char| {
            c.is_whitespace()
                || matches!(
                    c,
                    ',' | ';' | ':' | '!' | '?' | '"' | '\'' | '*' | '•' | '-' | '[' | '('
                )
        })
        .trim_end_matches(|c: char| {
            c.is_whitespace()
                || matches!(
                    c,
                    '.' | ',' | ';' | ':' | '!' | '?' | '"' | '\'' | '*' | ']' | ')' | '-'
                )
        })
        .to_string()
}

/// Looks up a cleaned key, retrying without a trailing `.js` / `.ts` suffix.
pub fn lookup(key: &str) -> Option<&'static [&'static str]> {
    if let Some(tokens) = ALIAS_TABLE.get(key) {
        return Some(tokens.as_slice());
    }
    let stripped = key
        .strip_suffix(".js")
        .or_else(|| key.strip_suffix(".ts"))?
        .trim_end();
    ALIAS_TABLE.get(stripped).map(|tokens| tokens.as_slice())
}

/// Canonicalizes a single raw skill string. Unknown skills longer than one
/// character are kept as their cleaned form.
pub fn canonicalize_one(raw: &str) -> Vec<String> {
    let cleaned = clean_skill(raw);
    if cleaned.is_empty() {
        return Vec::new();
    }
    match lookup(&cleaned) {
        Some(tokens) => tokens.iter().map(|t| t.to_string()).collect(),
        None if cleaned.chars().count() > 1 => vec![cleaned],
        None => Vec::new(),
    }
}

/// Canonicalizes a raw skill list into an ordered set of canonical tokens.
/// Never fails; blank or garbage input yields an empty set.
pub fn canonicalize<I, S>(raw_skills: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw_skills
        .into_iter()
        .flat_map(|raw| canonicalize_one(raw.as_ref()))
        .collect()
}

/// The fixed technical-skill vocabulary (the alias table's value set).
pub fn vocabulary() -> &'static BTreeSet<&'static str> {
    &VOCABULARY
}

pub fn is_vocabulary_token(token: &str) -> bool {
    VOCABULARY.contains(token)
}

/// A token may contain whitespace only if it is an allow-listed term.
pub fn has_valid_shape(token: &str) -> bool {
    !token.contains(char::is_whitespace) || MULTI_WORD_ALLOWLIST.contains(&token)
}

/// Scans a free-text fragment for known aliases, longest match first, and
/// returns the canonical tokens found in order of appearance.
pub fn alias_hits(fragment: &str) -> Vec<&'static str> {
    let lowered = fragment.to_lowercase();
    let words: Vec<String> = lowered
        .split_whitespace()
        .map(clean_skill)
        .filter(|w| !w.is_empty())
        .collect();

    let mut hits = Vec::new();
    let mut i = 0;
    while i < words.len() {
        let window = (*MAX_ALIAS_WORDS).min(words.len() - i);
        let matched = (1..=window).rev().find_map(|len| {
            let key = words[i..i + len].join(" ");
            prose_lookup(&key).map(|tokens| (len, tokens))
        });

        match matched {
            Some((len, tokens)) => {
                hits.extend_from_slice(tokens);
                i += len;
            }
            None => {
                if words[i].contains('/') {
                    for part in words[i].split('/') {
                        if let Some(tokens) = prose_lookup(&clean_skill(part)) {
                            hits.extend_from_slice(tokens);
                        }
                    }
                }
                i += 1;
            }
        }
    }
    hits
}

fn prose_lookup(key: &str) -> Option<&'static [&'static str]> {
    if key.chars().count() < 2 || PROSE_AMBIGUOUS.contains(&key) {
        return None;
    }
    lookup(key)
}
