// JD-to-resume skill matching and ATS scoring.
// Deterministic core: canonical, sections, jd_parser, normalizer, title, scoring.
// The only LLM call is evidence assessment, which goes through llm_client.

pub mod canonical;
pub mod evidence;
pub mod handlers;
pub mod jd_parser;
pub mod normalizer;
pub mod prompts;
pub mod scoring;
pub mod sections;
pub mod service;
pub mod title;
