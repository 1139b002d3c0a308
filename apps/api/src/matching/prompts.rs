// LLM prompt constants for evidence assessment.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for evidence assessment. The model is never asked for
/// skill matches or a final score.
pub const EVIDENCE_SYSTEM: &str = "You are an expert ATS (Applicant Tracking System) evaluator. \
    You assess qualitative evidence in a resume against a job description. \
    You do NOT decide the final score and you do NOT match skills.";

/// Evidence prompt template. Replace `{resume_json}` and `{jd_text}` before sending.
pub const EVIDENCE_PROMPT_TEMPLATE: &str = r#"Evaluate the applicant resume against the job description below.
Only assess evidence. Assign each category a score from 0 to 100.

Return a JSON object with this EXACT schema (no extra fields):
{
  "job_title": "Full Stack Developer Intern",
  "experience_relevance": 0.0,
  "role_alignment": 0.0,
  "education_match": 0.0,
  "recency_continuity": 0.0
}

Rules:

JOB TITLE: The exact role name from the job description. Focus ONLY on the role name.
Do NOT output generic headers like "Job Title" or "Location". Use an empty string if the
job description names no role.

EXPERIENCE RELEVANCE: How closely the applicant's work history matches the work described.

ROLE ALIGNMENT: How well the applicant's stated role, summary and projects fit the target role.

EDUCATION MATCH: How well the applicant's education fits any stated education requirement.
Score 70 if the job description states none.

RECENCY & CONTINUITY: Continuous, recent work or project history scores higher.

Applicant Resume:
{resume_json}

Job Description:
{jd_text}
"#;
