// LLM prompt constants for resume import and ATS scoring.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for resume import.
pub const IMPORT_SYSTEM: &str = "You are an expert resume parser. \
    You convert the plain text of a resume into structured JSON. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Resume import prompt. Replace `{fidelity_instruction}` and `{resume_text}` before sending.
pub const IMPORT_PROMPT_TEMPLATE: &str = r#"Convert the resume text below into JSON with this EXACT schema (no extra fields):
{
  "personalInfo": {
    "fullName": "", "email": "", "phone": "", "address": "", "summary": ""
  },
  "experience": [
    {"company": "", "position": "", "startDate": "", "endDate": "", "description": ""}
  ],
  "education": [
    {"school": "", "degree": "", "graduationDate": ""}
  ],
  "skills": [""],
  "projects": [
    {"name": "", "description": "", "technologies": [""]}
  ]
}

Rules:
- Use an empty string for an unknown value and an empty array for a missing list.
- Leave endDate empty for a current position.
- Keep dates as written in the resume (e.g. "Jan 2021", "2019").
- One skill per array element.
{fidelity_instruction}

Resume text:
"""
{resume_text}
""""#;

/// System prompt for ATS scoring.
pub const ATS_SYSTEM: &str = "You are an applicant tracking system (ATS) and an experienced \
    technical recruiter. You evaluate resumes for keyword coverage, structure, clarity, and \
    measurable impact. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// ATS scoring prompt. Replace `{resume_json}` and `{job_section}` before sending.
pub const ATS_PROMPT_TEMPLATE: &str = r#"Score the resume below from 0 to 100 for how well it would perform in an ATS screen.
{job_section}
Return a JSON object with this EXACT schema:
{
  "score": 0,
  "feedback": "two or three sentences of overall assessment",
  "suggestions": ["most important concrete improvement first"],
  "strengths": [""],
  "weaknesses": [""]
}

Resume (JSON):
{resume_json}"#;

/// Replaces `{job_description}`; inserted into ATS_PROMPT_TEMPLATE when a job is given.
pub const ATS_JOB_SECTION_TEMPLATE: &str = r#"
Judge keyword and requirement coverage against this job description:
"""
{job_description}
"""
"#;

/// Used for `{job_section}` when no job description is supplied.
pub const ATS_GENERAL_SECTION: &str =
    "\nNo job description was supplied; judge against general best practice for the candidate's field.\n";
