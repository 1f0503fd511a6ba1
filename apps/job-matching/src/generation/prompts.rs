// LLM prompt constants for the generation stage.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for resume generation.
pub const RESUME_SYSTEM: &str = "You are an expert resume writer tailoring a candidate's \
    resume to one job posting. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences around the JSON.";

/// Resume prompt. Replace: {grounding_instruction}, {honesty_instruction}, {voice_json},
/// {profile_json}, {report_json}
pub const RESUME_PROMPT_TEMPLATE: &str = r##"{grounding_instruction}

{honesty_instruction}

VOICE CALIBRATION:
{voice_json}

CANDIDATE PROFILE (source of truth):
{profile_json}

MATCH REPORT for the target job:
{report_json}

Write a one-page resume in markdown tailored to this job. Return:
{
  "markdown": "# Name\n\n## Summary\n...",
  "highlighted_skills": ["Rust", "PostgreSQL"]
}

RULES:
1. Lead the summary and the most recent role with the STRONG MATCHES.
2. Use the job's own wording for skills the candidate genuinely has.
3. `highlighted_skills` lists only skills present in the candidate profile, most relevant first.
4. Start bullets with the preferred verbs from the voice calibration where natural."##;

/// System prompt for cover letter generation.
pub const COVER_LETTER_SYSTEM: &str = "You are an expert career writer drafting a concise, \
    specific cover letter. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences around the JSON.";

/// Cover letter prompt. Replace: {grounding_instruction}, {honesty_instruction},
/// {voice_json}, {hook_instruction}, {profile_json}, {report_json}
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"{grounding_instruction}

{honesty_instruction}

VOICE CALIBRATION:
{voice_json}

OPENING: {hook_instruction}

CANDIDATE PROFILE (source of truth):
{profile_json}

MATCH REPORT for the target job:
{report_json}

Write a cover letter in markdown, 250-350 words, three or four paragraphs. Return:
{
  "markdown": "Dear Hiring Team,\n\n...",
  "key_points": ["Rebuilt an event pipeline in Rust", "..."]
}

`key_points` are the 2-4 arguments the letter makes, one short phrase each."#;

/// System prompt for application question answers.
pub const QUESTIONS_SYSTEM: &str = "You are helping a candidate answer job application \
    questions truthfully and specifically. \
    You MUST respond with valid JSON only — a JSON array of strings. \
    Do NOT include any text outside the JSON array.";

/// Question answering prompt. Replace: {grounding_instruction}, {voice_json},
/// {profile_json}, {report_json}, {questions_json}
pub const QUESTIONS_PROMPT_TEMPLATE: &str = r#"{grounding_instruction}

VOICE CALIBRATION:
{voice_json}

CANDIDATE PROFILE (source of truth):
{profile_json}

MATCH REPORT for the target job:
{report_json}

Answer each question below in 80-150 words. Return a JSON ARRAY of strings with exactly one
answer per question, in the same order:
{questions_json}"#;

/// System prompt for recruiter replies.
pub const RECRUITER_EMAIL_SYSTEM: &str = "You are helping a candidate reply to a recruiter. \
    Be courteous and brief. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object.";

/// Recruiter reply prompt. Replace: {grounding_instruction}, {voice_json}, {stance_instruction},
/// {recruiter_message}, {profile_json}, {report_json}
pub const RECRUITER_EMAIL_PROMPT_TEMPLATE: &str = r#"{grounding_instruction}

VOICE CALIBRATION:
{voice_json}

STANCE: {stance_instruction}

RECRUITER MESSAGE:
{recruiter_message}

CANDIDATE PROFILE:
{profile_json}

MATCH REPORT for the role the recruiter mentioned:
{report_json}

Write the reply email, under 180 words. Return:
{
  "subject": "Re: ...",
  "body": "Hi ...,\n\n..."
}"#;

pub const INTERESTED_STANCE: &str = "The candidate is interested. Thank the recruiter, \
    mention two strong matches, and propose times for a call.";

pub const DECLINE_STANCE: &str = "The candidate is declining this role. Thank the recruiter, \
    decline politely without criticizing the company, and leave the door open for better-aligned roles.";
