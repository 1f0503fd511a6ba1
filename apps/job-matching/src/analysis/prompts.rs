// LLM prompt constants for the analysis stage.
// System prompts double as the routing key for scripted providers in tests,
// so every agent call uses a distinct one.

/// System prompt for requirement parsing: enforces JSON-only output.
pub const REQUIREMENTS_SYSTEM: &str = "You are an expert technical recruiter. \
    Parse a job posting into structured hiring requirements. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Requirement parsing prompt. Replace: {title}, {company}, {requirements}, {description}
pub const REQUIREMENTS_PROMPT_TEMPLATE: &str = r#"Parse the following job posting.

Return a JSON object with this EXACT schema (no extra fields):
{
  "must_have": ["5+ years backend development"],
  "nice_to_have": ["Kafka"],
  "tech_stack": ["Rust", "PostgreSQL"],
  "experience_level": "senior",
  "responsibilities": ["Own the ingestion pipeline"],
  "red_flags": ["Expects unpaid trial work"]
}

Rules:
- MUST HAVE: explicit requirements — "required", "must have", minimum years.
- NICE TO HAVE: "preferred", "bonus", "plus", "nice to have".
- TECH STACK: languages, frameworks, databases, and platforms named anywhere in the posting.
  Use short canonical names ("PostgreSQL", not "experience with Postgres databases").
- EXPERIENCE LEVEL: exactly one of "entry", "mid", "senior", "staff", "lead".
- RED FLAGS: unrealistic scope, unpaid work, vague compensation, "rockstar/ninja" language,
  excessive hours. Leave empty when there are none.

TITLE: {title}
COMPANY: {company}

LISTED REQUIREMENTS:
{requirements}

DESCRIPTION:
{description}"#;

/// System prompt for company evaluation: enforces JSON-only output.
pub const COMPANY_SYSTEM: &str = "You are a career advisor who evaluates employers \
    for job seekers. Be candid and specific. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Company evaluation prompt. Replace: {company}, {title}, {salary}, {expectations}, {description}
pub const COMPANY_PROMPT_TEMPLATE: &str = r#"Evaluate {company} as an employer for the role "{title}".

Return a JSON object with this EXACT schema:
{
  "scores": {
    "culture": 0,
    "growth": 0,
    "compensation": 0,
    "stability": 0,
    "workLifeBalance": 0,
    "reputation": 0
  },
  "green_flags": ["Publishes salary bands"],
  "red_flags": ["High attrition reported"],
  "recent_news": ["Announced Series C funding"],
  "summary": "One sentence describing the company and the role."
}

SCORE CEILINGS (never exceed):
- culture: 20
- growth: 20
- compensation: 20 (compare the listed salary against the candidate's expectations)
- stability: 15
- workLifeBalance: 15
- reputation: 10

Only list news you are confident about. Leave lists empty rather than guessing.

LISTED SALARY: {salary}
CANDIDATE SALARY EXPECTATIONS: {expectations}

POSTING:
{description}"#;
