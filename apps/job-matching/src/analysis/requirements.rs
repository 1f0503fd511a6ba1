//! Requirement parsing: turns a raw posting into must-haves, nice-to-haves, stack and level.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::prompts::{REQUIREMENTS_PROMPT_TEMPLATE, REQUIREMENTS_SYSTEM};
use crate::errors::AppError;
use crate::llm_client::prompts::fill_template;
use crate::llm_client::{complete_json, CompletionProvider};
use crate::models::job::{ExperienceLevel, JobPosting};

/// Structured requirements derived from one posting. Produced fresh per analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedRequirements {
    pub must_have: Vec<String>,
    pub nice_to_have: Vec<String>,
    pub tech_stack: Vec<String>,
    pub experience_level: ExperienceLevel,
    pub responsibilities: Vec<String>,
    pub red_flags: Vec<String>,
}

impl ParsedRequirements {
    /// True when the posting gave us something concrete to match against.
    pub fn has_signals(&self) -> bool {
        !self.must_have.is_empty() || !self.tech_stack.is_empty()
    }

    /// Must-haves followed by stack items, deduplicated case-insensitively.
    pub fn keywords(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.must_have
            .iter()
            .chain(self.tech_stack.iter())
            .map(|s| s.as_str())
            .filter(|s| seen.insert(s.to_lowercase()))
            .collect()
    }
}

/// Shape the model is asked for. Every field is optional so partial answers still parse.
#[derive(Debug, Default, Deserialize)]
struct RawRequirements {
    #[serde(default)]
    must_have: Vec<String>,
    #[serde(default)]
    nice_to_have: Vec<String>,
    #[serde(default)]
    tech_stack: Vec<String>,
    #[serde(default)]
    experience_level: Option<String>,
    #[serde(default)]
    responsibilities: Vec<String>,
    #[serde(default)]
    red_flags: Vec<String>,
}

/// Parses a posting's requirements via the LLM.
/// Any completion failure surfaces as `AppError::Llm`; the caller decides how to degrade.
pub async fn parse_requirements(
    job: &JobPosting,
    llm: &dyn CompletionProvider,
) -> Result<ParsedRequirements, AppError> {
    let prompt = build_prompt(job);
    let raw: RawRequirements = complete_json(llm, &prompt, REQUIREMENTS_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Requirement parsing failed for {}: {e}", job.id)))?;

    let parsed = normalize(raw, job);
    debug!(
        job_id = %job.id,
        must_have = parsed.must_have.len(),
        tech_stack = parsed.tech_stack.len(),
        level = ?parsed.experience_level,
        "Requirements parsed"
    );
    Ok(parsed)
}

fn build_prompt(job: &JobPosting) -> String {
    let listed = if job.requirements.is_empty() {
        "(none listed separately)".to_string()
    } else {
        job.requirements
            .iter()
            .map(|r| format!("- {r}"))
            .collect::<Vec<_>>()
            .join("\n")
    };

    fill_template(
        REQUIREMENTS_PROMPT_TEMPLATE,
        &[
            ("title", job.title.as_str()),
            ("company", job.company.as_str()),
            ("requirements", listed.as_str()),
            ("description", job.description.as_str()),
        ],
    )
}

fn normalize(raw: RawRequirements, job: &JobPosting) -> ParsedRequirements {
    let experience_level = raw
        .experience_level
        .as_deref()
        .and_then(ExperienceLevel::parse_label)
        .unwrap_or_else(|| infer_level_from_title(&job.title));

    ParsedRequirements {
        must_have: clean(raw.must_have),
        nice_to_have: clean(raw.nice_to_have),
        tech_stack: clean(raw.tech_stack),
        experience_level,
        responsibilities: clean(raw.responsibilities),
        red_flags: clean(raw.red_flags),
    }
}

/// Trims entries and drops blanks and case-insensitive duplicates.
fn clean(items: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.to_lowercase()))
        .collect()
}

/// Fallback when the model gives no usable level.
pub fn infer_level_from_title(title: &str) -> ExperienceLevel {
    let title = title.to_lowercase();
    let has = |word: &str| title.split(|c: char| !c.is_alphanumeric()).any(|w| w == word);

    if has("lead") || has("head") || has("director") || has("manager") {
        ExperienceLevel::Lead
    } else if has("staff") || has("principal") {
        ExperienceLevel::Staff
    } else if has("senior") || has("sr") {
        ExperienceLevel::Senior
    } else if has("junior") || has("jr") || has("intern") || has("graduate") {
        ExperienceLevel::Entry
    } else {
        ExperienceLevel::Mid
    }
}
