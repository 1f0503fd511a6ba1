//! Profile/job matching: deterministic keyword overlap between a candidate and parsed requirements.
//!
//! Algorithm:
//! 1. Every requirement carries a weight: must-have 1.0, tech stack 0.8, nice-to-have 0.5.
//! 2. Best strength over the candidate's skills:
//!    - exact skill (case-insensitive) → 1.0
//!    - skill/requirement containment, or mention in work history → 0.6
//!    - same skill family as a candidate skill → 0.4 (recorded as transferable)
//!    - otherwise → 0.0
//! 3. overall = Σ(strength × weight) / Σ(weight) × 100
//! 4. Classify: strong (≥0.8), partial (0.4–0.79), gap (<0.4)

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::analysis::requirements::ParsedRequirements;
use crate::models::profile::UserProfile;

const MUST_HAVE_WEIGHT: f32 = 1.0;
const TECH_STACK_WEIGHT: f32 = 0.8;
const NICE_TO_HAVE_WEIGHT: f32 = 0.5;

const EXACT_STRENGTH: f32 = 1.0;
const CONTAINED_STRENGTH: f32 = 0.6;
const FAMILY_STRENGTH: f32 = 0.4;

const STRONG_THRESHOLD: f32 = 0.8;
const PARTIAL_THRESHOLD: f32 = 0.4;

/// Skills that substitute for one another well enough to count as transferable.
const SKILL_FAMILIES: &[&[&str]] = &[
    &["rust", "c++", "c", "go", "zig"],
    &["java", "kotlin", "scala", "c#"],
    &["python", "ruby", "perl", "php"],
    &["javascript", "typescript", "node.js", "node", "deno"],
    &["react", "vue", "angular", "svelte", "next.js"],
    &["postgresql", "postgres", "mysql", "sql server", "oracle", "sqlite", "sql"],
    &["mongodb", "dynamodb", "cassandra", "couchdb"],
    &["kafka", "rabbitmq", "nats", "pulsar", "kinesis", "sqs"],
    &["aws", "gcp", "azure"],
    &["kubernetes", "nomad", "ecs", "docker swarm"],
    &["terraform", "pulumi", "cloudformation", "ansible"],
    &["pytorch", "tensorflow", "jax"],
    &["redis", "memcached"],
];

/// A requirement the candidate covers, with the evidence that covers it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillMatch {
    pub requirement: String,
    pub evidence: String,
    pub strength: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchAnalysis {
    pub overall_match: u32,
    pub strong_matches: Vec<SkillMatch>,
    pub partial_matches: Vec<SkillMatch>,
    pub gaps: Vec<String>,
    pub transferable_skills: Vec<String>,
}

pub fn analyze_match(profile: &UserProfile, requirements: &ParsedRequirements) -> MatchAnalysis {
    let skills = profile.unique_skills();
    let experience_text = profile.experience_text();

    let weighted = weighted_requirements(requirements);
    if weighted.is_empty() {
        return MatchAnalysis::default();
    }

    let mut analysis = MatchAnalysis::default();
    let mut transferable_seen = HashSet::new();
    let mut total_weight = 0.0_f32;
    let mut total_score = 0.0_f32;

    for (requirement, weight) in weighted {
        total_weight += weight;
        let (strength, evidence, transferable) =
            best_strength(requirement, &skills, &experience_text);
        total_score += strength * weight;

        if let Some(skill) = transferable {
            if transferable_seen.insert(skill.to_lowercase()) {
                analysis.transferable_skills.push(skill);
            }
        }

        let skill_match = SkillMatch {
            requirement: requirement.to_string(),
            evidence,
            strength,
        };
        if strength >= STRONG_THRESHOLD {
            analysis.strong_matches.push(skill_match);
        } else if strength >= PARTIAL_THRESHOLD {
            analysis.partial_matches.push(skill_match);
        } else {
            analysis.gaps.push(requirement.to_string());
        }
    }

    analysis.overall_match = if total_weight > 0.0 {
        ((total_score / total_weight) * 100.0).round().clamp(0.0, 100.0) as u32
    } else {
        0
    };
    analysis
}

/// Requirements paired with their weight. A keyword listed in several buckets keeps its
/// first (heaviest) weight.
fn weighted_requirements(requirements: &ParsedRequirements) -> Vec<(&str, f32)> {
    let mut seen = HashSet::new();
    let buckets = [
        (&requirements.must_have, MUST_HAVE_WEIGHT),
        (&requirements.tech_stack, TECH_STACK_WEIGHT),
        (&requirements.nice_to_have, NICE_TO_HAVE_WEIGHT),
    ];

    let mut weighted = Vec::new();
    for (items, weight) in buckets {
        for item in items {
            if seen.insert(item.to_lowercase()) {
                weighted.push((item.as_str(), weight));
            }
        }
    }
    weighted
}

/// Returns (strength, evidence, transferable skill if the match came from a family).
fn best_strength(
    requirement: &str,
    skills: &[String],
    experience_text: &str,
) -> (f32, String, Option<String>) {
    let req_lower = requirement.to_lowercase();

    if let Some(skill) = skills.iter().find(|s| s.to_lowercase() == req_lower) {
        return (EXACT_STRENGTH, format!("skill: {skill}"), None);
    }

    if let Some(skill) = skills.iter().find(|s| {
        let s = s.to_lowercase();
        mentions(&req_lower, &s) || mentions(&s, &req_lower)
    }) {
        return (CONTAINED_STRENGTH, format!("related skill: {skill}"), None);
    }

    if mentions(experience_text, &req_lower) {
        return (CONTAINED_STRENGTH, "work history".to_string(), None);
    }

    if let Some(skill) = skills.iter().find(|s| same_family(&req_lower, &s.to_lowercase())) {
        return (
            FAMILY_STRENGTH,
            format!("transferable: {skill}"),
            Some(skill.clone()),
        );
    }

    (0.0, String::new(), None)
}

/// Whole-word containment, so "go" does not match inside "google".
pub(crate) fn mentions(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    let is_word = |c: char| c.is_alphanumeric() || c == '+' || c == '#';
    haystack.match_indices(needle).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + needle.len()..].chars().next();
        !before.is_some_and(is_word) && !after.is_some_and(is_word)
    })
}

fn same_family(a: &str, b: &str) -> bool {
    SKILL_FAMILIES
        .iter()
        .any(|family| family.contains(&a) && family.contains(&b))
}
