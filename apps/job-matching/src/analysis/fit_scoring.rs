//! Fit scoring: a pluggable scorer that folds skill match and company signals, adjusted
//! for seniority, into a single 0–100 composite and a recommendation tier.
//!
//! Default: `WeightedFitScorer` (pure, deterministic, fully testable).
//!
//! The analysis agent holds an `Arc<dyn FitScorer>` so the formula can be swapped
//! without touching the agent or the orchestrator.

use serde::{Deserialize, Serialize};

use crate::analysis::company::{CompanyInsights, NEUTRAL_COMPANY_SCORE};
use crate::analysis::requirements::ParsedRequirements;
use crate::models::job::ExperienceLevel;

const RED_FLAG_PENALTY: f64 = 3.0;
const MAX_RED_FLAG_PENALTY: f64 = 9.0;

const MISSING_COMPANY_CONFIDENCE_PENALTY: f32 = 0.3;
const MISSING_REQUIREMENTS_CONFIDENCE_PENALTY: f32 = 0.2;
const MIN_CONFIDENCE: f32 = 0.1;

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FitRecommendation {
    StrongApply,
    Apply,
    Conditional,
    Skip,
}

impl FitRecommendation {
    /// Total, monotonic mapping from composite to tier.
    pub fn from_composite(composite: u32) -> Self {
        if composite >= 80 {
            FitRecommendation::StrongApply
        } else if composite >= 60 {
            FitRecommendation::Apply
        } else if composite >= 40 {
            FitRecommendation::Conditional
        } else {
            FitRecommendation::Skip
        }
    }

    /// STRONG_APPLY and APPLY count toward the summary's strong matches.
    pub fn is_strong_match(self) -> bool {
        matches!(self, FitRecommendation::StrongApply | FitRecommendation::Apply)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitScore {
    pub composite: u32,
    pub confidence: f32,
    pub recommendation: FitRecommendation,
    pub reasoning: String,
}

impl FitScore {
    /// Score used when analysis for a job failed.
    pub fn failed(reason: &str) -> Self {
        Self {
            composite: 0,
            confidence: 0.0,
            recommendation: FitRecommendation::Skip,
            reasoning: format!("Analysis failed: {reason}"),
        }
    }
}

/// Everything the scorer looks at.
#[derive(Debug, Clone, Copy)]
pub struct FitInputs<'a> {
    pub requirements: &'a ParsedRequirements,
    /// `MatchAnalysis::overall_match`, 0–100.
    pub match_overall: u32,
    /// `None` or `available == false` both mean "no company signal".
    pub company: Option<&'a CompanyInsights>,
    pub candidate_level: ExperienceLevel,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Implement this to swap scoring formulas. Implementations must be pure and
/// monotonic: a higher match or company score never lowers the composite.
pub trait FitScorer: Send + Sync {
    fn score(&self, inputs: &FitInputs<'_>) -> FitScore;
}

// ────────────────────────────────────────────────────────────────────────────
// WeightedFitScorer: default implementation
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitWeights {
    pub skill_match: f64,
    pub company: f64,
    pub experience: f64,
}

impl Default for FitWeights {
    fn default() -> Self {
        Self {
            skill_match: 0.60,
            company: 0.25,
            experience: 0.15,
        }
    }
}

/// composite = round(w_m·match + w_c·company + w_e·alignment·100 − red-flag penalty),
/// clamped to 0–100. Company falls back to a neutral 50 when unavailable.
#[derive(Debug, Clone, Default)]
pub struct WeightedFitScorer {
    pub weights: FitWeights,
}

impl FitScorer for WeightedFitScorer {
    fn score(&self, inputs: &FitInputs<'_>) -> FitScore {
        let company = inputs.company.filter(|c| c.available);
        let company_score = company.map_or(NEUTRAL_COMPANY_SCORE, |c| c.overall_score);
        let alignment =
            experience_alignment(inputs.candidate_level, inputs.requirements.experience_level);
        let penalty = (inputs.requirements.red_flags.len() as f64 * RED_FLAG_PENALTY)
            .min(MAX_RED_FLAG_PENALTY);

        let raw = self.weights.skill_match * inputs.match_overall.min(100) as f64
            + self.weights.company * company_score.min(100) as f64
            + self.weights.experience * alignment * 100.0
            - penalty;
        let composite = raw.round().clamp(0.0, 100.0) as u32;

        let mut confidence = 1.0_f32;
        if company.is_none() {
            confidence -= MISSING_COMPANY_CONFIDENCE_PENALTY;
        }
        if !inputs.requirements.has_signals() {
            confidence -= MISSING_REQUIREMENTS_CONFIDENCE_PENALTY;
        }
        let confidence = confidence.clamp(MIN_CONFIDENCE, 1.0);

        let recommendation = FitRecommendation::from_composite(composite);
        let reasoning = build_reasoning(
            composite,
            inputs,
            company.is_some().then_some(company_score),
            alignment,
        );

        FitScore {
            composite,
            confidence,
            recommendation,
            reasoning,
        }
    }
}

/// 1.0 at or above the required level, then 0.6, 0.3, 0.0 per level short.
pub fn experience_alignment(candidate: ExperienceLevel, required: ExperienceLevel) -> f64 {
    match required.rank() - candidate.rank() {
        i32::MIN..=0 => 1.0,
        1 => 0.6,
        2 => 0.3,
        _ => 0.0,
    }
}

fn build_reasoning(
    composite: u32,
    inputs: &FitInputs<'_>,
    company_score: Option<u32>,
    alignment: f64,
) -> String {
    let mut parts = vec![format!(
        "Composite {composite}/100: skill match {}/100",
        inputs.match_overall
    )];
    match company_score {
        Some(score) => parts.push(format!("company {score}/100")),
        None => parts.push("company insights unavailable (neutral score used)".to_string()),
    }
    parts.push(format!(
        "experience alignment {:.0}% for a {:?} role",
        alignment * 100.0,
        inputs.requirements.experience_level
    ));
    if !inputs.requirements.red_flags.is_empty() {
        parts.push(format!(
            "{} posting red flag(s) lowered the score",
            inputs.requirements.red_flags.len()
        ));
    }
    parts.join("; ") + "."
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
