//! Company evaluation: capped sub-scores plus flags, with a recommendation tier on top.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::analysis::prompts::{COMPANY_PROMPT_TEMPLATE, COMPANY_SYSTEM};
use crate::errors::AppError;
use crate::llm_client::prompts::fill_template;
use crate::llm_client::{complete_json, CompletionProvider};
use crate::models::job::JobPosting;
use crate::models::profile::{JobPreferences, RemotePreference};

// Sub-score ceilings. They sum to 100 so the overall score needs no rescaling.
pub const CULTURE_MAX: u32 = 20;
pub const GROWTH_MAX: u32 = 20;
pub const COMPENSATION_MAX: u32 = 20;
pub const STABILITY_MAX: u32 = 15;
pub const WORK_LIFE_BALANCE_MAX: u32 = 15;
pub const REPUTATION_MAX: u32 = 10;

/// Score used in place of a real evaluation when insights are unavailable.
pub const NEUTRAL_COMPANY_SCORE: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompanyRecommendation {
    StrongYes,
    Yes,
    Maybe,
    Pass,
}

impl CompanyRecommendation {
    pub fn from_overall(score: u32) -> Self {
        if score >= 80 {
            CompanyRecommendation::StrongYes
        } else if score >= 65 {
            CompanyRecommendation::Yes
        } else if score >= 45 {
            CompanyRecommendation::Maybe
        } else {
            CompanyRecommendation::Pass
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyScores {
    pub culture: u32,
    pub growth: u32,
    pub compensation: u32,
    pub stability: u32,
    pub work_life_balance: u32,
    pub reputation: u32,
}

impl CompanyScores {
    /// Caps every sub-score at its ceiling.
    pub fn clamped(self) -> Self {
        Self {
            culture: self.culture.min(CULTURE_MAX),
            growth: self.growth.min(GROWTH_MAX),
            compensation: self.compensation.min(COMPENSATION_MAX),
            stability: self.stability.min(STABILITY_MAX),
            work_life_balance: self.work_life_balance.min(WORK_LIFE_BALANCE_MAX),
            reputation: self.reputation.min(REPUTATION_MAX),
        }
    }

    pub fn total(&self) -> u32 {
        self.culture
            + self.growth
            + self.compensation
            + self.stability
            + self.work_life_balance
            + self.reputation
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInsights {
    pub scores: CompanyScores,
    pub overall_score: u32,
    pub green_flags: Vec<String>,
    pub red_flags: Vec<String>,
    pub recent_news: Vec<String>,
    pub recommendation: CompanyRecommendation,
    pub summary: String,
    /// False when the evaluation could not be produced and neutral values stand in.
    pub available: bool,
}

impl CompanyInsights {
    pub fn from_scores(
        scores: CompanyScores,
        green_flags: Vec<String>,
        red_flags: Vec<String>,
        recent_news: Vec<String>,
        summary: String,
    ) -> Self {
        let scores = scores.clamped();
        let overall_score = scores.total();
        Self {
            scores,
            overall_score,
            green_flags,
            red_flags,
            recent_news,
            recommendation: CompanyRecommendation::from_overall(overall_score),
            summary,
            available: true,
        }
    }

    /// Neutral stand-in carrying a one-line summary of the posting.
    pub fn unavailable(job: &JobPosting) -> Self {
        Self {
            scores: CompanyScores::default(),
            overall_score: NEUTRAL_COMPANY_SCORE,
            green_flags: vec![],
            red_flags: vec![],
            recent_news: vec![],
            recommendation: CompanyRecommendation::from_overall(NEUTRAL_COMPANY_SCORE),
            summary: job.headline(),
            available: false,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawCompanyEvaluation {
    #[serde(default)]
    scores: CompanyScores,
    #[serde(default)]
    green_flags: Vec<String>,
    #[serde(default)]
    red_flags: Vec<String>,
    #[serde(default)]
    recent_news: Vec<String>,
    #[serde(default)]
    summary: Option<String>,
}

/// Evaluates the hiring company via the LLM, then merges preference flags.
///
/// An unusable completion degrades to `CompanyInsights::unavailable`, which lowers fit
/// confidence. Transport and API failures are returned as `AppError::Llm`.
pub async fn evaluate_company(
    job: &JobPosting,
    preferences: &JobPreferences,
    llm: &dyn CompletionProvider,
) -> Result<CompanyInsights, AppError> {
    let prompt = build_prompt(job, preferences);

    let mut insights = match complete_json::<RawCompanyEvaluation>(llm, &prompt, COMPANY_SYSTEM).await
    {
        Ok(raw) => {
            let summary = raw
                .summary
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| job.headline());
            CompanyInsights::from_scores(
                raw.scores,
                raw.green_flags,
                raw.red_flags,
                raw.recent_news,
                summary,
            )
        }
        Err(e) if e.is_malformed_output() => {
            warn!(job_id = %job.id, company = %job.company, "Company evaluation unusable, using neutral insights: {e}");
            CompanyInsights::unavailable(job)
        }
        Err(e) => {
            return Err(AppError::Llm(format!(
                "Company evaluation failed for {}: {e}",
                job.id
            )))
        }
    };

    let (green, red) = preference_flags(job, preferences);
    insights.green_flags.extend(green);
    insights.red_flags.extend(red);
    Ok(insights)
}

fn build_prompt(job: &JobPosting, preferences: &JobPreferences) -> String {
    let salary = match &job.salary {
        Some(s) => format!(
            "{}-{} {}",
            s.min.map(|v| v.to_string()).unwrap_or_else(|| "?".to_string()),
            s.max.map(|v| v.to_string()).unwrap_or_else(|| "?".to_string()),
            s.currency
        ),
        None => "not listed".to_string(),
    };
    let expectations = match (preferences.salary_min, preferences.salary_max) {
        (Some(min), Some(max)) => format!("{min}-{max}"),
        (Some(min), None) => format!("at least {min}"),
        (None, Some(max)) => format!("up to {max}"),
        (None, None) => "not stated".to_string(),
    };

    fill_template(
        COMPANY_PROMPT_TEMPLATE,
        &[
            ("company", job.company.as_str()),
            ("title", job.title.as_str()),
            ("salary", salary.as_str()),
            ("expectations", expectations.as_str()),
            ("description", job.description.as_str()),
        ],
    )
}

/// Deterministic flags derived from the candidate's stated preferences.
pub fn preference_flags(job: &JobPosting, preferences: &JobPreferences) -> (Vec<String>, Vec<String>) {
    let mut green = Vec::new();
    let mut red = Vec::new();

    if let (Some(salary), Some(wanted)) = (&job.salary, preferences.salary_min) {
        if salary.max.is_some_and(|max| max < wanted) {
            red.push(format!(
                "Salary range tops out below your minimum of {wanted} {}",
                salary.currency
            ));
        } else if salary.min.is_some_and(|min| min >= wanted) {
            green.push(format!(
                "Salary floor meets your minimum of {wanted} {}",
                salary.currency
            ));
        }
    }

    if preferences.remote_preference == RemotePreference::RemoteOnly && job.remote == Some(false) {
        red.push("Role is not remote but you prefer remote-only work".to_string());
    }

    (green, red)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedLlm;
    use crate::models::fixtures::{sample_job, sample_profile};
    use crate::models::job::SalaryRange;

    const GOOD_REPLY: &str = r#"{
        "scores": {
            "culture": 18, "growth": 16, "compensation": 15,
            "stability": 12, "workLifeBalance": 11, "reputation": 8
        },
        "green_flags": ["Public engineering blog"],
        "red_flags": [],
        "recent_news": ["Raised Series C in March"],
        "summary": "Acme Data builds streaming analytics for retailers."
    }"#;

    #[test]
    fn test_company_tiers() {
        assert_eq!(CompanyRecommendation::from_overall(80), CompanyRecommendation::StrongYes);
        assert_eq!(CompanyRecommendation::from_overall(79), CompanyRecommendation::Yes);
        assert_eq!(CompanyRecommendation::from_overall(65), CompanyRecommendation::Yes);
        assert_eq!(CompanyRecommendation::from_overall(45), CompanyRecommendation::Maybe);
        assert_eq!(CompanyRecommendation::from_overall(44), CompanyRecommendation::Pass);
    }

    #[test]
    fn test_sub_scores_are_capped() {
        let scores = CompanyScores {
            culture: 90,
            growth: 20,
            compensation: 25,
            stability: 15,
            work_life_balance: 40,
            reputation: 11,
        };
        let insights = CompanyInsights::from_scores(scores, vec![], vec![], vec![], String::new());
        assert_eq!(insights.overall_score, 100);
        assert_eq!(insights.scores.culture, CULTURE_MAX);
        assert_eq!(insights.recommendation, CompanyRecommendation::StrongYes);
    }

    #[tokio::test]
    async fn test_evaluate_company_recomputes_overall() {
        let llm = ScriptedLlm::new().reply(COMPANY_SYSTEM, GOOD_REPLY);
        let insights = evaluate_company(&sample_job(), &Default::default(), &llm)
            .await
            .unwrap();

        assert!(insights.available);
        assert_eq!(insights.overall_score, 80);
        assert_eq!(insights.recommendation, CompanyRecommendation::StrongYes);
        assert_eq!(insights.recent_news.len(), 1);
    }

    #[tokio::test]
    async fn test_unparseable_reply_falls_back_to_one_liner() {
        let llm = ScriptedLlm::new().reply(COMPANY_SYSTEM, "Acme seems fine I guess.");
        let job = sample_job();
        let insights = evaluate_company(&job, &Default::default(), &llm).await.unwrap();

        assert!(!insights.available);
        assert_eq!(insights.overall_score, NEUTRAL_COMPANY_SCORE);
        assert_eq!(insights.summary, job.headline());
    }

    #[tokio::test]
    async fn test_api_failure_surfaces() {
        let llm = ScriptedLlm::new().fail(COMPANY_SYSTEM, 500);
        let err = evaluate_company(&sample_job(), &Default::default(), &llm)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Llm(_)));
    }

    #[tokio::test]
    async fn test_preference_flags_are_merged() {
        let llm = ScriptedLlm::new().reply(COMPANY_SYSTEM, GOOD_REPLY);
        let mut job = sample_job();
        job.remote = Some(false);
        let mut preferences = sample_profile().preferences;
        preferences.remote_preference = RemotePreference::RemoteOnly;

        let insights = evaluate_company(&job, &preferences, &llm).await.unwrap();
        assert!(insights.red_flags.iter().any(|f| f.contains("remote-only")));
    }

    #[test]
    fn test_description_braces_are_not_expanded() {
        let mut job = sample_job();
        job.description = "Compensation: {salary} (ask us)".to_string();

        let prompt = build_prompt(&job, &JobPreferences::default());
        assert!(prompt.contains("Compensation: {salary} (ask us)"));
        assert_eq!(prompt.matches("not listed").count(), 1);
    }

    #[test]
    fn test_salary_below_minimum_is_red_flag() {
        let mut job = sample_job();
        job.salary = Some(SalaryRange {
            min: Some(90_000),
            max: Some(110_000),
            currency: "USD".to_string(),
        });
        let preferences = JobPreferences {
            salary_min: Some(150_000),
            ..Default::default()
        };

        let (green, red) = preference_flags(&job, &preferences);
        assert!(green.is_empty());
        assert_eq!(red.len(), 1);
        assert!(red[0].contains("150000"));
    }

    #[test]
    fn test_salary_floor_meeting_minimum_is_green_flag() {
        let mut job = sample_job();
        job.salary = Some(SalaryRange {
            min: Some(160_000),
            max: None,
            currency: "USD".to_string(),
        });
        let preferences = JobPreferences {
            salary_min: Some(150_000),
            ..Default::default()
        };

        let (green, red) = preference_flags(&job, &preferences);
        assert_eq!(green.len(), 1);
        assert!(red.is_empty());
    }
}
