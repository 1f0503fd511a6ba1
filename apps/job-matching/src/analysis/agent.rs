//! Analysis agent: produces a `MatchReport` for one (job, profile) pair.
//!
//! Flow: parse requirements ∥ evaluate company → match profile → fit score → synthesize.
//! The two LLM calls run concurrently; matching and scoring are deterministic.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use crate::analysis::company::evaluate_company;
use crate::analysis::fit_scoring::{FitInputs, FitScorer};
use crate::analysis::matching::analyze_match;
use crate::analysis::report::MatchReport;
use crate::analysis::requirements::parse_requirements;
use crate::errors::AppError;
use crate::llm_client::CompletionProvider;
use crate::models::job::JobPosting;
use crate::models::profile::UserProfile;

/// Analysis stage contract. Implementations return errors instead of degrading on their
/// own, so the orchestrator can apply its per-job fallback and keep summary counts honest.
#[async_trait]
pub trait AnalysisAgent: Send + Sync {
    async fn analyze(&self, job: &JobPosting, profile: &UserProfile) -> Result<MatchReport, AppError>;
}

/// Default agent backed by a completion provider and a pluggable fit scorer.
#[derive(Clone)]
pub struct LlmAnalysisAgent {
    llm: Arc<dyn CompletionProvider>,
    fit_scorer: Arc<dyn FitScorer>,
}

impl LlmAnalysisAgent {
    pub fn new(llm: Arc<dyn CompletionProvider>, fit_scorer: Arc<dyn FitScorer>) -> Self {
        Self { llm, fit_scorer }
    }
}

#[async_trait]
impl AnalysisAgent for LlmAnalysisAgent {
    async fn analyze(&self, job: &JobPosting, profile: &UserProfile) -> Result<MatchReport, AppError> {
        let llm = self.llm.as_ref();
        let (requirements, company) = tokio::join!(
            parse_requirements(job, llm),
            evaluate_company(job, &profile.preferences, llm),
        );
        let requirements = requirements?;
        let company = company?;

        let match_analysis = analyze_match(profile, &requirements);
        let candidate_level = profile.experience_level(Utc::now().date_naive());
        let fit_score = self.fit_scorer.score(&FitInputs {
            requirements: &requirements,
            match_overall: match_analysis.overall_match,
            company: Some(&company),
            candidate_level,
        });

        info!(
            job_id = %job.id,
            match_overall = match_analysis.overall_match,
            company_score = company.overall_score,
            composite = fit_score.composite,
            recommendation = ?fit_score.recommendation,
            "Job analyzed"
        );

        Ok(MatchReport::assemble(
            job,
            requirements,
            company,
            match_analysis,
            fit_score,
        ))
    }
}
