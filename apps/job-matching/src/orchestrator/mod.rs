//! Application orchestrator: drives analysis and generation over a batch of jobs.
//!
//! Jobs run in sequential batches of `max_parallel`; jobs within a batch run
//! concurrently. A failure on one job degrades that job's result only.

pub mod advice;
pub mod handlers;

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures_util::future::join_all;
use tracing::{info, warn};

use crate::analysis::agent::AnalysisAgent;
use crate::analysis::fit_scoring::FitScore;
use crate::analysis::report::MatchReport;
use crate::errors::AppError;
use crate::generation::agent::{GenerationAgent, GenerationContext};
use crate::generation::kit::ApplicationKit;
use crate::models::application::{
    ApplicationIntent, ApplicationRequest, ApplicationResponse, ApplicationResult,
    ApplicationSummary,
};
use crate::models::job::JobPosting;
use crate::models::profile::UserProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrchestratorConfig {
    /// Jobs per batch. 0 is treated as 1.
    pub max_parallel: usize,
    /// Minimum composite for full/quick applications to get a kit.
    pub min_fit_score_for_generation: u32,
    pub job_timeout: Option<Duration>,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            max_parallel: 5,
            min_fit_score_for_generation: 50,
            job_timeout: None,
        }
    }
}

pub struct ApplicationOrchestrator {
    analysis: Arc<dyn AnalysisAgent>,
    generation: Arc<dyn GenerationAgent>,
    config: OrchestratorConfig,
}

impl ApplicationOrchestrator {
    pub fn new(
        analysis: Arc<dyn AnalysisAgent>,
        generation: Arc<dyn GenerationAgent>,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            analysis,
            generation,
            config,
        }
    }

    /// Runs the full pipeline for every job in the request.
    ///
    /// Returns `AppError::Validation` before touching any agent when the request
    /// is incomplete. Otherwise always returns one result per job, in input order.
    pub async fn process_application(
        &self,
        request: &ApplicationRequest,
    ) -> Result<ApplicationResponse, AppError> {
        let profile = require_profile(request)?;
        if request.jobs.is_empty() {
            return Err(AppError::Validation("jobs cannot be empty".to_string()));
        }
        let intent = require_intent(request)?;
        let ctx = generation_context(request, intent);

        let batch_size = self.config.max_parallel.max(1);
        info!(
            user_id = %profile.id,
            intent = intent.as_str(),
            jobs = request.jobs.len(),
            batch_size,
            "Application request accepted"
        );

        let mut results = Vec::with_capacity(request.jobs.len());
        for (index, batch) in request.jobs.chunks(batch_size).enumerate() {
            info!(batch = index + 1, size = batch.len(), "Batch started");
            let outcomes = join_all(batch.iter().map(|job| self.process_job(job, profile, &ctx))).await;
            let degraded = outcomes.iter().filter(|r| r.error.is_some()).count();
            info!(batch = index + 1, degraded, "Batch finished");
            results.extend(outcomes);
        }

        let summary = ApplicationSummary::from_results(&results);
        info!(
            total_jobs = summary.total_jobs,
            strong_matches = summary.strong_matches,
            applications_generated = summary.applications_generated,
            "Application request complete"
        );

        Ok(ApplicationResponse {
            results,
            summary,
            processed_at: Utc::now(),
        })
    }

    /// Analysis only, for a single job. Agent errors propagate to the caller.
    pub async fn check_fit(
        &self,
        job: &JobPosting,
        request: &ApplicationRequest,
    ) -> Result<MatchReport, AppError> {
        let profile = require_profile(request)?;
        let report = self
            .with_deadline(&job.id, self.analysis.analyze(job, profile))
            .await?;

        info!(
            job_id = %job.id,
            composite = report.fit_score.composite,
            recommendation = ?report.fit_score.recommendation,
            "Fit checked"
        );
        Ok(report)
    }

    /// Generation only, for a report produced earlier by `check_fit`.
    pub async fn generate_materials(
        &self,
        report: &MatchReport,
        request: &ApplicationRequest,
    ) -> Result<ApplicationKit, AppError> {
        let profile = require_profile(request)?;
        let intent = require_intent(request)?;
        let ctx = generation_context(request, intent);

        let kit = self
            .with_deadline(&report.job_id, self.generation.generate(report, profile, &ctx))
            .await?;

        info!(job_id = %report.job_id, intent = intent.as_str(), "Materials generated");
        Ok(kit)
    }

    pub fn should_generate_materials(&self, intent: ApplicationIntent, fit: &FitScore) -> bool {
        match intent {
            ApplicationIntent::CheckFit => false,
            ApplicationIntent::RecruiterResponse => true,
            ApplicationIntent::FullApplication | ApplicationIntent::QuickApply => {
                fit.composite >= self.config.min_fit_score_for_generation
            }
        }
    }

    async fn process_job(
        &self,
        job: &JobPosting,
        profile: &UserProfile,
        ctx: &GenerationContext<'_>,
    ) -> ApplicationResult {
        match self.with_deadline(&job.id, self.run_job(job, profile, ctx)).await {
            Ok(result) => result,
            Err(err) => {
                warn!(job_id = %job.id, error = %err, "Job degraded");
                degraded_result(job, &err)
            }
        }
    }

    async fn run_job(
        &self,
        job: &JobPosting,
        profile: &UserProfile,
        ctx: &GenerationContext<'_>,
    ) -> Result<ApplicationResult, AppError> {
        let report = self.analysis.analyze(job, profile).await?;

        let generate = self.should_generate_materials(ctx.intent, &report.fit_score);
        info!(
            job_id = %job.id,
            composite = report.fit_score.composite,
            threshold = self.config.min_fit_score_for_generation,
            generate,
            "Generation decision"
        );

        let application_kit = if generate {
            Some(self.generation.generate(&report, profile, ctx).await?)
        } else {
            None
        };

        let recommendations = advice::recommendations(&report);
        let next_steps = advice::next_steps(ctx.intent, &report, application_kit.is_some());

        Ok(ApplicationResult {
            job_id: job.id.clone(),
            match_report: report,
            application_kit,
            recommendations,
            next_steps,
            error: None,
        })
    }

    async fn with_deadline<T, F>(&self, job_id: &str, work: F) -> Result<T, AppError>
    where
        F: std::future::Future<Output = Result<T, AppError>>,
    {
        match self.config.job_timeout {
            Some(limit) => tokio::time::timeout(limit, work).await.map_err(|_| {
                AppError::Timeout(format!(
                    "job {job_id} did not finish within {}s",
                    limit.as_secs_f64()
                ))
            })?,
            None => work.await,
        }
    }
}

fn require_profile(request: &ApplicationRequest) -> Result<&UserProfile, AppError> {
    request
        .profile
        .as_ref()
        .ok_or_else(|| AppError::Validation("profile is required".to_string()))
}

/// Intent, plus the recruiter message a recruiter reply depends on.
fn require_intent(request: &ApplicationRequest) -> Result<ApplicationIntent, AppError> {
    let intent = request
        .intent
        .ok_or_else(|| AppError::Validation("intent is required".to_string()))?;

    let has_message = request
        .recruiter_message
        .as_deref()
        .is_some_and(|m| !m.trim().is_empty());
    if intent == ApplicationIntent::RecruiterResponse && !has_message {
        return Err(AppError::Validation(
            "recruiterMessage is required for recruiter_response".to_string(),
        ));
    }

    Ok(intent)
}

fn generation_context(request: &ApplicationRequest, intent: ApplicationIntent) -> GenerationContext<'_> {
    GenerationContext {
        intent,
        recruiter_message: request.recruiter_message.as_deref(),
        application_questions: &request.application_questions,
    }
}

fn degraded_result(job: &JobPosting, err: &AppError) -> ApplicationResult {
    let reason = err.to_string();
    ApplicationResult {
        job_id: job.id.clone(),
        match_report: MatchReport::degraded(job, &reason),
        application_kit: None,
        recommendations: vec![],
        next_steps: vec![advice::DEGRADED_NEXT_STEP.to_string()],
        error: Some(reason),
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{StubAnalysis, StubGeneration};
    use super::*;
    use crate::analysis::fit_scoring::FitRecommendation;
    use crate::models::fixtures::{job, sample_profile};

    fn request(intent: ApplicationIntent, ids: &[&str]) -> ApplicationRequest {
        ApplicationRequest {
            profile: Some(sample_profile()),
            jobs: ids.iter().map(|id| job(id)).collect(),
            intent: Some(intent),
            recruiter_message: None,
            application_questions: vec![],
        }
    }

    fn orchestrator(
        analysis: Arc<StubAnalysis>,
        generation: Arc<StubGeneration>,
        config: OrchestratorConfig,
    ) -> ApplicationOrchestrator {
        ApplicationOrchestrator::new(analysis, generation, config)
    }

    #[tokio::test(start_paused = true)]
    async fn test_seven_jobs_run_in_batches_of_five_and_two() {
        let analysis = Arc::new(StubAnalysis::new());
        let generation = Arc::new(StubGeneration::default());
        let orch = orchestrator(analysis.clone(), generation, OrchestratorConfig::default());

        let ids = ["j1", "j2", "j3", "j4", "j5", "j6", "j7"];
        let response = orch
            .process_application(&request(ApplicationIntent::CheckFit, &ids))
            .await
            .unwrap();

        assert_eq!(analysis.starts(), vec![1, 2, 3, 4, 5, 1, 2]);
        assert_eq!(response.results.len(), 7);
        let order: Vec<_> = response.results.iter().map(|r| r.job_id.as_str()).collect();
        assert_eq!(order, ids);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_max_parallel_runs_one_at_a_time() {
        let analysis = Arc::new(StubAnalysis::new());
        let config = OrchestratorConfig {
            max_parallel: 0,
            ..Default::default()
        };
        let orch = orchestrator(analysis.clone(), Arc::new(StubGeneration::default()), config);

        orch.process_application(&request(ApplicationIntent::CheckFit, &["a", "b", "c"]))
            .await
            .unwrap();

        assert_eq!(analysis.starts(), vec![1, 1, 1]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_kit_only_above_threshold() {
        let analysis = Arc::new(StubAnalysis::new().composite("low", 45).composite("high", 75));
        let generation = Arc::new(StubGeneration::default());
        let orch = orchestrator(analysis, generation.clone(), OrchestratorConfig::default());

        let response = orch
            .process_application(&request(ApplicationIntent::FullApplication, &["low", "high"]))
            .await
            .unwrap();

        assert!(response.results[0].application_kit.is_none());
        assert!(response.results[1].application_kit.is_some());
        assert_eq!(response.summary.applications_generated, 1);
        assert_eq!(generation.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_job_is_degraded_and_others_survive() {
        let analysis = Arc::new(StubAnalysis::new().failing_on("job-x"));
        let orch = orchestrator(
            analysis,
            Arc::new(StubGeneration::default()),
            OrchestratorConfig::default(),
        );

        let response = orch
            .process_application(&request(ApplicationIntent::QuickApply, &["a", "job-x", "b"]))
            .await
            .unwrap();

        let failed = &response.results[1];
        assert_eq!(failed.job_id, "job-x");
        assert_eq!(failed.match_report.fit_score.composite, 0);
        assert_eq!(failed.match_report.fit_score.recommendation, FitRecommendation::Skip);
        assert!(failed.match_report.fit_score.reasoning.contains("provider returned 500"));
        assert!(failed.error.as_deref().unwrap().contains("provider returned 500"));
        assert!(failed.recommendations.is_empty());
        assert_eq!(failed.next_steps, vec![advice::DEGRADED_NEXT_STEP]);

        for ok in [&response.results[0], &response.results[2]] {
            assert!(ok.error.is_none());
            assert!(ok.application_kit.is_some());
        }
        assert_eq!(response.summary.total_jobs, 3);
        assert_eq!(response.summary.strong_matches, 2);
        assert_eq!(response.summary.applications_generated, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_generation_failure_degrades_only_that_job() {
        let generation = Arc::new(StubGeneration::failing_on("job-x"));
        let orch = orchestrator(
            Arc::new(StubAnalysis::new()),
            generation.clone(),
            OrchestratorConfig::default(),
        );

        let response = orch
            .process_application(&request(ApplicationIntent::FullApplication, &["job-x", "b"]))
            .await
            .unwrap();

        let failed = &response.results[0];
        assert_eq!(failed.match_report.fit_score.composite, 0);
        assert_eq!(failed.match_report.fit_score.recommendation, FitRecommendation::Skip);
        assert!(failed
            .match_report
            .fit_score
            .reasoning
            .contains("cover letter reply was truncated"));
        assert!(failed.application_kit.is_none());

        let sibling = &response.results[1];
        assert!(sibling.error.is_none());
        assert!(sibling.application_kit.is_some());

        assert_eq!(generation.calls(), 2);
        assert_eq!(response.summary.applications_generated, 1);
        assert_eq!(response.summary.strong_matches, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_generation_threshold_is_honored() {
        let config = OrchestratorConfig {
            min_fit_score_for_generation: 70,
            ..Default::default()
        };
        let analysis = Arc::new(StubAnalysis::new().composite("below", 65).composite("above", 75));
        let generation = Arc::new(StubGeneration::default());
        let orch = orchestrator(analysis, generation.clone(), config);

        let response = orch
            .process_application(&request(ApplicationIntent::QuickApply, &["below", "above"]))
            .await
            .unwrap();

        // 65 clears the default of 50 but not the configured 70
        assert!(response.results[0].application_kit.is_none());
        assert!(response.results[1].application_kit.is_some());
        assert_eq!(response.summary.applications_generated, 1);
        assert_eq!(generation.calls(), 1);
    }

    #[tokio::test]
    async fn test_recruiter_response_without_message_is_rejected() {
        let analysis = Arc::new(StubAnalysis::new());
        let generation = Arc::new(StubGeneration::default());
        let orch = orchestrator(analysis.clone(), generation.clone(), OrchestratorConfig::default());

        let mut req = request(ApplicationIntent::RecruiterResponse, &["a"]);
        req.recruiter_message = Some("   ".to_string());
        let err = orch.process_application(&req).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(analysis.calls(), 0);
        assert_eq!(generation.calls(), 0);
    }

    #[tokio::test]
    async fn test_incomplete_requests_are_rejected() {
        let analysis = Arc::new(StubAnalysis::new());
        let orch = orchestrator(
            analysis.clone(),
            Arc::new(StubGeneration::default()),
            OrchestratorConfig::default(),
        );

        let mut no_profile = request(ApplicationIntent::CheckFit, &["a"]);
        no_profile.profile = None;
        let no_jobs = request(ApplicationIntent::CheckFit, &[]);
        let mut no_intent = request(ApplicationIntent::CheckFit, &["a"]);
        no_intent.intent = None;

        for req in [no_profile, no_jobs, no_intent] {
            let err = orch.process_application(&req).await.unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }
        assert_eq!(analysis.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_check_fit_intent_never_generates() {
        let generation = Arc::new(StubGeneration::default());
        let orch = orchestrator(
            Arc::new(StubAnalysis::new().composite("a", 95)),
            generation.clone(),
            OrchestratorConfig::default(),
        );

        let response = orch
            .process_application(&request(ApplicationIntent::CheckFit, &["a", "b"]))
            .await
            .unwrap();

        assert!(response.results.iter().all(|r| r.application_kit.is_none()));
        assert_eq!(response.summary.applications_generated, 0);
        assert_eq!(generation.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_recruiter_response_always_generates() {
        let orch = orchestrator(
            Arc::new(StubAnalysis::new().composite("weak", 10)),
            Arc::new(StubGeneration::default()),
            OrchestratorConfig::default(),
        );

        let mut req = request(ApplicationIntent::RecruiterResponse, &["weak", "b"]);
        req.recruiter_message = Some("Hi Jordan, are you open to a chat?".to_string());
        let response = orch.process_application(&req).await.unwrap();

        for result in &response.results {
            let kit = result.application_kit.as_ref().unwrap();
            assert!(kit.recruiter_email.is_some());
        }
        assert_eq!(response.summary.applications_generated, 2);
        assert!(response.summary.strong_matches <= response.summary.total_jobs);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_degrades_the_job() {
        let config = OrchestratorConfig {
            job_timeout: Some(Duration::from_secs(1)),
            ..Default::default()
        };
        let orch = orchestrator(
            Arc::new(StubAnalysis::new().delay(Duration::from_secs(30))),
            Arc::new(StubGeneration::default()),
            config,
        );

        let response = orch
            .process_application(&request(ApplicationIntent::FullApplication, &["slow"]))
            .await
            .unwrap();

        let result = &response.results[0];
        assert_eq!(result.match_report.fit_score.recommendation, FitRecommendation::Skip);
        assert!(result.error.as_deref().unwrap().contains("did not finish"));
        assert_eq!(response.summary.applications_generated, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_check_fit_is_idempotent() {
        let orch = orchestrator(
            Arc::new(StubAnalysis::new().composite("a", 64)),
            Arc::new(StubGeneration::default()),
            OrchestratorConfig::default(),
        );
        let req = request(ApplicationIntent::CheckFit, &[]);

        let first = orch.check_fit(&job("a"), &req).await.unwrap();
        let second = orch.check_fit(&job("a"), &req).await.unwrap();

        assert_eq!(first.fit_score, second.fit_score);
        assert_eq!(first.requirements, second.requirements);
        assert_eq!(first.gaps_to_address, second.gaps_to_address);
    }

    #[tokio::test(start_paused = true)]
    async fn test_check_fit_propagates_agent_errors() {
        let orch = orchestrator(
            Arc::new(StubAnalysis::new().failing_on("a")),
            Arc::new(StubGeneration::default()),
            OrchestratorConfig::default(),
        );

        let err = orch
            .check_fit(&job("a"), &request(ApplicationIntent::CheckFit, &[]))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Llm(_)));
    }

    #[tokio::test]
    async fn test_generate_materials_requires_intent() {
        let generation = Arc::new(StubGeneration::default());
        let orch = orchestrator(
            Arc::new(StubAnalysis::new()),
            generation.clone(),
            OrchestratorConfig::default(),
        );
        let report = crate::models::fixtures::sample_report("a", 80);

        let mut req = request(ApplicationIntent::FullApplication, &[]);
        req.intent = None;
        assert!(orch.generate_materials(&report, &req).await.is_err());
        assert_eq!(generation.calls(), 0);

        req.intent = Some(ApplicationIntent::FullApplication);
        let kit = orch.generate_materials(&report, &req).await.unwrap();
        assert!(kit.recruiter_email.is_none());
        assert_eq!(generation.calls(), 1);
    }

    #[test]
    fn test_generation_policy() {
        let orch = orchestrator(
            Arc::new(StubAnalysis::new()),
            Arc::new(StubGeneration::default()),
            OrchestratorConfig::default(),
        );
        let fit = |composite| FitScore {
            composite,
            confidence: 1.0,
            recommendation: FitRecommendation::from_composite(composite),
            reasoning: String::new(),
        };

        assert!(!orch.should_generate_materials(ApplicationIntent::CheckFit, &fit(100)));
        assert!(orch.should_generate_materials(ApplicationIntent::RecruiterResponse, &fit(0)));
        assert!(orch.should_generate_materials(ApplicationIntent::QuickApply, &fit(50)));
        assert!(!orch.should_generate_materials(ApplicationIntent::FullApplication, &fit(49)));
    }
}
