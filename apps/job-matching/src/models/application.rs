use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::report::MatchReport;
use crate::generation::kit::ApplicationKit;
use crate::models::job::JobPosting;
use crate::models::profile::UserProfile;

/// How much of the pipeline a request runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationIntent {
    FullApplication,
    QuickApply,
    CheckFit,
    RecruiterResponse,
}

impl ApplicationIntent {
    pub fn as_str(self) -> &'static str {
        match self {
            ApplicationIntent::FullApplication => "full_application",
            ApplicationIntent::QuickApply => "quick_apply",
            ApplicationIntent::CheckFit => "check_fit",
            ApplicationIntent::RecruiterResponse => "recruiter_response",
        }
    }
}

/// Inbound request. `profile` and `intent` are optional on the wire so that their
/// absence is reported as a validation error rather than a decoding failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRequest {
    #[serde(default)]
    pub profile: Option<UserProfile>,
    #[serde(default)]
    pub jobs: Vec<JobPosting>,
    #[serde(default)]
    pub intent: Option<ApplicationIntent>,
    #[serde(default)]
    pub recruiter_message: Option<String>,
    #[serde(default)]
    pub application_questions: Vec<String>,
}

/// Outcome for a single job.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResult {
    pub job_id: String,
    pub match_report: MatchReport,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_kit: Option<ApplicationKit>,
    pub recommendations: Vec<String>,
    pub next_steps: Vec<String>,
    /// Set when the job could not be processed and the report is degraded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSummary {
    pub total_jobs: usize,
    pub strong_matches: usize,
    pub applications_generated: usize,
}

impl ApplicationSummary {
    pub fn from_results(results: &[ApplicationResult]) -> Self {
        Self {
            total_jobs: results.len(),
            strong_matches: results
                .iter()
                .filter(|r| r.match_report.fit_score.recommendation.is_strong_match())
                .count(),
            applications_generated: results
                .iter()
                .filter(|r| r.application_kit.is_some())
                .count(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResponse {
    pub results: Vec<ApplicationResult>,
    pub summary: ApplicationSummary,
    pub processed_at: DateTime<Utc>,
}
