use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::company::CompanyInsights;
use crate::analysis::fit_scoring::FitScore;
use crate::analysis::matching::MatchAnalysis;
use crate::analysis::requirements::ParsedRequirements;
use crate::models::job::JobPosting;

const MAX_TALKING_POINTS: usize = 5;
const MAX_GAPS_TO_ADDRESS: usize = 5;
const MAX_INTERVIEW_QUESTIONS: usize = 5;

/// Analysis-stage output for one (job, profile) pair. Never persisted here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchReport {
    pub job_id: String,
    pub job_title: String,
    pub company: String,
    pub requirements: ParsedRequirements,
    pub company_insights: CompanyInsights,
    pub match_analysis: MatchAnalysis,
    pub fit_score: FitScore,
    pub talking_points: Vec<String>,
    pub gaps_to_address: Vec<String>,
    pub interview_questions: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

impl MatchReport {
    /// Assembles a report and synthesizes talking points, gaps, and interview questions.
    pub fn assemble(
        job: &JobPosting,
        requirements: ParsedRequirements,
        company_insights: CompanyInsights,
        match_analysis: MatchAnalysis,
        fit_score: FitScore,
    ) -> Self {
        let talking_points = talking_points(&match_analysis);
        let gaps_to_address = gaps_to_address(&requirements, &match_analysis);
        let interview_questions = interview_questions(&requirements, &match_analysis);

        Self {
            job_id: job.id.clone(),
            job_title: job.title.clone(),
            company: job.company.clone(),
            requirements,
            company_insights,
            match_analysis,
            fit_score,
            talking_points,
            gaps_to_address,
            interview_questions,
            generated_at: Utc::now(),
        }
    }

    /// Stand-in report for a job whose analysis or generation failed.
    pub fn degraded(job: &JobPosting, reason: &str) -> Self {
        Self {
            job_id: job.id.clone(),
            job_title: job.title.clone(),
            company: job.company.clone(),
            requirements: ParsedRequirements::default(),
            company_insights: CompanyInsights::unavailable(job),
            match_analysis: MatchAnalysis::default(),
            fit_score: FitScore::failed(reason),
            talking_points: vec![],
            gaps_to_address: vec![],
            interview_questions: vec![],
            generated_at: Utc::now(),
        }
    }

    /// Red flags from both the posting and the company evaluation.
    pub fn red_flags(&self) -> Vec<&str> {
        self.requirements
            .red_flags
            .iter()
            .chain(self.company_insights.red_flags.iter())
            .map(String::as_str)
            .collect()
    }
}

fn talking_points(analysis: &MatchAnalysis) -> Vec<String> {
    let strong = analysis.strong_matches.iter().map(|m| {
        if m.evidence.is_empty() {
            format!("Direct experience with {}", m.requirement)
        } else {
            format!("Direct experience with {} ({})", m.requirement, m.evidence)
        }
    });
    let transferable = analysis
        .transferable_skills
        .iter()
        .map(|s| format!("{s} experience transfers to the stack they use"));

    strong.chain(transferable).take(MAX_TALKING_POINTS).collect()
}

/// Must-have gaps first, then the rest in their original order.
fn gaps_to_address(requirements: &ParsedRequirements, analysis: &MatchAnalysis) -> Vec<String> {
    let is_must = |gap: &String| {
        requirements
            .must_have
            .iter()
            .any(|m| m.eq_ignore_ascii_case(gap))
    };
    let (must, other): (Vec<&String>, Vec<&String>) = analysis.gaps.iter().partition(|g| is_must(*g));

    must.into_iter()
        .chain(other)
        .take(MAX_GAPS_TO_ADDRESS)
        .cloned()
        .collect()
}

fn interview_questions(requirements: &ParsedRequirements, analysis: &MatchAnalysis) -> Vec<String> {
    let from_responsibilities = requirements
        .responsibilities
        .iter()
        .map(|r| format!("Tell me about a time you had to {}.", lowercase_first(r)));
    let from_stack = requirements
        .tech_stack
        .iter()
        .map(|t| format!("How have you used {t} in production, and what trade-offs did you hit?"));
    let from_gaps = analysis
        .gaps
        .iter()
        .map(|g| format!("How would you ramp up on {g}?"));

    from_responsibilities
        .chain(from_stack)
        .chain(from_gaps)
        .take(MAX_INTERVIEW_QUESTIONS)
        .collect()
}

fn lowercase_first(text: &str) -> String {
    let text = text.trim().trim_end_matches('.');
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
