//! Shared test fixtures.

use chrono::NaiveDate;

use crate::analysis::company::{CompanyInsights, CompanyScores};
use crate::analysis::fit_scoring::{FitRecommendation, FitScore};
use crate::analysis::matching::{MatchAnalysis, SkillMatch};
use crate::analysis::report::MatchReport;
use crate::analysis::requirements::ParsedRequirements;
use crate::models::job::{ExperienceLevel, JobPosting};
use crate::models::profile::{
    JobPreferences, RemotePreference, UserProfile, VoiceStyle, WorkExperience,
};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn sample_profile() -> UserProfile {
    UserProfile {
        id: "user-1".to_string(),
        name: "Jordan Rivera".to_string(),
        email: Some("jordan@example.com".to_string()),
        summary: "Backend engineer focused on data-intensive services.".to_string(),
        work_history: vec![
            WorkExperience {
                title: "Senior Backend Engineer".to_string(),
                company: "Streamline".to_string(),
                start_date: date(2018, 1, 1),
                end_date: None,
                highlights: vec![
                    "Rebuilt the event pipeline in Rust, cutting p99 latency by 40%".to_string(),
                    "Led migration of billing data to PostgreSQL".to_string(),
                ],
                skills: vec!["Tokio".to_string()],
            },
            WorkExperience {
                title: "Software Engineer".to_string(),
                company: "Parcelly".to_string(),
                start_date: date(2015, 6, 1),
                end_date: Some(date(2017, 12, 31)),
                highlights: vec!["Built shipment tracking APIs in Python".to_string()],
                skills: vec![],
            },
        ],
        skills: vec![
            "Rust".to_string(),
            "PostgreSQL".to_string(),
            "Python".to_string(),
            "AWS".to_string(),
        ],
        preferences: JobPreferences {
            desired_roles: vec!["Backend Engineer".to_string()],
            desired_locations: vec!["Remote".to_string()],
            remote_preference: RemotePreference::Flexible,
            salary_min: Some(150_000),
            salary_max: None,
        },
        voice_style: VoiceStyle::Professional,
    }
}

pub fn sample_job() -> JobPosting {
    job("job-1")
}

pub fn job(id: &str) -> JobPosting {
    JobPosting {
        id: id.to_string(),
        title: "Senior Backend Engineer".to_string(),
        company: "Acme Data".to_string(),
        description: "Design and operate our event ingestion platform.".to_string(),
        requirements: vec!["5+ years of Rust".to_string(), "PostgreSQL".to_string()],
        source: "hackernews".to_string(),
        url: Some(format!("https://jobs.example.com/{id}")),
        location: Some("Remote - US".to_string()),
        remote: Some(true),
        salary: None,
    }
}

/// A well-formed report for `job_id` with the given composite.
pub fn sample_report(job_id: &str, composite: u32) -> MatchReport {
    let requirements = ParsedRequirements {
        must_have: vec!["Rust".to_string(), "Kubernetes".to_string()],
        nice_to_have: vec![],
        tech_stack: vec!["Rust".to_string(), "Tokio".to_string()],
        experience_level: ExperienceLevel::Senior,
        responsibilities: vec!["Own the ingestion pipeline".to_string()],
        red_flags: vec![],
    };
    let company = CompanyInsights::from_scores(
        CompanyScores {
            culture: 15,
            growth: 15,
            compensation: 15,
            stability: 10,
            work_life_balance: 10,
            reputation: 5,
        },
        vec!["Transparent salary bands".to_string()],
        vec![],
        vec![],
        "Acme Data builds streaming analytics.".to_string(),
    );
    let analysis = MatchAnalysis {
        overall_match: composite,
        strong_matches: vec![SkillMatch {
            requirement: "Rust".to_string(),
            evidence: "skill: Rust".to_string(),
            strength: 1.0,
        }],
        partial_matches: vec![],
        gaps: vec!["Kubernetes".to_string()],
        transferable_skills: vec![],
    };
    let fit = FitScore {
        composite,
        confidence: 1.0,
        recommendation: FitRecommendation::from_composite(composite),
        reasoning: format!("Composite {composite}/100."),
    };

    MatchReport::assemble(&job(job_id), requirements, company, analysis, fit)
}
