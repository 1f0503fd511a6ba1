//! Per-job recommendations and next steps, derived deterministically from a report.

use crate::analysis::fit_scoring::FitRecommendation;
use crate::analysis::report::MatchReport;
use crate::models::application::ApplicationIntent;

const MAX_LISTED: usize = 3;

pub const DEGRADED_NEXT_STEP: &str =
    "Sorry, we couldn't finish analyzing this job. Try again in a few minutes or review the posting manually.";

/// Ordered: headline, gaps, green flags, red flags, talking points, news.
pub fn recommendations(report: &MatchReport) -> Vec<String> {
    let tier = report.fit_score.recommendation;
    let skip = tier == FitRecommendation::Skip;
    let mut out = vec![headline(tier, report.fit_score.composite)];

    if !report.gaps_to_address.is_empty() && !skip {
        out.push(format!(
            "Address these gaps in your materials or interview: {}.",
            listed(&report.gaps_to_address)
        ));
    }

    let green = &report.company_insights.green_flags;
    if !green.is_empty() {
        out.push(format!("Worth highlighting about {}: {}.", report.company, listed(green)));
    }

    let red = report.red_flags();
    if !red.is_empty() && !skip {
        out.push(format!(
            "Proceed with care, ask about: {}.",
            red.iter().take(MAX_LISTED).copied().collect::<Vec<_>>().join("; ")
        ));
    }

    if !report.talking_points.is_empty() {
        out.push(format!("Lead with: {}.", listed(&report.talking_points)));
    }

    if let Some(news) = report.company_insights.recent_news.first() {
        out.push(format!("Mention recent news to show interest: {news}."));
    }

    out
}

fn headline(tier: FitRecommendation, composite: u32) -> String {
    match tier {
        FitRecommendation::StrongApply => {
            format!("Strong fit ({composite}/100). Apply soon, this role matches your background closely.")
        }
        FitRecommendation::Apply => {
            format!("Good fit ({composite}/100). Apply with tailored materials.")
        }
        FitRecommendation::Conditional => format!(
            "Partial fit ({composite}/100). Apply only if you can speak convincingly to the gaps."
        ),
        FitRecommendation::Skip => {
            format!("Weak fit ({composite}/100). Your time is likely better spent on other roles.")
        }
    }
}

fn listed(items: &[String]) -> String {
    items
        .iter()
        .take(MAX_LISTED)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn next_steps(intent: ApplicationIntent, report: &MatchReport, has_kit: bool) -> Vec<String> {
    let tier = report.fit_score.recommendation;
    let skip = tier == FitRecommendation::Skip;

    if intent == ApplicationIntent::CheckFit {
        return vec![
            "Request a full application to generate a tailored resume and cover letter for this role."
                .to_string(),
        ];
    }

    let mut steps = Vec::new();

    if intent == ApplicationIntent::RecruiterResponse {
        steps.push("Review the drafted reply, personalize the greeting, and send it.".to_string());
        if !skip {
            steps.push(format!(
                "Prepare for a screening call about the {} role at {}.",
                report.job_title, report.company
            ));
        }
    } else if has_kit {
        steps.push("Review the tailored resume for accuracy.".to_string());
        steps.push("Customize the cover letter opening with a personal detail.".to_string());
        steps.push(format!("Submit your application to {}.", report.company));
        steps.push("Follow up with the hiring team after one week.".to_string());
    }

    if !report.gaps_to_address.is_empty() && !skip {
        steps.push(format!(
            "Study up on {} before interviews.",
            listed(&report.gaps_to_address)
        ));
        steps.push("Practice explaining how your transferable experience covers those gaps.".to_string());
    }

    if tier.is_strong_match() {
        steps.push("Prepare two or three STAR stories around your strongest matches.".to_string());
        steps.push(format!(
            "Research {}'s products, team, and recent announcements.",
            report.company
        ));
    }

    steps
}
