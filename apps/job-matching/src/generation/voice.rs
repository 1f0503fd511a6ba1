//! Voice calibration: maps the candidate's voice style to verb sets and register guidance,
//! and picks the cover-letter hook from what the report actually contains.
//!
//! The hook never leans on a company signal the report does not have: no news, no news hook.

use crate::analysis::report::MatchReport;
use crate::generation::kit::HookType;
use crate::models::profile::VoiceStyle;

/// Verb sets and phrasing calibrated to a voice style.
#[derive(Debug, Clone)]
pub struct VoiceGuide {
    pub preferred_verbs: Vec<&'static str>,
    pub avoid_phrases: Vec<&'static str>,
    pub register: &'static str,
}

/// Returns the calibration for a voice style.
pub fn voice_guide(style: VoiceStyle) -> VoiceGuide {
    match style {
        VoiceStyle::Professional => VoiceGuide {
            preferred_verbs: vec!["Delivered", "Managed", "Implemented", "Improved", "Coordinated"],
            avoid_phrases: vec!["super excited", "rockstar", "crushed it"],
            register: "Polished and measured. Full sentences, no slang, no exclamation marks.",
        },
        VoiceStyle::Conversational => VoiceGuide {
            preferred_verbs: vec!["Built", "Helped", "Worked on", "Figured out", "Shipped"],
            avoid_phrases: vec!["synergy", "leverage", "per my last email", "esteemed"],
            register: "Warm and direct, like writing to a future teammate. Contractions are fine.",
        },
        VoiceStyle::Confident => VoiceGuide {
            preferred_verbs: vec!["Led", "Drove", "Owned", "Launched", "Scaled"],
            avoid_phrases: vec!["I believe I might", "I hope", "just", "try to"],
            register: "Assertive and outcome-first. Lead with results, no hedging.",
        },
        VoiceStyle::Technical => VoiceGuide {
            preferred_verbs: vec!["Designed", "Profiled", "Optimized", "Instrumented", "Migrated"],
            avoid_phrases: vec!["passionate", "guru", "cutting-edge"],
            register: "Precise and concrete. Name systems, numbers, and trade-offs.",
        },
    }
}

/// Chooses the cover-letter opening from the signals present in the report.
///
/// Order: recent news → two or more strong matches → green flags → problem/solution.
pub fn choose_hook(report: &MatchReport) -> HookType {
    if !report.company_insights.recent_news.is_empty() {
        HookType::CompanyNews
    } else if report.match_analysis.strong_matches.len() >= 2 {
        HookType::Achievement
    } else if !report.company_insights.green_flags.is_empty() {
        HookType::SharedMission
    } else {
        HookType::ProblemSolution
    }
}

/// One-line instruction for the chosen hook.
pub fn hook_instruction(hook: HookType) -> &'static str {
    match hook {
        HookType::CompanyNews => {
            "Open by referencing one item from RECENT NEWS and connect it to the candidate's work."
        }
        HookType::Achievement => {
            "Open with the candidate's single most relevant quantified achievement."
        }
        HookType::SharedMission => {
            "Open by connecting one of the company's GREEN FLAGS to what the candidate values."
        }
        HookType::ProblemSolution => {
            "Open by naming the main problem this role exists to solve and how the candidate has solved it before."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::matching::SkillMatch;
    use crate::models::fixtures::sample_report;

    #[test]
    fn test_every_style_has_verbs_and_register() {
        for style in [
            VoiceStyle::Professional,
            VoiceStyle::Conversational,
            VoiceStyle::Confident,
            VoiceStyle::Technical,
        ] {
            let guide = voice_guide(style);
            assert!(!guide.preferred_verbs.is_empty());
            assert!(!guide.avoid_phrases.is_empty());
            assert!(!guide.register.is_empty());
        }
    }

    #[test]
    fn test_confident_voice_avoids_hedging() {
        let guide = voice_guide(VoiceStyle::Confident);
        assert!(guide.avoid_phrases.contains(&"I hope"));
        assert!(guide.preferred_verbs.contains(&"Led"));
    }

    #[test]
    fn test_news_hook_wins_when_news_present() {
        let mut report = sample_report("job-1", 70);
        report.company_insights.recent_news = vec!["Opened a Berlin office".to_string()];
        assert_eq!(choose_hook(&report), HookType::CompanyNews);
    }

    #[test]
    fn test_achievement_hook_needs_two_strong_matches() {
        let mut report = sample_report("job-1", 70);
        assert_eq!(report.match_analysis.strong_matches.len(), 1);
        // one strong match + green flag → shared mission
        assert_eq!(choose_hook(&report), HookType::SharedMission);

        report.match_analysis.strong_matches.push(SkillMatch {
            requirement: "Tokio".to_string(),
            evidence: "skill: Tokio".to_string(),
            strength: 1.0,
        });
        assert_eq!(choose_hook(&report), HookType::Achievement);
    }

    #[test]
    fn test_problem_solution_is_the_fallback() {
        let mut report = sample_report("job-1", 70);
        report.company_insights.green_flags.clear();
        assert_eq!(choose_hook(&report), HookType::ProblemSolution);
    }
}
