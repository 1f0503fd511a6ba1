//! ATS scoring: how many of the posting's keywords survive into the generated resume.

use crate::analysis::matching::mentions;
use crate::analysis::requirements::ParsedRequirements;

/// Percentage of must-have and stack keywords mentioned in `resume_markdown`.
/// Returns 0 when the posting has no keywords to check.
pub fn ats_score(resume_markdown: &str, requirements: &ParsedRequirements) -> u32 {
    let keywords = requirements.keywords();
    if keywords.is_empty() {
        return 0;
    }

    let text = resume_markdown.to_lowercase();
    let hits = keywords
        .iter()
        .filter(|k| mentions(&text, &k.to_lowercase()))
        .count();

    ((hits as f64 / keywords.len() as f64) * 100.0).round() as u32
}

/// Keywords missing from the resume, in requirement order.
pub fn missing_keywords<'a>(resume_markdown: &str, requirements: &'a ParsedRequirements) -> Vec<&'a str> {
    let text = resume_markdown.to_lowercase();
    requirements
        .keywords()
        .into_iter()
        .filter(|k| !mentions(&text, &k.to_lowercase()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn requirements() -> ParsedRequirements {
        ParsedRequirements {
            must_have: vec!["Rust".to_string(), "PostgreSQL".to_string()],
            tech_stack: vec!["Rust".to_string(), "Kubernetes".to_string(), "Go".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_full_coverage_scores_100() {
        let resume = "## Skills\nRust, PostgreSQL, Kubernetes, Go";
        assert_eq!(ats_score(resume, &requirements()), 100);
    }

    #[test]
    fn test_partial_coverage() {
        // 2 of 4 unique keywords
        let resume = "Built services in Rust backed by PostgreSQL at Google";
        assert_eq!(ats_score(resume, &requirements()), 50);
        assert_eq!(missing_keywords(resume, &requirements()), vec!["Kubernetes", "Go"]);
    }

    #[test]
    fn test_no_keywords_scores_zero() {
        assert_eq!(ats_score("anything", &ParsedRequirements::default()), 0);
    }
}
