use serde::{Deserialize, Serialize};

/// A normalized posting as produced by the job source scrapers. Read-only input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    pub id: String,
    pub title: String,
    pub company: String,
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    /// Which board the posting came from, e.g. "hackernews", "remoteok".
    pub source: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub remote: Option<bool>,
    #[serde(default)]
    pub salary: Option<SalaryRange>,
}

impl JobPosting {
    /// One-line description used when nothing better is available.
    pub fn headline(&self) -> String {
        match &self.location {
            Some(location) if !location.trim().is_empty() => {
                format!("{} at {} ({})", self.title, self.company, location)
            }
            _ => format!("{} at {}", self.title, self.company),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryRange {
    #[serde(default)]
    pub min: Option<u32>,
    #[serde(default)]
    pub max: Option<u32>,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "USD".to_string()
}

/// Seniority ladder. Ordering matters: the fit scorer compares levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Entry,
    #[default]
    Mid,
    Senior,
    Staff,
    Lead,
}

impl ExperienceLevel {
    /// Maps total years of experience onto the ladder.
    pub fn from_years(years: f64) -> Self {
        if years < 2.0 {
            ExperienceLevel::Entry
        } else if years < 5.0 {
            ExperienceLevel::Mid
        } else if years < 8.0 {
            ExperienceLevel::Senior
        } else if years < 12.0 {
            ExperienceLevel::Staff
        } else {
            ExperienceLevel::Lead
        }
    }

    /// Lenient parse of free-text seniority labels returned by the LLM.
    pub fn parse_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "entry" | "junior" | "intern" | "graduate" => Some(ExperienceLevel::Entry),
            "mid" | "middle" | "intermediate" => Some(ExperienceLevel::Mid),
            "senior" | "sr" => Some(ExperienceLevel::Senior),
            "staff" | "principal" => Some(ExperienceLevel::Staff),
            "lead" | "director" | "head" | "manager" => Some(ExperienceLevel::Lead),
            _ => None,
        }
    }

    pub fn rank(self) -> i32 {
        self as i32
    }
}
