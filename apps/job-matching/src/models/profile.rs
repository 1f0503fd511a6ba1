use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::job::ExperienceLevel;

/// Candidate profile supplied by the caller. Immutable for the duration of an analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub work_history: Vec<WorkExperience>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub preferences: JobPreferences,
    #[serde(default)]
    pub voice_style: VoiceStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperience {
    pub title: String,
    pub company: String,
    pub start_date: NaiveDate,
    /// `None` for the current role.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPreferences {
    #[serde(default)]
    pub desired_roles: Vec<String>,
    #[serde(default)]
    pub desired_locations: Vec<String>,
    #[serde(default)]
    pub remote_preference: RemotePreference,
    #[serde(default)]
    pub salary_min: Option<u32>,
    #[serde(default)]
    pub salary_max: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemotePreference {
    RemoteOnly,
    Hybrid,
    Onsite,
    #[default]
    Flexible,
}

/// Writing register used for generated materials.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoiceStyle {
    #[default]
    Professional,
    Conversational,
    Confident,
    Technical,
}

impl UserProfile {
    /// Skills with case-insensitive duplicates removed, first occurrence wins.
    /// Includes skills listed on individual roles after the top-level list.
    pub fn unique_skills(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.skills
            .iter()
            .chain(self.work_history.iter().flat_map(|w| w.skills.iter()))
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .filter(|s| seen.insert(s.to_lowercase()))
            .map(str::to_string)
            .collect()
    }

    /// Lowercased text of the summary and every work highlight, for substring evidence.
    pub fn experience_text(&self) -> String {
        let mut text = self.summary.to_lowercase();
        for role in &self.work_history {
            text.push('\n');
            text.push_str(&role.title.to_lowercase());
            for highlight in &role.highlights {
                text.push('\n');
                text.push_str(&highlight.to_lowercase());
            }
        }
        text
    }

    /// Total years worked, overlapping roles counted once.
    pub fn years_of_experience(&self, today: NaiveDate) -> f64 {
        let mut spans: Vec<(NaiveDate, NaiveDate)> = self
            .work_history
            .iter()
            .map(|w| (w.start_date, w.end_date.unwrap_or(today).min(today)))
            .filter(|(start, end)| end > start)
            .collect();
        spans.sort();

        let mut total_days = 0i64;
        let mut current: Option<(NaiveDate, NaiveDate)> = None;
        for (start, end) in spans {
            current = match current {
                Some((cur_start, cur_end)) if start <= cur_end => Some((cur_start, cur_end.max(end))),
                Some((cur_start, cur_end)) => {
                    total_days += (cur_end - cur_start).num_days();
                    Some((start, end))
                }
                None => Some((start, end)),
            };
        }
        if let Some((start, end)) = current {
            total_days += (end - start).num_days();
        }

        total_days as f64 / 365.25
    }

    pub fn experience_level(&self, today: NaiveDate) -> ExperienceLevel {
        ExperienceLevel::from_years(self.years_of_experience(today))
    }
}
