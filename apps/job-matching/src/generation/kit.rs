use serde::{Deserialize, Serialize};

/// Generation-stage output for one job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationKit {
    pub resume: GeneratedResume,
    pub cover_letter: GeneratedCoverLetter,
    /// Present only when the request carried application questions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_answers: Option<Vec<QuestionAnswer>>,
    /// Present only for recruiter replies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recruiter_email: Option<RecruiterEmail>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedResume {
    pub markdown: String,
    pub highlighted_skills: Vec<String>,
    /// Share of the posting's keywords present in the resume, 0–100.
    pub ats_score: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedCoverLetter {
    pub markdown: String,
    pub hook_type: HookType,
    pub key_points: Vec<String>,
}

/// Opening strategy for a cover letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookType {
    CompanyNews,
    Achievement,
    SharedMission,
    ProblemSolution,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionAnswer {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecruiterEmail {
    pub subject: String,
    pub body: String,
    pub stance: EmailStance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailStance {
    Interested,
    Decline,
}
