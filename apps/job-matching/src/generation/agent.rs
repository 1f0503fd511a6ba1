//! Generation agent: turns a `MatchReport` into an `ApplicationKit`.
//!
//! Flow: voice calibration + hook choice → resume ∥ cover letter ∥ answers? ∥ recruiter email?
//! → local ATS scoring. Resume and cover letter are always produced; answers only when the
//! request carries questions; the recruiter email only for recruiter replies.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::analysis::fit_scoring::FitRecommendation;
use crate::analysis::report::MatchReport;
use crate::errors::AppError;
use crate::generation::ats::{ats_score, missing_keywords};
use crate::generation::kit::{
    ApplicationKit, EmailStance, GeneratedCoverLetter, GeneratedResume, QuestionAnswer,
    RecruiterEmail,
};
use crate::generation::prompts::{
    COVER_LETTER_PROMPT_TEMPLATE, COVER_LETTER_SYSTEM, DECLINE_STANCE, INTERESTED_STANCE,
    QUESTIONS_PROMPT_TEMPLATE, QUESTIONS_SYSTEM, RECRUITER_EMAIL_PROMPT_TEMPLATE,
    RECRUITER_EMAIL_SYSTEM, RESUME_PROMPT_TEMPLATE, RESUME_SYSTEM,
};
use crate::generation::voice::{choose_hook, hook_instruction, voice_guide, VoiceGuide};
use crate::llm_client::prompts::{fill_template, GROUNDING_INSTRUCTION, HONESTY_INSTRUCTION};
use crate::llm_client::{complete_json, CompletionProvider};
use crate::models::application::ApplicationIntent;
use crate::models::profile::UserProfile;

/// Request context the generation stage needs beyond the report and profile.
#[derive(Debug, Clone, Copy)]
pub struct GenerationContext<'a> {
    pub intent: ApplicationIntent,
    pub recruiter_message: Option<&'a str>,
    pub application_questions: &'a [String],
}

#[async_trait]
pub trait GenerationAgent: Send + Sync {
    async fn generate(
        &self,
        report: &MatchReport,
        profile: &UserProfile,
        ctx: &GenerationContext<'_>,
    ) -> Result<ApplicationKit, AppError>;
}

#[derive(Clone)]
pub struct LlmGenerationAgent {
    llm: Arc<dyn CompletionProvider>,
}

impl LlmGenerationAgent {
    pub fn new(llm: Arc<dyn CompletionProvider>) -> Self {
        Self { llm }
    }
}

#[derive(Debug, Deserialize)]
struct RawResume {
    markdown: String,
    #[serde(default)]
    highlighted_skills: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawCoverLetter {
    markdown: String,
    #[serde(default)]
    key_points: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawEmail {
    subject: String,
    body: String,
}

/// Serialized once per kit and shared by every prompt.
struct PromptContext {
    voice_json: String,
    profile_json: String,
    report_json: String,
}

#[async_trait]
impl GenerationAgent for LlmGenerationAgent {
    async fn generate(
        &self,
        report: &MatchReport,
        profile: &UserProfile,
        ctx: &GenerationContext<'_>,
    ) -> Result<ApplicationKit, AppError> {
        let guide = voice_guide(profile.voice_style);
        let prompts = PromptContext {
            voice_json: voice_json(&guide)?,
            profile_json: to_json(profile, "profile")?,
            report_json: to_json(&report_view(report), "match report")?,
        };

        let wants_answers = !ctx.application_questions.is_empty();
        let wants_email = ctx.intent == ApplicationIntent::RecruiterResponse;

        let (resume, cover_letter, question_answers, recruiter_email) = tokio::try_join!(
            self.resume(report, profile, &prompts),
            self.cover_letter(report, &prompts),
            async {
                if wants_answers {
                    self.answers(report, ctx.application_questions, &prompts)
                        .await
                        .map(Some)
                } else {
                    Ok(None)
                }
            },
            async {
                if wants_email {
                    self.recruiter_email(report, ctx.recruiter_message, &prompts)
                        .await
                        .map(Some)
                } else {
                    Ok(None)
                }
            },
        )?;

        info!(
            job_id = %report.job_id,
            intent = ctx.intent.as_str(),
            ats_score = resume.ats_score,
            hook = ?cover_letter.hook_type,
            answers = question_answers.as_ref().map_or(0, Vec::len),
            recruiter_email = recruiter_email.is_some(),
            "Application kit generated"
        );

        Ok(ApplicationKit {
            resume,
            cover_letter,
            question_answers,
            recruiter_email,
        })
    }
}

impl LlmGenerationAgent {
    async fn resume(
        &self,
        report: &MatchReport,
        profile: &UserProfile,
        prompts: &PromptContext,
    ) -> Result<GeneratedResume, AppError> {
        let prompt = fill_template(
            RESUME_PROMPT_TEMPLATE,
            &[
                ("grounding_instruction", GROUNDING_INSTRUCTION),
                ("honesty_instruction", HONESTY_INSTRUCTION),
                ("voice_json", prompts.voice_json.as_str()),
                ("profile_json", prompts.profile_json.as_str()),
                ("report_json", prompts.report_json.as_str()),
            ],
        );

        let raw: RawResume = complete_json(self.llm.as_ref(), &prompt, RESUME_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(format!("Resume generation failed: {e}")))?;

        let missing = missing_keywords(&raw.markdown, &report.requirements);
        if !missing.is_empty() {
            warn!(job_id = %report.job_id, ?missing, "Resume omits posting keywords");
        }

        // Highlighted skills must come from the profile, never from the posting alone.
        let known = profile.unique_skills();
        let highlighted_skills = raw
            .highlighted_skills
            .into_iter()
            .filter(|s| known.iter().any(|k| k.eq_ignore_ascii_case(s)))
            .collect();

        Ok(GeneratedResume {
            ats_score: ats_score(&raw.markdown, &report.requirements),
            markdown: raw.markdown,
            highlighted_skills,
        })
    }

    async fn cover_letter(
        &self,
        report: &MatchReport,
        prompts: &PromptContext,
    ) -> Result<GeneratedCoverLetter, AppError> {
        let hook_type = choose_hook(report);
        let prompt = fill_template(
            COVER_LETTER_PROMPT_TEMPLATE,
            &[
                ("grounding_instruction", GROUNDING_INSTRUCTION),
                ("honesty_instruction", HONESTY_INSTRUCTION),
                ("voice_json", prompts.voice_json.as_str()),
                ("hook_instruction", hook_instruction(hook_type)),
                ("profile_json", prompts.profile_json.as_str()),
                ("report_json", prompts.report_json.as_str()),
            ],
        );

        let raw: RawCoverLetter = complete_json(self.llm.as_ref(), &prompt, COVER_LETTER_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(format!("Cover letter generation failed: {e}")))?;

        Ok(GeneratedCoverLetter {
            markdown: raw.markdown,
            hook_type,
            key_points: raw.key_points,
        })
    }

    async fn answers(
        &self,
        report: &MatchReport,
        questions: &[String],
        prompts: &PromptContext,
    ) -> Result<Vec<QuestionAnswer>, AppError> {
        let questions_json = to_json(&questions, "questions")?;
        let prompt = fill_template(
            QUESTIONS_PROMPT_TEMPLATE,
            &[
                ("grounding_instruction", GROUNDING_INSTRUCTION),
                ("voice_json", prompts.voice_json.as_str()),
                ("profile_json", prompts.profile_json.as_str()),
                ("report_json", prompts.report_json.as_str()),
                ("questions_json", questions_json.as_str()),
            ],
        );

        let answers: Vec<String> = complete_json(self.llm.as_ref(), &prompt, QUESTIONS_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(format!("Question answering failed: {e}")))?;

        if answers.len() != questions.len() {
            return Err(AppError::Llm(format!(
                "Question answering for {} returned {} answers for {} questions",
                report.job_id,
                answers.len(),
                questions.len()
            )));
        }

        Ok(questions
            .iter()
            .cloned()
            .zip(answers)
            .map(|(question, answer)| QuestionAnswer { question, answer })
            .collect())
    }

    async fn recruiter_email(
        &self,
        report: &MatchReport,
        recruiter_message: Option<&str>,
        prompts: &PromptContext,
    ) -> Result<RecruiterEmail, AppError> {
        let stance = email_stance(report.fit_score.recommendation);
        let stance_instruction = match stance {
            EmailStance::Interested => INTERESTED_STANCE,
            EmailStance::Decline => DECLINE_STANCE,
        };

        let prompt = fill_template(
            RECRUITER_EMAIL_PROMPT_TEMPLATE,
            &[
                ("grounding_instruction", GROUNDING_INSTRUCTION),
                ("voice_json", prompts.voice_json.as_str()),
                ("stance_instruction", stance_instruction),
                ("recruiter_message", recruiter_message.unwrap_or("(not provided)")),
                ("profile_json", prompts.profile_json.as_str()),
                ("report_json", prompts.report_json.as_str()),
            ],
        );

        let raw: RawEmail = complete_json(self.llm.as_ref(), &prompt, RECRUITER_EMAIL_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(format!("Recruiter email generation failed: {e}")))?;

        Ok(RecruiterEmail {
            subject: raw.subject,
            body: raw.body,
            stance,
        })
    }
}

/// SKIP-tier fits get a polite decline; everything else an interested reply.
pub fn email_stance(recommendation: FitRecommendation) -> EmailStance {
    match recommendation {
        FitRecommendation::Skip => EmailStance::Decline,
        _ => EmailStance::Interested,
    }
}

/// The parts of a report the writing prompts need.
fn report_view(report: &MatchReport) -> Value {
    json!({
        "job_title": report.job_title,
        "company": report.company,
        "company_summary": report.company_insights.summary,
        "must_have": report.requirements.must_have,
        "tech_stack": report.requirements.tech_stack,
        "responsibilities": report.requirements.responsibilities,
        "strong_matches": report.match_analysis.strong_matches.iter().map(|m| &m.requirement).collect::<Vec<_>>(),
        "partial_matches": report.match_analysis.partial_matches.iter().map(|m| &m.requirement).collect::<Vec<_>>(),
        "gaps": report.match_analysis.gaps,
        "transferable_skills": report.match_analysis.transferable_skills,
        "talking_points": report.talking_points,
        "green_flags": report.company_insights.green_flags,
        "recent_news": report.company_insights.recent_news,
        "fit_recommendation": report.fit_score.recommendation,
    })
}

fn voice_json(guide: &VoiceGuide) -> Result<String, AppError> {
    to_json(
        &json!({
            "preferred_verbs": guide.preferred_verbs,
            "avoid_phrases": guide.avoid_phrases,
            "register": guide.register,
        }),
        "voice guide",
    )
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T, what: &str) -> Result<String, AppError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize {what}: {e}")))
}
