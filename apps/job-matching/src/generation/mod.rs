// Generation stage: resume, cover letter, question answers, recruiter reply.
// All LLM calls go through llm_client: no direct provider calls here.

pub mod agent;
pub mod ats;
pub mod kit;
pub mod prompts;
pub mod voice;
