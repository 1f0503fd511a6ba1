// Analysis stage: requirement parsing, company evaluation, profile matching, fit scoring.
// All LLM calls go through llm_client: no direct provider calls here.

pub mod agent;
pub mod company;
pub mod fit_scoring;
pub mod matching;
pub mod prompts;
pub mod report;
pub mod requirements;
