use std::time::Duration;

use anyhow::{Context, Result};

use crate::orchestrator::OrchestratorConfig;

const DEFAULT_MAX_PARALLEL: usize = 5;
const DEFAULT_MIN_FIT_SCORE_FOR_GENERATION: u32 = 50;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Jobs analyzed concurrently per batch.
    pub max_parallel: usize,
    pub min_fit_score_for_generation: u32,
    /// Per-job deadline. `None` disables the deadline.
    pub job_timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: parse_env_or("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_parallel: parse_env_or("MAX_PARALLEL", DEFAULT_MAX_PARALLEL)?,
            min_fit_score_for_generation: parse_env_or(
                "MIN_FIT_SCORE_FOR_GENERATION",
                DEFAULT_MIN_FIT_SCORE_FOR_GENERATION,
            )?,
            job_timeout: parse_optional_env::<u64>("JOB_TIMEOUT_SECS")?
                .map(Duration::from_secs),
        })
    }

    /// Orchestrator tuning derived from this config.
    pub fn orchestrator(&self) -> OrchestratorConfig {
        OrchestratorConfig {
            max_parallel: self.max_parallel,
            min_fit_score_for_generation: self.min_fit_score_for_generation,
            job_timeout: self.job_timeout,
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env_or<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    Ok(parse_optional_env(key)?.unwrap_or(default))
}

fn parse_optional_env<T>(key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => parse_value(key, &raw).map(Some),
        Err(_) => Ok(None),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse::<T>()
        .with_context(|| format!("{key} must be a valid number, got '{raw}'"))
}
