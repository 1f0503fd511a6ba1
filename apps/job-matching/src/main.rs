mod analysis;
mod config;
mod errors;
mod generation;
mod llm_client;
mod models;
mod orchestrator;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::analysis::agent::LlmAnalysisAgent;
use crate::analysis::fit_scoring::WeightedFitScorer;
use crate::config::Config;
use crate::generation::agent::LlmGenerationAgent;
use crate::llm_client::LlmClient;
use crate::orchestrator::ApplicationOrchestrator;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing or malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting job-matching v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = Arc::new(LlmClient::new(config.anthropic_api_key.clone())?);
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Agents share the client; the fit scorer is pluggable
    let fit_scorer = Arc::new(WeightedFitScorer::default());
    let analysis = Arc::new(LlmAnalysisAgent::new(llm.clone(), fit_scorer));
    let generation = Arc::new(LlmGenerationAgent::new(llm));

    let orchestrator_config = config.orchestrator();
    info!(
        max_parallel = orchestrator_config.max_parallel,
        min_fit_score = orchestrator_config.min_fit_score_for_generation,
        job_timeout_secs = orchestrator_config.job_timeout.map(|d| d.as_secs()),
        "Orchestrator configured"
    );
    let orchestrator = ApplicationOrchestrator::new(analysis, generation, orchestrator_config);

    let state = AppState {
        orchestrator: Arc::new(orchestrator),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins to the frontend host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
