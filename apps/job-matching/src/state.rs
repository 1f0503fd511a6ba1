use std::sync::Arc;

use crate::orchestrator::ApplicationOrchestrator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<ApplicationOrchestrator>,
}
