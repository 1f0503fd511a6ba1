pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::orchestrator::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Applications API
        .route(
            "/api/v1/applications",
            post(handlers::handle_process_application),
        )
        .route(
            "/api/v1/applications/check-fit",
            post(handlers::handle_check_fit),
        )
        .route(
            "/api/v1/applications/materials",
            post(handlers::handle_generate_materials),
        )
        .with_state(state)
}
