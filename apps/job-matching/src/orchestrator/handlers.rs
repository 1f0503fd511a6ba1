//! Axum route handlers for the Applications API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::analysis::report::MatchReport;
use crate::errors::AppError;
use crate::generation::kit::ApplicationKit;
use crate::models::application::{ApplicationRequest, ApplicationResponse};
use crate::models::job::JobPosting;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckFitRequest {
    pub job: JobPosting,
    pub request: ApplicationRequest,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckFitResponse {
    pub match_report: MatchReport,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialsRequest {
    pub match_report: MatchReport,
    pub request: ApplicationRequest,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialsResponse {
    pub application_kit: ApplicationKit,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/applications
///
/// Runs analysis for every job, and generation where the intent and fit allow it.
pub async fn handle_process_application(
    State(state): State<AppState>,
    Json(request): Json<ApplicationRequest>,
) -> Result<Json<ApplicationResponse>, AppError> {
    let response = state.orchestrator.process_application(&request).await?;
    Ok(Json(response))
}

/// POST /api/v1/applications/check-fit
pub async fn handle_check_fit(
    State(state): State<AppState>,
    Json(body): Json<CheckFitRequest>,
) -> Result<Json<CheckFitResponse>, AppError> {
    let match_report = state.orchestrator.check_fit(&body.job, &body.request).await?;
    Ok(Json(CheckFitResponse { match_report }))
}

/// POST /api/v1/applications/materials
///
/// Generates a kit from a report returned earlier by check-fit.
pub async fn handle_generate_materials(
    State(state): State<AppState>,
    Json(body): Json<MaterialsRequest>,
) -> Result<Json<MaterialsResponse>, AppError> {
    let application_kit = state
        .orchestrator
        .generate_materials(&body.match_report, &body.request)
        .await?;
    Ok(Json(MaterialsResponse { application_kit }))
}
