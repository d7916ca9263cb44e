//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all run endpoints.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineError;

use super::request::{ApproveRunRequest, CreateRunRequest, ExportRunRequest};
use super::response::{ApiError, ApiErrorResponse, CalculateRunResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/runs", post(create_run_handler))
        .route("/runs/:id", get(get_run_handler))
        .route("/runs/:id/calculate", post(calculate_run_handler))
        .route("/runs/:id/approve", post(approve_run_handler))
        .route("/runs/:id/export", post(export_run_handler))
        .route("/runs/:id/reopen", post(reopen_run_handler))
        .route("/runs/:id/cancel", post(cancel_run_handler))
        .route("/runs/:id/items", get(list_items_handler))
        .with_state(state)
}

fn engine_error_response(correlation_id: Uuid, error: EngineError) -> axum::response::Response {
    warn!(correlation_id = %correlation_id, error = %error, "Request failed");
    let response: ApiErrorResponse = error.into();
    response.into_response()
}

/// Handler for `POST /runs`.
///
/// Creates a draft payroll run for a client and period.
async fn create_run_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateRunRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::new("VALIDATION_ERROR", body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => ApiError::new(
                    "MISSING_CONTENT_TYPE",
                    "Content-Type must be application/json",
                ),
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return (StatusCode::BAD_REQUEST, Json(error)).into_response();
        }
    };

    info!(
        correlation_id = %correlation_id,
        client_id = %request.client_id,
        month = request.month,
        year = request.year,
        "Creating payroll run"
    );

    match state
        .orchestrator()
        .create_run(&request.client_id, request.month, request.year)
    {
        Ok(run) => (StatusCode::CREATED, Json(run)).into_response(),
        Err(error) => engine_error_response(correlation_id, error),
    }
}

/// Handler for `GET /runs/:id`.
async fn get_run_handler(
    State(state): State<AppState>,
    Path(run_id): Path<Uuid>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    match state.orchestrator().run_summary(run_id) {
        Ok(run) => Json(run).into_response(),
        Err(error) => engine_error_response(correlation_id, error),
    }
}

/// Handler for `POST /runs/:id/calculate`.
///
/// Drives the draft-to-calculated transition and reports per-staff failures
/// alongside the aggregated run.
async fn calculate_run_handler(
    State(state): State<AppState>,
    Path(run_id): Path<Uuid>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, run_id = %run_id, "Calculation requested");

    match state.orchestrator().calculate_run(run_id).await {
        Ok(outcome) => {
            info!(
                correlation_id = %correlation_id,
                run_id = %run_id,
                succeeded = outcome.succeeded.len(),
                failed = outcome.failed.len(),
                "Calculation completed"
            );
            Json(CalculateRunResponse::from(outcome)).into_response()
        }
        Err(error) => engine_error_response(correlation_id, error),
    }
}

/// Handler for `POST /runs/:id/approve`.
async fn approve_run_handler(
    State(state): State<AppState>,
    Path(run_id): Path<Uuid>,
    Json(request): Json<ApproveRunRequest>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    let timestamp = request.approved_at.unwrap_or_else(Utc::now);
    match state
        .orchestrator()
        .apply_approval(run_id, &request.approver_id, timestamp)
    {
        Ok(run) => Json(run).into_response(),
        Err(error) => engine_error_response(correlation_id, error),
    }
}

/// Handler for `POST /runs/:id/export`.
async fn export_run_handler(
    State(state): State<AppState>,
    Path(run_id): Path<Uuid>,
    payload: Option<Json<ExportRunRequest>>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    let timestamp = payload
        .and_then(|Json(request)| request.exported_at)
        .unwrap_or_else(Utc::now);
    match state.orchestrator().mark_exported(run_id, timestamp) {
        Ok(run) => Json(run).into_response(),
        Err(error) => engine_error_response(correlation_id, error),
    }
}

/// Handler for `POST /runs/:id/reopen`.
async fn reopen_run_handler(
    State(state): State<AppState>,
    Path(run_id): Path<Uuid>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    match state.orchestrator().reopen_run(run_id) {
        Ok(run) => Json(run).into_response(),
        Err(error) => engine_error_response(correlation_id, error),
    }
}

/// Handler for `POST /runs/:id/cancel`.
async fn cancel_run_handler(
    State(state): State<AppState>,
    Path(run_id): Path<Uuid>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    match state.orchestrator().cancel_run(run_id) {
        Ok(run) => Json(run).into_response(),
        Err(error) => engine_error_response(correlation_id, error),
    }
}

/// Handler for `GET /runs/:id/items`.
///
/// Read-only view for the export/reporting collaborators.
async fn list_items_handler(
    State(state): State<AppState>,
    Path(run_id): Path<Uuid>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    match state.orchestrator().list_items(run_id) {
        Ok(items) => Json(items).into_response(),
        Err(error) => engine_error_response(correlation_id, error),
    }
}
