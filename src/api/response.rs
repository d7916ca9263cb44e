//! Response types for the payroll engine API.
//!
//! This module defines the calculation response body, the error response
//! structures, and the mapping from engine errors to HTTP statuses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::PayrollRun;
use crate::run::CalculationOutcome;

/// Response body for `POST /runs/{id}/calculate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculateRunResponse {
    /// The run after calculation, with aggregated totals.
    pub run: PayrollRun,
    /// Staff ids whose items were calculated.
    pub succeeded: Vec<String>,
    /// Staff whose items failed, with the reason.
    pub failed: Vec<ItemFailureBody>,
}

/// One per-staff failure in a calculation response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemFailureBody {
    /// The staff member the failure belongs to.
    pub staff_id: String,
    /// Display name, for the failure report.
    pub staff_name: String,
    /// Human-readable reason.
    pub error: String,
}

impl From<CalculationOutcome> for CalculateRunResponse {
    fn from(outcome: CalculationOutcome) -> Self {
        Self {
            run: outcome.run,
            succeeded: outcome.succeeded,
            failed: outcome
                .failed
                .into_iter()
                .map(|failure| ItemFailureBody {
                    staff_id: failure.staff_id,
                    staff_name: failure.staff_name,
                    error: failure.error.to_string(),
                })
                .collect(),
        }
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        let (status, code) = match &error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR")
            }
            EngineError::SettingNotFound { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "SETTING_NOT_FOUND")
            }
            EngineError::SettingMalformed { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "SETTING_MALFORMED")
            }
            EngineError::NoBracketsActive { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "NO_BRACKETS_ACTIVE")
            }
            EngineError::UnknownComponent { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "UNKNOWN_COMPONENT")
            }
            EngineError::ZeroExpectedDays { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "ZERO_EXPECTED_DAYS")
            }
            EngineError::PayGradeNotFound { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "PAY_GRADE_NOT_FOUND")
            }
            EngineError::AttendanceMissing { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "ATTENDANCE_MISSING")
            }
            EngineError::InvalidPeriod { .. } => (StatusCode::BAD_REQUEST, "INVALID_PERIOD"),
            EngineError::InvalidStateTransition { .. } => {
                (StatusCode::CONFLICT, "INVALID_STATE_TRANSITION")
            }
            EngineError::DuplicatePeriod { .. } => (StatusCode::CONFLICT, "DUPLICATE_PERIOD"),
            EngineError::ItemAlreadyExists { .. } => (StatusCode::CONFLICT, "ITEM_ALREADY_EXISTS"),
            EngineError::RunNotFound { .. } => (StatusCode::NOT_FOUND, "RUN_NOT_FOUND"),
        };
        ApiErrorResponse {
            status,
            error: ApiError::new(code, message),
        }
    }
}
