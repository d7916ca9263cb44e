//! Request types for the payroll engine API.
//!
//! This module defines the JSON request structures for the run endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request body for `POST /runs`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRunRequest {
    /// The client the run is for.
    pub client_id: String,
    /// Payroll month (1-12).
    pub month: u32,
    /// Payroll year.
    pub year: i32,
}

/// Request body for `POST /runs/{id}/approve`.
///
/// Sent by the external approval workflow once it has authorized the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApproveRunRequest {
    /// Who approved the run.
    pub approver_id: String,
    /// When the approval happened; defaults to now.
    #[serde(default)]
    pub approved_at: Option<DateTime<Utc>>,
}

/// Request body for `POST /runs/{id}/export`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportRunRequest {
    /// When the export completed; defaults to now.
    #[serde(default)]
    pub exported_at: Option<DateTime<Utc>>,
}
