//! HTTP API module for the payroll engine.
//!
//! This module provides the REST endpoints that drive the payroll run
//! lifecycle and expose read-only item queries to the export and reporting
//! collaborators.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{ApproveRunRequest, CreateRunRequest, ExportRunRequest};
pub use response::{ApiError, CalculateRunResponse, ItemFailureBody};
pub use state::AppState;
