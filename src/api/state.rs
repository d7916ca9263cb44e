//! Application state for the payroll engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::run::RunOrchestrator;

/// Shared application state.
///
/// Contains the run orchestrator, which in turn owns the settings registry,
/// component catalog, run store, and collaborator handles.
#[derive(Clone)]
pub struct AppState {
    orchestrator: Arc<RunOrchestrator>,
}

impl AppState {
    /// Creates a new application state around an orchestrator.
    pub fn new(orchestrator: RunOrchestrator) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
        }
    }

    /// Returns a reference to the orchestrator.
    pub fn orchestrator(&self) -> &RunOrchestrator {
        &self.orchestrator
    }
}
