//! Payroll run lifecycle: orchestration, persistence, and collaborators.

mod orchestrator;
mod providers;
mod store;

pub use orchestrator::{CalculationOutcome, ItemFailure, RunOrchestrator};
pub use providers::{
    AttendanceSource, InMemoryAttendanceSource, InMemoryStaffDirectory, StaffDirectory,
};
pub use store::RunStore;
