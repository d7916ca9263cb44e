//! Error types for the payroll calculation engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Errors fall into three families: configuration errors (missing or
//! malformed settings, no active tax brackets) which block every item that
//! depends on them, input errors (unknown component, zero expected days,
//! missing attendance or pay grade) which block only the affected staff
//! member, and state errors (invalid transition, duplicate period, duplicate
//! item) which reject the requested operation with no side effects.

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

/// The main error type for the payroll calculation engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::SettingNotFound {
///     key: "PENSION_RATE".to_string(),
/// };
/// assert_eq!(error.to_string(), "Payroll setting not found: PENSION_RATE");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No active row exists for the requested setting key.
    #[error("Payroll setting not found: {key}")]
    SettingNotFound {
        /// The setting key that was requested.
        key: String,
    },

    /// The stored setting value does not match the shape expected for its key.
    #[error("Payroll setting '{key}' is malformed: {message}")]
    SettingMalformed {
        /// The setting key whose value is malformed.
        key: String,
        /// A description of the shape mismatch.
        message: String,
    },

    /// No tax bracket configuration is active for the calculation date.
    ///
    /// This is a blocking configuration error; a missing bracket table must
    /// never be treated as a 0% tax rate.
    #[error("No tax brackets active on {date}")]
    NoBracketsActive {
        /// The calculation date for which brackets were requested.
        date: NaiveDate,
    },

    /// A pay grade references an emolument component missing from the catalog.
    #[error("Unknown emolument component: {code}")]
    UnknownComponent {
        /// The component code that was not found.
        code: String,
    },

    /// An attendance record has zero expected days.
    ///
    /// Surfaced as a per-staff configuration problem rather than silently
    /// producing a full or zero attendance factor.
    #[error("Attendance record for staff '{staff_id}' has zero expected days")]
    ZeroExpectedDays {
        /// The staff member whose record is invalid.
        staff_id: String,
    },

    /// No active pay grade structure is associated with a staff member.
    #[error("No active pay grade structure for staff '{staff_id}'")]
    PayGradeNotFound {
        /// The staff member without a pay grade.
        staff_id: String,
    },

    /// No attendance record exists for a staff member in the run's period.
    #[error("No attendance record for staff '{staff_id}' in {month}/{year}")]
    AttendanceMissing {
        /// The staff member without attendance data.
        staff_id: String,
        /// The payroll month.
        month: u32,
        /// The payroll year.
        year: i32,
    },

    /// A payroll run was asked to move to a state it cannot reach.
    #[error("Payroll run {run_id} cannot move from '{from}' to '{to}'")]
    InvalidStateTransition {
        /// The run whose transition was rejected.
        run_id: Uuid,
        /// The run's current state.
        from: String,
        /// The requested state.
        to: String,
    },

    /// A run was requested for a month outside 1-12.
    #[error("Invalid payroll period: {month}/{year}")]
    InvalidPeriod {
        /// The rejected month.
        month: u32,
        /// The year the period was requested for.
        year: i32,
    },

    /// A non-cancelled payroll run already exists for the client and period.
    #[error("A payroll run already exists for client '{client_id}' in {month}/{year}")]
    DuplicatePeriod {
        /// The client the run belongs to.
        client_id: String,
        /// The payroll month.
        month: u32,
        /// The payroll year.
        year: i32,
    },

    /// A payroll item already exists for the run and staff member.
    #[error("Payroll item already exists for staff '{staff_id}' in run {run_id}")]
    ItemAlreadyExists {
        /// The run the duplicate item belongs to.
        run_id: Uuid,
        /// The staff member the duplicate item belongs to.
        staff_id: String,
    },

    /// No payroll run exists with the given id.
    #[error("Payroll run not found: {run_id}")]
    RunNotFound {
        /// The run id that was requested.
        run_id: Uuid,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
