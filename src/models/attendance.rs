//! Attendance record model and period day counting.
//!
//! The attendance subsystem resolves how many days a staff member worked and
//! how many were expected; the engine derives a bounded attendance factor
//! from the pair. The day-count helpers here are what that upstream
//! subsystem uses to fill `total_expected_days` for a month.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// How expected days are counted for a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationMethod {
    /// Count Monday through Friday only.
    WorkingDays,
    /// Count every day of the month.
    CalendarDays,
}

/// Per-staff attendance for one payroll period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The staff member this record belongs to.
    pub staff_id: String,
    /// Days actually worked in the period.
    pub actual_working_days: u32,
    /// Days the staff member was expected to work.
    pub total_expected_days: u32,
    /// How `total_expected_days` was counted.
    pub calculation_method: CalculationMethod,
}

/// Counts the days in a month under the given method.
pub fn expected_days(method: CalculationMethod, year: i32, month: u32) -> u32 {
    match method {
        CalculationMethod::WorkingDays => working_days_in_month(year, month),
        CalculationMethod::CalendarDays => calendar_days_in_month(year, month),
    }
}

/// Number of calendar days in a month.
pub fn calendar_days_in_month(year: i32, month: u32) -> u32 {
    let first = match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(d) => d,
        None => return 0,
    };
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    match next_month {
        Some(next) => next.signed_duration_since(first).num_days() as u32,
        None => 0,
    }
}

/// Number of weekdays (Monday through Friday) in a month.
pub fn working_days_in_month(year: i32, month: u32) -> u32 {
    let total = calendar_days_in_month(year, month);
    (1..=total)
        .filter_map(|day| NaiveDate::from_ymd_opt(year, month, day))
        .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
        .count() as u32
}
