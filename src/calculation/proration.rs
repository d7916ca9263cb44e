//! Attendance proration.
//!
//! Derives the bounded attendance factor applied to a staff member's payment
//! amounts.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::AttendanceRecord;

/// Computes the attendance factor for a record.
///
/// The raw factor is `actual_working_days / total_expected_days`, capped at
/// 1.0 (working more days than expected cannot raise pay) and floored at
/// `minimum_factor` (a configurable guaranteed pay fraction, 0.00 unless a
/// calculation template raises it).
///
/// A record with zero expected days fails with `ZeroExpectedDays`: the
/// period was misconfigured upstream, and neither a silent zero nor a silent
/// full month is a defensible payment.
pub fn attendance_factor(
    record: &AttendanceRecord,
    minimum_factor: Decimal,
) -> EngineResult<Decimal> {
    if record.total_expected_days == 0 {
        return Err(EngineError::ZeroExpectedDays {
            staff_id: record.staff_id.clone(),
        });
    }

    let raw = Decimal::from(record.actual_working_days) / Decimal::from(record.total_expected_days);
    Ok(raw.min(Decimal::ONE).max(minimum_factor))
}
