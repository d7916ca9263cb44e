//! Calculation logic for the payroll engine.
//!
//! This module contains the calculation functions for determining pay:
//! progressive tax resolution over the active bracket schedule, emoluments
//! classification and aggregation, attendance proration, and the per-staff
//! item calculation that combines them into a full breakdown.

mod emoluments;
mod item;
mod proration;
mod tax;

pub use emoluments::{EmolumentTotals, aggregate};
pub use item::calculate_item;
pub use proration::attendance_factor;
pub use tax::compute_progressive_tax;
