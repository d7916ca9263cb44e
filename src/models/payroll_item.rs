//! Payroll item model: the immutable per-staff calculation snapshot.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// One staff member's full payroll calculation for one run.
///
/// Every intermediate amount of the calculation is persisted, along with the
/// staff identity and bank details as of calculation time. Later changes to
/// the staff record, pay grade, or settings never alter an existing item;
/// a run that needs different inputs is reopened and recalculated from
/// scratch. At most one item exists per `(run, staff)`.
///
/// The `monthly_gross`/`monthly_reimbursables` pair is the full unprorated
/// entitlement kept for reporting; `prorated_monthly_gross` and
/// `prorated_monthly_reimbursables` are the amounts actually paid. Both
/// pairs are stored — reporting the prorated figure as the entitlement is
/// the historical defect this split exists to prevent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollItem {
    /// The run this item belongs to.
    pub run_id: Uuid,
    /// The staff member this item belongs to.
    pub staff_id: String,
    /// The client the run belongs to.
    pub client_id: String,
    /// The pay grade used for the calculation.
    pub pay_grade_id: String,

    /// Staff display name at calculation time.
    pub staff_name: String,
    /// Employee code at calculation time.
    pub staff_code: String,
    /// Bank name at calculation time, when captured.
    pub bank_name: Option<String>,
    /// Account number at calculation time, when captured.
    pub account_number: Option<String>,
    /// Pension fund administrator code at calculation time.
    pub pfa_code: Option<String>,

    /// Days worked in the period.
    pub days_present: u32,
    /// Expected days not worked.
    pub days_absent: u32,
    /// Total expected days in the period.
    pub total_days: u32,
    /// Attendance factor applied to payment amounts, rounded to 4 places.
    pub proration_factor: Decimal,

    /// Annual gross salary (salary + allowance components).
    pub annual_gross_salary: Decimal,
    /// Annual reimbursable total.
    pub annual_reimbursables: Decimal,
    /// Annual pensionable amount (Basic/Housing/Transport class).
    pub pensionable_amount: Decimal,

    /// Full monthly gross entitlement, unprorated.
    pub monthly_gross: Decimal,
    /// Full monthly reimbursable entitlement, unprorated.
    pub monthly_reimbursables: Decimal,
    /// Monthly gross actually payable after attendance proration.
    pub prorated_monthly_gross: Decimal,
    /// Monthly reimbursables actually payable after attendance proration.
    pub prorated_monthly_reimbursables: Decimal,

    /// Annual pension relief (reduces taxable income).
    pub pension_relief: Decimal,
    /// Annual NHIS relief (relief-only; never deducted from pay).
    pub nhis_relief: Decimal,
    /// Annual rent relief (capped).
    pub rent_relief: Decimal,
    /// Annual taxable income after reliefs, floored at zero.
    pub taxable_income: Decimal,
    /// Annual PAYE tax from the progressive schedule.
    pub annual_paye_tax: Decimal,
    /// Monthly PAYE deduction (annual figure divided, not prorated).
    pub monthly_paye_tax: Decimal,

    /// Monthly pension deduction (prorated).
    pub pension_deduction: Decimal,
    /// Monthly leave allowance reserve deduction (prorated).
    pub leave_allowance_deduction: Decimal,
    /// Monthly 13th month reserve deduction (prorated).
    pub thirteenth_month_deduction: Decimal,
    /// Other deductions (loans, advances); zero until those exist.
    pub other_deductions: Decimal,
    /// Sum of all monthly deductions.
    pub total_deductions: Decimal,

    /// Prorated monthly gross minus total deductions.
    pub net_pay: Decimal,
    /// Net pay plus prorated reimbursables; the amount transferred.
    pub credit_to_bank: Decimal,

    /// Resolved component amounts at calculation time, ordered by code.
    pub emoluments_snapshot: BTreeMap<String, Decimal>,
    /// The calculation date the item was produced for.
    pub calculation_date: NaiveDate,
    /// Set when the owning run is cancelled; the item is kept for audit.
    #[serde(default)]
    pub superseded: bool,
}
