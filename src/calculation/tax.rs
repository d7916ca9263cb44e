//! Progressive tax computation.
//!
//! This module resolves the PAYE tax owed on an annual taxable income using
//! the bracket schedule active for the calculation date.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::TaxBracket;
use crate::error::{EngineError, EngineResult};

/// Computes progressive tax on an annual taxable income.
///
/// Brackets active on `as_of` are selected and walked in tier order. Each
/// tier taxes the slice of income between its bounds:
/// `min(income, income_to) - income_from`, clamped at zero, with no upper
/// clamp on the unbounded top tier. Zero-rate tiers contribute nothing but
/// still consume income from the lower bound of the tiers above them.
///
/// Fails with `NoBracketsActive` when no schedule covers `as_of`. A missing
/// schedule must block the calculation outright; taxing at 0% because the
/// table was empty would be a silent statutory violation.
///
/// # Example
///
/// With the 2025 schedule (first ₦800,000 at 0%, then 15%), a taxable
/// income of ₦1,000,000 owes (1,000,000 − 800,000) × 15% = ₦30,000.
pub fn compute_progressive_tax(
    taxable_income: Decimal,
    as_of: NaiveDate,
    brackets: &[TaxBracket],
) -> EngineResult<Decimal> {
    let mut active: Vec<&TaxBracket> = brackets.iter().filter(|b| b.is_active_on(as_of)).collect();
    if active.is_empty() {
        return Err(EngineError::NoBracketsActive { date: as_of });
    }
    active.sort_by_key(|b| b.tier_number);

    if taxable_income <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }

    let hundred = Decimal::ONE_HUNDRED;
    let mut total_tax = Decimal::ZERO;

    for bracket in active {
        let ceiling = match bracket.income_to {
            Some(to) => taxable_income.min(to),
            None => taxable_income,
        };
        let slice = (ceiling - bracket.income_from).max(Decimal::ZERO);
        total_tax += slice * bracket.tax_rate / hundred;
    }

    Ok(total_tax)
}
