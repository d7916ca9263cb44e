//! The settings registry: versioned statutory rates and formula definitions.
//!
//! The registry holds the append-only history of [`PayrollSetting`] rows plus
//! the progressive tax bracket table, and resolves the active value for a
//! key. Edits go through [`SettingsRegistry::deactivate_and_insert`], which
//! keeps exactly one active row per key and never discards superseded rows.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

use super::types::{PayrollSetting, RateBase, SettingValue, TaxBracket};

/// Setting key for the employee pension contribution rate.
pub const PENSION_RATE: &str = "PENSION_RATE";
/// Setting key for the NHIS relief rate (relief-only, never deducted).
pub const NHIS_RATE: &str = "NHIS_RATE";
/// Setting key for the rent relief rate and annual cap.
pub const RENT_RELIEF: &str = "RENT_RELIEF";
/// Setting key for the annual-to-monthly division factor.
pub const ANNUAL_DIVISION_FACTOR: &str = "ANNUAL_DIVISION_FACTOR";
/// Setting key for the guaranteed minimum attendance factor.
pub const MIN_ATTENDANCE_FACTOR: &str = "MIN_ATTENDANCE_FACTOR";
/// Setting key routing PAYE computation to the bracket table.
pub const PAYE_BRACKETS: &str = "PAYE_BRACKETS";

/// Holds versioned payroll settings and the tax bracket table.
///
/// The registry is a pure lookup structure: it performs no caching beyond
/// read-after-write consistency of the active flag, and it does not decide
/// when rates change — the writer does, by deactivating and inserting rows.
#[derive(Debug, Clone)]
pub struct SettingsRegistry {
    rows: Vec<PayrollSetting>,
    brackets: Vec<TaxBracket>,
}

impl SettingsRegistry {
    /// Creates a registry from setting rows and a bracket table.
    pub fn new(rows: Vec<PayrollSetting>, brackets: Vec<TaxBracket>) -> Self {
        Self { rows, brackets }
    }

    /// Returns the active value for a key.
    ///
    /// Fails with `SettingNotFound` if no active row matches.
    pub fn get(&self, key: &str) -> EngineResult<&SettingValue> {
        self.rows
            .iter()
            .find(|row| row.is_active && row.setting_key == key)
            .map(|row| &row.value)
            .ok_or_else(|| EngineError::SettingNotFound {
                key: key.to_string(),
            })
    }

    /// Deactivates any active rows for the new row's key, then appends it.
    ///
    /// This is the only mutation path: history rows are retained so runs
    /// calculated under earlier rates stay explainable.
    pub fn deactivate_and_insert(&mut self, row: PayrollSetting) {
        for existing in &mut self.rows {
            if existing.setting_key == row.setting_key {
                existing.is_active = false;
            }
        }
        self.rows.push(row);
    }

    /// Returns every row recorded for a key, oldest first.
    pub fn history(&self, key: &str) -> Vec<&PayrollSetting> {
        self.rows
            .iter()
            .filter(|row| row.setting_key == key)
            .collect()
    }

    /// Returns the full bracket table (all effective periods).
    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// Replaces the bracket table.
    ///
    /// New schedules are appended alongside period-closed old ones, mirroring
    /// the setting-row versioning model.
    pub fn set_brackets(&mut self, brackets: Vec<TaxBracket>) {
        self.brackets = brackets;
    }

    /// Resolves a `percentage_of_base` value for a key, checking the base.
    pub fn percentage_of(&self, key: &str, expected_base: RateBase) -> EngineResult<Decimal> {
        match self.get(key)? {
            SettingValue::PercentageOfBase { rate, base } if *base == expected_base => Ok(*rate),
            other => Err(EngineError::SettingMalformed {
                key: key.to_string(),
                message: format!(
                    "expected a percentage of {:?}, found {:?}",
                    expected_base, other
                ),
            }),
        }
    }

    /// Resolves a `capped_percentage` value for a key, checking the base.
    pub fn capped_percentage_of(
        &self,
        key: &str,
        expected_base: RateBase,
    ) -> EngineResult<(Decimal, Decimal)> {
        match self.get(key)? {
            SettingValue::CappedPercentage { rate, cap, base } if *base == expected_base => {
                Ok((*rate, *cap))
            }
            other => Err(EngineError::SettingMalformed {
                key: key.to_string(),
                message: format!(
                    "expected a capped percentage of {:?}, found {:?}",
                    expected_base, other
                ),
            }),
        }
    }

    /// Resolves a `fixed_amount` value for a key.
    pub fn amount(&self, key: &str) -> EngineResult<Decimal> {
        match self.get(key)? {
            SettingValue::FixedAmount { amount } => Ok(*amount),
            other => Err(EngineError::SettingMalformed {
                key: key.to_string(),
                message: format!("expected a fixed amount, found {:?}", other),
            }),
        }
    }

    /// Resolves every rate the item calculator needs into one immutable
    /// snapshot, read once at the start of a run.
    ///
    /// All items of a run share the snapshot, so an admin edit landing
    /// mid-run cannot produce a run calculated under mixed rates. Fails
    /// early with `NoBracketsActive` when no schedule covers `as_of`.
    pub fn snapshot(&self, as_of: NaiveDate) -> EngineResult<SettingsSnapshot> {
        match self.get(PAYE_BRACKETS)? {
            SettingValue::ProgressiveBracket => {}
            other => {
                return Err(EngineError::SettingMalformed {
                    key: PAYE_BRACKETS.to_string(),
                    message: format!("expected a progressive bracket marker, found {:?}", other),
                });
            }
        }

        let brackets: Vec<TaxBracket> = self
            .brackets
            .iter()
            .filter(|b| b.is_active_on(as_of))
            .cloned()
            .collect();
        if brackets.is_empty() {
            return Err(EngineError::NoBracketsActive { date: as_of });
        }

        Ok(SettingsSnapshot {
            pension_rate: self.percentage_of(PENSION_RATE, RateBase::PensionableAmount)?,
            nhis_rate: self.percentage_of(NHIS_RATE, RateBase::BasicSalary)?,
            rent_relief: self.capped_percentage_of(RENT_RELIEF, RateBase::AnnualRentPaid)?,
            annual_division_factor: self.amount(ANNUAL_DIVISION_FACTOR)?,
            min_attendance_factor: self.amount(MIN_ATTENDANCE_FACTOR)?,
            brackets,
            as_of,
        })
    }
}

/// The rates and bracket schedule resolved for one payroll run.
///
/// Built by [`SettingsRegistry::snapshot`] at the start of the
/// draft-to-calculated transition and shared read-only by every item
/// calculation in the run.
#[derive(Debug, Clone)]
pub struct SettingsSnapshot {
    /// Employee pension contribution rate (percent of pensionable amount).
    pub pension_rate: Decimal,
    /// NHIS relief rate (percent of basic salary; relief-only).
    pub nhis_rate: Decimal,
    /// Rent relief rate (percent of annual rent) and annual cap.
    pub rent_relief: (Decimal, Decimal),
    /// Divisor turning annual amounts into per-period amounts (usually 12).
    pub annual_division_factor: Decimal,
    /// Floor applied to the attendance factor.
    pub min_attendance_factor: Decimal,
    /// Bracket tiers active on the snapshot date, unsorted.
    pub brackets: Vec<TaxBracket>,
    /// The calculation date the snapshot was resolved for.
    pub as_of: NaiveDate,
}
