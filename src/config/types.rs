//! Configuration types for the payroll engine.
//!
//! This module contains the strongly-typed structures for statutory settings
//! and tax brackets that are deserialized from YAML configuration files.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The kind of configuration a [`PayrollSetting`] row carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingType {
    /// A row routing to the progressive tax bracket table.
    TaxBracket,
    /// A statutory rate such as pension or NHIS.
    StatutoryRate,
    /// A calculation formula parameter.
    Formula,
    /// Read-only reference data.
    Reference,
}

/// The base amount a percentage setting applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateBase {
    /// Sum of pensionable emolument components (Basic, Housing, Transport).
    PensionableAmount,
    /// The BASIC_SALARY component alone.
    BasicSalary,
    /// Annual gross salary.
    AnnualGross,
    /// Annual rent declared by the staff member.
    AnnualRentPaid,
}

/// The structured value stored in a [`PayrollSetting`] row.
///
/// Statutory rules are stored as data and interpreted at calculation time.
/// The representation is a small tagged variant rather than a general
/// expression language: every formula the engine evaluates is a percentage of
/// a named base, optionally capped, a fixed amount, or a reference to the
/// progressive bracket table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SettingValue {
    /// A percentage applied to a named base amount.
    PercentageOfBase {
        /// The rate as a percentage (8.0 means 8%).
        rate: Decimal,
        /// The base the rate applies to.
        base: RateBase,
    },
    /// A percentage of a base with an annual cap.
    CappedPercentage {
        /// The rate as a percentage.
        rate: Decimal,
        /// The annual cap on the computed amount.
        cap: Decimal,
        /// The base the rate applies to.
        base: RateBase,
    },
    /// A fixed scalar amount or factor.
    FixedAmount {
        /// The stored amount.
        amount: Decimal,
    },
    /// Marker routing to the active progressive bracket schedule.
    ProgressiveBracket,
}

/// One versioned key/value configuration row.
///
/// Settings are versioned by deactivating the old row and inserting a new
/// one; superseded rows stay in the history so a run calculated under the old
/// rates remains explainable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollSetting {
    /// The unique setting key (unique among active rows).
    pub setting_key: String,
    /// The kind of configuration this row carries.
    pub setting_type: SettingType,
    /// The structured value.
    pub value: SettingValue,
    /// Whether this row is the active version for its key.
    pub is_active: bool,
    /// The date this row took effect.
    pub effective_from: NaiveDate,
}

/// One tier of a progressive tax schedule.
///
/// Tiers within an effective period are contiguous and non-overlapping; the
/// highest tier has no upper bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// The position of this tier in the schedule (1-based).
    pub tier_number: u32,
    /// Lower bound of the tier (inclusive).
    pub income_from: Decimal,
    /// Upper bound of the tier (exclusive); `None` for the unbounded top tier.
    pub income_to: Option<Decimal>,
    /// The tax rate for income in this tier, as a percentage.
    pub tax_rate: Decimal,
    /// The date this tier takes effect.
    pub effective_from: NaiveDate,
    /// The last date this tier applies; `None` while still current.
    pub effective_to: Option<NaiveDate>,
}

impl TaxBracket {
    /// Returns true if this bracket applies on the given date.
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.effective_from <= date && self.effective_to.is_none_or(|to| to >= date)
    }
}

/// Settings configuration file structure (`settings.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct SettingsFile {
    /// All setting rows, active and superseded.
    pub settings: Vec<PayrollSetting>,
}

/// One tier within a bracket schedule file.
#[derive(Debug, Clone, Deserialize)]
pub struct BracketTier {
    /// The position of this tier in the schedule (1-based).
    pub tier_number: u32,
    /// Lower bound of the tier (inclusive).
    pub income_from: Decimal,
    /// Upper bound of the tier (exclusive); `None` for the top tier.
    pub income_to: Option<Decimal>,
    /// The tax rate for this tier, as a percentage.
    pub tax_rate: Decimal,
}

/// Bracket schedule file structure (`brackets/<date>.yaml`).
///
/// Each file holds one full schedule with a shared effective period, expanded
/// into [`TaxBracket`] rows at load time.
#[derive(Debug, Clone, Deserialize)]
pub struct BracketFile {
    /// The date this schedule takes effect.
    pub effective_from: NaiveDate,
    /// The last date this schedule applies; `None` while still current.
    #[serde(default)]
    pub effective_to: Option<NaiveDate>,
    /// The schedule tiers, lowest first.
    pub tiers: Vec<BracketTier>,
}

impl BracketFile {
    /// Expands the file into individual bracket rows.
    pub fn into_brackets(self) -> Vec<TaxBracket> {
        let effective_from = self.effective_from;
        let effective_to = self.effective_to;
        self.tiers
            .into_iter()
            .map(|tier| TaxBracket {
                tier_number: tier.tier_number,
                income_from: tier.income_from,
                income_to: tier.income_to,
                tax_rate: tier.tax_rate,
                effective_from,
                effective_to,
            })
            .collect()
    }
}
