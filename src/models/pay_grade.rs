//! Pay grade structure model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A pay grade's component entitlements.
///
/// Belongs to a job structure and maps component codes to annual amounts.
/// The engine reads pay grades and never mutates them; an ordered map keeps
/// iteration deterministic so repeated calculations of the same grade agree
/// field-for-field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayGradeStructure {
    /// Unique identifier for the pay grade.
    pub id: String,
    /// The job structure this grade belongs to.
    pub job_structure_id: String,
    /// Component code to annual amount.
    pub emoluments: BTreeMap<String, Decimal>,
}

impl PayGradeStructure {
    /// Returns the annual amount for a component code, if present.
    pub fn amount(&self, code: &str) -> Option<Decimal> {
        self.emoluments.get(code).copied()
    }
}
