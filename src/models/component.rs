//! Emolument component model and catalog.
//!
//! Components are the named pay elements a pay grade is built from. Eleven
//! universal components are shared by every client; clients may add custom
//! ones. A component referenced by a historical calculation is never edited
//! in place — edits create new components so history keeps its meaning.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{EngineError, EngineResult};

/// Component code for the core monthly salary element.
pub const BASIC_SALARY: &str = "BASIC_SALARY";
/// Component code for the annual leave allowance reserve.
pub const LEAVE_ALLOWANCE: &str = "LEAVE_ALLOWANCE";
/// Component code for the 13th month salary reserve.
pub const THIRTEENTH_MONTH: &str = "THIRTEENTH_MONTH";

/// How a component participates in the payroll calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayrollCategory {
    /// Core salary; counts toward annual gross.
    Salary,
    /// A taxable allowance; counts toward annual gross.
    Allowance,
    /// Repaid expense; excluded from gross and tax, added to credit-to-bank.
    Reimbursable,
    /// Withheld monthly and paid out annually (leave allowance, 13th month).
    Deduction,
    /// Statutory element handled explicitly by the calculator.
    Statutory,
}

/// A named pay element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmolumentComponent {
    /// Stable component code (e.g. "BASIC_SALARY").
    pub code: String,
    /// Display name.
    pub name: String,
    /// How the component participates in calculation.
    pub category: PayrollCategory,
    /// Whether pension contribution and relief apply to this component.
    ///
    /// True only for the Basic/Housing/Transport class of components.
    pub is_pensionable: bool,
    /// Whether this is one of the standard universal components.
    pub is_universal_template: bool,
    /// The owning client for custom components; `None` for shared ones.
    #[serde(default)]
    pub client_id: Option<String>,
}

/// Lookup catalog of emolument components by code.
#[derive(Debug, Clone, Default)]
pub struct ComponentCatalog {
    components: HashMap<String, EmolumentComponent>,
}

impl ComponentCatalog {
    /// Builds a catalog from components.
    pub fn new(components: impl IntoIterator<Item = EmolumentComponent>) -> Self {
        Self {
            components: components
                .into_iter()
                .map(|c| (c.code.clone(), c))
                .collect(),
        }
    }

    /// Looks up a component by code.
    ///
    /// Unknown codes fail with `UnknownComponent` rather than being skipped;
    /// a silently dropped component would underpay or undercount the tax
    /// base.
    pub fn get(&self, code: &str) -> EngineResult<&EmolumentComponent> {
        self.components
            .get(code)
            .ok_or_else(|| EngineError::UnknownComponent {
                code: code.to_string(),
            })
    }

    /// Returns true if the catalog knows the code.
    pub fn contains(&self, code: &str) -> bool {
        self.components.contains_key(code)
    }

    /// Number of components in the catalog.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns true if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}
