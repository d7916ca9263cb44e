//! Emoluments aggregation.
//!
//! This module classifies a pay grade's component amounts into the sums the
//! rest of the calculation works from: annual gross, pensionable amount, and
//! annual reimbursables, plus the specific reserve components deducted
//! monthly.

use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::error::EngineResult;
use crate::models::{
    BASIC_SALARY, ComponentCatalog, LEAVE_ALLOWANCE, PayrollCategory, THIRTEENTH_MONTH,
};

/// The classified sums of a pay grade's emoluments.
#[derive(Debug, Clone, PartialEq)]
pub struct EmolumentTotals {
    /// Sum of salary and allowance components (annual).
    pub annual_gross: Decimal,
    /// Sum of pensionable components, regardless of category (annual).
    pub pensionable_amount: Decimal,
    /// Sum of reimbursable components (annual).
    pub annual_reimbursables: Decimal,
    /// The BASIC_SALARY component amount; base for NHIS relief.
    pub basic_salary: Decimal,
    /// The LEAVE_ALLOWANCE reserve amount (annual).
    pub leave_allowance: Decimal,
    /// The THIRTEENTH_MONTH reserve amount (annual).
    pub thirteenth_month: Decimal,
    /// Every component amount, ordered by code, for the item snapshot.
    pub snapshot: BTreeMap<String, Decimal>,
}

/// Classifies and sums a pay grade's component amounts.
///
/// Each component code is resolved against the catalog for its category and
/// pensionable flag. Salary and allowance amounts form the annual gross;
/// reimbursable amounts form the annual reimbursables; pensionable amounts
/// are summed regardless of category. Deduction-category reserves
/// (LEAVE_ALLOWANCE, THIRTEENTH_MONTH) and statutory components are excluded
/// from gross and handled explicitly by the item calculator.
///
/// A code missing from the catalog fails with `UnknownComponent`.
pub fn aggregate(
    emoluments: &BTreeMap<String, Decimal>,
    catalog: &ComponentCatalog,
) -> EngineResult<EmolumentTotals> {
    let mut totals = EmolumentTotals {
        annual_gross: Decimal::ZERO,
        pensionable_amount: Decimal::ZERO,
        annual_reimbursables: Decimal::ZERO,
        basic_salary: Decimal::ZERO,
        leave_allowance: Decimal::ZERO,
        thirteenth_month: Decimal::ZERO,
        snapshot: BTreeMap::new(),
    };

    for (code, amount) in emoluments {
        let component = catalog.get(code)?;
        let amount = *amount;

        totals.snapshot.insert(code.clone(), amount);

        match component.category {
            PayrollCategory::Salary | PayrollCategory::Allowance => {
                totals.annual_gross += amount;
            }
            PayrollCategory::Reimbursable => {
                totals.annual_reimbursables += amount;
            }
            PayrollCategory::Deduction => {
                if code == LEAVE_ALLOWANCE {
                    totals.leave_allowance = amount;
                } else if code == THIRTEENTH_MONTH {
                    totals.thirteenth_month = amount;
                }
            }
            PayrollCategory::Statutory => {}
        }

        if component.is_pensionable {
            totals.pensionable_amount += amount;
        }
        if code == BASIC_SALARY {
            totals.basic_salary = amount;
        }
    }

    Ok(totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::EmolumentComponent;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn component(code: &str, category: PayrollCategory, pensionable: bool) -> EmolumentComponent {
        EmolumentComponent {
            code: code.to_string(),
            name: code.to_string(),
            category,
            is_pensionable: pensionable,
            is_universal_template: true,
            client_id: None,
        }
    }

    fn test_catalog() -> ComponentCatalog {
        ComponentCatalog::new([
            component(BASIC_SALARY, PayrollCategory::Salary, true),
            component("HOUSING", PayrollCategory::Allowance, true),
            component("TRANSPORT", PayrollCategory::Allowance, true),
            component("MEAL_ALLOWANCE", PayrollCategory::Allowance, false),
            component(LEAVE_ALLOWANCE, PayrollCategory::Deduction, false),
            component(THIRTEENTH_MONTH, PayrollCategory::Deduction, false),
            component("OTJ_TRANSPORT", PayrollCategory::Reimbursable, false),
            component("UNIFORM", PayrollCategory::Reimbursable, false),
        ])
    }

    fn grade(entries: &[(&str, &str)]) -> BTreeMap<String, Decimal> {
        entries
            .iter()
            .map(|(code, amount)| (code.to_string(), dec(amount)))
            .collect()
    }

    /// EA-001: salary and allowances form gross; reimbursables do not
    #[test]
    fn test_gross_excludes_reimbursables() {
        let emoluments = grade(&[
            (BASIC_SALARY, "1200000"),
            ("HOUSING", "720000"),
            ("OTJ_TRANSPORT", "120000"),
        ]);
        let totals = aggregate(&emoluments, &test_catalog()).unwrap();
        assert_eq!(totals.annual_gross, dec("1920000"));
        assert_eq!(totals.annual_reimbursables, dec("120000"));
    }

    /// EA-002: pensionable sum follows the flag, not the category
    #[test]
    fn test_pensionable_follows_flag() {
        let emoluments = grade(&[
            (BASIC_SALARY, "1200000"),
            ("HOUSING", "720000"),
            ("TRANSPORT", "480000"),
            ("MEAL_ALLOWANCE", "240000"),
        ]);
        let totals = aggregate(&emoluments, &test_catalog()).unwrap();
        // MEAL_ALLOWANCE is an allowance but not pensionable.
        assert_eq!(totals.pensionable_amount, dec("2400000"));
        assert_eq!(totals.annual_gross, dec("2640000"));
    }

    /// EA-003: reserve deductions excluded from gross, captured separately
    #[test]
    fn test_reserves_excluded_from_gross() {
        let emoluments = grade(&[
            (BASIC_SALARY, "1200000"),
            (LEAVE_ALLOWANCE, "100000"),
            (THIRTEENTH_MONTH, "100000"),
        ]);
        let totals = aggregate(&emoluments, &test_catalog()).unwrap();
        assert_eq!(totals.annual_gross, dec("1200000"));
        assert_eq!(totals.leave_allowance, dec("100000"));
        assert_eq!(totals.thirteenth_month, dec("100000"));
    }

    /// EA-004: unknown component codes fail rather than being skipped
    #[test]
    fn test_unknown_component_fails() {
        let emoluments = grade(&[(BASIC_SALARY, "1200000"), ("DANGER_MONEY", "50000")]);
        match aggregate(&emoluments, &test_catalog()) {
            Err(EngineError::UnknownComponent { code }) => assert_eq!(code, "DANGER_MONEY"),
            other => panic!("Expected UnknownComponent, got {:?}", other),
        }
    }

    /// EA-005: basic salary captured for the NHIS relief base
    #[test]
    fn test_basic_salary_captured() {
        let emoluments = grade(&[(BASIC_SALARY, "1200000"), ("HOUSING", "720000")]);
        let totals = aggregate(&emoluments, &test_catalog()).unwrap();
        assert_eq!(totals.basic_salary, dec("1200000"));
    }

    /// EA-006: snapshot records every component
    #[test]
    fn test_snapshot_records_all_components() {
        let emoluments = grade(&[
            (BASIC_SALARY, "1200000"),
            ("OTJ_TRANSPORT", "120000"),
            (LEAVE_ALLOWANCE, "100000"),
        ]);
        let totals = aggregate(&emoluments, &test_catalog()).unwrap();
        assert_eq!(totals.snapshot.len(), 3);
        assert_eq!(totals.snapshot.get("OTJ_TRANSPORT"), Some(&dec("120000")));
    }

    #[test]
    fn test_empty_grade_sums_to_zero() {
        let totals = aggregate(&BTreeMap::new(), &test_catalog()).unwrap();
        assert_eq!(totals.annual_gross, Decimal::ZERO);
        assert_eq!(totals.pensionable_amount, Decimal::ZERO);
        assert!(totals.snapshot.is_empty());
    }
}
