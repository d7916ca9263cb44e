//! Per-staff payroll item calculation.
//!
//! This module orchestrates the aggregator, proration engine, and tax
//! resolver into one staff member's full calculation breakdown, producing
//! the immutable [`PayrollItem`] snapshot.

use rust_decimal::{Decimal, RoundingStrategy};
use uuid::Uuid;

use crate::config::SettingsSnapshot;
use crate::error::EngineResult;
use crate::models::{AttendanceRecord, ComponentCatalog, PayGradeStructure, PayrollItem, Staff};

use super::emoluments::aggregate;
use super::proration::attendance_factor;
use super::tax::compute_progressive_tax;

/// Rounds a monetary amount to kobo (two decimal places).
fn naira(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Calculates one staff member's payroll item.
///
/// The calculation is deterministic for identical inputs: the settings
/// snapshot fixes every rate and the bracket schedule, the pay grade map is
/// ordered, and no wall-clock value participates. Calculating the same
/// staff member twice against unchanged inputs yields identical field
/// values, which is what makes re-runs auditable.
///
/// Monthly entitlement (`monthly_gross`, `monthly_reimbursables`) is the
/// annual amount over the division factor, deliberately unprorated; the
/// attendance factor applies only to the payment amounts. PAYE is computed
/// on full annual taxable capacity and divided by the division factor
/// without proration, while the pension, leave allowance, and 13th-month
/// deductions are prorated, matching the statutory model the settings
/// encode.
///
/// Fails with the underlying typed error when a component is unknown, the
/// attendance record has zero expected days, or no bracket schedule covers
/// the calculation date. The caller records the failure against this staff
/// member and continues with the rest of the run.
pub fn calculate_item(
    staff: &Staff,
    pay_grade: &PayGradeStructure,
    attendance: &AttendanceRecord,
    settings: &SettingsSnapshot,
    catalog: &ComponentCatalog,
    run_id: Uuid,
) -> EngineResult<PayrollItem> {
    let hundred = Decimal::ONE_HUNDRED;
    let divisor = settings.annual_division_factor;

    // Step 1: classify the grade's emoluments.
    let totals = aggregate(&pay_grade.emoluments, catalog)?;

    // Steps 2-3: full monthly entitlement, unprorated.
    let monthly_gross = naira(totals.annual_gross / divisor);
    let monthly_reimbursables = naira(totals.annual_reimbursables / divisor);

    // Step 4: bounded attendance factor.
    let factor = attendance_factor(attendance, settings.min_attendance_factor)?;

    // Step 5: actual payment amounts.
    let prorated_monthly_gross = naira(monthly_gross * factor);
    let prorated_monthly_reimbursables = naira(monthly_reimbursables * factor);

    // Step 6: reliefs. These reduce taxable income only; NHIS in particular
    // is never deducted from pay.
    let pension_relief = totals.pensionable_amount * settings.pension_rate / hundred;
    let nhis_relief = totals.basic_salary * settings.nhis_rate / hundred;
    let (rent_rate, rent_cap) = settings.rent_relief;
    let rent_relief = (staff.annual_rent_paid * rent_rate / hundred).min(rent_cap);

    // Step 7: annual taxable income, floored at zero.
    let taxable_income =
        (totals.annual_gross - pension_relief - nhis_relief - rent_relief).max(Decimal::ZERO);

    // Step 8: annual PAYE; the monthly deduction divides but is not
    // prorated, since PAYE follows annual taxable capacity, not attendance.
    let annual_paye_tax = compute_progressive_tax(taxable_income, settings.as_of, &settings.brackets)?;
    let monthly_paye_tax = naira(annual_paye_tax / divisor);

    // Steps 9-10: prorated monthly deductions.
    let pension_deduction =
        naira(totals.pensionable_amount * settings.pension_rate / hundred / divisor * factor);
    let leave_allowance_deduction = naira(totals.leave_allowance / divisor * factor);
    let thirteenth_month_deduction = naira(totals.thirteenth_month / divisor * factor);
    let other_deductions = Decimal::ZERO;

    // Steps 11-13: totals computed from the rounded monthly amounts so the
    // stored fields satisfy their identities exactly.
    let total_deductions = monthly_paye_tax
        + pension_deduction
        + leave_allowance_deduction
        + thirteenth_month_deduction
        + other_deductions;
    let net_pay = prorated_monthly_gross - total_deductions;
    let credit_to_bank = net_pay + prorated_monthly_reimbursables;

    Ok(PayrollItem {
        run_id,
        staff_id: staff.id.clone(),
        client_id: staff.client_id.clone(),
        pay_grade_id: pay_grade.id.clone(),

        staff_name: staff.full_name(),
        staff_code: staff.employee_code.clone(),
        bank_name: staff.bank_details.as_ref().map(|b| b.bank_name.clone()),
        account_number: staff
            .bank_details
            .as_ref()
            .map(|b| b.account_number.clone()),
        pfa_code: staff.pfa_code.clone(),

        days_present: attendance.actual_working_days,
        days_absent: attendance
            .total_expected_days
            .saturating_sub(attendance.actual_working_days),
        total_days: attendance.total_expected_days,
        proration_factor: factor.round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero),

        annual_gross_salary: totals.annual_gross,
        annual_reimbursables: totals.annual_reimbursables,
        pensionable_amount: totals.pensionable_amount,

        monthly_gross,
        monthly_reimbursables,
        prorated_monthly_gross,
        prorated_monthly_reimbursables,

        pension_relief: naira(pension_relief),
        nhis_relief: naira(nhis_relief),
        rent_relief: naira(rent_relief),
        taxable_income: naira(taxable_income),
        annual_paye_tax: naira(annual_paye_tax),
        monthly_paye_tax,

        pension_deduction,
        leave_allowance_deduction,
        thirteenth_month_deduction,
        other_deductions,
        total_deductions,

        net_pay,
        credit_to_bank,

        emoluments_snapshot: totals.snapshot,
        calculation_date: settings.as_of,
        superseded: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TaxBracket;
    use crate::error::EngineError;
    use crate::models::{
        AttendanceRecord, BASIC_SALARY, BankDetails, CalculationMethod, EmolumentComponent,
        LEAVE_ALLOWANCE, PayrollCategory, THIRTEENTH_MONTH,
    };
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::from_str(s).unwrap()
    }

    fn bracket(tier: u32, from: &str, to: Option<&str>, rate: &str) -> TaxBracket {
        TaxBracket {
            tier_number: tier,
            income_from: dec(from),
            income_to: to.map(dec),
            tax_rate: dec(rate),
            effective_from: date("2025-01-01"),
            effective_to: None,
        }
    }

    fn test_snapshot() -> SettingsSnapshot {
        SettingsSnapshot {
            pension_rate: dec("8.0"),
            nhis_rate: dec("5.0"),
            rent_relief: (dec("20.0"), dec("500000")),
            annual_division_factor: dec("12"),
            min_attendance_factor: Decimal::ZERO,
            brackets: vec![
                bracket(1, "0", Some("800000"), "0"),
                bracket(2, "800000", Some("3000000"), "15"),
                bracket(3, "3000000", Some("12000000"), "18"),
                bracket(4, "12000000", Some("25000000"), "21"),
                bracket(5, "25000000", Some("50000000"), "23"),
                bracket(6, "50000000", None, "25"),
            ],
            as_of: date("2025-08-01"),
        }
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
        ])
    }

    fn test_staff() -> Staff {
        Staff {
            id: "stf_001".to_string(),
            first_name: "Adaeze".to_string(),
            last_name: "Okafor".to_string(),
            employee_code: "EMP-001".to_string(),
            pfa_code: Some("PFA023".to_string()),
            bank_details: Some(BankDetails {
                bank_name: "First Bank".to_string(),
                account_number: "0123456789".to_string(),
            }),
            annual_rent_paid: Decimal::ZERO,
            client_id: "client_01".to_string(),
            pay_grade_id: "pg_01".to_string(),
        }
    }

    fn grade(entries: &[(&str, &str)]) -> PayGradeStructure {
        PayGradeStructure {
            id: "pg_01".to_string(),
            job_structure_id: "js_01".to_string(),
            emoluments: entries
                .iter()
                .map(|(code, amount)| (code.to_string(), dec(amount)))
                .collect(),
        }
    }

    fn attendance(actual: u32, total: u32) -> AttendanceRecord {
        AttendanceRecord {
            staff_id: "stf_001".to_string(),
            actual_working_days: actual,
            total_expected_days: total,
            calculation_method: CalculationMethod::CalendarDays,
        }
    }

    /// IC-001: the full worked scenario at 100% attendance
    #[test]
    fn test_full_attendance_scenario() {
        let grade = grade(&[
            (BASIC_SALARY, "1200000"),
            ("HOUSING", "720000"),
            ("TRANSPORT", "480000"),
        ]);
        let item = calculate_item(
            &test_staff(),
            &grade,
            &attendance(31, 31),
            &test_snapshot(),
            &test_catalog(),
            Uuid::nil(),
        )
        .unwrap();

        assert_eq!(item.annual_gross_salary, dec("2400000"));
        assert_eq!(item.pensionable_amount, dec("2400000"));
        assert_eq!(item.pension_relief, dec("192000.00"));
        assert_eq!(item.nhis_relief, dec("60000.00"));
        assert_eq!(item.rent_relief, dec("0.00"));
        assert_eq!(item.taxable_income, dec("2148000.00"));
        assert_eq!(item.annual_paye_tax, dec("202200.00"));
        assert_eq!(item.monthly_paye_tax, dec("16850.00"));
        assert_eq!(item.monthly_gross, dec("200000.00"));
        assert_eq!(item.prorated_monthly_gross, dec("200000.00"));
        assert_eq!(item.pension_deduction, dec("16000.00"));
        assert_eq!(item.total_deductions, dec("32850.00"));
        assert_eq!(item.net_pay, dec("167150.00"));
        assert_eq!(item.credit_to_bank, dec("167150.00"));
    }

    /// IC-002: entitlement stays full while payment prorates
    #[test]
    fn test_entitlement_vs_payment_separation() {
        let grade = grade(&[(BASIC_SALARY, "1200000")]);
        let item = calculate_item(
            &test_staff(),
            &grade,
            &attendance(20, 30),
            &test_snapshot(),
            &test_catalog(),
            Uuid::nil(),
        )
        .unwrap();

        assert_eq!(item.monthly_gross, dec("100000.00"));
        assert_eq!(item.prorated_monthly_gross, dec("66666.67"));
        assert_eq!(item.proration_factor, dec("0.6667"));
    }

    /// IC-003: PAYE divides but does not prorate
    #[test]
    fn test_paye_not_prorated() {
        let grade = grade(&[
            (BASIC_SALARY, "1200000"),
            ("HOUSING", "720000"),
            ("TRANSPORT", "480000"),
        ]);
        let full = calculate_item(
            &test_staff(),
            &grade,
            &attendance(31, 31),
            &test_snapshot(),
            &test_catalog(),
            Uuid::nil(),
        )
        .unwrap();
        let half = calculate_item(
            &test_staff(),
            &grade,
            &attendance(15, 30),
            &test_snapshot(),
            &test_catalog(),
            Uuid::nil(),
        )
        .unwrap();

        assert_eq!(full.monthly_paye_tax, half.monthly_paye_tax);
        // The pension deduction, by contrast, is prorated.
        assert_eq!(half.pension_deduction, dec("8000.00"));
        assert_eq!(full.pension_deduction, dec("16000.00"));
    }

    /// IC-004: credit to bank adds prorated reimbursables to net pay
    #[test]
    fn test_credit_to_bank_identity() {
        let grade = grade(&[(BASIC_SALARY, "1200000"), ("OTJ_TRANSPORT", "120000")]);
        let item = calculate_item(
            &test_staff(),
            &grade,
            &attendance(20, 30),
            &test_snapshot(),
            &test_catalog(),
            Uuid::nil(),
        )
        .unwrap();

        assert_eq!(item.monthly_reimbursables, dec("10000.00"));
        assert_eq!(item.prorated_monthly_reimbursables, dec("6666.67"));
        assert_eq!(
            item.credit_to_bank,
            item.net_pay + item.prorated_monthly_reimbursables
        );
    }

    /// IC-005: reserve components deduct monthly, prorated
    #[test]
    fn test_reserve_deductions() {
        let grade = grade(&[
            (BASIC_SALARY, "1200000"),
            (LEAVE_ALLOWANCE, "120000"),
            (THIRTEENTH_MONTH, "60000"),
        ]);
        let item = calculate_item(
            &test_staff(),
            &grade,
            &attendance(15, 30),
            &test_snapshot(),
            &test_catalog(),
            Uuid::nil(),
        )
        .unwrap();

        assert_eq!(item.leave_allowance_deduction, dec("5000.00"));
        assert_eq!(item.thirteenth_month_deduction, dec("2500.00"));
        // Reserves never inflate gross.
        assert_eq!(item.annual_gross_salary, dec("1200000"));
    }

    /// IC-006: rent relief is capped
    #[test]
    fn test_rent_relief_cap() {
        let mut staff = test_staff();
        staff.annual_rent_paid = dec("4000000");
        let grade = grade(&[(BASIC_SALARY, "6000000")]);
        let item = calculate_item(
            &staff,
            &grade,
            &attendance(31, 31),
            &test_snapshot(),
            &test_catalog(),
            Uuid::nil(),
        )
        .unwrap();

        // 20% of 4,000,000 is 800,000, capped at 500,000.
        assert_eq!(item.rent_relief, dec("500000.00"));
    }

    /// IC-007: identical inputs produce identical items
    #[test]
    fn test_idempotent_recalculation() {
        let grade = grade(&[
            (BASIC_SALARY, "1200000"),
            ("HOUSING", "720000"),
            ("OTJ_TRANSPORT", "120000"),
        ]);
        let first = calculate_item(
            &test_staff(),
            &grade,
            &attendance(22, 31),
            &test_snapshot(),
            &test_catalog(),
            Uuid::nil(),
        )
        .unwrap();
        let second = calculate_item(
            &test_staff(),
            &grade,
            &attendance(22, 31),
            &test_snapshot(),
            &test_catalog(),
            Uuid::nil(),
        )
        .unwrap();

        assert_eq!(first, second);
    }

    /// IC-008: staff details are copied onto the item
    #[test]
    fn test_staff_snapshot_copied() {
        let grade = grade(&[(BASIC_SALARY, "1200000")]);
        let item = calculate_item(
            &test_staff(),
            &grade,
            &attendance(31, 31),
            &test_snapshot(),
            &test_catalog(),
            Uuid::nil(),
        )
        .unwrap();

        assert_eq!(item.staff_name, "Adaeze Okafor");
        assert_eq!(item.staff_code, "EMP-001");
        assert_eq!(item.bank_name.as_deref(), Some("First Bank"));
        assert_eq!(item.account_number.as_deref(), Some("0123456789"));
        assert_eq!(item.pfa_code.as_deref(), Some("PFA023"));
        assert_eq!(
            item.emoluments_snapshot.get(BASIC_SALARY),
            Some(&dec("1200000"))
        );
    }

    /// IC-009: unknown component blocks the item with a typed error
    #[test]
    fn test_unknown_component_propagates() {
        let grade = grade(&[("DANGER_MONEY", "50000")]);
        let result = calculate_item(
            &test_staff(),
            &grade,
            &attendance(31, 31),
            &test_snapshot(),
            &test_catalog(),
            Uuid::nil(),
        );
        assert!(matches!(
            result,
            Err(EngineError::UnknownComponent { .. })
        ));
    }

    /// IC-010: taxable income floors at zero
    #[test]
    fn test_taxable_income_floor() {
        let mut staff = test_staff();
        staff.annual_rent_paid = dec("2000000");
        // Small gross, large reliefs.
        let grade = grade(&[(BASIC_SALARY, "400000")]);
        let item = calculate_item(
            &staff,
            &grade,
            &attendance(31, 31),
            &test_snapshot(),
            &test_catalog(),
            Uuid::nil(),
        )
        .unwrap();

        assert_eq!(item.taxable_income, dec("0.00"));
        assert_eq!(item.annual_paye_tax, dec("0.00"));
    }
}
