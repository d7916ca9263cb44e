//! Core data models for the payroll calculation engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod component;
mod pay_grade;
mod payroll_item;
mod payroll_run;
mod staff;

pub use attendance::{
    AttendanceRecord, CalculationMethod, calendar_days_in_month, expected_days,
    working_days_in_month,
};
pub use component::{
    BASIC_SALARY, ComponentCatalog, EmolumentComponent, LEAVE_ALLOWANCE, PayrollCategory,
    THIRTEENTH_MONTH,
};
pub use pay_grade::PayGradeStructure;
pub use payroll_item::PayrollItem;
pub use payroll_run::{PayrollRun, RunStatus, RunTotals};
pub use staff::{BankDetails, Staff};
