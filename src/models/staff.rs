//! Staff and bank detail models.
//!
//! The engine consumes staff records from the staff directory collaborator
//! and copies the fields it needs onto each payroll item at calculation
//! time, so later edits to a staff record never alter a finalized item.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Bank account details for salary payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankDetails {
    /// Name of the bank.
    pub bank_name: String,
    /// Account number for salary credits.
    pub account_number: String,
}

/// A staff member as seen by the payroll engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Staff {
    /// Unique identifier for the staff member.
    pub id: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Employee code used on payslips and exports.
    pub employee_code: String,
    /// Pension fund administrator code, when registered.
    #[serde(default)]
    pub pfa_code: Option<String>,
    /// Bank details, when captured.
    #[serde(default)]
    pub bank_details: Option<BankDetails>,
    /// Annual rent declared for rent relief; zero when none declared.
    #[serde(default)]
    pub annual_rent_paid: Decimal,
    /// The client this staff member is assigned to.
    pub client_id: String,
    /// The staff member's active pay grade.
    pub pay_grade_id: String,
}

impl Staff {
    /// Returns the staff member's display name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_joins_parts() {
        let staff = Staff {
            id: "stf_001".to_string(),
            first_name: "Adaeze".to_string(),
            last_name: "Okafor".to_string(),
            employee_code: "EMP-001".to_string(),
            pfa_code: Some("PFA023".to_string()),
            bank_details: None,
            annual_rent_paid: Decimal::ZERO,
            client_id: "client_01".to_string(),
            pay_grade_id: "pg_01".to_string(),
        };
        assert_eq!(staff.full_name(), "Adaeze Okafor");
    }

    #[test]
    fn test_deserialize_staff_defaults() {
        let json = r#"{
            "id": "stf_002",
            "first_name": "Bola",
            "last_name": "Adewale",
            "employee_code": "EMP-002",
            "client_id": "client_01",
            "pay_grade_id": "pg_01"
        }"#;
        let staff: Staff = serde_json::from_str(json).unwrap();
        assert_eq!(staff.annual_rent_paid, Decimal::ZERO);
        assert!(staff.pfa_code.is_none());
        assert!(staff.bank_details.is_none());
    }
}
