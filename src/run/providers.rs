//! Collaborator interfaces for staff and attendance data.
//!
//! The engine does not own staff records or attendance capture; it consumes
//! them through these traits. Production deployments implement them against
//! the staff/grade service and the attendance subsystem; the in-memory
//! implementations back tests and demos.

use std::collections::HashMap;

use crate::models::{AttendanceRecord, PayGradeStructure, Staff};

/// Source of staff records and their active pay grades.
pub trait StaffDirectory: Send + Sync {
    /// Returns the active staff assigned to a client.
    fn staff_for_client(&self, client_id: &str) -> Vec<Staff>;

    /// Returns the staff member's active pay grade structure, if any.
    fn active_pay_grade(&self, staff_id: &str) -> Option<PayGradeStructure>;
}

/// Source of per-period attendance records.
pub trait AttendanceSource: Send + Sync {
    /// Returns the attendance record for a staff member in a period, if
    /// one was captured.
    fn attendance_record(&self, staff_id: &str, month: u32, year: i32)
    -> Option<AttendanceRecord>;
}

/// In-memory staff directory.
#[derive(Debug, Default)]
pub struct InMemoryStaffDirectory {
    staff: Vec<Staff>,
    grades: HashMap<String, PayGradeStructure>,
}

impl InMemoryStaffDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a staff member, optionally with an active pay grade.
    pub fn add_member(&mut self, staff: Staff, grade: Option<PayGradeStructure>) {
        if let Some(grade) = grade {
            self.grades.insert(staff.id.clone(), grade);
        }
        self.staff.push(staff);
    }
}

impl StaffDirectory for InMemoryStaffDirectory {
    fn staff_for_client(&self, client_id: &str) -> Vec<Staff> {
        self.staff
            .iter()
            .filter(|s| s.client_id == client_id)
            .cloned()
            .collect()
    }

    fn active_pay_grade(&self, staff_id: &str) -> Option<PayGradeStructure> {
        self.grades.get(staff_id).cloned()
    }
}

/// In-memory attendance source keyed by staff and period.
#[derive(Debug, Default)]
pub struct InMemoryAttendanceSource {
    records: HashMap<(String, u32, i32), AttendanceRecord>,
}

impl InMemoryAttendanceSource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an attendance record for a period.
    pub fn add_record(&mut self, month: u32, year: i32, record: AttendanceRecord) {
        self.records
            .insert((record.staff_id.clone(), month, year), record);
    }
}

impl AttendanceSource for InMemoryAttendanceSource {
    fn attendance_record(
        &self,
        staff_id: &str,
        month: u32,
        year: i32,
    ) -> Option<AttendanceRecord> {
        self.records
            .get(&(staff_id.to_string(), month, year))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CalculationMethod;
    use rust_decimal::Decimal;
    use std::collections::BTreeMap;

    fn staff(id: &str, client: &str) -> Staff {
        Staff {
            id: id.to_string(),
            first_name: "Test".to_string(),
            last_name: "Staff".to_string(),
            employee_code: format!("EMP-{id}"),
            pfa_code: None,
            bank_details: None,
            annual_rent_paid: Decimal::ZERO,
            client_id: client.to_string(),
            pay_grade_id: "pg_01".to_string(),
        }
    }

    fn grade() -> PayGradeStructure {
        PayGradeStructure {
            id: "pg_01".to_string(),
            job_structure_id: "js_01".to_string(),
            emoluments: BTreeMap::new(),
        }
    }

    #[test]
    fn test_staff_filtered_by_client() {
        let mut directory = InMemoryStaffDirectory::new();
        directory.add_member(staff("stf_001", "client_01"), Some(grade()));
        directory.add_member(staff("stf_002", "client_02"), Some(grade()));

        let members = directory.staff_for_client("client_01");
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].id, "stf_001");
    }

    #[test]
    fn test_missing_pay_grade_is_none() {
        let mut directory = InMemoryStaffDirectory::new();
        directory.add_member(staff("stf_001", "client_01"), None);
        assert!(directory.active_pay_grade("stf_001").is_none());
    }

    #[test]
    fn test_attendance_keyed_by_period() {
        let mut source = InMemoryAttendanceSource::new();
        source.add_record(
            8,
            2025,
            AttendanceRecord {
                staff_id: "stf_001".to_string(),
                actual_working_days: 20,
                total_expected_days: 31,
                calculation_method: CalculationMethod::CalendarDays,
            },
        );

        assert!(source.attendance_record("stf_001", 8, 2025).is_some());
        assert!(source.attendance_record("stf_001", 9, 2025).is_none());
        assert!(source.attendance_record("stf_002", 8, 2025).is_none());
    }
}
