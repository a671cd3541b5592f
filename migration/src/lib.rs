//! Schema migrations for the campus platform.
//!
//! Migrations run in name order. Create migrations build one domain at a time
//! in foreign-key dependency order; the `add_soft_deletes_*` migrations then
//! retrofit `deleted_at` onto every domain table except
//! [`SOFT_DELETE_EXEMPT_TABLES`].

pub use sea_orm_migration::prelude::*;

pub mod common;

mod m2024_01_01_000001_create_users_table;
mod m2024_01_01_000002_create_permission_tables;
mod m2024_01_02_000001_create_institution_tables;
mod m2024_01_02_000002_create_people_tables;
mod m2024_01_03_000001_create_academic_tables;
mod m2024_01_03_000002_create_timetable_tables;
mod m2024_01_03_000003_create_attendance_tables;
mod m2024_01_04_000001_create_grading_tables;
mod m2024_01_05_000001_create_course_tables;
mod m2024_01_05_000002_create_assignment_tables;
mod m2024_01_05_000003_create_quiz_tables;
mod m2024_01_05_000004_create_forum_tables;
mod m2024_01_06_000001_create_library_tables;
mod m2024_01_06_000002_create_library_circulation_tables;
mod m2024_01_07_000001_create_transport_tables;
mod m2024_01_07_000002_create_transport_operation_tables;
mod m2024_01_08_000001_create_hostel_tables;
mod m2024_01_09_000001_create_health_tables;
mod m2024_01_10_000001_create_fee_tables;
mod m2024_01_10_000002_create_scholarship_tables;
mod m2024_01_10_000003_create_expense_tables;
mod m2024_01_11_000001_create_payroll_tables;
mod m2024_01_11_000002_create_leave_tables;
mod m2024_01_11_000003_create_staff_development_tables;
mod m2024_01_12_000001_create_notification_tables;
mod m2024_01_12_000002_create_messaging_tables;
mod m2024_01_13_000001_create_compliance_tables;
mod m2024_01_13_000002_create_data_protection_tables;
mod m2024_01_13_000003_create_audit_logs_table;
mod m2024_01_14_000001_create_calendar_tables;
mod m2024_01_14_000002_create_student_life_tables;
mod m2024_01_15_000001_create_admission_tables;
mod m2024_01_15_000002_create_asset_tables;
mod m2024_01_15_000003_create_attachments_and_settings_tables;
mod m2024_02_01_000001_add_soft_deletes_to_people_tables;
mod m2024_02_01_000002_add_soft_deletes_to_academic_tables;
mod m2024_02_01_000003_add_soft_deletes_to_learning_tables;
mod m2024_02_01_000004_add_soft_deletes_to_library_tables;
mod m2024_02_01_000005_add_soft_deletes_to_transport_and_hostel_tables;
mod m2024_02_01_000006_add_soft_deletes_to_health_tables;
mod m2024_02_01_000007_add_soft_deletes_to_finance_tables;
mod m2024_02_01_000008_add_soft_deletes_to_hr_tables;
mod m2024_02_01_000009_add_soft_deletes_to_communication_tables;
mod m2024_02_01_000010_add_soft_deletes_to_compliance_tables;
mod m2024_02_01_000011_add_soft_deletes_to_remaining_tables;
mod m2024_03_01_000001_add_reporting_indexes;
mod m2024_03_01_000002_add_locale_columns_to_users;

/// Tables that never receive a `deleted_at` column.
///
/// `audit_logs` must keep every row visible for compliance; the others are
/// credential or pivot bookkeeping where a row is either present or gone.
pub const SOFT_DELETE_EXEMPT_TABLES: &[&str] = &[
    "audit_logs",
    "model_has_permissions",
    "model_has_roles",
    "password_reset_tokens",
    "role_has_permissions",
    "settings",
];

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m2024_01_01_000001_create_users_table::Migration),
            Box::new(m2024_01_01_000002_create_permission_tables::Migration),
            Box::new(m2024_01_02_000001_create_institution_tables::Migration),
            Box::new(m2024_01_02_000002_create_people_tables::Migration),
            Box::new(m2024_01_03_000001_create_academic_tables::Migration),
            Box::new(m2024_01_03_000002_create_timetable_tables::Migration),
            Box::new(m2024_01_03_000003_create_attendance_tables::Migration),
            Box::new(m2024_01_04_000001_create_grading_tables::Migration),
            Box::new(m2024_01_05_000001_create_course_tables::Migration),
            Box::new(m2024_01_05_000002_create_assignment_tables::Migration),
            Box::new(m2024_01_05_000003_create_quiz_tables::Migration),
            Box::new(m2024_01_05_000004_create_forum_tables::Migration),
            Box::new(m2024_01_06_000001_create_library_tables::Migration),
            Box::new(m2024_01_06_000002_create_library_circulation_tables::Migration),
            Box::new(m2024_01_07_000001_create_transport_tables::Migration),
            Box::new(m2024_01_07_000002_create_transport_operation_tables::Migration),
            Box::new(m2024_01_08_000001_create_hostel_tables::Migration),
            Box::new(m2024_01_09_000001_create_health_tables::Migration),
            Box::new(m2024_01_10_000001_create_fee_tables::Migration),
            Box::new(m2024_01_10_000002_create_scholarship_tables::Migration),
            Box::new(m2024_01_10_000003_create_expense_tables::Migration),
            Box::new(m2024_01_11_000001_create_payroll_tables::Migration),
            Box::new(m2024_01_11_000002_create_leave_tables::Migration),
            Box::new(m2024_01_11_000003_create_staff_development_tables::Migration),
            Box::new(m2024_01_12_000001_create_notification_tables::Migration),
            Box::new(m2024_01_12_000002_create_messaging_tables::Migration),
            Box::new(m2024_01_13_000001_create_compliance_tables::Migration),
            Box::new(m2024_01_13_000002_create_data_protection_tables::Migration),
            Box::new(m2024_01_13_000003_create_audit_logs_table::Migration),
            Box::new(m2024_01_14_000001_create_calendar_tables::Migration),
            Box::new(m2024_01_14_000002_create_student_life_tables::Migration),
            Box::new(m2024_01_15_000001_create_admission_tables::Migration),
            Box::new(m2024_01_15_000002_create_asset_tables::Migration),
            Box::new(m2024_01_15_000003_create_attachments_and_settings_tables::Migration),
            Box::new(m2024_02_01_000001_add_soft_deletes_to_people_tables::Migration),
            Box::new(m2024_02_01_000002_add_soft_deletes_to_academic_tables::Migration),
            Box::new(m2024_02_01_000003_add_soft_deletes_to_learning_tables::Migration),
            Box::new(m2024_02_01_000004_add_soft_deletes_to_library_tables::Migration),
            Box::new(m2024_02_01_000005_add_soft_deletes_to_transport_and_hostel_tables::Migration),
            Box::new(m2024_02_01_000006_add_soft_deletes_to_health_tables::Migration),
            Box::new(m2024_02_01_000007_add_soft_deletes_to_finance_tables::Migration),
            Box::new(m2024_02_01_000008_add_soft_deletes_to_hr_tables::Migration),
            Box::new(m2024_02_01_000009_add_soft_deletes_to_communication_tables::Migration),
            Box::new(m2024_02_01_000010_add_soft_deletes_to_compliance_tables::Migration),
            Box::new(m2024_02_01_000011_add_soft_deletes_to_remaining_tables::Migration),
            Box::new(m2024_03_01_000001_add_reporting_indexes::Migration),
            Box::new(m2024_03_01_000002_add_locale_columns_to_users::Migration),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migration_names_are_unique_and_ordered() {
        let names: Vec<String> = Migrator::migrations()
            .iter()
            .map(|m| m.name().to_string())
            .collect();

        let mut sorted = names.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(names, sorted);
    }

    #[test]
    fn audit_logs_is_exempt_from_soft_deletes() {
        assert!(SOFT_DELETE_EXEMPT_TABLES.contains(&"audit_logs"));
    }
}
