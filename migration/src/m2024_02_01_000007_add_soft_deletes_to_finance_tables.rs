//! Adds soft deletes to fee, scholarship, expense and payroll tables.

use sea_orm_migration::prelude::*;

use crate::common::{add_soft_deletes, drop_soft_deletes};

const TABLES: &[&str] = &[
    "fee_categories",
    "fee_structures",
    "fee_invoices",
    "fee_invoice_items",
    "fee_payments",
    "scholarships",
    "student_scholarships",
    "expense_categories",
    "expenses",
    "budgets",
    "payroll_runs",
    "payslips",
];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        add_soft_deletes(manager, TABLES).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_soft_deletes(manager, TABLES).await
    }
}
