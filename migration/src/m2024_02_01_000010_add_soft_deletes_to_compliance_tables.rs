//! Adds soft deletes to compliance and data protection tables.
//!
//! `audit_logs` is not listed here; audit history is never soft deleted.

use sea_orm_migration::prelude::*;

use crate::common::{add_soft_deletes, drop_soft_deletes};

const TABLES: &[&str] = &[
    "compliance_policies",
    "compliance_policy_acknowledgements",
    "compliance_checks",
    "compliance_incidents",
    "data_consents",
    "data_retention_policies",
    "data_export_requests",
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
