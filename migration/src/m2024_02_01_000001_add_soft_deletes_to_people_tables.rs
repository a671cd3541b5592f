//! Adds soft deletes to identity, institution and people profile tables.

use sea_orm_migration::prelude::*;

use crate::common::{add_soft_deletes, drop_soft_deletes};

const TABLES: &[&str] = &[
    "users",
    "roles",
    "permissions",
    "institutions",
    "campuses",
    "academic_years",
    "terms",
    "departments",
    "staff",
    "teachers",
    "students",
    "parents",
    "student_parents",
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
