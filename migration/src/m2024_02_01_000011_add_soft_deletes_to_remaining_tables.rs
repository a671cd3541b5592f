//! Adds soft deletes to calendar, student life, admission, asset and attachment tables.

use sea_orm_migration::prelude::*;

use crate::common::{add_soft_deletes, drop_soft_deletes};

const TABLES: &[&str] = &[
    "events",
    "event_participants",
    "holidays",
    "clubs",
    "club_memberships",
    "disciplinary_incidents",
    "admission_applications",
    "admission_documents",
    "asset_categories",
    "assets",
    "asset_assignments",
    "attachments",
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
