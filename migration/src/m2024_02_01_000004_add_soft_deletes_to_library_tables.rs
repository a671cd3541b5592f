use sea_orm_migration::prelude::*;

use crate::common::{add_soft_deletes, drop_soft_deletes};

const TABLES: &[&str] = &[
    "library_categories",
    "books",
    "book_copies",
    "library_members",
    "book_loans",
    "book_reservations",
    "library_fines",
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
