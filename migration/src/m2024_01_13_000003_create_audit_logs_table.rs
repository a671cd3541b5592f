//! Migration to create the `audit_logs` table.
//!
//! Audit rows are append-only: there is no `updated_at`, and the soft-delete
//! retrofits leave this table alone so audit history is never hidden. The acting
//! user is kept as a nullable reference so removing an account keeps its trail.

use sea_orm_migration::prelude::*;

use crate::common::{created_at, index, set_null, uuid_pk, uuid_ref_null};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AuditLogs::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, AuditLogs::Id))
                    .col(uuid_ref_null(AuditLogs::UserId))
                    .col(ColumnDef::new(AuditLogs::Event).string_len(64).not_null())
                    .col(ColumnDef::new(AuditLogs::AuditableType).string().not_null())
                    .col(ColumnDef::new(AuditLogs::AuditableId).uuid().null())
                    .col(ColumnDef::new(AuditLogs::OldValues).json().null())
                    .col(ColumnDef::new(AuditLogs::NewValues).json().null())
                    .col(ColumnDef::new(AuditLogs::IpAddress).string_len(45).null())
                    .col(ColumnDef::new(AuditLogs::UserAgent).text().null())
                    .col(ColumnDef::new(AuditLogs::Url).text().null())
                    .col(created_at())
                    .foreign_key(&mut set_null(
                        "fk_audit_logs_user_id",
                        AuditLogs::Table,
                        AuditLogs::UserId,
                        Users::Table,
                        Users::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(index(
                "idx_audit_logs_user_id",
                AuditLogs::Table,
                [AuditLogs::UserId],
            ))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AuditLogs::Table).if_exists().to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum AuditLogs {
    Table,
    Id,
    UserId,
    Event,
    AuditableType,
    AuditableId,
    OldValues,
    NewValues,
    IpAddress,
    UserAgent,
    Url,
}
