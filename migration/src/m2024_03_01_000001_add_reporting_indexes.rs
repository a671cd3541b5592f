//! Migration adding indexes used by attendance, inbox and audit reports.

use sea_orm_migration::prelude::*;

use crate::common::index;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(index(
                "idx_attendances_attended_on_status",
                Attendances::Table,
                [Attendances::AttendedOn, Attendances::Status],
            ))
            .await?;

        manager
            .create_index(index(
                "idx_notifications_user_read",
                Notifications::Table,
                [Notifications::UserId, Notifications::ReadAt],
            ))
            .await?;

        manager
            .create_index(index(
                "idx_audit_logs_auditable",
                AuditLogs::Table,
                [AuditLogs::AuditableType, AuditLogs::AuditableId],
            ))
            .await?;

        manager
            .create_index(index(
                "idx_audit_logs_created_at",
                AuditLogs::Table,
                [AuditLogs::CreatedAt],
            ))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, table) in [
            ("idx_audit_logs_created_at", "audit_logs"),
            ("idx_audit_logs_auditable", "audit_logs"),
            ("idx_notifications_user_read", "notifications"),
            ("idx_attendances_attended_on_status", "attendances"),
        ] {
            manager
                .drop_index(Index::drop().name(name).table(Alias::new(table)).to_owned())
                .await?;
        }

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Attendances {
    Table,
    AttendedOn,
    Status,
}

#[derive(DeriveIden)]
enum Notifications {
    Table,
    UserId,
    ReadAt,
}

#[derive(DeriveIden)]
enum AuditLogs {
    Table,
    AuditableType,
    AuditableId,
    CreatedAt,
}
