//! Migration to create notification templates, notifications, per-user
//! channel preferences and the delivery log.

use sea_orm_migration::prelude::*;

use crate::common::{
    cascade, created_at, drop_tables, index, set_null, unique_index, updated_at, uuid_pk,
    uuid_ref, uuid_ref_null,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(NotificationTemplates::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, NotificationTemplates::Id))
                    .col(
                        ColumnDef::new(NotificationTemplates::Key)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(NotificationTemplates::Channel)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(NotificationTemplates::Subject).string().null())
                    .col(ColumnDef::new(NotificationTemplates::Body).text().not_null())
                    .col(
                        ColumnDef::new(NotificationTemplates::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Notifications::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, Notifications::Id))
                    .col(uuid_ref(Notifications::UserId))
                    .col(uuid_ref_null(Notifications::NotificationTemplateId))
                    .col(ColumnDef::new(Notifications::Type).string_len(100).not_null())
                    .col(ColumnDef::new(Notifications::Title).string().not_null())
                    .col(ColumnDef::new(Notifications::Body).text().null())
                    .col(ColumnDef::new(Notifications::Data).json_binary().null())
                    .col(
                        ColumnDef::new(Notifications::ReadAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_notifications_user_id",
                        Notifications::Table,
                        Notifications::UserId,
                        Users::Table,
                        Users::Id,
                    ))
                    .foreign_key(&mut set_null(
                        "fk_notifications_notification_template_id",
                        Notifications::Table,
                        Notifications::NotificationTemplateId,
                        NotificationTemplates::Table,
                        NotificationTemplates::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(NotificationPreferences::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, NotificationPreferences::Id))
                    .col(uuid_ref(NotificationPreferences::UserId))
                    .col(
                        ColumnDef::new(NotificationPreferences::Channel)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(NotificationPreferences::NotificationType)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(NotificationPreferences::Enabled)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_notification_preferences_user_id",
                        NotificationPreferences::Table,
                        NotificationPreferences::UserId,
                        Users::Table,
                        Users::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(unique_index(
                "idx_notification_preferences_unique",
                NotificationPreferences::Table,
                [
                    NotificationPreferences::UserId,
                    NotificationPreferences::Channel,
                    NotificationPreferences::NotificationType,
                ],
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(NotificationDeliveries::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, NotificationDeliveries::Id))
                    .col(uuid_ref(NotificationDeliveries::NotificationId))
                    .col(
                        ColumnDef::new(NotificationDeliveries::Channel)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(NotificationDeliveries::Status)
                            .string_len(16)
                            .not_null()
                            .default("queued"),
                    )
                    .col(
                        ColumnDef::new(NotificationDeliveries::Attempts)
                            .small_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(NotificationDeliveries::ProviderMessageId).string().null())
                    .col(ColumnDef::new(NotificationDeliveries::Error).text().null())
                    .col(
                        ColumnDef::new(NotificationDeliveries::DeliveredAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_notification_deliveries_notification_id",
                        NotificationDeliveries::Table,
                        NotificationDeliveries::NotificationId,
                        Notifications::Table,
                        Notifications::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(index(
                "idx_notification_deliveries_status",
                NotificationDeliveries::Table,
                [NotificationDeliveries::Status],
            ))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_tables(
            manager,
            &[
                "notification_deliveries",
                "notification_preferences",
                "notifications",
                "notification_templates",
            ],
        )
        .await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum NotificationTemplates {
    Table,
    Id,
    Key,
    Channel,
    Subject,
    Body,
    IsActive,
}

#[derive(DeriveIden)]
enum Notifications {
    Table,
    Id,
    UserId,
    NotificationTemplateId,
    Type,
    Title,
    Body,
    Data,
    ReadAt,
}

#[derive(DeriveIden)]
enum NotificationPreferences {
    Table,
    Id,
    UserId,
    Channel,
    NotificationType,
    Enabled,
}

#[derive(DeriveIden)]
enum NotificationDeliveries {
    Table,
    Id,
    NotificationId,
    Channel,
    Status,
    Attempts,
    ProviderMessageId,
    Error,
    DeliveredAt,
}
