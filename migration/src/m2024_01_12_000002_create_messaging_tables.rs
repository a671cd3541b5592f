//! Migration to create announcements, direct messages and push device tokens.

use sea_orm_migration::prelude::*;

use crate::common::{
    cascade, created_at, drop_tables, index, set_null, updated_at, uuid_pk, uuid_ref,
    uuid_ref_null,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Announcements::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, Announcements::Id))
                    .col(uuid_ref(Announcements::InstitutionId))
                    .col(uuid_ref_null(Announcements::AuthorId))
                    .col(ColumnDef::new(Announcements::Title).string().not_null())
                    .col(ColumnDef::new(Announcements::Body).text().not_null())
                    .col(
                        ColumnDef::new(Announcements::Audience)
                            .string_len(32)
                            .not_null()
                            .default("all"),
                    )
                    .col(
                        ColumnDef::new(Announcements::PublishedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Announcements::ExpiresAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_announcements_institution_id",
                        Announcements::Table,
                        Announcements::InstitutionId,
                        Institutions::Table,
                        Institutions::Id,
                    ))
                    .foreign_key(&mut set_null(
                        "fk_announcements_author_id",
                        Announcements::Table,
                        Announcements::AuthorId,
                        Users::Table,
                        Users::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Messages::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, Messages::Id))
                    .col(uuid_ref(Messages::SenderId))
                    .col(uuid_ref(Messages::RecipientId))
                    .col(uuid_ref_null(Messages::ReplyToId))
                    .col(ColumnDef::new(Messages::Subject).string().null())
                    .col(ColumnDef::new(Messages::Body).text().not_null())
                    .col(
                        ColumnDef::new(Messages::ReadAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_messages_sender_id",
                        Messages::Table,
                        Messages::SenderId,
                        Users::Table,
                        Users::Id,
                    ))
                    .foreign_key(&mut cascade(
                        "fk_messages_recipient_id",
                        Messages::Table,
                        Messages::RecipientId,
                        Users::Table,
                        Users::Id,
                    ))
                    .foreign_key(&mut set_null(
                        "fk_messages_reply_to_id",
                        Messages::Table,
                        Messages::ReplyToId,
                        Messages::Table,
                        Messages::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        // Inbox listing.
        manager
            .create_index(index(
                "idx_messages_recipient_read",
                Messages::Table,
                [Messages::RecipientId, Messages::ReadAt],
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DeviceTokens::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, DeviceTokens::Id))
                    .col(uuid_ref(DeviceTokens::UserId))
                    .col(
                        ColumnDef::new(DeviceTokens::Token)
                            .string_len(512)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(DeviceTokens::Platform).string_len(16).not_null())
                    .col(
                        ColumnDef::new(DeviceTokens::LastUsedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_device_tokens_user_id",
                        DeviceTokens::Table,
                        DeviceTokens::UserId,
                        Users::Table,
                        Users::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_tables(manager, &["device_tokens", "messages", "announcements"]).await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Institutions {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Announcements {
    Table,
    Id,
    InstitutionId,
    AuthorId,
    Title,
    Body,
    Audience,
    PublishedAt,
    ExpiresAt,
}

#[derive(DeriveIden)]
enum Messages {
    Table,
    Id,
    SenderId,
    RecipientId,
    ReplyToId,
    Subject,
    Body,
    ReadAt,
}

#[derive(DeriveIden)]
enum DeviceTokens {
    Table,
    Id,
    UserId,
    Token,
    Platform,
    LastUsedAt,
}
