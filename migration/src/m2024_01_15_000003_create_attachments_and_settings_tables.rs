//! Migration to create polymorphic file attachments and the key/value settings table.

use sea_orm_migration::prelude::*;

use crate::common::{created_at, drop_tables, index, set_null, updated_at, uuid_pk, uuid_ref_null};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Attachments::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, Attachments::Id))
                    .col(ColumnDef::new(Attachments::AttachableType).string().not_null())
                    .col(ColumnDef::new(Attachments::AttachableId).uuid().not_null())
                    .col(uuid_ref_null(Attachments::UploadedBy))
                    .col(ColumnDef::new(Attachments::FileName).string().not_null())
                    .col(ColumnDef::new(Attachments::FilePath).string().not_null())
                    .col(ColumnDef::new(Attachments::MimeType).string_len(128).null())
                    .col(ColumnDef::new(Attachments::SizeBytes).big_integer().null())
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut set_null(
                        "fk_attachments_uploaded_by",
                        Attachments::Table,
                        Attachments::UploadedBy,
                        Users::Table,
                        Users::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(index(
                "idx_attachments_attachable",
                Attachments::Table,
                [Attachments::AttachableType, Attachments::AttachableId],
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Settings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Settings::Key)
                            .string_len(191)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Settings::Value).text().null())
                    .col(
                        ColumnDef::new(Settings::Group)
                            .string_len(64)
                            .not_null()
                            .default("general"),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_tables(manager, &["settings", "attachments"]).await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Attachments {
    Table,
    Id,
    AttachableType,
    AttachableId,
    UploadedBy,
    FileName,
    FilePath,
    MimeType,
    SizeBytes,
}

#[derive(DeriveIden)]
enum Settings {
    Table,
    Key,
    Value,
    Group,
}
