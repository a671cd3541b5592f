//! Migration to create consent records, retention policies and data export requests.

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
                    .table(DataConsents::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, DataConsents::Id))
                    .col(uuid_ref(DataConsents::UserId))
                    .col(ColumnDef::new(DataConsents::Purpose).string_len(100).not_null())
                    .col(ColumnDef::new(DataConsents::Granted).boolean().not_null())
                    .col(
                        ColumnDef::new(DataConsents::GrantedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(DataConsents::WithdrawnAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(DataConsents::Source).string_len(32).null())
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_data_consents_user_id",
                        DataConsents::Table,
                        DataConsents::UserId,
                        Users::Table,
                        Users::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(unique_index(
                "idx_data_consents_user_purpose",
                DataConsents::Table,
                [DataConsents::UserId, DataConsents::Purpose],
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DataRetentionPolicies::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, DataRetentionPolicies::Id))
                    .col(uuid_ref(DataRetentionPolicies::InstitutionId))
                    .col(
                        ColumnDef::new(DataRetentionPolicies::DataCategory)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DataRetentionPolicies::RetentionDays)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DataRetentionPolicies::Action)
                            .string_len(16)
                            .not_null()
                            .default("anonymize"),
                    )
                    .col(ColumnDef::new(DataRetentionPolicies::LegalBasis).text().null())
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_data_retention_policies_institution_id",
                        DataRetentionPolicies::Table,
                        DataRetentionPolicies::InstitutionId,
                        Institutions::Table,
                        Institutions::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(unique_index(
                "idx_data_retention_policies_category",
                DataRetentionPolicies::Table,
                [
                    DataRetentionPolicies::InstitutionId,
                    DataRetentionPolicies::DataCategory,
                ],
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DataExportRequests::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, DataExportRequests::Id))
                    .col(uuid_ref(DataExportRequests::UserId))
                    .col(uuid_ref_null(DataExportRequests::ProcessedBy))
                    .col(
                        ColumnDef::new(DataExportRequests::RequestType)
                            .string_len(16)
                            .not_null()
                            .default("export"),
                    )
                    .col(
                        ColumnDef::new(DataExportRequests::Status)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(DataExportRequests::FilePath).string().null())
                    .col(
                        ColumnDef::new(DataExportRequests::CompletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(DataExportRequests::ExpiresAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_data_export_requests_user_id",
                        DataExportRequests::Table,
                        DataExportRequests::UserId,
                        Users::Table,
                        Users::Id,
                    ))
                    .foreign_key(&mut set_null(
                        "fk_data_export_requests_processed_by",
                        DataExportRequests::Table,
                        DataExportRequests::ProcessedBy,
                        Users::Table,
                        Users::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(index(
                "idx_data_export_requests_status",
                DataExportRequests::Table,
                [DataExportRequests::Status],
            ))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_tables(
            manager,
            &[
                "data_export_requests",
                "data_retention_policies",
                "data_consents",
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
enum Institutions {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum DataConsents {
    Table,
    Id,
    UserId,
    Purpose,
    Granted,
    GrantedAt,
    WithdrawnAt,
    Source,
}

#[derive(DeriveIden)]
enum DataRetentionPolicies {
    Table,
    Id,
    InstitutionId,
    DataCategory,
    RetentionDays,
    Action,
    LegalBasis,
}

#[derive(DeriveIden)]
enum DataExportRequests {
    Table,
    Id,
    UserId,
    ProcessedBy,
    RequestType,
    Status,
    FilePath,
    CompletedAt,
    ExpiresAt,
}
