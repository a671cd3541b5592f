//! Migration to create compliance policies, acknowledgements, checks and incidents.
//!
//! A user acknowledges a given policy version once.

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
                    .table(CompliancePolicies::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, CompliancePolicies::Id))
                    .col(uuid_ref(CompliancePolicies::InstitutionId))
                    .col(uuid_ref_null(CompliancePolicies::OwnerId))
                    .col(ColumnDef::new(CompliancePolicies::Title).string().not_null())
                    .col(ColumnDef::new(CompliancePolicies::Category).string_len(64).not_null())
                    .col(ColumnDef::new(CompliancePolicies::Body).text().not_null())
                    .col(
                        ColumnDef::new(CompliancePolicies::Version)
                            .string_len(16)
                            .not_null()
                            .default("1.0"),
                    )
                    .col(ColumnDef::new(CompliancePolicies::EffectiveOn).date().not_null())
                    .col(ColumnDef::new(CompliancePolicies::ReviewOn).date().null())
                    .col(
                        ColumnDef::new(CompliancePolicies::RequiresAcknowledgement)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_compliance_policies_institution_id",
                        CompliancePolicies::Table,
                        CompliancePolicies::InstitutionId,
                        Institutions::Table,
                        Institutions::Id,
                    ))
                    .foreign_key(&mut set_null(
                        "fk_compliance_policies_owner_id",
                        CompliancePolicies::Table,
                        CompliancePolicies::OwnerId,
                        Users::Table,
                        Users::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CompliancePolicyAcknowledgements::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, CompliancePolicyAcknowledgements::Id))
                    .col(uuid_ref(CompliancePolicyAcknowledgements::CompliancePolicyId))
                    .col(uuid_ref(CompliancePolicyAcknowledgements::UserId))
                    .col(
                        ColumnDef::new(CompliancePolicyAcknowledgements::PolicyVersion)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CompliancePolicyAcknowledgements::AcknowledgedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CompliancePolicyAcknowledgements::IpAddress)
                            .string_len(45)
                            .null(),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_compliance_policy_acknowledgements_policy_id",
                        CompliancePolicyAcknowledgements::Table,
                        CompliancePolicyAcknowledgements::CompliancePolicyId,
                        CompliancePolicies::Table,
                        CompliancePolicies::Id,
                    ))
                    .foreign_key(&mut cascade(
                        "fk_compliance_policy_acknowledgements_user_id",
                        CompliancePolicyAcknowledgements::Table,
                        CompliancePolicyAcknowledgements::UserId,
                        Users::Table,
                        Users::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(unique_index(
                "idx_compliance_policy_acknowledgements_unique",
                CompliancePolicyAcknowledgements::Table,
                [
                    CompliancePolicyAcknowledgements::CompliancePolicyId,
                    CompliancePolicyAcknowledgements::UserId,
                    CompliancePolicyAcknowledgements::PolicyVersion,
                ],
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ComplianceChecks::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, ComplianceChecks::Id))
                    .col(uuid_ref(ComplianceChecks::CompliancePolicyId))
                    .col(uuid_ref_null(ComplianceChecks::PerformedBy))
                    .col(ColumnDef::new(ComplianceChecks::CheckedOn).date().not_null())
                    .col(ColumnDef::new(ComplianceChecks::Outcome).string_len(16).not_null())
                    .col(ColumnDef::new(ComplianceChecks::Findings).text().null())
                    .col(ColumnDef::new(ComplianceChecks::NextCheckOn).date().null())
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_compliance_checks_compliance_policy_id",
                        ComplianceChecks::Table,
                        ComplianceChecks::CompliancePolicyId,
                        CompliancePolicies::Table,
                        CompliancePolicies::Id,
                    ))
                    .foreign_key(&mut set_null(
                        "fk_compliance_checks_performed_by",
                        ComplianceChecks::Table,
                        ComplianceChecks::PerformedBy,
                        Users::Table,
                        Users::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ComplianceIncidents::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, ComplianceIncidents::Id))
                    .col(uuid_ref(ComplianceIncidents::InstitutionId))
                    .col(uuid_ref_null(ComplianceIncidents::CompliancePolicyId))
                    .col(uuid_ref_null(ComplianceIncidents::ReportedBy))
                    .col(ColumnDef::new(ComplianceIncidents::Title).string().not_null())
                    .col(ColumnDef::new(ComplianceIncidents::Description).text().not_null())
                    .col(
                        ColumnDef::new(ComplianceIncidents::Severity)
                            .string_len(16)
                            .not_null()
                            .default("low"),
                    )
                    .col(
                        ColumnDef::new(ComplianceIncidents::Status)
                            .string_len(16)
                            .not_null()
                            .default("open"),
                    )
                    .col(
                        ColumnDef::new(ComplianceIncidents::OccurredAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ComplianceIncidents::ResolvedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_compliance_incidents_institution_id",
                        ComplianceIncidents::Table,
                        ComplianceIncidents::InstitutionId,
                        Institutions::Table,
                        Institutions::Id,
                    ))
                    .foreign_key(&mut set_null(
                        "fk_compliance_incidents_compliance_policy_id",
                        ComplianceIncidents::Table,
                        ComplianceIncidents::CompliancePolicyId,
                        CompliancePolicies::Table,
                        CompliancePolicies::Id,
                    ))
                    .foreign_key(&mut set_null(
                        "fk_compliance_incidents_reported_by",
                        ComplianceIncidents::Table,
                        ComplianceIncidents::ReportedBy,
                        Users::Table,
                        Users::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(index(
                "idx_compliance_incidents_status_severity",
                ComplianceIncidents::Table,
                [ComplianceIncidents::Status, ComplianceIncidents::Severity],
            ))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_tables(
            manager,
            &[
                "compliance_incidents",
                "compliance_checks",
                "compliance_policy_acknowledgements",
                "compliance_policies",
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
enum CompliancePolicies {
    Table,
    Id,
    InstitutionId,
    OwnerId,
    Title,
    Category,
    Body,
    Version,
    EffectiveOn,
    ReviewOn,
    RequiresAcknowledgement,
}

#[derive(DeriveIden)]
enum CompliancePolicyAcknowledgements {
    Table,
    Id,
    CompliancePolicyId,
    UserId,
    PolicyVersion,
    AcknowledgedAt,
    IpAddress,
}

#[derive(DeriveIden)]
enum ComplianceChecks {
    Table,
    Id,
    CompliancePolicyId,
    PerformedBy,
    CheckedOn,
    Outcome,
    Findings,
    NextCheckOn,
}

#[derive(DeriveIden)]
enum ComplianceIncidents {
    Table,
    Id,
    InstitutionId,
    CompliancePolicyId,
    ReportedBy,
    Title,
    Description,
    Severity,
    Status,
    OccurredAt,
    ResolvedAt,
}
