//! Migration to create admission applications and their supporting documents.
//!
//! An accepted application may be linked to the student profile it produced;
//! the link is cleared if that profile is removed.

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
                    .table(AdmissionApplications::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, AdmissionApplications::Id))
                    .col(uuid_ref(AdmissionApplications::InstitutionId))
                    .col(uuid_ref_null(AdmissionApplications::AcademicYearId))
                    .col(uuid_ref_null(AdmissionApplications::GradeLevelId))
                    .col(uuid_ref_null(AdmissionApplications::StudentId))
                    .col(uuid_ref_null(AdmissionApplications::ReviewedBy))
                    .col(
                        ColumnDef::new(AdmissionApplications::ApplicationNumber)
                            .string_len(32)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(AdmissionApplications::ApplicantName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AdmissionApplications::DateOfBirth)
                            .date()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(AdmissionApplications::GuardianName)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(AdmissionApplications::GuardianEmail)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(AdmissionApplications::GuardianPhone)
                            .string_len(32)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(AdmissionApplications::Status)
                            .string_len(16)
                            .not_null()
                            .default("submitted"),
                    )
                    .col(
                        ColumnDef::new(AdmissionApplications::SubmittedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(AdmissionApplications::DecidedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(AdmissionApplications::Notes).text().null())
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_admission_applications_institution_id",
                        AdmissionApplications::Table,
                        AdmissionApplications::InstitutionId,
                        Institutions::Table,
                        Institutions::Id,
                    ))
                    .foreign_key(&mut set_null(
                        "fk_admission_applications_academic_year_id",
                        AdmissionApplications::Table,
                        AdmissionApplications::AcademicYearId,
                        AcademicYears::Table,
                        AcademicYears::Id,
                    ))
                    .foreign_key(&mut set_null(
                        "fk_admission_applications_grade_level_id",
                        AdmissionApplications::Table,
                        AdmissionApplications::GradeLevelId,
                        GradeLevels::Table,
                        GradeLevels::Id,
                    ))
                    .foreign_key(&mut set_null(
                        "fk_admission_applications_student_id",
                        AdmissionApplications::Table,
                        AdmissionApplications::StudentId,
                        Students::Table,
                        Students::Id,
                    ))
                    .foreign_key(&mut set_null(
                        "fk_admission_applications_reviewed_by",
                        AdmissionApplications::Table,
                        AdmissionApplications::ReviewedBy,
                        Users::Table,
                        Users::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(index(
                "idx_admission_applications_status",
                AdmissionApplications::Table,
                [
                    AdmissionApplications::InstitutionId,
                    AdmissionApplications::Status,
                ],
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AdmissionDocuments::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, AdmissionDocuments::Id))
                    .col(uuid_ref(AdmissionDocuments::AdmissionApplicationId))
                    .col(
                        ColumnDef::new(AdmissionDocuments::DocumentType)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(ColumnDef::new(AdmissionDocuments::FilePath).string().not_null())
                    .col(
                        ColumnDef::new(AdmissionDocuments::VerifiedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_admission_documents_admission_application_id",
                        AdmissionDocuments::Table,
                        AdmissionDocuments::AdmissionApplicationId,
                        AdmissionApplications::Table,
                        AdmissionApplications::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_tables(
            manager,
            &["admission_documents", "admission_applications"],
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
enum AcademicYears {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum GradeLevels {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Students {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum AdmissionApplications {
    Table,
    Id,
    InstitutionId,
    AcademicYearId,
    GradeLevelId,
    StudentId,
    ReviewedBy,
    ApplicationNumber,
    ApplicantName,
    DateOfBirth,
    GuardianName,
    GuardianEmail,
    GuardianPhone,
    Status,
    SubmittedAt,
    DecidedAt,
    Notes,
}

#[derive(DeriveIden)]
enum AdmissionDocuments {
    Table,
    Id,
    AdmissionApplicationId,
    DocumentType,
    FilePath,
    VerifiedAt,
}
