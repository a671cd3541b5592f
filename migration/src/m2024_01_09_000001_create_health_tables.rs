//! Migration to create student health records.
//!
//! Each student has at most one `health_records` row; clinic visits,
//! immunizations and incidents are kept per student.

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
                    .table(HealthRecords::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, HealthRecords::Id))
                    .col(uuid_ref(HealthRecords::StudentId).unique_key().to_owned())
                    .col(ColumnDef::new(HealthRecords::BloodGroup).string_len(8).null())
                    .col(ColumnDef::new(HealthRecords::Allergies).text().null())
                    .col(ColumnDef::new(HealthRecords::ChronicConditions).text().null())
                    .col(ColumnDef::new(HealthRecords::Medications).text().null())
                    .col(ColumnDef::new(HealthRecords::EmergencyContactName).string().null())
                    .col(
                        ColumnDef::new(HealthRecords::EmergencyContactPhone)
                            .string_len(32)
                            .null(),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_health_records_student_id",
                        HealthRecords::Table,
                        HealthRecords::StudentId,
                        Students::Table,
                        Students::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ClinicVisits::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, ClinicVisits::Id))
                    .col(uuid_ref(ClinicVisits::StudentId))
                    .col(uuid_ref_null(ClinicVisits::AttendedBy))
                    .col(
                        ColumnDef::new(ClinicVisits::VisitedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ClinicVisits::Complaint).text().not_null())
                    .col(ColumnDef::new(ClinicVisits::Diagnosis).text().null())
                    .col(ColumnDef::new(ClinicVisits::Treatment).text().null())
                    .col(
                        ColumnDef::new(ClinicVisits::ParentNotified)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_clinic_visits_student_id",
                        ClinicVisits::Table,
                        ClinicVisits::StudentId,
                        Students::Table,
                        Students::Id,
                    ))
                    .foreign_key(&mut set_null(
                        "fk_clinic_visits_attended_by",
                        ClinicVisits::Table,
                        ClinicVisits::AttendedBy,
                        Staff::Table,
                        Staff::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(index(
                "idx_clinic_visits_student_visited",
                ClinicVisits::Table,
                [ClinicVisits::StudentId, ClinicVisits::VisitedAt],
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Immunizations::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, Immunizations::Id))
                    .col(uuid_ref(Immunizations::StudentId))
                    .col(ColumnDef::new(Immunizations::Vaccine).string().not_null())
                    .col(ColumnDef::new(Immunizations::Dose).small_integer().null())
                    .col(ColumnDef::new(Immunizations::AdministeredOn).date().not_null())
                    .col(ColumnDef::new(Immunizations::NextDueOn).date().null())
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_immunizations_student_id",
                        Immunizations::Table,
                        Immunizations::StudentId,
                        Students::Table,
                        Students::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MedicalIncidents::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, MedicalIncidents::Id))
                    .col(uuid_ref(MedicalIncidents::StudentId))
                    .col(uuid_ref_null(MedicalIncidents::ReportedBy))
                    .col(
                        ColumnDef::new(MedicalIncidents::OccurredAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MedicalIncidents::Severity)
                            .string_len(16)
                            .not_null()
                            .default("minor"),
                    )
                    .col(ColumnDef::new(MedicalIncidents::Description).text().not_null())
                    .col(ColumnDef::new(MedicalIncidents::ActionTaken).text().null())
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_medical_incidents_student_id",
                        MedicalIncidents::Table,
                        MedicalIncidents::StudentId,
                        Students::Table,
                        Students::Id,
                    ))
                    .foreign_key(&mut set_null(
                        "fk_medical_incidents_reported_by",
                        MedicalIncidents::Table,
                        MedicalIncidents::ReportedBy,
                        Users::Table,
                        Users::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_tables(
            manager,
            &[
                "medical_incidents",
                "immunizations",
                "clinic_visits",
                "health_records",
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
enum Staff {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Students {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum HealthRecords {
    Table,
    Id,
    StudentId,
    BloodGroup,
    Allergies,
    ChronicConditions,
    Medications,
    EmergencyContactName,
    EmergencyContactPhone,
}

#[derive(DeriveIden)]
enum ClinicVisits {
    Table,
    Id,
    StudentId,
    AttendedBy,
    VisitedAt,
    Complaint,
    Diagnosis,
    Treatment,
    ParentNotified,
}

#[derive(DeriveIden)]
enum Immunizations {
    Table,
    Id,
    StudentId,
    Vaccine,
    Dose,
    AdministeredOn,
    NextDueOn,
}

#[derive(DeriveIden)]
enum MedicalIncidents {
    Table,
    Id,
    StudentId,
    ReportedBy,
    OccurredAt,
    Severity,
    Description,
    ActionTaken,
}
