//! Migration to create scholarships and their awards to students.

use sea_orm_migration::prelude::*;

use crate::common::{
    cascade, created_at, drop_tables, set_null, unique_index, updated_at, uuid_pk, uuid_ref,
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
                    .table(Scholarships::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, Scholarships::Id))
                    .col(uuid_ref(Scholarships::InstitutionId))
                    .col(ColumnDef::new(Scholarships::Name).string().not_null())
                    .col(ColumnDef::new(Scholarships::Description).text().null())
                    .col(
                        ColumnDef::new(Scholarships::DiscountType)
                            .string_len(16)
                            .not_null()
                            .default("percentage"),
                    )
                    .col(
                        ColumnDef::new(Scholarships::DiscountValue)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Scholarships::Criteria).text().null())
                    .col(
                        ColumnDef::new(Scholarships::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_scholarships_institution_id",
                        Scholarships::Table,
                        Scholarships::InstitutionId,
                        Institutions::Table,
                        Institutions::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StudentScholarships::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, StudentScholarships::Id))
                    .col(uuid_ref(StudentScholarships::StudentId))
                    .col(uuid_ref(StudentScholarships::ScholarshipId))
                    .col(uuid_ref(StudentScholarships::AcademicYearId))
                    .col(uuid_ref_null(StudentScholarships::ApprovedBy))
                    .col(ColumnDef::new(StudentScholarships::AwardedOn).date().not_null())
                    .col(ColumnDef::new(StudentScholarships::RevokedOn).date().null())
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_student_scholarships_student_id",
                        StudentScholarships::Table,
                        StudentScholarships::StudentId,
                        Students::Table,
                        Students::Id,
                    ))
                    .foreign_key(&mut cascade(
                        "fk_student_scholarships_scholarship_id",
                        StudentScholarships::Table,
                        StudentScholarships::ScholarshipId,
                        Scholarships::Table,
                        Scholarships::Id,
                    ))
                    .foreign_key(&mut cascade(
                        "fk_student_scholarships_academic_year_id",
                        StudentScholarships::Table,
                        StudentScholarships::AcademicYearId,
                        AcademicYears::Table,
                        AcademicYears::Id,
                    ))
                    .foreign_key(&mut set_null(
                        "fk_student_scholarships_approved_by",
                        StudentScholarships::Table,
                        StudentScholarships::ApprovedBy,
                        Users::Table,
                        Users::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        // A scholarship is awarded to a student once per academic year.
        manager
            .create_index(unique_index(
                "idx_student_scholarships_unique",
                StudentScholarships::Table,
                [
                    StudentScholarships::StudentId,
                    StudentScholarships::ScholarshipId,
                    StudentScholarships::AcademicYearId,
                ],
            ))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_tables(manager, &["student_scholarships", "scholarships"]).await
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
enum Students {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Scholarships {
    Table,
    Id,
    InstitutionId,
    Name,
    Description,
    DiscountType,
    DiscountValue,
    Criteria,
    IsActive,
}

#[derive(DeriveIden)]
enum StudentScholarships {
    Table,
    Id,
    StudentId,
    ScholarshipId,
    AcademicYearId,
    ApprovedBy,
    AwardedOn,
    RevokedOn,
}
