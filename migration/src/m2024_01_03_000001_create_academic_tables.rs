//! Migration to create grade levels, classes, subjects and enrollments.

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
                    .table(GradeLevels::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, GradeLevels::Id))
                    .col(uuid_ref(GradeLevels::InstitutionId))
                    .col(ColumnDef::new(GradeLevels::Name).string().not_null())
                    .col(ColumnDef::new(GradeLevels::Sequence).small_integer().not_null())
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_grade_levels_institution_id",
                        GradeLevels::Table,
                        GradeLevels::InstitutionId,
                        Institutions::Table,
                        Institutions::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        // A class outlives its homeroom teacher; the reference is cleared instead.
        manager
            .create_table(
                Table::create()
                    .table(Classes::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, Classes::Id))
                    .col(uuid_ref(Classes::InstitutionId))
                    .col(uuid_ref(Classes::AcademicYearId))
                    .col(uuid_ref_null(Classes::GradeLevelId))
                    .col(uuid_ref_null(Classes::HomeroomTeacherId))
                    .col(ColumnDef::new(Classes::Name).string().not_null())
                    .col(ColumnDef::new(Classes::Section).string_len(16).null())
                    .col(ColumnDef::new(Classes::Capacity).integer().null())
                    .col(ColumnDef::new(Classes::RoomLabel).string().null())
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_classes_institution_id",
                        Classes::Table,
                        Classes::InstitutionId,
                        Institutions::Table,
                        Institutions::Id,
                    ))
                    .foreign_key(&mut cascade(
                        "fk_classes_academic_year_id",
                        Classes::Table,
                        Classes::AcademicYearId,
                        AcademicYears::Table,
                        AcademicYears::Id,
                    ))
                    .foreign_key(&mut set_null(
                        "fk_classes_grade_level_id",
                        Classes::Table,
                        Classes::GradeLevelId,
                        GradeLevels::Table,
                        GradeLevels::Id,
                    ))
                    .foreign_key(&mut set_null(
                        "fk_classes_homeroom_teacher_id",
                        Classes::Table,
                        Classes::HomeroomTeacherId,
                        Teachers::Table,
                        Teachers::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Subjects::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, Subjects::Id))
                    .col(uuid_ref(Subjects::InstitutionId))
                    .col(ColumnDef::new(Subjects::Name).string().not_null())
                    .col(
                        ColumnDef::new(Subjects::Code)
                            .string_len(32)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Subjects::Description).text().null())
                    .col(ColumnDef::new(Subjects::CreditHours).small_integer().null())
                    .col(
                        ColumnDef::new(Subjects::IsElective)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_subjects_institution_id",
                        Subjects::Table,
                        Subjects::InstitutionId,
                        Institutions::Table,
                        Institutions::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ClassSubjects::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, ClassSubjects::Id))
                    .col(uuid_ref(ClassSubjects::ClassId))
                    .col(uuid_ref(ClassSubjects::SubjectId))
                    .col(uuid_ref_null(ClassSubjects::TeacherId))
                    .col(
                        ColumnDef::new(ClassSubjects::WeeklyPeriods)
                            .small_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_class_subjects_class_id",
                        ClassSubjects::Table,
                        ClassSubjects::ClassId,
                        Classes::Table,
                        Classes::Id,
                    ))
                    .foreign_key(&mut cascade(
                        "fk_class_subjects_subject_id",
                        ClassSubjects::Table,
                        ClassSubjects::SubjectId,
                        Subjects::Table,
                        Subjects::Id,
                    ))
                    .foreign_key(&mut set_null(
                        "fk_class_subjects_teacher_id",
                        ClassSubjects::Table,
                        ClassSubjects::TeacherId,
                        Teachers::Table,
                        Teachers::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(unique_index(
                "idx_class_subjects_unique",
                ClassSubjects::Table,
                [ClassSubjects::ClassId, ClassSubjects::SubjectId],
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Enrollments::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, Enrollments::Id))
                    .col(uuid_ref(Enrollments::StudentId))
                    .col(uuid_ref(Enrollments::ClassId))
                    .col(uuid_ref(Enrollments::AcademicYearId))
                    .col(ColumnDef::new(Enrollments::EnrolledOn).date().not_null())
                    .col(ColumnDef::new(Enrollments::LeftOn).date().null())
                    .col(
                        ColumnDef::new(Enrollments::Status)
                            .string_len(32)
                            .not_null()
                            .default("active"),
                    )
                    .col(ColumnDef::new(Enrollments::RollNumber).string_len(16).null())
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_enrollments_student_id",
                        Enrollments::Table,
                        Enrollments::StudentId,
                        Students::Table,
                        Students::Id,
                    ))
                    .foreign_key(&mut cascade(
                        "fk_enrollments_class_id",
                        Enrollments::Table,
                        Enrollments::ClassId,
                        Classes::Table,
                        Classes::Id,
                    ))
                    .foreign_key(&mut cascade(
                        "fk_enrollments_academic_year_id",
                        Enrollments::Table,
                        Enrollments::AcademicYearId,
                        AcademicYears::Table,
                        AcademicYears::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(unique_index(
                "idx_enrollments_student_class_year",
                Enrollments::Table,
                [
                    Enrollments::StudentId,
                    Enrollments::ClassId,
                    Enrollments::AcademicYearId,
                ],
            ))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_tables(
            manager,
            &[
                "enrollments",
                "class_subjects",
                "subjects",
                "classes",
                "grade_levels",
            ],
        )
        .await
    }
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
enum Teachers {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Students {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum GradeLevels {
    Table,
    Id,
    InstitutionId,
    Name,
    Sequence,
}

#[derive(DeriveIden)]
enum Classes {
    Table,
    Id,
    InstitutionId,
    AcademicYearId,
    GradeLevelId,
    HomeroomTeacherId,
    Name,
    Section,
    Capacity,
    RoomLabel,
}

#[derive(DeriveIden)]
enum Subjects {
    Table,
    Id,
    InstitutionId,
    Name,
    Code,
    Description,
    CreditHours,
    IsElective,
}

#[derive(DeriveIden)]
enum ClassSubjects {
    Table,
    Id,
    ClassId,
    SubjectId,
    TeacherId,
    WeeklyPeriods,
}

#[derive(DeriveIden)]
enum Enrollments {
    Table,
    Id,
    StudentId,
    ClassId,
    AcademicYearId,
    EnrolledOn,
    LeftOn,
    Status,
    RollNumber,
}
