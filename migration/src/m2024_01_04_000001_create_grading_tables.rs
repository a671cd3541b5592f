//! Migration to create grading scales, exams, results, term grades and report cards.
//!
//! Results and grades belong to the student and are removed with them. The teacher
//! who graded a row is kept only as an optional reference.

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
                    .table(GradingScales::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, GradingScales::Id))
                    .col(uuid_ref(GradingScales::InstitutionId))
                    .col(ColumnDef::new(GradingScales::Name).string().not_null())
                    .col(
                        ColumnDef::new(GradingScales::IsDefault)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_grading_scales_institution_id",
                        GradingScales::Table,
                        GradingScales::InstitutionId,
                        Institutions::Table,
                        Institutions::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(GradeBoundaries::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, GradeBoundaries::Id))
                    .col(uuid_ref(GradeBoundaries::GradingScaleId))
                    .col(ColumnDef::new(GradeBoundaries::Letter).string_len(4).not_null())
                    .col(
                        ColumnDef::new(GradeBoundaries::MinScore)
                            .decimal_len(5, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GradeBoundaries::MaxScore)
                            .decimal_len(5, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GradeBoundaries::GradePoint)
                            .decimal_len(3, 2)
                            .null(),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_grade_boundaries_grading_scale_id",
                        GradeBoundaries::Table,
                        GradeBoundaries::GradingScaleId,
                        GradingScales::Table,
                        GradingScales::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(unique_index(
                "idx_grade_boundaries_scale_letter",
                GradeBoundaries::Table,
                [GradeBoundaries::GradingScaleId, GradeBoundaries::Letter],
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Exams::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, Exams::Id))
                    .col(uuid_ref(Exams::TermId))
                    .col(uuid_ref(Exams::ClassId))
                    .col(uuid_ref(Exams::SubjectId))
                    .col(ColumnDef::new(Exams::Name).string().not_null())
                    .col(
                        ColumnDef::new(Exams::ExamType)
                            .string_len(32)
                            .not_null()
                            .default("written"),
                    )
                    .col(ColumnDef::new(Exams::HeldOn).date().null())
                    .col(
                        ColumnDef::new(Exams::MaxScore)
                            .decimal_len(6, 2)
                            .not_null()
                            .default(100),
                    )
                    .col(
                        ColumnDef::new(Exams::Weight)
                            .decimal_len(5, 2)
                            .not_null()
                            .default(1),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_exams_term_id",
                        Exams::Table,
                        Exams::TermId,
                        Terms::Table,
                        Terms::Id,
                    ))
                    .foreign_key(&mut cascade(
                        "fk_exams_class_id",
                        Exams::Table,
                        Exams::ClassId,
                        Classes::Table,
                        Classes::Id,
                    ))
                    .foreign_key(&mut cascade(
                        "fk_exams_subject_id",
                        Exams::Table,
                        Exams::SubjectId,
                        Subjects::Table,
                        Subjects::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(index(
                "idx_exams_class_term",
                Exams::Table,
                [Exams::ClassId, Exams::TermId],
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ExamResults::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, ExamResults::Id))
                    .col(uuid_ref(ExamResults::ExamId))
                    .col(uuid_ref(ExamResults::StudentId))
                    .col(ColumnDef::new(ExamResults::Score).decimal_len(6, 2).null())
                    .col(
                        ColumnDef::new(ExamResults::IsAbsent)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(ExamResults::Remarks).text().null())
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_exam_results_exam_id",
                        ExamResults::Table,
                        ExamResults::ExamId,
                        Exams::Table,
                        Exams::Id,
                    ))
                    .foreign_key(&mut cascade(
                        "fk_exam_results_student_id",
                        ExamResults::Table,
                        ExamResults::StudentId,
                        Students::Table,
                        Students::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(unique_index(
                "idx_exam_results_exam_student",
                ExamResults::Table,
                [ExamResults::ExamId, ExamResults::StudentId],
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Grades::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, Grades::Id))
                    .col(uuid_ref(Grades::StudentId))
                    .col(uuid_ref(Grades::SubjectId))
                    .col(uuid_ref(Grades::TermId))
                    .col(uuid_ref_null(Grades::ClassId))
                    .col(uuid_ref_null(Grades::GradedBy))
                    .col(ColumnDef::new(Grades::Score).decimal_len(6, 2).not_null())
                    .col(ColumnDef::new(Grades::LetterGrade).string_len(4).null())
                    .col(ColumnDef::new(Grades::GradePoint).decimal_len(3, 2).null())
                    .col(ColumnDef::new(Grades::Comment).text().null())
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_grades_student_id",
                        Grades::Table,
                        Grades::StudentId,
                        Students::Table,
                        Students::Id,
                    ))
                    .foreign_key(&mut cascade(
                        "fk_grades_subject_id",
                        Grades::Table,
                        Grades::SubjectId,
                        Subjects::Table,
                        Subjects::Id,
                    ))
                    .foreign_key(&mut cascade(
                        "fk_grades_term_id",
                        Grades::Table,
                        Grades::TermId,
                        Terms::Table,
                        Terms::Id,
                    ))
                    .foreign_key(&mut set_null(
                        "fk_grades_class_id",
                        Grades::Table,
                        Grades::ClassId,
                        Classes::Table,
                        Classes::Id,
                    ))
                    .foreign_key(&mut set_null(
                        "fk_grades_graded_by",
                        Grades::Table,
                        Grades::GradedBy,
                        Teachers::Table,
                        Teachers::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(unique_index(
                "idx_grades_student_subject_term",
                Grades::Table,
                [Grades::StudentId, Grades::SubjectId, Grades::TermId],
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ReportCards::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, ReportCards::Id))
                    .col(uuid_ref(ReportCards::StudentId))
                    .col(uuid_ref(ReportCards::TermId))
                    .col(ColumnDef::new(ReportCards::Gpa).decimal_len(3, 2).null())
                    .col(ColumnDef::new(ReportCards::ClassRank).integer().null())
                    .col(ColumnDef::new(ReportCards::DaysPresent).integer().null())
                    .col(ColumnDef::new(ReportCards::DaysAbsent).integer().null())
                    .col(ColumnDef::new(ReportCards::TeacherComment).text().null())
                    .col(ColumnDef::new(ReportCards::PrincipalComment).text().null())
                    .col(
                        ColumnDef::new(ReportCards::PublishedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_report_cards_student_id",
                        ReportCards::Table,
                        ReportCards::StudentId,
                        Students::Table,
                        Students::Id,
                    ))
                    .foreign_key(&mut cascade(
                        "fk_report_cards_term_id",
                        ReportCards::Table,
                        ReportCards::TermId,
                        Terms::Table,
                        Terms::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(unique_index(
                "idx_report_cards_student_term",
                ReportCards::Table,
                [ReportCards::StudentId, ReportCards::TermId],
            ))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_tables(
            manager,
            &[
                "report_cards",
                "grades",
                "exam_results",
                "exams",
                "grade_boundaries",
                "grading_scales",
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
enum Terms {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Classes {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Subjects {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Students {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Teachers {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum GradingScales {
    Table,
    Id,
    InstitutionId,
    Name,
    IsDefault,
}

#[derive(DeriveIden)]
enum GradeBoundaries {
    Table,
    Id,
    GradingScaleId,
    Letter,
    MinScore,
    MaxScore,
    GradePoint,
}

#[derive(DeriveIden)]
enum Exams {
    Table,
    Id,
    TermId,
    ClassId,
    SubjectId,
    Name,
    ExamType,
    HeldOn,
    MaxScore,
    Weight,
}

#[derive(DeriveIden)]
enum ExamResults {
    Table,
    Id,
    ExamId,
    StudentId,
    Score,
    IsAbsent,
    Remarks,
}

#[derive(DeriveIden)]
enum Grades {
    Table,
    Id,
    StudentId,
    SubjectId,
    TermId,
    ClassId,
    GradedBy,
    Score,
    LetterGrade,
    GradePoint,
    Comment,
}

#[derive(DeriveIden)]
enum ReportCards {
    Table,
    Id,
    StudentId,
    TermId,
    Gpa,
    ClassRank,
    DaysPresent,
    DaysAbsent,
    TeacherComment,
    PrincipalComment,
    PublishedAt,
}
