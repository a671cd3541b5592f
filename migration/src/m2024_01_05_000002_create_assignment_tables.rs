//! Migration to create assignments and student submissions.

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
                    .table(Assignments::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, Assignments::Id))
                    .col(uuid_ref(Assignments::ClassId))
                    .col(uuid_ref_null(Assignments::CourseId))
                    .col(uuid_ref_null(Assignments::SubjectId))
                    .col(uuid_ref_null(Assignments::TeacherId))
                    .col(ColumnDef::new(Assignments::Title).string().not_null())
                    .col(ColumnDef::new(Assignments::Instructions).text().null())
                    .col(
                        ColumnDef::new(Assignments::DueAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Assignments::MaxScore)
                            .decimal_len(6, 2)
                            .not_null()
                            .default(100),
                    )
                    .col(
                        ColumnDef::new(Assignments::AllowLateSubmission)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_assignments_class_id",
                        Assignments::Table,
                        Assignments::ClassId,
                        Classes::Table,
                        Classes::Id,
                    ))
                    .foreign_key(&mut cascade(
                        "fk_assignments_course_id",
                        Assignments::Table,
                        Assignments::CourseId,
                        Courses::Table,
                        Courses::Id,
                    ))
                    .foreign_key(&mut set_null(
                        "fk_assignments_subject_id",
                        Assignments::Table,
                        Assignments::SubjectId,
                        Subjects::Table,
                        Subjects::Id,
                    ))
                    .foreign_key(&mut set_null(
                        "fk_assignments_teacher_id",
                        Assignments::Table,
                        Assignments::TeacherId,
                        Teachers::Table,
                        Teachers::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(index(
                "idx_assignments_class_due",
                Assignments::Table,
                [Assignments::ClassId, Assignments::DueAt],
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AssignmentSubmissions::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, AssignmentSubmissions::Id))
                    .col(uuid_ref(AssignmentSubmissions::AssignmentId))
                    .col(uuid_ref(AssignmentSubmissions::StudentId))
                    .col(uuid_ref_null(AssignmentSubmissions::GradedBy))
                    .col(ColumnDef::new(AssignmentSubmissions::Content).text().null())
                    .col(ColumnDef::new(AssignmentSubmissions::FileUrl).text().null())
                    .col(
                        ColumnDef::new(AssignmentSubmissions::SubmittedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(AssignmentSubmissions::Score)
                            .decimal_len(6, 2)
                            .null(),
                    )
                    .col(ColumnDef::new(AssignmentSubmissions::Feedback).text().null())
                    .col(
                        ColumnDef::new(AssignmentSubmissions::GradedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_assignment_submissions_assignment_id",
                        AssignmentSubmissions::Table,
                        AssignmentSubmissions::AssignmentId,
                        Assignments::Table,
                        Assignments::Id,
                    ))
                    .foreign_key(&mut cascade(
                        "fk_assignment_submissions_student_id",
                        AssignmentSubmissions::Table,
                        AssignmentSubmissions::StudentId,
                        Students::Table,
                        Students::Id,
                    ))
                    .foreign_key(&mut set_null(
                        "fk_assignment_submissions_graded_by",
                        AssignmentSubmissions::Table,
                        AssignmentSubmissions::GradedBy,
                        Teachers::Table,
                        Teachers::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(unique_index(
                "idx_assignment_submissions_assignment_student",
                AssignmentSubmissions::Table,
                [
                    AssignmentSubmissions::AssignmentId,
                    AssignmentSubmissions::StudentId,
                ],
            ))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_tables(manager, &["assignment_submissions", "assignments"]).await
    }
}

#[derive(DeriveIden)]
enum Classes {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Courses {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Subjects {
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
enum Assignments {
    Table,
    Id,
    ClassId,
    CourseId,
    SubjectId,
    TeacherId,
    Title,
    Instructions,
    DueAt,
    MaxScore,
    AllowLateSubmission,
}

#[derive(DeriveIden)]
enum AssignmentSubmissions {
    Table,
    Id,
    AssignmentId,
    StudentId,
    GradedBy,
    Content,
    FileUrl,
    SubmittedAt,
    Score,
    Feedback,
    GradedAt,
}
