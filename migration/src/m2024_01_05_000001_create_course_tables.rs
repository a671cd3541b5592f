//! Migration to create e-learning courses, modules, lessons and lesson progress.

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
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, Courses::Id))
                    .col(uuid_ref(Courses::InstitutionId))
                    .col(uuid_ref_null(Courses::SubjectId))
                    .col(uuid_ref_null(Courses::ClassId))
                    .col(uuid_ref_null(Courses::TeacherId))
                    .col(ColumnDef::new(Courses::Title).string().not_null())
                    .col(ColumnDef::new(Courses::Description).text().null())
                    .col(ColumnDef::new(Courses::CoverImageUrl).text().null())
                    .col(
                        ColumnDef::new(Courses::IsPublished)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Courses::PublishedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_courses_institution_id",
                        Courses::Table,
                        Courses::InstitutionId,
                        Institutions::Table,
                        Institutions::Id,
                    ))
                    .foreign_key(&mut set_null(
                        "fk_courses_subject_id",
                        Courses::Table,
                        Courses::SubjectId,
                        Subjects::Table,
                        Subjects::Id,
                    ))
                    .foreign_key(&mut set_null(
                        "fk_courses_class_id",
                        Courses::Table,
                        Courses::ClassId,
                        Classes::Table,
                        Classes::Id,
                    ))
                    .foreign_key(&mut set_null(
                        "fk_courses_teacher_id",
                        Courses::Table,
                        Courses::TeacherId,
                        Teachers::Table,
                        Teachers::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CourseModules::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, CourseModules::Id))
                    .col(uuid_ref(CourseModules::CourseId))
                    .col(ColumnDef::new(CourseModules::Title).string().not_null())
                    .col(ColumnDef::new(CourseModules::Summary).text().null())
                    .col(
                        ColumnDef::new(CourseModules::Position)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_course_modules_course_id",
                        CourseModules::Table,
                        CourseModules::CourseId,
                        Courses::Table,
                        Courses::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Lessons::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, Lessons::Id))
                    .col(uuid_ref(Lessons::CourseModuleId))
                    .col(ColumnDef::new(Lessons::Title).string().not_null())
                    .col(
                        ColumnDef::new(Lessons::ContentType)
                            .string_len(32)
                            .not_null()
                            .default("text"),
                    )
                    .col(ColumnDef::new(Lessons::Content).text().null())
                    .col(ColumnDef::new(Lessons::VideoUrl).text().null())
                    .col(ColumnDef::new(Lessons::DurationMinutes).integer().null())
                    .col(
                        ColumnDef::new(Lessons::Position)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_lessons_course_module_id",
                        Lessons::Table,
                        Lessons::CourseModuleId,
                        CourseModules::Table,
                        CourseModules::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(LessonProgress::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, LessonProgress::Id))
                    .col(uuid_ref(LessonProgress::LessonId))
                    .col(uuid_ref(LessonProgress::StudentId))
                    .col(
                        ColumnDef::new(LessonProgress::ProgressPercent)
                            .small_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(LessonProgress::LastViewedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(LessonProgress::CompletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_lesson_progress_lesson_id",
                        LessonProgress::Table,
                        LessonProgress::LessonId,
                        Lessons::Table,
                        Lessons::Id,
                    ))
                    .foreign_key(&mut cascade(
                        "fk_lesson_progress_student_id",
                        LessonProgress::Table,
                        LessonProgress::StudentId,
                        Students::Table,
                        Students::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(unique_index(
                "idx_lesson_progress_lesson_student",
                LessonProgress::Table,
                [LessonProgress::LessonId, LessonProgress::StudentId],
            ))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_tables(
            manager,
            &["lesson_progress", "lessons", "course_modules", "courses"],
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
enum Subjects {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Classes {
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
enum Courses {
    Table,
    Id,
    InstitutionId,
    SubjectId,
    ClassId,
    TeacherId,
    Title,
    Description,
    CoverImageUrl,
    IsPublished,
    PublishedAt,
}

#[derive(DeriveIden)]
enum CourseModules {
    Table,
    Id,
    CourseId,
    Title,
    Summary,
    Position,
}

#[derive(DeriveIden)]
enum Lessons {
    Table,
    Id,
    CourseModuleId,
    Title,
    ContentType,
    Content,
    VideoUrl,
    DurationMinutes,
    Position,
}

#[derive(DeriveIden)]
enum LessonProgress {
    Table,
    Id,
    LessonId,
    StudentId,
    ProgressPercent,
    LastViewedAt,
    CompletedAt,
}
