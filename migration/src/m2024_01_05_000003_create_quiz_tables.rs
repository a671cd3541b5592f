//! Migration to create quizzes, their questions, attempts and answers.
//!
//! Answer options are stored as JSON on the question row; each attempt may answer
//! a question at most once.

use sea_orm_migration::prelude::*;

use crate::common::{
    cascade, created_at, drop_tables, index, unique_index, updated_at, uuid_pk, uuid_ref,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Quizzes::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, Quizzes::Id))
                    .col(uuid_ref(Quizzes::CourseId))
                    .col(ColumnDef::new(Quizzes::Title).string().not_null())
                    .col(ColumnDef::new(Quizzes::Instructions).text().null())
                    .col(ColumnDef::new(Quizzes::TimeLimitMinutes).integer().null())
                    .col(
                        ColumnDef::new(Quizzes::MaxAttempts)
                            .small_integer()
                            .not_null()
                            .default(1),
                    )
                    .col(ColumnDef::new(Quizzes::PassMark).decimal_len(5, 2).null())
                    .col(
                        ColumnDef::new(Quizzes::OpensAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Quizzes::ClosesAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_quizzes_course_id",
                        Quizzes::Table,
                        Quizzes::CourseId,
                        Courses::Table,
                        Courses::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(QuizQuestions::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, QuizQuestions::Id))
                    .col(uuid_ref(QuizQuestions::QuizId))
                    .col(ColumnDef::new(QuizQuestions::Prompt).text().not_null())
                    .col(
                        ColumnDef::new(QuizQuestions::QuestionType)
                            .string_len(32)
                            .not_null()
                            .default("multiple_choice"),
                    )
                    .col(ColumnDef::new(QuizQuestions::Options).json_binary().null())
                    .col(ColumnDef::new(QuizQuestions::CorrectAnswer).text().null())
                    .col(
                        ColumnDef::new(QuizQuestions::Points)
                            .decimal_len(5, 2)
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(QuizQuestions::Position)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_quiz_questions_quiz_id",
                        QuizQuestions::Table,
                        QuizQuestions::QuizId,
                        Quizzes::Table,
                        Quizzes::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(QuizAttempts::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, QuizAttempts::Id))
                    .col(uuid_ref(QuizAttempts::QuizId))
                    .col(uuid_ref(QuizAttempts::StudentId))
                    .col(
                        ColumnDef::new(QuizAttempts::StartedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(QuizAttempts::SubmittedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(QuizAttempts::Score).decimal_len(6, 2).null())
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_quiz_attempts_quiz_id",
                        QuizAttempts::Table,
                        QuizAttempts::QuizId,
                        Quizzes::Table,
                        Quizzes::Id,
                    ))
                    .foreign_key(&mut cascade(
                        "fk_quiz_attempts_student_id",
                        QuizAttempts::Table,
                        QuizAttempts::StudentId,
                        Students::Table,
                        Students::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(index(
                "idx_quiz_attempts_quiz_student",
                QuizAttempts::Table,
                [QuizAttempts::QuizId, QuizAttempts::StudentId],
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(QuizAnswers::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, QuizAnswers::Id))
                    .col(uuid_ref(QuizAnswers::QuizAttemptId))
                    .col(uuid_ref(QuizAnswers::QuizQuestionId))
                    .col(ColumnDef::new(QuizAnswers::Answer).text().null())
                    .col(ColumnDef::new(QuizAnswers::IsCorrect).boolean().null())
                    .col(
                        ColumnDef::new(QuizAnswers::PointsAwarded)
                            .decimal_len(5, 2)
                            .null(),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_quiz_answers_quiz_attempt_id",
                        QuizAnswers::Table,
                        QuizAnswers::QuizAttemptId,
                        QuizAttempts::Table,
                        QuizAttempts::Id,
                    ))
                    .foreign_key(&mut cascade(
                        "fk_quiz_answers_quiz_question_id",
                        QuizAnswers::Table,
                        QuizAnswers::QuizQuestionId,
                        QuizQuestions::Table,
                        QuizQuestions::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(unique_index(
                "idx_quiz_answers_attempt_question",
                QuizAnswers::Table,
                [QuizAnswers::QuizAttemptId, QuizAnswers::QuizQuestionId],
            ))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_tables(
            manager,
            &["quiz_answers", "quiz_attempts", "quiz_questions", "quizzes"],
        )
        .await
    }
}

#[derive(DeriveIden)]
enum Courses {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Students {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Quizzes {
    Table,
    Id,
    CourseId,
    Title,
    Instructions,
    TimeLimitMinutes,
    MaxAttempts,
    PassMark,
    OpensAt,
    ClosesAt,
}

#[derive(DeriveIden)]
enum QuizQuestions {
    Table,
    Id,
    QuizId,
    Prompt,
    QuestionType,
    Options,
    CorrectAnswer,
    Points,
    Position,
}

#[derive(DeriveIden)]
enum QuizAttempts {
    Table,
    Id,
    QuizId,
    StudentId,
    StartedAt,
    SubmittedAt,
    Score,
}

#[derive(DeriveIden)]
enum QuizAnswers {
    Table,
    Id,
    QuizAttemptId,
    QuizQuestionId,
    Answer,
    IsCorrect,
    PointsAwarded,
}
