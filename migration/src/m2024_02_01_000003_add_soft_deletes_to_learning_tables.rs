//! Adds soft deletes to the e-learning tables.

use sea_orm_migration::prelude::*;

use crate::common::{add_soft_deletes, drop_soft_deletes};

const TABLES: &[&str] = &[
    "courses",
    "course_modules",
    "lessons",
    "lesson_progress",
    "assignments",
    "assignment_submissions",
    "quizzes",
    "quiz_questions",
    "quiz_attempts",
    "quiz_answers",
    "forum_threads",
    "forum_posts",
];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        add_soft_deletes(manager, TABLES).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_soft_deletes(manager, TABLES).await
    }
}
