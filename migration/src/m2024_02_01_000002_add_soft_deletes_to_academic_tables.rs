//! Adds soft deletes to class, timetable, attendance and grading tables.

use sea_orm_migration::prelude::*;

use crate::common::{add_soft_deletes, drop_soft_deletes};

const TABLES: &[&str] = &[
    "grade_levels",
    "classes",
    "subjects",
    "class_subjects",
    "enrollments",
    "rooms",
    "time_slots",
    "timetable_entries",
    "attendances",
    "staff_attendances",
    "grading_scales",
    "grade_boundaries",
    "exams",
    "exam_results",
    "grades",
    "report_cards",
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
