//! Migration to create rooms, time slots and the weekly timetable.

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
                    .table(Rooms::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, Rooms::Id))
                    .col(uuid_ref(Rooms::InstitutionId))
                    .col(uuid_ref_null(Rooms::CampusId))
                    .col(ColumnDef::new(Rooms::Name).string().not_null())
                    .col(ColumnDef::new(Rooms::Building).string().null())
                    .col(ColumnDef::new(Rooms::Capacity).integer().null())
                    .col(
                        ColumnDef::new(Rooms::RoomType)
                            .string_len(32)
                            .not_null()
                            .default("classroom"),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_rooms_institution_id",
                        Rooms::Table,
                        Rooms::InstitutionId,
                        Institutions::Table,
                        Institutions::Id,
                    ))
                    .foreign_key(&mut set_null(
                        "fk_rooms_campus_id",
                        Rooms::Table,
                        Rooms::CampusId,
                        Campuses::Table,
                        Campuses::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TimeSlots::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, TimeSlots::Id))
                    .col(uuid_ref(TimeSlots::InstitutionId))
                    .col(ColumnDef::new(TimeSlots::Name).string().not_null())
                    .col(ColumnDef::new(TimeSlots::StartsAt).time().not_null())
                    .col(ColumnDef::new(TimeSlots::EndsAt).time().not_null())
                    .col(
                        ColumnDef::new(TimeSlots::IsBreak)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_time_slots_institution_id",
                        TimeSlots::Table,
                        TimeSlots::InstitutionId,
                        Institutions::Table,
                        Institutions::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TimetableEntries::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, TimetableEntries::Id))
                    .col(uuid_ref(TimetableEntries::ClassId))
                    .col(uuid_ref(TimetableEntries::SubjectId))
                    .col(uuid_ref(TimetableEntries::TimeSlotId))
                    .col(uuid_ref_null(TimetableEntries::TeacherId))
                    .col(uuid_ref_null(TimetableEntries::RoomId))
                    .col(
                        ColumnDef::new(TimetableEntries::DayOfWeek)
                            .small_integer()
                            .not_null(),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_timetable_entries_class_id",
                        TimetableEntries::Table,
                        TimetableEntries::ClassId,
                        Classes::Table,
                        Classes::Id,
                    ))
                    .foreign_key(&mut cascade(
                        "fk_timetable_entries_subject_id",
                        TimetableEntries::Table,
                        TimetableEntries::SubjectId,
                        Subjects::Table,
                        Subjects::Id,
                    ))
                    .foreign_key(&mut cascade(
                        "fk_timetable_entries_time_slot_id",
                        TimetableEntries::Table,
                        TimetableEntries::TimeSlotId,
                        TimeSlots::Table,
                        TimeSlots::Id,
                    ))
                    .foreign_key(&mut set_null(
                        "fk_timetable_entries_teacher_id",
                        TimetableEntries::Table,
                        TimetableEntries::TeacherId,
                        Teachers::Table,
                        Teachers::Id,
                    ))
                    .foreign_key(&mut set_null(
                        "fk_timetable_entries_room_id",
                        TimetableEntries::Table,
                        TimetableEntries::RoomId,
                        Rooms::Table,
                        Rooms::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        // One subject per class per slot per day.
        manager
            .create_index(unique_index(
                "idx_timetable_entries_class_slot_day",
                TimetableEntries::Table,
                [
                    TimetableEntries::ClassId,
                    TimetableEntries::TimeSlotId,
                    TimetableEntries::DayOfWeek,
                ],
            ))
            .await?;

        manager
            .create_index(index(
                "idx_timetable_entries_teacher_day",
                TimetableEntries::Table,
                [TimetableEntries::TeacherId, TimetableEntries::DayOfWeek],
            ))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_tables(manager, &["timetable_entries", "time_slots", "rooms"]).await
    }
}

#[derive(DeriveIden)]
enum Institutions {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Campuses {
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
enum Teachers {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Rooms {
    Table,
    Id,
    InstitutionId,
    CampusId,
    Name,
    Building,
    Capacity,
    RoomType,
}

#[derive(DeriveIden)]
enum TimeSlots {
    Table,
    Id,
    InstitutionId,
    Name,
    StartsAt,
    EndsAt,
    IsBreak,
}

#[derive(DeriveIden)]
enum TimetableEntries {
    Table,
    Id,
    ClassId,
    SubjectId,
    TimeSlotId,
    TeacherId,
    RoomId,
    DayOfWeek,
}
