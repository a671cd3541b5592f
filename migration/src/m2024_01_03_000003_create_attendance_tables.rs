//! Migration to create daily attendance registers for students and staff.

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
                    .table(Attendances::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, Attendances::Id))
                    .col(uuid_ref(Attendances::StudentId))
                    .col(uuid_ref(Attendances::ClassId))
                    .col(uuid_ref_null(Attendances::RecordedBy))
                    .col(ColumnDef::new(Attendances::AttendedOn).date().not_null())
                    .col(
                        ColumnDef::new(Attendances::Status)
                            .string_len(16)
                            .not_null()
                            .default("present"),
                    )
                    .col(ColumnDef::new(Attendances::Remarks).text().null())
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_attendances_student_id",
                        Attendances::Table,
                        Attendances::StudentId,
                        Students::Table,
                        Students::Id,
                    ))
                    .foreign_key(&mut cascade(
                        "fk_attendances_class_id",
                        Attendances::Table,
                        Attendances::ClassId,
                        Classes::Table,
                        Classes::Id,
                    ))
                    .foreign_key(&mut set_null(
                        "fk_attendances_recorded_by",
                        Attendances::Table,
                        Attendances::RecordedBy,
                        Users::Table,
                        Users::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(unique_index(
                "idx_attendances_student_class_day",
                Attendances::Table,
                [
                    Attendances::StudentId,
                    Attendances::ClassId,
                    Attendances::AttendedOn,
                ],
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StaffAttendances::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, StaffAttendances::Id))
                    .col(uuid_ref(StaffAttendances::StaffId))
                    .col(ColumnDef::new(StaffAttendances::AttendedOn).date().not_null())
                    .col(
                        ColumnDef::new(StaffAttendances::CheckInAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(StaffAttendances::CheckOutAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(StaffAttendances::Status)
                            .string_len(16)
                            .not_null()
                            .default("present"),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_staff_attendances_staff_id",
                        StaffAttendances::Table,
                        StaffAttendances::StaffId,
                        Staff::Table,
                        Staff::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(unique_index(
                "idx_staff_attendances_staff_day",
                StaffAttendances::Table,
                [StaffAttendances::StaffId, StaffAttendances::AttendedOn],
            ))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_tables(manager, &["staff_attendances", "attendances"]).await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Students {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Staff {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Classes {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Attendances {
    Table,
    Id,
    StudentId,
    ClassId,
    RecordedBy,
    AttendedOn,
    Status,
    Remarks,
}

#[derive(DeriveIden)]
enum StaffAttendances {
    Table,
    Id,
    StaffId,
    AttendedOn,
    CheckInAt,
    CheckOutAt,
    Status,
}
