//! Migration to create hostels, rooms, beds, allocations and the visitor log.

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
                    .table(Hostels::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, Hostels::Id))
                    .col(uuid_ref(Hostels::InstitutionId))
                    .col(uuid_ref_null(Hostels::WardenId))
                    .col(ColumnDef::new(Hostels::Name).string().not_null())
                    .col(
                        ColumnDef::new(Hostels::Gender)
                            .string_len(16)
                            .not_null()
                            .default("mixed"),
                    )
                    .col(ColumnDef::new(Hostels::Address).text().null())
                    .col(ColumnDef::new(Hostels::Capacity).integer().not_null().default(0))
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_hostels_institution_id",
                        Hostels::Table,
                        Hostels::InstitutionId,
                        Institutions::Table,
                        Institutions::Id,
                    ))
                    .foreign_key(&mut set_null(
                        "fk_hostels_warden_id",
                        Hostels::Table,
                        Hostels::WardenId,
                        Staff::Table,
                        Staff::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(HostelRooms::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, HostelRooms::Id))
                    .col(uuid_ref(HostelRooms::HostelId))
                    .col(ColumnDef::new(HostelRooms::RoomNumber).string_len(32).not_null())
                    .col(ColumnDef::new(HostelRooms::Floor).small_integer().null())
                    .col(ColumnDef::new(HostelRooms::Capacity).small_integer().not_null())
                    .col(
                        ColumnDef::new(HostelRooms::MonthlyFee)
                            .decimal_len(10, 2)
                            .null(),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_hostel_rooms_hostel_id",
                        HostelRooms::Table,
                        HostelRooms::HostelId,
                        Hostels::Table,
                        Hostels::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(unique_index(
                "idx_hostel_rooms_hostel_room_number",
                HostelRooms::Table,
                [HostelRooms::HostelId, HostelRooms::RoomNumber],
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(HostelBeds::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, HostelBeds::Id))
                    .col(uuid_ref(HostelBeds::HostelRoomId))
                    .col(ColumnDef::new(HostelBeds::BedNumber).string_len(16).not_null())
                    .col(
                        ColumnDef::new(HostelBeds::Status)
                            .string_len(16)
                            .not_null()
                            .default("available"),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_hostel_beds_hostel_room_id",
                        HostelBeds::Table,
                        HostelBeds::HostelRoomId,
                        HostelRooms::Table,
                        HostelRooms::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(unique_index(
                "idx_hostel_beds_room_bed_number",
                HostelBeds::Table,
                [HostelBeds::HostelRoomId, HostelBeds::BedNumber],
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(HostelAllocations::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, HostelAllocations::Id))
                    .col(uuid_ref(HostelAllocations::HostelBedId))
                    .col(uuid_ref(HostelAllocations::StudentId))
                    .col(uuid_ref_null(HostelAllocations::AcademicYearId))
                    .col(ColumnDef::new(HostelAllocations::AllocatedOn).date().not_null())
                    .col(ColumnDef::new(HostelAllocations::VacatedOn).date().null())
                    .col(
                        ColumnDef::new(HostelAllocations::Status)
                            .string_len(16)
                            .not_null()
                            .default("active"),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_hostel_allocations_hostel_bed_id",
                        HostelAllocations::Table,
                        HostelAllocations::HostelBedId,
                        HostelBeds::Table,
                        HostelBeds::Id,
                    ))
                    .foreign_key(&mut cascade(
                        "fk_hostel_allocations_student_id",
                        HostelAllocations::Table,
                        HostelAllocations::StudentId,
                        Students::Table,
                        Students::Id,
                    ))
                    .foreign_key(&mut set_null(
                        "fk_hostel_allocations_academic_year_id",
                        HostelAllocations::Table,
                        HostelAllocations::AcademicYearId,
                        AcademicYears::Table,
                        AcademicYears::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(index(
                "idx_hostel_allocations_student_status",
                HostelAllocations::Table,
                [HostelAllocations::StudentId, HostelAllocations::Status],
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(HostelVisitors::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, HostelVisitors::Id))
                    .col(uuid_ref(HostelVisitors::HostelId))
                    .col(uuid_ref(HostelVisitors::StudentId))
                    .col(ColumnDef::new(HostelVisitors::VisitorName).string().not_null())
                    .col(ColumnDef::new(HostelVisitors::Relationship).string_len(32).null())
                    .col(ColumnDef::new(HostelVisitors::Phone).string_len(32).null())
                    .col(
                        ColumnDef::new(HostelVisitors::CheckedInAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(HostelVisitors::CheckedOutAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_hostel_visitors_hostel_id",
                        HostelVisitors::Table,
                        HostelVisitors::HostelId,
                        Hostels::Table,
                        Hostels::Id,
                    ))
                    .foreign_key(&mut cascade(
                        "fk_hostel_visitors_student_id",
                        HostelVisitors::Table,
                        HostelVisitors::StudentId,
                        Students::Table,
                        Students::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_tables(
            manager,
            &[
                "hostel_visitors",
                "hostel_allocations",
                "hostel_beds",
                "hostel_rooms",
                "hostels",
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
enum Staff {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Students {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Hostels {
    Table,
    Id,
    InstitutionId,
    WardenId,
    Name,
    Gender,
    Address,
    Capacity,
}

#[derive(DeriveIden)]
enum HostelRooms {
    Table,
    Id,
    HostelId,
    RoomNumber,
    Floor,
    Capacity,
    MonthlyFee,
}

#[derive(DeriveIden)]
enum HostelBeds {
    Table,
    Id,
    HostelRoomId,
    BedNumber,
    Status,
}

#[derive(DeriveIden)]
enum HostelAllocations {
    Table,
    Id,
    HostelBedId,
    StudentId,
    AcademicYearId,
    AllocatedOn,
    VacatedOn,
    Status,
}

#[derive(DeriveIden)]
enum HostelVisitors {
    Table,
    Id,
    HostelId,
    StudentId,
    VisitorName,
    Relationship,
    Phone,
    CheckedInAt,
    CheckedOutAt,
}
