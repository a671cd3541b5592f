//! Migration to create leave types, balances and requests.
//!
//! A staff member holds exactly one balance per leave type per year.

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
                    .table(LeaveTypes::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, LeaveTypes::Id))
                    .col(uuid_ref(LeaveTypes::InstitutionId))
                    .col(ColumnDef::new(LeaveTypes::Name).string().not_null())
                    .col(
                        ColumnDef::new(LeaveTypes::DaysPerYear)
                            .decimal_len(5, 1)
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(LeaveTypes::IsPaid)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(LeaveTypes::CarriesOver)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_leave_types_institution_id",
                        LeaveTypes::Table,
                        LeaveTypes::InstitutionId,
                        Institutions::Table,
                        Institutions::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(LeaveBalances::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, LeaveBalances::Id))
                    .col(uuid_ref(LeaveBalances::StaffId))
                    .col(uuid_ref(LeaveBalances::LeaveTypeId))
                    .col(ColumnDef::new(LeaveBalances::Year).small_integer().not_null())
                    .col(
                        ColumnDef::new(LeaveBalances::Entitled)
                            .decimal_len(5, 1)
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(LeaveBalances::Used)
                            .decimal_len(5, 1)
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(LeaveBalances::CarriedOver)
                            .decimal_len(5, 1)
                            .not_null()
                            .default(0),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_leave_balances_staff_id",
                        LeaveBalances::Table,
                        LeaveBalances::StaffId,
                        Staff::Table,
                        Staff::Id,
                    ))
                    .foreign_key(&mut cascade(
                        "fk_leave_balances_leave_type_id",
                        LeaveBalances::Table,
                        LeaveBalances::LeaveTypeId,
                        LeaveTypes::Table,
                        LeaveTypes::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(unique_index(
                "idx_leave_balances_unique",
                LeaveBalances::Table,
                [
                    LeaveBalances::StaffId,
                    LeaveBalances::LeaveTypeId,
                    LeaveBalances::Year,
                ],
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(LeaveRequests::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, LeaveRequests::Id))
                    .col(uuid_ref(LeaveRequests::StaffId))
                    .col(uuid_ref(LeaveRequests::LeaveTypeId))
                    .col(uuid_ref_null(LeaveRequests::ReviewedBy))
                    .col(ColumnDef::new(LeaveRequests::StartsOn).date().not_null())
                    .col(ColumnDef::new(LeaveRequests::EndsOn).date().not_null())
                    .col(ColumnDef::new(LeaveRequests::Days).decimal_len(5, 1).not_null())
                    .col(ColumnDef::new(LeaveRequests::Reason).text().null())
                    .col(
                        ColumnDef::new(LeaveRequests::Status)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(LeaveRequests::ReviewedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(LeaveRequests::ReviewNotes).text().null())
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_leave_requests_staff_id",
                        LeaveRequests::Table,
                        LeaveRequests::StaffId,
                        Staff::Table,
                        Staff::Id,
                    ))
                    .foreign_key(&mut cascade(
                        "fk_leave_requests_leave_type_id",
                        LeaveRequests::Table,
                        LeaveRequests::LeaveTypeId,
                        LeaveTypes::Table,
                        LeaveTypes::Id,
                    ))
                    .foreign_key(&mut set_null(
                        "fk_leave_requests_reviewed_by",
                        LeaveRequests::Table,
                        LeaveRequests::ReviewedBy,
                        Users::Table,
                        Users::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(index(
                "idx_leave_requests_staff_status",
                LeaveRequests::Table,
                [LeaveRequests::StaffId, LeaveRequests::Status],
            ))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_tables(manager, &["leave_requests", "leave_balances", "leave_types"]).await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Institutions {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Staff {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum LeaveTypes {
    Table,
    Id,
    InstitutionId,
    Name,
    DaysPerYear,
    IsPaid,
    CarriesOver,
}

#[derive(DeriveIden)]
enum LeaveBalances {
    Table,
    Id,
    StaffId,
    LeaveTypeId,
    Year,
    Entitled,
    Used,
    CarriedOver,
}

#[derive(DeriveIden)]
enum LeaveRequests {
    Table,
    Id,
    StaffId,
    LeaveTypeId,
    ReviewedBy,
    StartsOn,
    EndsOn,
    Days,
    Reason,
    Status,
    ReviewedAt,
    ReviewNotes,
}
