//! Migration to create payroll runs and payslips.

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
                    .table(PayrollRuns::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, PayrollRuns::Id))
                    .col(uuid_ref(PayrollRuns::InstitutionId))
                    .col(uuid_ref_null(PayrollRuns::ProcessedBy))
                    .col(ColumnDef::new(PayrollRuns::PeriodStart).date().not_null())
                    .col(ColumnDef::new(PayrollRuns::PeriodEnd).date().not_null())
                    .col(
                        ColumnDef::new(PayrollRuns::Status)
                            .string_len(16)
                            .not_null()
                            .default("draft"),
                    )
                    .col(
                        ColumnDef::new(PayrollRuns::ProcessedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_payroll_runs_institution_id",
                        PayrollRuns::Table,
                        PayrollRuns::InstitutionId,
                        Institutions::Table,
                        Institutions::Id,
                    ))
                    .foreign_key(&mut set_null(
                        "fk_payroll_runs_processed_by",
                        PayrollRuns::Table,
                        PayrollRuns::ProcessedBy,
                        Users::Table,
                        Users::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Payslips::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, Payslips::Id))
                    .col(uuid_ref(Payslips::PayrollRunId))
                    .col(uuid_ref(Payslips::StaffId))
                    .col(ColumnDef::new(Payslips::GrossPay).decimal_len(12, 2).not_null())
                    .col(
                        ColumnDef::new(Payslips::Deductions)
                            .decimal_len(12, 2)
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Payslips::Allowances)
                            .decimal_len(12, 2)
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Payslips::NetPay).decimal_len(12, 2).not_null())
                    .col(ColumnDef::new(Payslips::Breakdown).json_binary().null())
                    .col(
                        ColumnDef::new(Payslips::PaidAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_payslips_payroll_run_id",
                        Payslips::Table,
                        Payslips::PayrollRunId,
                        PayrollRuns::Table,
                        PayrollRuns::Id,
                    ))
                    .foreign_key(&mut cascade(
                        "fk_payslips_staff_id",
                        Payslips::Table,
                        Payslips::StaffId,
                        Staff::Table,
                        Staff::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(unique_index(
                "idx_payslips_run_staff",
                Payslips::Table,
                [Payslips::PayrollRunId, Payslips::StaffId],
            ))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_tables(manager, &["payslips", "payroll_runs"]).await
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
enum PayrollRuns {
    Table,
    Id,
    InstitutionId,
    ProcessedBy,
    PeriodStart,
    PeriodEnd,
    Status,
    ProcessedAt,
}

#[derive(DeriveIden)]
enum Payslips {
    Table,
    Id,
    PayrollRunId,
    StaffId,
    GrossPay,
    Deductions,
    Allowances,
    NetPay,
    Breakdown,
    PaidAt,
}
