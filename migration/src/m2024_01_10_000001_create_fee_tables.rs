//! Migration to create fee categories, structures, invoices and payments.
//!
//! A fee structure prices a category for a grade level and academic year.
//! Invoices are raised per student and itemised; payments settle an invoice.

use sea_orm_migration::prelude::*;

use crate::common::{
    cascade, created_at, drop_tables, index, set_null, updated_at, uuid_pk, uuid_ref,
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
                    .table(FeeCategories::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, FeeCategories::Id))
                    .col(uuid_ref(FeeCategories::InstitutionId))
                    .col(ColumnDef::new(FeeCategories::Name).string().not_null())
                    .col(ColumnDef::new(FeeCategories::Description).text().null())
                    .col(
                        ColumnDef::new(FeeCategories::IsRecurring)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_fee_categories_institution_id",
                        FeeCategories::Table,
                        FeeCategories::InstitutionId,
                        Institutions::Table,
                        Institutions::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FeeStructures::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, FeeStructures::Id))
                    .col(uuid_ref(FeeStructures::FeeCategoryId))
                    .col(uuid_ref(FeeStructures::AcademicYearId))
                    .col(uuid_ref_null(FeeStructures::GradeLevelId))
                    .col(
                        ColumnDef::new(FeeStructures::Amount)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FeeStructures::Frequency)
                            .string_len(16)
                            .not_null()
                            .default("term"),
                    )
                    .col(ColumnDef::new(FeeStructures::DueDay).small_integer().null())
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_fee_structures_fee_category_id",
                        FeeStructures::Table,
                        FeeStructures::FeeCategoryId,
                        FeeCategories::Table,
                        FeeCategories::Id,
                    ))
                    .foreign_key(&mut cascade(
                        "fk_fee_structures_academic_year_id",
                        FeeStructures::Table,
                        FeeStructures::AcademicYearId,
                        AcademicYears::Table,
                        AcademicYears::Id,
                    ))
                    .foreign_key(&mut set_null(
                        "fk_fee_structures_grade_level_id",
                        FeeStructures::Table,
                        FeeStructures::GradeLevelId,
                        GradeLevels::Table,
                        GradeLevels::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FeeInvoices::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, FeeInvoices::Id))
                    .col(uuid_ref(FeeInvoices::StudentId))
                    .col(uuid_ref_null(FeeInvoices::TermId))
                    .col(
                        ColumnDef::new(FeeInvoices::InvoiceNumber)
                            .string_len(32)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(FeeInvoices::IssuedOn).date().not_null())
                    .col(ColumnDef::new(FeeInvoices::DueOn).date().not_null())
                    .col(
                        ColumnDef::new(FeeInvoices::TotalAmount)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FeeInvoices::AmountPaid)
                            .decimal_len(12, 2)
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(FeeInvoices::Status)
                            .string_len(16)
                            .not_null()
                            .default("unpaid"),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_fee_invoices_student_id",
                        FeeInvoices::Table,
                        FeeInvoices::StudentId,
                        Students::Table,
                        Students::Id,
                    ))
                    .foreign_key(&mut set_null(
                        "fk_fee_invoices_term_id",
                        FeeInvoices::Table,
                        FeeInvoices::TermId,
                        Terms::Table,
                        Terms::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(index(
                "idx_fee_invoices_student_status",
                FeeInvoices::Table,
                [FeeInvoices::StudentId, FeeInvoices::Status],
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FeeInvoiceItems::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, FeeInvoiceItems::Id))
                    .col(uuid_ref(FeeInvoiceItems::FeeInvoiceId))
                    .col(uuid_ref_null(FeeInvoiceItems::FeeStructureId))
                    .col(ColumnDef::new(FeeInvoiceItems::Description).string().not_null())
                    .col(
                        ColumnDef::new(FeeInvoiceItems::Amount)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_fee_invoice_items_fee_invoice_id",
                        FeeInvoiceItems::Table,
                        FeeInvoiceItems::FeeInvoiceId,
                        FeeInvoices::Table,
                        FeeInvoices::Id,
                    ))
                    .foreign_key(&mut set_null(
                        "fk_fee_invoice_items_fee_structure_id",
                        FeeInvoiceItems::Table,
                        FeeInvoiceItems::FeeStructureId,
                        FeeStructures::Table,
                        FeeStructures::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FeePayments::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, FeePayments::Id))
                    .col(uuid_ref(FeePayments::FeeInvoiceId))
                    .col(uuid_ref_null(FeePayments::ReceivedBy))
                    .col(
                        ColumnDef::new(FeePayments::Amount)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(FeePayments::Method).string_len(32).not_null())
                    .col(
                        ColumnDef::new(FeePayments::Reference)
                            .string_len(64)
                            .null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(FeePayments::PaidAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_fee_payments_fee_invoice_id",
                        FeePayments::Table,
                        FeePayments::FeeInvoiceId,
                        FeeInvoices::Table,
                        FeeInvoices::Id,
                    ))
                    .foreign_key(&mut set_null(
                        "fk_fee_payments_received_by",
                        FeePayments::Table,
                        FeePayments::ReceivedBy,
                        Users::Table,
                        Users::Id,
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
                "fee_payments",
                "fee_invoice_items",
                "fee_invoices",
                "fee_structures",
                "fee_categories",
            ],
        )
        .await
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
enum AcademicYears {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Terms {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum GradeLevels {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Students {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum FeeCategories {
    Table,
    Id,
    InstitutionId,
    Name,
    Description,
    IsRecurring,
}

#[derive(DeriveIden)]
enum FeeStructures {
    Table,
    Id,
    FeeCategoryId,
    AcademicYearId,
    GradeLevelId,
    Amount,
    Frequency,
    DueDay,
}

#[derive(DeriveIden)]
enum FeeInvoices {
    Table,
    Id,
    StudentId,
    TermId,
    InvoiceNumber,
    IssuedOn,
    DueOn,
    TotalAmount,
    AmountPaid,
    Status,
}

#[derive(DeriveIden)]
enum FeeInvoiceItems {
    Table,
    Id,
    FeeInvoiceId,
    FeeStructureId,
    Description,
    Amount,
}

#[derive(DeriveIden)]
enum FeePayments {
    Table,
    Id,
    FeeInvoiceId,
    ReceivedBy,
    Amount,
    Method,
    Reference,
    PaidAt,
}
