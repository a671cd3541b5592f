//! Migration to create expense categories, expenses and budgets.

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
                    .table(ExpenseCategories::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, ExpenseCategories::Id))
                    .col(uuid_ref(ExpenseCategories::InstitutionId))
                    .col(ColumnDef::new(ExpenseCategories::Name).string().not_null())
                    .col(ColumnDef::new(ExpenseCategories::Description).text().null())
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_expense_categories_institution_id",
                        ExpenseCategories::Table,
                        ExpenseCategories::InstitutionId,
                        Institutions::Table,
                        Institutions::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Expenses::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, Expenses::Id))
                    .col(uuid_ref(Expenses::InstitutionId))
                    .col(uuid_ref_null(Expenses::ExpenseCategoryId))
                    .col(uuid_ref_null(Expenses::DepartmentId))
                    .col(uuid_ref_null(Expenses::RecordedBy))
                    .col(uuid_ref_null(Expenses::ApprovedBy))
                    .col(ColumnDef::new(Expenses::Description).string().not_null())
                    .col(ColumnDef::new(Expenses::Amount).decimal_len(12, 2).not_null())
                    .col(ColumnDef::new(Expenses::IncurredOn).date().not_null())
                    .col(ColumnDef::new(Expenses::Vendor).string().null())
                    .col(ColumnDef::new(Expenses::ReceiptNumber).string_len(64).null())
                    .col(
                        ColumnDef::new(Expenses::Status)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_expenses_institution_id",
                        Expenses::Table,
                        Expenses::InstitutionId,
                        Institutions::Table,
                        Institutions::Id,
                    ))
                    .foreign_key(&mut set_null(
                        "fk_expenses_expense_category_id",
                        Expenses::Table,
                        Expenses::ExpenseCategoryId,
                        ExpenseCategories::Table,
                        ExpenseCategories::Id,
                    ))
                    .foreign_key(&mut set_null(
                        "fk_expenses_department_id",
                        Expenses::Table,
                        Expenses::DepartmentId,
                        Departments::Table,
                        Departments::Id,
                    ))
                    .foreign_key(&mut set_null(
                        "fk_expenses_recorded_by",
                        Expenses::Table,
                        Expenses::RecordedBy,
                        Users::Table,
                        Users::Id,
                    ))
                    .foreign_key(&mut set_null(
                        "fk_expenses_approved_by",
                        Expenses::Table,
                        Expenses::ApprovedBy,
                        Users::Table,
                        Users::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(index(
                "idx_expenses_institution_incurred",
                Expenses::Table,
                [Expenses::InstitutionId, Expenses::IncurredOn],
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Budgets::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, Budgets::Id))
                    .col(uuid_ref(Budgets::AcademicYearId))
                    .col(uuid_ref(Budgets::ExpenseCategoryId))
                    .col(ColumnDef::new(Budgets::Amount).decimal_len(14, 2).not_null())
                    .col(ColumnDef::new(Budgets::Notes).text().null())
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_budgets_academic_year_id",
                        Budgets::Table,
                        Budgets::AcademicYearId,
                        AcademicYears::Table,
                        AcademicYears::Id,
                    ))
                    .foreign_key(&mut cascade(
                        "fk_budgets_expense_category_id",
                        Budgets::Table,
                        Budgets::ExpenseCategoryId,
                        ExpenseCategories::Table,
                        ExpenseCategories::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(unique_index(
                "idx_budgets_year_category",
                Budgets::Table,
                [Budgets::AcademicYearId, Budgets::ExpenseCategoryId],
            ))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_tables(manager, &["budgets", "expenses", "expense_categories"]).await
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
enum Departments {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum AcademicYears {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum ExpenseCategories {
    Table,
    Id,
    InstitutionId,
    Name,
    Description,
}

#[derive(DeriveIden)]
enum Expenses {
    Table,
    Id,
    InstitutionId,
    ExpenseCategoryId,
    DepartmentId,
    RecordedBy,
    ApprovedBy,
    Description,
    Amount,
    IncurredOn,
    Vendor,
    ReceiptNumber,
    Status,
}

#[derive(DeriveIden)]
enum Budgets {
    Table,
    Id,
    AcademicYearId,
    ExpenseCategoryId,
    Amount,
    Notes,
}
