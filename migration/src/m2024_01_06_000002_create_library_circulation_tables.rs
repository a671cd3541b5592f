//! Migration to create loans, reservations and fines.

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
                    .table(BookLoans::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, BookLoans::Id))
                    .col(uuid_ref(BookLoans::BookCopyId))
                    .col(uuid_ref(BookLoans::LibraryMemberId))
                    .col(uuid_ref_null(BookLoans::IssuedBy))
                    .col(ColumnDef::new(BookLoans::IssuedOn).date().not_null())
                    .col(ColumnDef::new(BookLoans::DueOn).date().not_null())
                    .col(ColumnDef::new(BookLoans::ReturnedOn).date().null())
                    .col(
                        ColumnDef::new(BookLoans::RenewalCount)
                            .small_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(BookLoans::Status)
                            .string_len(16)
                            .not_null()
                            .default("issued"),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_book_loans_book_copy_id",
                        BookLoans::Table,
                        BookLoans::BookCopyId,
                        BookCopies::Table,
                        BookCopies::Id,
                    ))
                    .foreign_key(&mut cascade(
                        "fk_book_loans_library_member_id",
                        BookLoans::Table,
                        BookLoans::LibraryMemberId,
                        LibraryMembers::Table,
                        LibraryMembers::Id,
                    ))
                    .foreign_key(&mut set_null(
                        "fk_book_loans_issued_by",
                        BookLoans::Table,
                        BookLoans::IssuedBy,
                        Users::Table,
                        Users::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        // Overdue sweeps filter on status and due date.
        manager
            .create_index(index(
                "idx_book_loans_status_due",
                BookLoans::Table,
                [BookLoans::Status, BookLoans::DueOn],
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BookReservations::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, BookReservations::Id))
                    .col(uuid_ref(BookReservations::BookId))
                    .col(uuid_ref(BookReservations::LibraryMemberId))
                    .col(
                        ColumnDef::new(BookReservations::ReservedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(BookReservations::ExpiresAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(BookReservations::Status)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_book_reservations_book_id",
                        BookReservations::Table,
                        BookReservations::BookId,
                        Books::Table,
                        Books::Id,
                    ))
                    .foreign_key(&mut cascade(
                        "fk_book_reservations_library_member_id",
                        BookReservations::Table,
                        BookReservations::LibraryMemberId,
                        LibraryMembers::Table,
                        LibraryMembers::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(LibraryFines::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, LibraryFines::Id))
                    .col(uuid_ref(LibraryFines::BookLoanId))
                    .col(uuid_ref(LibraryFines::LibraryMemberId))
                    .col(uuid_ref_null(LibraryFines::WaivedBy))
                    .col(
                        ColumnDef::new(LibraryFines::Amount)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(LibraryFines::Reason).string().not_null())
                    .col(
                        ColumnDef::new(LibraryFines::PaidAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(LibraryFines::WaivedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_library_fines_book_loan_id",
                        LibraryFines::Table,
                        LibraryFines::BookLoanId,
                        BookLoans::Table,
                        BookLoans::Id,
                    ))
                    .foreign_key(&mut cascade(
                        "fk_library_fines_library_member_id",
                        LibraryFines::Table,
                        LibraryFines::LibraryMemberId,
                        LibraryMembers::Table,
                        LibraryMembers::Id,
                    ))
                    .foreign_key(&mut set_null(
                        "fk_library_fines_waived_by",
                        LibraryFines::Table,
                        LibraryFines::WaivedBy,
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
            &["library_fines", "book_reservations", "book_loans"],
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
enum Books {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum BookCopies {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum LibraryMembers {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum BookLoans {
    Table,
    Id,
    BookCopyId,
    LibraryMemberId,
    IssuedBy,
    IssuedOn,
    DueOn,
    ReturnedOn,
    RenewalCount,
    Status,
}

#[derive(DeriveIden)]
enum BookReservations {
    Table,
    Id,
    BookId,
    LibraryMemberId,
    ReservedAt,
    ExpiresAt,
    Status,
}

#[derive(DeriveIden)]
enum LibraryFines {
    Table,
    Id,
    BookLoanId,
    LibraryMemberId,
    WaivedBy,
    Amount,
    Reason,
    PaidAt,
    WaivedAt,
}
