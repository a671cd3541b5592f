//! Migration to create the library catalogue and its members.
//!
//! A book is a catalogue title; each physical item on the shelf is a `book_copies`
//! row with its own barcode. Removing a book removes its copies.

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
                    .table(LibraryCategories::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, LibraryCategories::Id))
                    .col(uuid_ref_null(LibraryCategories::ParentId))
                    .col(ColumnDef::new(LibraryCategories::Name).string().not_null())
                    .col(ColumnDef::new(LibraryCategories::Code).string_len(32).null())
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut set_null(
                        "fk_library_categories_parent_id",
                        LibraryCategories::Table,
                        LibraryCategories::ParentId,
                        LibraryCategories::Table,
                        LibraryCategories::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Books::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, Books::Id))
                    .col(uuid_ref(Books::InstitutionId))
                    .col(uuid_ref_null(Books::LibraryCategoryId))
                    .col(
                        ColumnDef::new(Books::Isbn)
                            .string_len(20)
                            .null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Books::Title).string().not_null())
                    .col(ColumnDef::new(Books::Author).string().null())
                    .col(ColumnDef::new(Books::Publisher).string().null())
                    .col(ColumnDef::new(Books::PublishedYear).small_integer().null())
                    .col(ColumnDef::new(Books::Edition).string_len(32).null())
                    .col(ColumnDef::new(Books::Language).string_len(16).null())
                    .col(ColumnDef::new(Books::ShelfLocation).string().null())
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_books_institution_id",
                        Books::Table,
                        Books::InstitutionId,
                        Institutions::Table,
                        Institutions::Id,
                    ))
                    .foreign_key(&mut set_null(
                        "fk_books_library_category_id",
                        Books::Table,
                        Books::LibraryCategoryId,
                        LibraryCategories::Table,
                        LibraryCategories::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(index("idx_books_title", Books::Table, [Books::Title]))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BookCopies::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, BookCopies::Id))
                    .col(uuid_ref(BookCopies::BookId))
                    .col(
                        ColumnDef::new(BookCopies::Barcode)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(BookCopies::Condition)
                            .string_len(32)
                            .not_null()
                            .default("good"),
                    )
                    .col(
                        ColumnDef::new(BookCopies::Status)
                            .string_len(32)
                            .not_null()
                            .default("available"),
                    )
                    .col(ColumnDef::new(BookCopies::AcquiredOn).date().null())
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_book_copies_book_id",
                        BookCopies::Table,
                        BookCopies::BookId,
                        Books::Table,
                        Books::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(LibraryMembers::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, LibraryMembers::Id))
                    .col(uuid_ref(LibraryMembers::UserId).unique_key().to_owned())
                    .col(
                        ColumnDef::new(LibraryMembers::MembershipNumber)
                            .string_len(32)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(LibraryMembers::MemberType)
                            .string_len(32)
                            .not_null()
                            .default("student"),
                    )
                    .col(
                        ColumnDef::new(LibraryMembers::MaxLoans)
                            .small_integer()
                            .not_null()
                            .default(3),
                    )
                    .col(ColumnDef::new(LibraryMembers::ExpiresOn).date().null())
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_library_members_user_id",
                        LibraryMembers::Table,
                        LibraryMembers::UserId,
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
            &["library_members", "book_copies", "books", "library_categories"],
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
enum LibraryCategories {
    Table,
    Id,
    ParentId,
    Name,
    Code,
}

#[derive(DeriveIden)]
enum Books {
    Table,
    Id,
    InstitutionId,
    LibraryCategoryId,
    Isbn,
    Title,
    Author,
    Publisher,
    PublishedYear,
    Edition,
    Language,
    ShelfLocation,
}

#[derive(DeriveIden)]
enum BookCopies {
    Table,
    Id,
    BookId,
    Barcode,
    Condition,
    Status,
    AcquiredOn,
}

#[derive(DeriveIden)]
enum LibraryMembers {
    Table,
    Id,
    UserId,
    MembershipNumber,
    MemberType,
    MaxLoans,
    ExpiresOn,
}
