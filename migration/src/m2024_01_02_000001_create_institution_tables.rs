//! Migration to create institutions and their academic calendar.
//!
//! An institution owns campuses, departments and academic years; each academic
//! year is split into terms.

use sea_orm_migration::prelude::*;

use crate::common::{cascade, created_at, drop_tables, index, updated_at, uuid_pk, uuid_ref};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Institutions::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, Institutions::Id))
                    .col(ColumnDef::new(Institutions::Name).string().not_null())
                    .col(
                        ColumnDef::new(Institutions::Code)
                            .string_len(32)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Institutions::Address).text().null())
                    .col(ColumnDef::new(Institutions::Phone).string().null())
                    .col(ColumnDef::new(Institutions::Email).string().null())
                    .col(ColumnDef::new(Institutions::Website).string().null())
                    .col(ColumnDef::new(Institutions::LogoUrl).text().null())
                    .col(
                        ColumnDef::new(Institutions::Timezone)
                            .string()
                            .not_null()
                            .default("UTC"),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Campuses::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, Campuses::Id))
                    .col(uuid_ref(Campuses::InstitutionId))
                    .col(ColumnDef::new(Campuses::Name).string().not_null())
                    .col(ColumnDef::new(Campuses::Address).text().null())
                    .col(
                        ColumnDef::new(Campuses::IsMain)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_campuses_institution_id",
                        Campuses::Table,
                        Campuses::InstitutionId,
                        Institutions::Table,
                        Institutions::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AcademicYears::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, AcademicYears::Id))
                    .col(uuid_ref(AcademicYears::InstitutionId))
                    .col(ColumnDef::new(AcademicYears::Name).string().not_null())
                    .col(ColumnDef::new(AcademicYears::StartsOn).date().not_null())
                    .col(ColumnDef::new(AcademicYears::EndsOn).date().not_null())
                    .col(
                        ColumnDef::new(AcademicYears::IsCurrent)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_academic_years_institution_id",
                        AcademicYears::Table,
                        AcademicYears::InstitutionId,
                        Institutions::Table,
                        Institutions::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(index(
                "idx_academic_years_institution_current",
                AcademicYears::Table,
                [AcademicYears::InstitutionId, AcademicYears::IsCurrent],
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Terms::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, Terms::Id))
                    .col(uuid_ref(Terms::AcademicYearId))
                    .col(ColumnDef::new(Terms::Name).string().not_null())
                    .col(ColumnDef::new(Terms::Sequence).small_integer().not_null())
                    .col(ColumnDef::new(Terms::StartsOn).date().not_null())
                    .col(ColumnDef::new(Terms::EndsOn).date().not_null())
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_terms_academic_year_id",
                        Terms::Table,
                        Terms::AcademicYearId,
                        AcademicYears::Table,
                        AcademicYears::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Departments::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, Departments::Id))
                    .col(uuid_ref(Departments::InstitutionId))
                    .col(ColumnDef::new(Departments::Name).string().not_null())
                    .col(ColumnDef::new(Departments::Code).string_len(32).null())
                    .col(ColumnDef::new(Departments::Description).text().null())
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_departments_institution_id",
                        Departments::Table,
                        Departments::InstitutionId,
                        Institutions::Table,
                        Institutions::Id,
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
                "departments",
                "terms",
                "academic_years",
                "campuses",
                "institutions",
            ],
        )
        .await
    }
}

#[derive(DeriveIden)]
enum Institutions {
    Table,
    Id,
    Name,
    Code,
    Address,
    Phone,
    Email,
    Website,
    LogoUrl,
    Timezone,
}

#[derive(DeriveIden)]
enum Campuses {
    Table,
    Id,
    InstitutionId,
    Name,
    Address,
    IsMain,
}

#[derive(DeriveIden)]
enum AcademicYears {
    Table,
    Id,
    InstitutionId,
    Name,
    StartsOn,
    EndsOn,
    IsCurrent,
}

#[derive(DeriveIden)]
enum Terms {
    Table,
    Id,
    AcademicYearId,
    Name,
    Sequence,
    StartsOn,
    EndsOn,
}

#[derive(DeriveIden)]
enum Departments {
    Table,
    Id,
    InstitutionId,
    Name,
    Code,
    Description,
}
