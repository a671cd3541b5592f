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
                    .table(StaffQualifications::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, StaffQualifications::Id))
                    .col(uuid_ref(StaffQualifications::StaffId))
                    .col(ColumnDef::new(StaffQualifications::Title).string().not_null())
                    .col(ColumnDef::new(StaffQualifications::Institution).string().null())
                    .col(ColumnDef::new(StaffQualifications::AwardedOn).date().null())
                    .col(ColumnDef::new(StaffQualifications::ExpiresOn).date().null())
                    .col(
                        ColumnDef::new(StaffQualifications::CertificateNumber)
                            .string_len(64)
                            .null(),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_staff_qualifications_staff_id",
                        StaffQualifications::Table,
                        StaffQualifications::StaffId,
                        Staff::Table,
                        Staff::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PerformanceReviews::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, PerformanceReviews::Id))
                    .col(uuid_ref(PerformanceReviews::StaffId))
                    .col(uuid_ref_null(PerformanceReviews::ReviewerId))
                    .col(ColumnDef::new(PerformanceReviews::PeriodStart).date().not_null())
                    .col(ColumnDef::new(PerformanceReviews::PeriodEnd).date().not_null())
                    .col(ColumnDef::new(PerformanceReviews::Rating).small_integer().null())
                    .col(ColumnDef::new(PerformanceReviews::Strengths).text().null())
                    .col(ColumnDef::new(PerformanceReviews::Improvements).text().null())
                    .col(ColumnDef::new(PerformanceReviews::Goals).text().null())
                    .col(
                        ColumnDef::new(PerformanceReviews::Status)
                            .string_len(16)
                            .not_null()
                            .default("draft"),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_performance_reviews_staff_id",
                        PerformanceReviews::Table,
                        PerformanceReviews::StaffId,
                        Staff::Table,
                        Staff::Id,
                    ))
                    .foreign_key(&mut set_null(
                        "fk_performance_reviews_reviewer_id",
                        PerformanceReviews::Table,
                        PerformanceReviews::ReviewerId,
                        Users::Table,
                        Users::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(index(
                "idx_performance_reviews_staff_period",
                PerformanceReviews::Table,
                [PerformanceReviews::StaffId, PerformanceReviews::PeriodStart],
            ))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_tables(manager, &["performance_reviews", "staff_qualifications"]).await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Staff {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum StaffQualifications {
    Table,
    Id,
    StaffId,
    Title,
    Institution,
    AwardedOn,
    ExpiresOn,
    CertificateNumber,
}

#[derive(DeriveIden)]
enum PerformanceReviews {
    Table,
    Id,
    StaffId,
    ReviewerId,
    PeriodStart,
    PeriodEnd,
    Rating,
    Strengths,
    Improvements,
    Goals,
    Status,
}
