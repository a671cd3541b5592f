//! Migration to create the asset register.

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
                    .table(AssetCategories::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, AssetCategories::Id))
                    .col(uuid_ref(AssetCategories::InstitutionId))
                    .col(ColumnDef::new(AssetCategories::Name).string().not_null())
                    .col(
                        ColumnDef::new(AssetCategories::DepreciationRate)
                            .decimal_len(5, 2)
                            .null(),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_asset_categories_institution_id",
                        AssetCategories::Table,
                        AssetCategories::InstitutionId,
                        Institutions::Table,
                        Institutions::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Assets::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, Assets::Id))
                    .col(uuid_ref(Assets::InstitutionId))
                    .col(uuid_ref_null(Assets::AssetCategoryId))
                    .col(uuid_ref_null(Assets::RoomId))
                    .col(
                        ColumnDef::new(Assets::AssetTag)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Assets::Name).string().not_null())
                    .col(ColumnDef::new(Assets::SerialNumber).string_len(128).null())
                    .col(ColumnDef::new(Assets::PurchasedOn).date().null())
                    .col(ColumnDef::new(Assets::PurchaseCost).decimal_len(12, 2).null())
                    .col(
                        ColumnDef::new(Assets::Condition)
                            .string_len(32)
                            .not_null()
                            .default("good"),
                    )
                    .col(
                        ColumnDef::new(Assets::Status)
                            .string_len(16)
                            .not_null()
                            .default("in_service"),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_assets_institution_id",
                        Assets::Table,
                        Assets::InstitutionId,
                        Institutions::Table,
                        Institutions::Id,
                    ))
                    .foreign_key(&mut set_null(
                        "fk_assets_asset_category_id",
                        Assets::Table,
                        Assets::AssetCategoryId,
                        AssetCategories::Table,
                        AssetCategories::Id,
                    ))
                    .foreign_key(&mut set_null(
                        "fk_assets_room_id",
                        Assets::Table,
                        Assets::RoomId,
                        Rooms::Table,
                        Rooms::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AssetAssignments::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, AssetAssignments::Id))
                    .col(uuid_ref(AssetAssignments::AssetId))
                    .col(uuid_ref(AssetAssignments::AssignedTo))
                    .col(uuid_ref_null(AssetAssignments::AssignedBy))
                    .col(ColumnDef::new(AssetAssignments::AssignedOn).date().not_null())
                    .col(ColumnDef::new(AssetAssignments::ReturnedOn).date().null())
                    .col(ColumnDef::new(AssetAssignments::Notes).text().null())
                    .col(created_at())
                    .col(updated_at())
                    .foreign_key(&mut cascade(
                        "fk_asset_assignments_asset_id",
                        AssetAssignments::Table,
                        AssetAssignments::AssetId,
                        Assets::Table,
                        Assets::Id,
                    ))
                    .foreign_key(&mut cascade(
                        "fk_asset_assignments_assigned_to",
                        AssetAssignments::Table,
                        AssetAssignments::AssignedTo,
                        Users::Table,
                        Users::Id,
                    ))
                    .foreign_key(&mut set_null(
                        "fk_asset_assignments_assigned_by",
                        AssetAssignments::Table,
                        AssetAssignments::AssignedBy,
                        Users::Table,
                        Users::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(index(
                "idx_asset_assignments_asset_returned",
                AssetAssignments::Table,
                [AssetAssignments::AssetId, AssetAssignments::ReturnedOn],
            ))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        drop_tables(manager, &["asset_assignments", "assets", "asset_categories"]).await
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
enum Rooms {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum AssetCategories {
    Table,
    Id,
    InstitutionId,
    Name,
    DepreciationRate,
}

#[derive(DeriveIden)]
enum Assets {
    Table,
    Id,
    InstitutionId,
    AssetCategoryId,
    RoomId,
    AssetTag,
    Name,
    SerialNumber,
    PurchasedOn,
    PurchaseCost,
    Condition,
    Status,
}

#[derive(DeriveIden)]
enum AssetAssignments {
    Table,
    Id,
    AssetId,
    AssignedTo,
    AssignedBy,
    AssignedOn,
    ReturnedOn,
    Notes,
}
