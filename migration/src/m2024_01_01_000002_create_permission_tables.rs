//! Migration to create role and permission tables.
//!
//! Roles and permissions are attached to any model through the polymorphic
//! `(model_type, model_id)` pair. The pivot tables use composite primary keys so a
//! role or permission can be granted to the same model at most once.

use sea_orm_migration::prelude::*;

use crate::common::{cascade, created_at, index, unique_index, updated_at, uuid_pk, uuid_ref};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Permissions::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, Permissions::Id))
                    .col(ColumnDef::new(Permissions::Name).string().not_null())
                    .col(
                        ColumnDef::new(Permissions::GuardName)
                            .string()
                            .not_null()
                            .default("web"),
                    )
                    .col(created_at())
                    .col(updated_at())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(unique_index(
                "idx_permissions_name_guard",
                Permissions::Table,
                [Permissions::Name, Permissions::GuardName],
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Roles::Table)
                    .if_not_exists()
                    .col(uuid_pk(manager, Roles::Id))
                    .col(ColumnDef::new(Roles::Name).string().not_null())
                    .col(
                        ColumnDef::new(Roles::GuardName)
                            .string()
                            .not_null()
                            .default("web"),
                    )
                    .col(ColumnDef::new(Roles::Description).text().null())
                    .col(created_at())
                    .col(updated_at())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(unique_index(
                "idx_roles_name_guard",
                Roles::Table,
                [Roles::Name, Roles::GuardName],
            ))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ModelHasPermissions::Table)
                    .if_not_exists()
                    .col(uuid_ref(ModelHasPermissions::PermissionId))
                    .col(
                        ColumnDef::new(ModelHasPermissions::ModelType)
                            .string()
                            .not_null(),
                    )
                    .col(uuid_ref(ModelHasPermissions::ModelId))
                    .primary_key(
                        Index::create()
                            .name("pk_model_has_permissions")
                            .col(ModelHasPermissions::PermissionId)
                            .col(ModelHasPermissions::ModelId)
                            .col(ModelHasPermissions::ModelType),
                    )
                    .foreign_key(&mut cascade(
                        "fk_model_has_permissions_permission_id",
                        ModelHasPermissions::Table,
                        ModelHasPermissions::PermissionId,
                        Permissions::Table,
                        Permissions::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ModelHasRoles::Table)
                    .if_not_exists()
                    .col(uuid_ref(ModelHasRoles::RoleId))
                    .col(ColumnDef::new(ModelHasRoles::ModelType).string().not_null())
                    .col(uuid_ref(ModelHasRoles::ModelId))
                    .primary_key(
                        Index::create()
                            .name("pk_model_has_roles")
                            .col(ModelHasRoles::RoleId)
                            .col(ModelHasRoles::ModelId)
                            .col(ModelHasRoles::ModelType),
                    )
                    .foreign_key(&mut cascade(
                        "fk_model_has_roles_role_id",
                        ModelHasRoles::Table,
                        ModelHasRoles::RoleId,
                        Roles::Table,
                        Roles::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RoleHasPermissions::Table)
                    .if_not_exists()
                    .col(uuid_ref(RoleHasPermissions::PermissionId))
                    .col(uuid_ref(RoleHasPermissions::RoleId))
                    .primary_key(
                        Index::create()
                            .name("pk_role_has_permissions")
                            .col(RoleHasPermissions::PermissionId)
                            .col(RoleHasPermissions::RoleId),
                    )
                    .foreign_key(&mut cascade(
                        "fk_role_has_permissions_permission_id",
                        RoleHasPermissions::Table,
                        RoleHasPermissions::PermissionId,
                        Permissions::Table,
                        Permissions::Id,
                    ))
                    .foreign_key(&mut cascade(
                        "fk_role_has_permissions_role_id",
                        RoleHasPermissions::Table,
                        RoleHasPermissions::RoleId,
                        Roles::Table,
                        Roles::Id,
                    ))
                    .to_owned(),
            )
            .await?;

        // Lookups go from the model to its roles, the reverse of the primary key order.
        manager
            .create_index(index(
                "idx_model_has_roles_model",
                ModelHasRoles::Table,
                [ModelHasRoles::ModelId, ModelHasRoles::ModelType],
            ))
            .await?;

        manager
            .create_index(index(
                "idx_model_has_permissions_model",
                ModelHasPermissions::Table,
                [ModelHasPermissions::ModelId, ModelHasPermissions::ModelType],
            ))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RoleHasPermissions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ModelHasRoles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ModelHasPermissions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Roles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Permissions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Permissions {
    Table,
    Id,
    Name,
    GuardName,
}

#[derive(DeriveIden)]
enum Roles {
    Table,
    Id,
    Name,
    GuardName,
    Description,
}

#[derive(DeriveIden)]
enum ModelHasPermissions {
    Table,
    PermissionId,
    ModelType,
    ModelId,
}

#[derive(DeriveIden)]
enum ModelHasRoles {
    Table,
    RoleId,
    ModelType,
    ModelId,
}

#[derive(DeriveIden)]
enum RoleHasPermissions {
    Table,
    PermissionId,
    RoleId,
}
