//! Role entity model

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

use crate::soft_delete::SoftDeletable;

/// Named bundle of permissions, unique per `(name, guard_name)`
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "roles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub guard_name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::role_has_permission::Entity")]
    RoleHasPermissions,
    #[sea_orm(has_many = "super::model_has_role::Entity")]
    ModelHasRoles,
}

impl Related<super::role_has_permission::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RoleHasPermissions.def()
    }
}

impl Related<super::model_has_role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ModelHasRoles.def()
    }
}

impl Related<super::permission::Entity> for Entity {
    fn to() -> RelationDef {
        super::role_has_permission::Relation::Permission.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::role_has_permission::Relation::Role.def().rev())
    }
}

impl SoftDeletable for Entity {
    fn deleted_at_column() -> Self::Column {
        Column::DeletedAt
    }
}

impl ActiveModelBehavior for ActiveModel {}
