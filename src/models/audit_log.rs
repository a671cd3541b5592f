//! Audit log entity model
//!
//! Append-only. The table has neither `updated_at` nor `deleted_at`.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde_json::Value as JsonValue;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "audit_logs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Acting user; cleared when the account is removed
    pub user_id: Option<Uuid>,

    /// What happened (created|updated|deleted|restored|...)
    pub event: String,

    /// Kind of record the event touched, e.g. `students`
    pub auditable_type: String,

    pub auditable_id: Option<Uuid>,

    #[sea_orm(column_type = "Json", nullable)]
    pub old_values: Option<JsonValue>,

    #[sea_orm(column_type = "Json", nullable)]
    pub new_values: Option<JsonValue>,

    pub ip_address: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub user_agent: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub url: Option<String>,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "SetNull"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
