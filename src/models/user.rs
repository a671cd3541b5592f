//! User entity model
//!
//! Every person on the platform is a user first; role-specific profiles such as
//! [`super::student`] reference `users.id`.

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

use crate::soft_delete::SoftDeletable;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub name: String,

    /// Login address; unique across all users, including soft-deleted ones
    #[sea_orm(unique)]
    pub email: String,

    pub email_verified_at: Option<DateTimeWithTimeZone>,

    /// Password hash; never a plaintext password
    pub password: String,

    pub phone: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub avatar_url: Option<String>,

    /// Account status (active|inactive|suspended)
    pub status: String,

    pub last_login_at: Option<DateTimeWithTimeZone>,

    pub remember_token: Option<String>,

    /// BCP 47 language tag used for notifications, defaults to `en`
    pub locale: String,

    /// IANA timezone name; `None` means the institution default
    pub timezone: Option<String>,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,

    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::student::Entity")]
    Student,
    #[sea_orm(has_many = "super::audit_log::Entity")]
    AuditLogs,
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::audit_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AuditLogs.def()
    }
}

impl SoftDeletable for Entity {
    fn deleted_at_column() -> Self::Column {
        Column::DeletedAt
    }
}

impl ActiveModelBehavior for ActiveModel {}
