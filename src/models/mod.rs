//! # Data Models
//!
//! SeaORM entities for the tables the data-access layer works with. The rest of
//! the schema is managed by migrations only.

pub mod audit_log;
pub mod model_has_role;
pub mod permission;
pub mod role;
pub mod role_has_permission;
pub mod student;
pub mod user;

pub use audit_log::Entity as AuditLog;
pub use model_has_role::Entity as ModelHasRole;
pub use permission::Entity as Permission;
pub use role::Entity as Role;
pub use role_has_permission::Entity as RoleHasPermission;
pub use student::Entity as Student;
pub use user::Entity as User;
