//! # Repository Layer
//!
//! Repositories wrap SeaORM operations for the entities in [`crate::models`].
//! Soft-deletable entities take a [`crate::soft_delete::TrashedScope`] on reads.

pub mod audit_log;
pub mod student;
pub mod user;

pub use audit_log::{AuditLogRepository, NewAuditEntry};
pub use student::{EnrollStudentRequest, StudentRepository};
pub use user::{CreateUserRequest, UserRepository};
