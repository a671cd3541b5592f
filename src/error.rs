//! Error types shared by the data-access layer.
//!
//! Constraint violations surface from the driver as opaque database errors.
//! [`classify`] recognises the unique and foreign-key cases so repositories can
//! report them as [`RepositoryError::Conflict`] instead of a generic failure.

use sea_orm::{DbErr, RuntimeErr};
use thiserror::Error;

/// Kind of integrity constraint a statement tripped over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintViolation {
    Unique,
    ForeignKey,
}

/// Errors returned by repositories.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {message}")]
    Database {
        message: String,
        #[source]
        source: Option<DbErr>,
    },
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("conflict: {0}")]
    Conflict(String),
}

impl RepositoryError {
    pub fn database_error(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
            source: None,
        }
    }

    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Maps a driver error, turning constraint violations into [`RepositoryError::Conflict`].
    pub fn from_db(error: DbErr, context: &str) -> Self {
        match classify(&error) {
            Some(ConstraintViolation::Unique) => {
                tracing::debug!(?error, context, "Unique constraint violation detected");
                Self::Conflict(format!("{context}: record already exists"))
            }
            Some(ConstraintViolation::ForeignKey) => {
                tracing::debug!(?error, context, "Foreign key violation detected");
                Self::Conflict(format!("{context}: referenced record is missing or in use"))
            }
            None => Self::Database {
                message: context.to_string(),
                source: Some(error),
            },
        }
    }
}

impl From<DbErr> for RepositoryError {
    fn from(error: DbErr) -> Self {
        Self::from_db(error, "query failed")
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

const PG_UNIQUE: &str = "23505";
const PG_FOREIGN_KEY: &str = "23503";
const SQLITE_UNIQUE_CODES: &[&str] = &["1555", "2067"];
const SQLITE_FOREIGN_KEY: &str = "787";

/// Recognises unique and foreign-key violations from Postgres and SQLite.
pub fn classify(error: &DbErr) -> Option<ConstraintViolation> {
    let sqlx_err = match error {
        DbErr::Query(RuntimeErr::SqlxError(sqlx_err))
        | DbErr::Exec(RuntimeErr::SqlxError(sqlx_err)) => sqlx_err,
        _ => return None,
    };

    let db_error = sqlx_err.as_database_error()?;

    if db_error.is_unique_violation() {
        return Some(ConstraintViolation::Unique);
    }
    if db_error.is_foreign_key_violation() {
        return Some(ConstraintViolation::ForeignKey);
    }

    let code = db_error.code()?;
    let code = code.as_ref();
    if code == PG_UNIQUE || SQLITE_UNIQUE_CODES.contains(&code) {
        Some(ConstraintViolation::Unique)
    } else if code == PG_FOREIGN_KEY || code == SQLITE_FOREIGN_KEY {
        Some(ConstraintViolation::ForeignKey)
    } else {
        None
    }
}

pub fn is_unique_violation(error: &DbErr) -> bool {
    classify(error) == Some(ConstraintViolation::Unique)
}

pub fn is_foreign_key_violation(error: &DbErr) -> bool {
    classify(error) == Some(ConstraintViolation::ForeignKey)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_driver_errors_are_not_constraint_violations() {
        let err = DbErr::RecordNotFound("users".to_string());
        assert_eq!(classify(&err), None);
        assert!(!is_unique_violation(&err));
    }

    #[test]
    fn unclassified_errors_keep_their_source() {
        let err = RepositoryError::from_db(DbErr::Custom("boom".to_string()), "loading user");
        match err {
            RepositoryError::Database { message, source } => {
                assert_eq!(message, "loading user");
                assert!(source.is_some());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
