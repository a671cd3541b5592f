//! Soft-delete query scoping.
//!
//! Soft-deleted rows stay in their table with `deleted_at` set. Queries on
//! soft-deletable entities pick one of three views through [`TrashedScope`];
//! the default hides trashed rows.

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Select};
use serde::{Deserialize, Serialize};

/// Entity with a nullable `deleted_at` timestamp column.
pub trait SoftDeletable: EntityTrait {
    fn deleted_at_column() -> Self::Column;
}

/// Which rows a query over a soft-deletable entity should see.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrashedScope {
    /// Live rows only.
    #[default]
    WithoutTrashed,
    /// Live and soft-deleted rows.
    WithTrashed,
    /// Soft-deleted rows only.
    OnlyTrashed,
}

impl TrashedScope {
    pub fn apply<E: SoftDeletable>(self, select: Select<E>) -> Select<E> {
        let column = E::deleted_at_column();
        match self {
            Self::WithoutTrashed => select.filter(column.is_null()),
            Self::WithTrashed => select,
            Self::OnlyTrashed => select.filter(column.is_not_null()),
        }
    }
}

/// Shorthand for `E::find()` restricted to `scope`.
pub fn find_scoped<E: SoftDeletable>(scope: TrashedScope) -> Select<E> {
    scope.apply(E::find())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;
    use sea_orm::{DbBackend, QueryTrait};

    fn sql(scope: TrashedScope) -> String {
        find_scoped::<User>(scope).build(DbBackend::Postgres).to_string()
    }

    #[test]
    fn default_scope_hides_trashed_rows() {
        assert_eq!(TrashedScope::default(), TrashedScope::WithoutTrashed);
        assert!(sql(TrashedScope::WithoutTrashed).contains(r#""deleted_at" IS NULL"#));
    }

    #[test]
    fn only_trashed_filters_on_deleted_at() {
        assert!(sql(TrashedScope::OnlyTrashed).contains(r#""deleted_at" IS NOT NULL"#));
        assert!(!sql(TrashedScope::WithTrashed).contains("deleted_at\" IS"));
    }
}
