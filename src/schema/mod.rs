//! Live schema inspection and structural verification.
//!
//! [`inspect`] reads the catalog of the connected database into a
//! [`SchemaSnapshot`]: tables, columns, primary keys, foreign keys and indexes,
//! all in a backend-neutral, deterministically ordered form. Two snapshots
//! compare equal exactly when the schemas are structurally the same, which is
//! what the migration round-trip tests rely on.
//!
//! [`verify`] checks the invariants every migrated schema must hold.

mod postgres;
mod sqlite;

use std::collections::{BTreeMap, BTreeSet};

use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, DbErr};
use serde::Serialize;
use thiserror::Error;

/// Bookkeeping table maintained by the migrator; never part of a snapshot.
pub const MIGRATIONS_TABLE: &str = "seaql_migrations";

pub use migration::common::DELETED_AT;

/// Structural picture of every user table in the database, keyed by table name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SchemaSnapshot {
    pub tables: BTreeMap<String, TableInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableInfo {
    pub name: String,
    /// Columns in declaration order.
    pub columns: Vec<ColumnInfo>,
    /// Primary key columns in key order; empty when the table has none.
    pub primary_key: Vec<String>,
    pub foreign_keys: Vec<ForeignKeyInfo>,
    /// Indexes sorted by name, including those backing primary and unique keys.
    pub indexes: Vec<IndexInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnInfo {
    pub name: String,
    pub data_type: String,
    pub nullable: bool,
    pub default: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct ForeignKeyInfo {
    pub columns: Vec<String>,
    pub target_table: String,
    pub target_columns: Vec<String>,
    pub on_delete: ReferentialAction,
    pub on_update: ReferentialAction,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct IndexInfo {
    pub name: String,
    pub columns: Vec<String>,
    pub unique: bool,
}

/// Action taken on referencing rows when the referenced row changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferentialAction {
    NoAction,
    Restrict,
    Cascade,
    SetNull,
    SetDefault,
}

impl ReferentialAction {
    /// Parses the spelled-out form used by SQLite (`"SET NULL"`, `"CASCADE"`, ...).
    pub fn from_sql(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "CASCADE" => Self::Cascade,
            "SET NULL" => Self::SetNull,
            "SET DEFAULT" => Self::SetDefault,
            "RESTRICT" => Self::Restrict,
            _ => Self::NoAction,
        }
    }

    /// Parses the one-letter codes stored in Postgres' `pg_constraint`.
    pub fn from_pg_code(code: &str) -> Self {
        match code {
            "c" => Self::Cascade,
            "n" => Self::SetNull,
            "d" => Self::SetDefault,
            "r" => Self::Restrict,
            _ => Self::NoAction,
        }
    }
}

impl SchemaSnapshot {
    pub fn table(&self, name: &str) -> Option<&TableInfo> {
        self.tables.get(name)
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Tables present in both snapshots whose structure differs, plus tables
    /// present in only one of them.
    pub fn differing_tables<'a>(&'a self, other: &'a SchemaSnapshot) -> Vec<&'a str> {
        let names: BTreeSet<&str> = self.table_names().chain(other.table_names()).collect();
        names
            .into_iter()
            .filter(|name| self.tables.get(*name) != other.tables.get(*name))
            .collect()
    }
}

impl TableInfo {
    pub fn column(&self, name: &str) -> Option<&ColumnInfo> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    /// True when `columns` is exactly the primary key or exactly the column set of a unique index.
    pub fn is_unique_key(&self, columns: &[String]) -> bool {
        if self.primary_key.as_slice() == columns {
            return true;
        }
        let wanted: BTreeSet<&String> = columns.iter().collect();
        self.indexes.iter().any(|index| {
            index.unique
                && index.columns.len() == columns.len()
                && index.columns.iter().collect::<BTreeSet<_>>() == wanted
        })
    }

    /// Puts foreign keys and indexes in canonical order.
    fn normalize(&mut self) {
        self.foreign_keys.sort();
        self.indexes.sort();
    }
}

/// Reads the current schema of the connected database.
pub async fn inspect(db: &DatabaseConnection) -> Result<SchemaSnapshot, DbErr> {
    let mut tables = match db.get_database_backend() {
        DatabaseBackend::Sqlite => sqlite::inspect(db).await?,
        DatabaseBackend::Postgres => postgres::inspect(db).await?,
        other => {
            return Err(DbErr::Custom(format!(
                "schema inspection is not supported for {other:?}"
            )));
        }
    };

    for table in &mut tables {
        table.normalize();
    }

    tracing::debug!(tables = tables.len(), "Inspected database schema");

    Ok(SchemaSnapshot {
        tables: tables
            .into_iter()
            .map(|table| (table.name.clone(), table))
            .collect(),
    })
}

/// A violated schema invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SchemaIssue {
    #[error("{table} has no primary key")]
    MissingPrimaryKey { table: String },
    #[error("{table}({columns:?}) references missing {target_table}({target_columns:?})")]
    DanglingForeignKey {
        table: String,
        columns: Vec<String>,
        target_table: String,
        target_columns: Vec<String>,
    },
    #[error("{table}({columns:?}) references non-unique {target_table}({target_columns:?})")]
    ForeignKeyTargetNotUnique {
        table: String,
        columns: Vec<String>,
        target_table: String,
        target_columns: Vec<String>,
    },
    #[error("{table}.{column} is NOT NULL but its foreign key is ON DELETE SET NULL")]
    SetNullOnRequiredColumn { table: String, column: String },
    #[error("{table} has no deleted_at column")]
    MissingSoftDelete { table: String },
    #[error("{table} must not carry a deleted_at column")]
    UnexpectedSoftDelete { table: String },
}

/// Checks a fully migrated schema: referential integrity plus soft-delete coverage.
pub fn verify(snapshot: &SchemaSnapshot) -> Vec<SchemaIssue> {
    let mut issues = verify_integrity(snapshot);
    issues.extend(verify_soft_deletes(snapshot, migration::SOFT_DELETE_EXEMPT_TABLES));
    issues
}

/// Checks primary keys and foreign keys only; valid at every migration step.
pub fn verify_integrity(snapshot: &SchemaSnapshot) -> Vec<SchemaIssue> {
    let mut issues = Vec::new();

    for table in snapshot.tables.values() {
        if table.primary_key.is_empty() {
            issues.push(SchemaIssue::MissingPrimaryKey {
                table: table.name.clone(),
            });
        }

        for fk in &table.foreign_keys {
            let target = snapshot.table(&fk.target_table);
            let target_has_columns = target
                .map(|t| fk.target_columns.iter().all(|c| t.has_column(c)))
                .unwrap_or(false);

            match target {
                Some(target) if target_has_columns => {
                    if !target.is_unique_key(&fk.target_columns) {
                        issues.push(SchemaIssue::ForeignKeyTargetNotUnique {
                            table: table.name.clone(),
                            columns: fk.columns.clone(),
                            target_table: fk.target_table.clone(),
                            target_columns: fk.target_columns.clone(),
                        });
                    }
                }
                _ => issues.push(SchemaIssue::DanglingForeignKey {
                    table: table.name.clone(),
                    columns: fk.columns.clone(),
                    target_table: fk.target_table.clone(),
                    target_columns: fk.target_columns.clone(),
                }),
            }

            if fk.on_delete == ReferentialAction::SetNull {
                for column in &fk.columns {
                    if table.column(column).is_some_and(|c| !c.nullable) {
                        issues.push(SchemaIssue::SetNullOnRequiredColumn {
                            table: table.name.clone(),
                            column: column.clone(),
                        });
                    }
                }
            }
        }
    }

    issues
}

/// Checks that every table outside `exempt` has `deleted_at` and no exempt table does.
pub fn verify_soft_deletes(snapshot: &SchemaSnapshot, exempt: &[&str]) -> Vec<SchemaIssue> {
    snapshot
        .tables
        .values()
        .filter_map(|table| {
            let is_exempt = exempt.contains(&table.name.as_str());
            match (is_exempt, table.has_column(DELETED_AT)) {
                (false, false) => Some(SchemaIssue::MissingSoftDelete {
                    table: table.name.clone(),
                }),
                (true, true) => Some(SchemaIssue::UnexpectedSoftDelete {
                    table: table.name.clone(),
                }),
                _ => None,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(name: &str, nullable: bool) -> ColumnInfo {
        ColumnInfo {
            name: name.to_string(),
            data_type: "uuid".to_string(),
            nullable,
            default: None,
        }
    }

    fn table(name: &str, columns: Vec<ColumnInfo>, foreign_keys: Vec<ForeignKeyInfo>) -> TableInfo {
        TableInfo {
            name: name.to_string(),
            columns,
            primary_key: vec!["id".to_string()],
            foreign_keys,
            indexes: Vec::new(),
        }
    }

    fn fk(column: &str, target: &str, on_delete: ReferentialAction) -> ForeignKeyInfo {
        ForeignKeyInfo {
            columns: vec![column.to_string()],
            target_table: target.to_string(),
            target_columns: vec!["id".to_string()],
            on_delete,
            on_update: ReferentialAction::Cascade,
        }
    }

    fn snapshot(tables: Vec<TableInfo>) -> SchemaSnapshot {
        SchemaSnapshot {
            tables: tables.into_iter().map(|t| (t.name.clone(), t)).collect(),
        }
    }

    #[test]
    fn parses_referential_actions() {
        assert_eq!(ReferentialAction::from_sql("SET NULL"), ReferentialAction::SetNull);
        assert_eq!(ReferentialAction::from_sql("cascade"), ReferentialAction::Cascade);
        assert_eq!(ReferentialAction::from_sql("NO ACTION"), ReferentialAction::NoAction);
        assert_eq!(ReferentialAction::from_pg_code("n"), ReferentialAction::SetNull);
        assert_eq!(ReferentialAction::from_pg_code("a"), ReferentialAction::NoAction);
    }

    #[test]
    fn flags_dangling_foreign_key() {
        let snap = snapshot(vec![table(
            "grades",
            vec![column("id", false), column("student_id", false)],
            vec![fk("student_id", "students", ReferentialAction::Cascade)],
        )]);

        let issues = verify_integrity(&snap);
        assert!(matches!(
            issues.as_slice(),
            [SchemaIssue::DanglingForeignKey { target_table, .. }] if target_table == "students"
        ));
    }

    #[test]
    fn flags_set_null_on_required_column() {
        let snap = snapshot(vec![
            table("teachers", vec![column("id", false)], vec![]),
            table(
                "classes",
                vec![column("id", false), column("homeroom_teacher_id", false)],
                vec![fk("homeroom_teacher_id", "teachers", ReferentialAction::SetNull)],
            ),
        ]);

        let issues = verify_integrity(&snap);
        assert_eq!(
            issues,
            vec![SchemaIssue::SetNullOnRequiredColumn {
                table: "classes".to_string(),
                column: "homeroom_teacher_id".to_string(),
            }]
        );
    }

    #[test]
    fn soft_delete_rules_respect_exemptions() {
        let snap = snapshot(vec![
            table("audit_logs", vec![column("id", false), column(DELETED_AT, true)], vec![]),
            table("students", vec![column("id", false)], vec![]),
        ]);

        let issues = verify_soft_deletes(&snap, &["audit_logs"]);
        assert_eq!(issues.len(), 2);
        assert!(issues.contains(&SchemaIssue::UnexpectedSoftDelete {
            table: "audit_logs".to_string()
        }));
        assert!(issues.contains(&SchemaIssue::MissingSoftDelete {
            table: "students".to_string()
        }));
    }

    #[test]
    fn unique_key_matches_composite_index_in_any_order() {
        let mut pivot = table("model_has_roles", vec![], vec![]);
        pivot.indexes.push(IndexInfo {
            name: "idx".to_string(),
            columns: vec!["role_id".to_string(), "model_id".to_string()],
            unique: true,
        });

        assert!(pivot.is_unique_key(&["model_id".to_string(), "role_id".to_string()]));
        assert!(!pivot.is_unique_key(&["model_id".to_string()]));
        assert!(pivot.is_unique_key(&["id".to_string()]));
    }
}
