//! Postgres catalog reader over `information_schema` and `pg_catalog`.
//!
//! Only the current schema is read. Identifier columns are cast to `text` so
//! they decode as plain strings regardless of their catalog type.

use std::collections::BTreeMap;

use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, DbErr, QueryResult, Statement};

use super::{ColumnInfo, ForeignKeyInfo, IndexInfo, MIGRATIONS_TABLE, ReferentialAction, TableInfo};

const TABLES_SQL: &str = "
    SELECT table_name::text AS table_name
    FROM information_schema.tables
    WHERE table_schema = current_schema()
      AND table_type = 'BASE TABLE'
      AND table_name <> $1
    ORDER BY table_name";

const COLUMNS_SQL: &str = "
    SELECT column_name::text AS column_name,
           data_type::text AS data_type,
           is_nullable::text AS is_nullable,
           column_default::text AS column_default
    FROM information_schema.columns
    WHERE table_schema = current_schema() AND table_name = $1
    ORDER BY ordinal_position";

const INDEXES_SQL: &str = "
    SELECT ic.relname::text AS index_name,
           i.indisunique AS is_unique,
           i.indisprimary AS is_primary,
           a.attname::text AS column_name
    FROM pg_index i
    JOIN pg_class c ON c.oid = i.indrelid
    JOIN pg_class ic ON ic.oid = i.indexrelid
    JOIN pg_namespace n ON n.oid = c.relnamespace
    JOIN LATERAL unnest(i.indkey) WITH ORDINALITY AS k(attnum, ord) ON true
    JOIN pg_attribute a ON a.attrelid = c.oid AND a.attnum = k.attnum
    WHERE n.nspname = current_schema() AND c.relname = $1
    ORDER BY ic.relname, k.ord";

const FOREIGN_KEYS_SQL: &str = "
    SELECT con.conname::text AS constraint_name,
           att.attname::text AS column_name,
           ref.relname::text AS target_table,
           ratt.attname::text AS target_column,
           con.confdeltype::text AS on_delete,
           con.confupdtype::text AS on_update
    FROM pg_constraint con
    JOIN pg_class c ON c.oid = con.conrelid
    JOIN pg_namespace n ON n.oid = c.relnamespace
    JOIN pg_class ref ON ref.oid = con.confrelid
    JOIN LATERAL unnest(con.conkey, con.confkey) WITH ORDINALITY AS k(attnum, refnum, ord) ON true
    JOIN pg_attribute att ON att.attrelid = con.conrelid AND att.attnum = k.attnum
    JOIN pg_attribute ratt ON ratt.attrelid = con.confrelid AND ratt.attnum = k.refnum
    WHERE con.contype = 'f' AND n.nspname = current_schema() AND c.relname = $1
    ORDER BY con.conname, k.ord";

pub(super) async fn inspect(db: &DatabaseConnection) -> Result<Vec<TableInfo>, DbErr> {
    let rows = query(db, TABLES_SQL, MIGRATIONS_TABLE).await?;

    let mut tables = Vec::with_capacity(rows.len());
    for row in rows {
        let name: String = row.try_get("", "table_name")?;
        tables.push(inspect_table(db, name).await?);
    }
    Ok(tables)
}

async fn inspect_table(db: &DatabaseConnection, name: String) -> Result<TableInfo, DbErr> {
    let columns = query(db, COLUMNS_SQL, &name)
        .await?
        .iter()
        .map(|row| {
            Ok(ColumnInfo {
                name: row.try_get("", "column_name")?,
                data_type: row.try_get("", "data_type")?,
                nullable: row.try_get::<String>("", "is_nullable")? == "YES",
                default: row.try_get("", "column_default")?,
            })
        })
        .collect::<Result<Vec<_>, DbErr>>()?;

    let (indexes, primary_key) = indexes(db, &name).await?;

    Ok(TableInfo {
        foreign_keys: foreign_keys(db, &name).await?,
        indexes,
        primary_key,
        columns,
        name,
    })
}

async fn indexes(
    db: &DatabaseConnection,
    table: &str,
) -> Result<(Vec<IndexInfo>, Vec<String>), DbErr> {
    let mut by_name: BTreeMap<String, IndexInfo> = BTreeMap::new();
    let mut primary_key = Vec::new();

    for row in query(db, INDEXES_SQL, table).await? {
        let index_name: String = row.try_get("", "index_name")?;
        let column: String = row.try_get("", "column_name")?;
        let unique: bool = row.try_get("", "is_unique")?;
        let primary: bool = row.try_get("", "is_primary")?;

        if primary {
            primary_key.push(column.clone());
        }
        by_name
            .entry(index_name.clone())
            .or_insert_with(|| IndexInfo {
                name: index_name,
                columns: Vec::new(),
                unique,
            })
            .columns
            .push(column);
    }

    Ok((by_name.into_values().collect(), primary_key))
}

async fn foreign_keys(db: &DatabaseConnection, table: &str) -> Result<Vec<ForeignKeyInfo>, DbErr> {
    let mut by_name: BTreeMap<String, ForeignKeyInfo> = BTreeMap::new();

    for row in query(db, FOREIGN_KEYS_SQL, table).await? {
        let constraint: String = row.try_get("", "constraint_name")?;
        let column: String = row.try_get("", "column_name")?;
        let target_table: String = row.try_get("", "target_table")?;
        let target_column: String = row.try_get("", "target_column")?;
        let on_delete: String = row.try_get("", "on_delete")?;
        let on_update: String = row.try_get("", "on_update")?;

        let fk = by_name.entry(constraint).or_insert_with(|| ForeignKeyInfo {
            columns: Vec::new(),
            target_table,
            target_columns: Vec::new(),
            on_delete: ReferentialAction::from_pg_code(&on_delete),
            on_update: ReferentialAction::from_pg_code(&on_update),
        });
        fk.columns.push(column);
        fk.target_columns.push(target_column);
    }

    Ok(by_name.into_values().collect())
}

async fn query(db: &DatabaseConnection, sql: &str, arg: &str) -> Result<Vec<QueryResult>, DbErr> {
    db.query_all(Statement::from_sql_and_values(
        DatabaseBackend::Postgres,
        sql,
        [arg.into()],
    ))
    .await
}
