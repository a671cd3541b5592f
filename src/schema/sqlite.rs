//! SQLite catalog reader built on the `pragma_*` table-valued functions.

use std::collections::BTreeMap;

use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, DbErr, QueryResult, Statement};

use super::{ColumnInfo, ForeignKeyInfo, IndexInfo, MIGRATIONS_TABLE, ReferentialAction, TableInfo};

pub(super) async fn inspect(db: &DatabaseConnection) -> Result<Vec<TableInfo>, DbErr> {
    let rows = db
        .query_all(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT name FROM sqlite_master \
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%' AND name <> ? \
             ORDER BY name",
            [MIGRATIONS_TABLE.into()],
        ))
        .await?;

    let mut tables = Vec::with_capacity(rows.len());
    for row in rows {
        let name: String = row.try_get("", "name")?;
        tables.push(inspect_table(db, name).await?);
    }
    Ok(tables)
}

async fn inspect_table(db: &DatabaseConnection, name: String) -> Result<TableInfo, DbErr> {
    let column_rows = query(
        db,
        r#"SELECT name, type, "notnull", dflt_value, pk FROM pragma_table_info(?) ORDER BY cid"#,
        &name,
    )
    .await?;

    let mut columns = Vec::with_capacity(column_rows.len());
    let mut primary_key: Vec<(i32, String)> = Vec::new();
    for row in &column_rows {
        let column_name: String = row.try_get("", "name")?;
        let not_null: i32 = row.try_get("", "notnull")?;
        let pk_position: i32 = row.try_get("", "pk")?;
        if pk_position > 0 {
            primary_key.push((pk_position, column_name.clone()));
        }
        columns.push(ColumnInfo {
            name: column_name,
            data_type: row.try_get::<String>("", "type")?.to_lowercase(),
            // SQLite lets primary key columns hold NULL unless declared otherwise,
            // but every key here is declared NOT NULL.
            nullable: not_null == 0 && pk_position == 0,
            default: row.try_get("", "dflt_value")?,
        });
    }
    primary_key.sort();

    Ok(TableInfo {
        foreign_keys: foreign_keys(db, &name).await?,
        indexes: indexes(db, &name).await?,
        primary_key: primary_key.into_iter().map(|(_, c)| c).collect(),
        columns,
        name,
    })
}

async fn foreign_keys(db: &DatabaseConnection, table: &str) -> Result<Vec<ForeignKeyInfo>, DbErr> {
    let rows = query(
        db,
        r#"SELECT id, seq, "table", "from", "to", on_update, on_delete
           FROM pragma_foreign_key_list(?) ORDER BY id, seq"#,
        table,
    )
    .await?;

    // One pragma row per column; composite keys share an id.
    let mut by_id: BTreeMap<i32, ForeignKeyInfo> = BTreeMap::new();
    for row in rows {
        let id: i32 = row.try_get("", "id")?;
        let from: String = row.try_get("", "from")?;
        let to: Option<String> = row.try_get("", "to")?;
        let target_table: String = row.try_get("", "table")?;
        let on_update: String = row.try_get("", "on_update")?;
        let on_delete: String = row.try_get("", "on_delete")?;

        let fk = by_id.entry(id).or_insert_with(|| ForeignKeyInfo {
            columns: Vec::new(),
            target_table,
            target_columns: Vec::new(),
            on_delete: ReferentialAction::from_sql(&on_delete),
            on_update: ReferentialAction::from_sql(&on_update),
        });
        fk.columns.push(from);
        fk.target_columns.push(to.unwrap_or_else(|| "id".to_string()));
    }

    Ok(by_id.into_values().collect())
}

async fn indexes(db: &DatabaseConnection, table: &str) -> Result<Vec<IndexInfo>, DbErr> {
    let rows = query(
        db,
        r#"SELECT name, "unique" FROM pragma_index_list(?)"#,
        table,
    )
    .await?;

    let mut indexes = Vec::with_capacity(rows.len());
    for row in rows {
        let name: String = row.try_get("", "name")?;
        let unique: i32 = row.try_get("", "unique")?;

        let column_rows = query(
            db,
            "SELECT name FROM pragma_index_info(?) ORDER BY seqno",
            &name,
        )
        .await?;
        let columns = column_rows
            .iter()
            .map(|r| r.try_get::<Option<String>>("", "name"))
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            // Expression index terms have no column name.
            .map(|c| c.unwrap_or_else(|| "<expr>".to_string()))
            .collect();

        indexes.push(IndexInfo {
            name,
            columns,
            unique: unique != 0,
        });
    }

    Ok(indexes)
}

async fn query(db: &DatabaseConnection, sql: &str, arg: &str) -> Result<Vec<QueryResult>, DbErr> {
    db.query_all(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        sql,
        [arg.into()],
    ))
    .await
}
