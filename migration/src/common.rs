//! Column, constraint and index builders shared by the schema migrations.
//!
//! Every table uses UUID primary keys and timezone-aware `created_at` /
//! `updated_at` columns, so those definitions live here instead of being
//! repeated in each migration.

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::DatabaseBackend;

/// Name of the soft-delete column retrofitted onto domain tables.
pub const DELETED_AT: &str = "deleted_at";

/// Postgres generator used as the primary key default.
pub const UUID_DEFAULT_FN: &str = "gen_random_uuid()";

/// UUID primary key column.
///
/// On Postgres the key defaults to `gen_random_uuid()`, so raw inserts may omit
/// `id`. SQLite has no UUID generator; callers there always supply the key.
pub fn uuid_pk<T: IntoIden>(manager: &SchemaManager, col: T) -> ColumnDef {
    let mut def = ColumnDef::new(col);
    def.uuid().not_null().primary_key();
    if manager.get_database_backend() == DatabaseBackend::Postgres {
        def.default(Expr::cust(UUID_DEFAULT_FN));
    }
    def
}

/// Required UUID reference column.
pub fn uuid_ref<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col).uuid().not_null().to_owned()
}

/// Optional UUID reference column, used with `SET NULL` foreign keys.
pub fn uuid_ref_null<T: IntoIden>(col: T) -> ColumnDef {
    ColumnDef::new(col).uuid().null().to_owned()
}

pub fn created_at() -> ColumnDef {
    ColumnDef::new(Alias::new("created_at"))
        .timestamp_with_time_zone()
        .not_null()
        .default(Expr::current_timestamp())
        .to_owned()
}

pub fn updated_at() -> ColumnDef {
    ColumnDef::new(Alias::new("updated_at"))
        .timestamp_with_time_zone()
        .not_null()
        .default(Expr::current_timestamp())
        .to_owned()
}

/// Foreign key removing child rows together with the parent.
pub fn cascade<FT, FC, TT, TC>(
    name: &str,
    from_table: FT,
    from_col: FC,
    to_table: TT,
    to_col: TC,
) -> ForeignKeyCreateStatement
where
    FT: IntoTableRef,
    FC: IntoIden,
    TT: IntoTableRef,
    TC: IntoIden,
{
    ForeignKey::create()
        .name(name)
        .from(from_table, from_col)
        .to(to_table, to_col)
        .on_delete(ForeignKeyAction::Cascade)
        .on_update(ForeignKeyAction::Cascade)
        .to_owned()
}

/// Foreign key clearing an optional reference when the parent goes away.
pub fn set_null<FT, FC, TT, TC>(
    name: &str,
    from_table: FT,
    from_col: FC,
    to_table: TT,
    to_col: TC,
) -> ForeignKeyCreateStatement
where
    FT: IntoTableRef,
    FC: IntoIden,
    TT: IntoTableRef,
    TC: IntoIden,
{
    ForeignKey::create()
        .name(name)
        .from(from_table, from_col)
        .to(to_table, to_col)
        .on_delete(ForeignKeyAction::SetNull)
        .on_update(ForeignKeyAction::Cascade)
        .to_owned()
}

/// Plain lookup index over `columns`, in order.
pub fn index<T, C, I>(name: &str, table: T, columns: I) -> IndexCreateStatement
where
    T: IntoTableRef,
    C: IntoIndexColumn,
    I: IntoIterator<Item = C>,
{
    let mut stmt = Index::create();
    stmt.name(name).table(table).if_not_exists();
    for column in columns {
        stmt.col(column);
    }
    stmt.to_owned()
}

/// Unique index over `columns`, enforcing a composite-key relationship.
pub fn unique_index<T, C, I>(name: &str, table: T, columns: I) -> IndexCreateStatement
where
    T: IntoTableRef,
    C: IntoIndexColumn,
    I: IntoIterator<Item = C>,
{
    index(name, table, columns).unique().to_owned()
}

/// Adds a nullable `deleted_at` column and its index to each table.
///
/// Tables that already carry the column are skipped so the migration can be
/// re-run against a partially migrated database.
pub async fn add_soft_deletes(manager: &SchemaManager<'_>, tables: &[&str]) -> Result<(), DbErr> {
    for table in tables {
        if !manager.has_column(*table, DELETED_AT).await? {
            manager
                .alter_table(
                    Table::alter()
                        .table(Alias::new(*table))
                        .add_column(
                            ColumnDef::new(Alias::new(DELETED_AT))
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .to_owned(),
                )
                .await?;
        }

        let index_name = soft_delete_index_name(table);
        if !manager.has_index(*table, &index_name).await? {
            manager
                .create_index(index(&index_name, Alias::new(*table), [Alias::new(DELETED_AT)]))
                .await?;
        }
    }

    Ok(())
}

/// Reverses [`add_soft_deletes`], walking the tables in reverse order.
pub async fn drop_soft_deletes(manager: &SchemaManager<'_>, tables: &[&str]) -> Result<(), DbErr> {
    for table in tables.iter().rev() {
        let index_name = soft_delete_index_name(table);
        if manager.has_index(*table, &index_name).await? {
            manager
                .drop_index(
                    Index::drop()
                        .name(&index_name)
                        .table(Alias::new(*table))
                        .to_owned(),
                )
                .await?;
        }

        if manager.has_column(*table, DELETED_AT).await? {
            manager
                .alter_table(
                    Table::alter()
                        .table(Alias::new(*table))
                        .drop_column(Alias::new(DELETED_AT))
                        .to_owned(),
                )
                .await?;
        }
    }

    Ok(())
}

/// Drops each table, in the order given.
pub async fn drop_tables(manager: &SchemaManager<'_>, tables: &[&str]) -> Result<(), DbErr> {
    for table in tables {
        manager
            .drop_table(Table::drop().table(Alias::new(*table)).if_exists().to_owned())
            .await?;
    }
    Ok(())
}

pub fn soft_delete_index_name(table: &str) -> String {
    format!("idx_{table}_{DELETED_AT}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn soft_delete_index_is_named_after_table() {
        assert_eq!(soft_delete_index_name("students"), "idx_students_deleted_at");
    }

    #[test]
    fn unique_index_renders_all_columns() {
        let sql = unique_index(
            "idx_leave_balances_unique",
            Alias::new("leave_balances"),
            [
                Alias::new("staff_id"),
                Alias::new("leave_type_id"),
                Alias::new("year"),
            ],
        )
        .to_string(PostgresQueryBuilder);

        assert!(sql.starts_with("CREATE UNIQUE INDEX"));
        assert!(sql.contains(r#"("staff_id", "leave_type_id", "year")"#));
    }

    #[test]
    fn set_null_foreign_key_renders_action() {
        let sql = Table::create()
            .table(Alias::new("classes"))
            .col(uuid_ref(Alias::new("id")).primary_key())
            .col(uuid_ref_null(Alias::new("homeroom_teacher_id")))
            .foreign_key(&mut set_null(
                "fk_classes_homeroom_teacher_id",
                Alias::new("classes"),
                Alias::new("homeroom_teacher_id"),
                Alias::new("teachers"),
                Alias::new("id"),
            ))
            .to_string(PostgresQueryBuilder);

        assert!(sql.contains("ON DELETE SET NULL"));
        assert!(sql.contains(r#"REFERENCES "teachers" ("id")"#));
    }
}
