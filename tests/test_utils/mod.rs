//! Test utilities for database testing.
//!
//! Databases are in-memory SQLite opened through [`campus::db::init_pool`], so
//! they get the same single-connection pool and foreign key enforcement the
//! binary uses.

#![allow(dead_code)]

use anyhow::Result;
use campus::{config::AppConfig, db, migrate};
use chrono::Utc;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, Statement, Value};
use uuid::Uuid;

/// In-memory SQLite database with no migrations applied.
pub async fn empty_test_db() -> Result<DatabaseConnection> {
    let config = AppConfig {
        database_url: "sqlite::memory:".to_string(),
        db_connect_retries: 1,
        ..AppConfig::default()
    };
    db::init_pool(&config).await
}

/// In-memory SQLite database with all migrations applied.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = empty_test_db().await?;
    migrate::up(&db, None).await?;
    Ok(db)
}

/// Inserts one row with bound parameters; columns not listed take their defaults.
pub async fn insert(
    db: &DatabaseConnection,
    table: &str,
    values: Vec<(&str, Value)>,
) -> Result<(), DbErr> {
    let columns: Vec<String> = values.iter().map(|(c, _)| format!("\"{c}\"")).collect();
    let placeholders = vec!["?"; values.len()].join(", ");
    let sql = format!(
        "INSERT INTO \"{table}\" ({}) VALUES ({placeholders})",
        columns.join(", ")
    );
    db.execute(Statement::from_sql_and_values(
        db.get_database_backend(),
        sql,
        values.into_iter().map(|(_, v)| v),
    ))
    .await?;
    Ok(())
}

/// Number of rows in `table` matching `column = value`.
pub async fn count_where(
    db: &DatabaseConnection,
    table: &str,
    column: &str,
    value: Value,
) -> Result<i64, DbErr> {
    let row = db
        .query_one(Statement::from_sql_and_values(
            db.get_database_backend(),
            format!("SELECT COUNT(*) AS n FROM \"{table}\" WHERE \"{column}\" = ?"),
            [value],
        ))
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(table.to_string()))?;
    row.try_get("", "n")
}

/// Number of rows in `table` where `column` is NULL.
pub async fn count_null(db: &DatabaseConnection, table: &str, column: &str) -> Result<i64, DbErr> {
    let row = db
        .query_one(Statement::from_string(
            db.get_database_backend(),
            format!("SELECT COUNT(*) AS n FROM \"{table}\" WHERE \"{column}\" IS NULL"),
        ))
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(table.to_string()))?;
    row.try_get("", "n")
}

pub async fn delete_by_id(db: &DatabaseConnection, table: &str, id: Uuid) -> Result<u64, DbErr> {
    let result = db
        .execute(Statement::from_sql_and_values(
            db.get_database_backend(),
            format!("DELETE FROM \"{table}\" WHERE id = ?"),
            [id.into()],
        ))
        .await?;
    Ok(result.rows_affected())
}

pub async fn create_user(db: &DatabaseConnection, email: &str) -> Result<Uuid, DbErr> {
    let id = Uuid::new_v4();
    let now = Utc::now().fixed_offset();
    insert(
        db,
        "users",
        vec![
            ("id", id.into()),
            ("name", "Test User".into()),
            ("email", email.into()),
            ("password", "hash".into()),
            ("created_at", now.into()),
            ("updated_at", now.into()),
        ],
    )
    .await?;
    Ok(id)
}

pub async fn create_institution(db: &DatabaseConnection, code: &str) -> Result<Uuid, DbErr> {
    let id = Uuid::new_v4();
    insert(
        db,
        "institutions",
        vec![
            ("id", id.into()),
            ("name", "Test School".into()),
            ("code", code.into()),
        ],
    )
    .await?;
    Ok(id)
}

pub async fn create_academic_year(
    db: &DatabaseConnection,
    institution_id: Uuid,
) -> Result<Uuid, DbErr> {
    let id = Uuid::new_v4();
    insert(
        db,
        "academic_years",
        vec![
            ("id", id.into()),
            ("institution_id", institution_id.into()),
            ("name", "2024/2025".into()),
            ("starts_on", "2024-09-01".into()),
            ("ends_on", "2025-06-30".into()),
        ],
    )
    .await?;
    Ok(id)
}

pub async fn create_teacher(
    db: &DatabaseConnection,
    user_id: Uuid,
    institution_id: Uuid,
    employee_number: &str,
) -> Result<Uuid, DbErr> {
    let id = Uuid::new_v4();
    insert(
        db,
        "teachers",
        vec![
            ("id", id.into()),
            ("user_id", user_id.into()),
            ("institution_id", institution_id.into()),
            ("employee_number", employee_number.into()),
        ],
    )
    .await?;
    Ok(id)
}

pub async fn create_staff(
    db: &DatabaseConnection,
    user_id: Uuid,
    institution_id: Uuid,
    employee_number: &str,
) -> Result<Uuid, DbErr> {
    let id = Uuid::new_v4();
    insert(
        db,
        "staff",
        vec![
            ("id", id.into()),
            ("user_id", user_id.into()),
            ("institution_id", institution_id.into()),
            ("employee_number", employee_number.into()),
            ("job_title", "Clerk".into()),
        ],
    )
    .await?;
    Ok(id)
}
