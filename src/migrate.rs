//! Migration runner.
//!
//! Thin wrappers over [`MigratorTrait`] that log each operation and report
//! per-migration status in a serializable form.

use anyhow::{Context, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigrationStatus;
use serde::Serialize;
use std::time::Instant;

/// Applied/pending state of one migration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationState {
    pub name: String,
    pub applied: bool,
}

/// Apply pending migrations; all of them when `steps` is `None`.
pub async fn up(db: &DatabaseConnection, steps: Option<u32>) -> Result<()> {
    let started = Instant::now();
    tracing::info!(steps = ?steps, "Applying migrations");
    Migrator::up(db, steps)
        .await
        .context("Failed to apply migrations")?;
    tracing::info!(elapsed_ms = started.elapsed().as_millis() as u64, "Migrations applied");
    Ok(())
}

/// Roll back applied migrations; all of them when `steps` is `None`.
pub async fn down(db: &DatabaseConnection, steps: Option<u32>) -> Result<()> {
    let started = Instant::now();
    tracing::info!(steps = ?steps, "Rolling back migrations");
    Migrator::down(db, steps)
        .await
        .context("Failed to roll back migrations")?;
    tracing::info!(elapsed_ms = started.elapsed().as_millis() as u64, "Migrations rolled back");
    Ok(())
}

/// Every known migration in order, with whether it has been applied
pub async fn status(db: &DatabaseConnection) -> Result<Vec<MigrationState>> {
    let migrations = Migrator::get_migration_with_status(db)
        .await
        .context("Failed to read migration status")?;

    let states: Vec<MigrationState> = migrations
        .iter()
        .map(|m| MigrationState {
            name: m.name().to_string(),
            applied: matches!(m.status(), MigrationStatus::Applied),
        })
        .collect();

    tracing::debug!(
        total = states.len(),
        applied = states.iter().filter(|s| s.applied).count(),
        "Read migration status"
    );
    Ok(states)
}

/// Drop every table in the database, then apply all migrations.
pub async fn fresh(db: &DatabaseConnection) -> Result<()> {
    tracing::warn!("Dropping all tables and reapplying migrations");
    Migrator::fresh(db)
        .await
        .context("Failed to run fresh migration")?;
    tracing::info!("Fresh migration complete");
    Ok(())
}

/// Roll back every applied migration, then apply all migrations.
pub async fn refresh(db: &DatabaseConnection) -> Result<()> {
    tracing::info!("Refreshing migrations");
    Migrator::refresh(db)
        .await
        .context("Failed to refresh migrations")?;
    tracing::info!("Migrations refreshed");
    Ok(())
}

/// Roll back every applied migration.
pub async fn reset(db: &DatabaseConnection) -> Result<()> {
    tracing::warn!("Rolling back all migrations");
    Migrator::reset(db)
        .await
        .context("Failed to reset migrations")?;
    tracing::info!("Migrations reset");
    Ok(())
}
