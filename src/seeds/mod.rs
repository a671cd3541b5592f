//! Database seeding functionality
//!
//! Seeders populate reference data the platform needs before anyone can log in.
//! Every seeder is idempotent: running it against an already seeded database
//! changes nothing.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sea_orm::DatabaseConnection;

pub mod roles_and_permissions;

pub use roles_and_permissions::RolesAndPermissionsSeeder;

#[async_trait]
pub trait Seeder: Send + Sync {
    /// Short name used in logs and errors
    fn name(&self) -> &'static str;

    async fn run(&self, db: &DatabaseConnection) -> Result<()>;
}

/// Seeders in the order they run
pub fn registered() -> Vec<Box<dyn Seeder>> {
    vec![Box::new(RolesAndPermissionsSeeder)]
}

/// Runs every registered seeder, stopping at the first failure.
pub async fn run_all(db: &DatabaseConnection) -> Result<()> {
    for seeder in registered() {
        log::info!("Running seeder: {}", seeder.name());
        seeder
            .run(db)
            .await
            .with_context(|| format!("seeder '{}' failed", seeder.name()))?;
    }
    Ok(())
}
