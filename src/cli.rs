//! Command-line interface for the `campus` binary.

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use sea_orm::DatabaseConnection;

use crate::{migrate, schema, seeds};

#[derive(Debug, Parser)]
#[command(name = "campus")]
#[command(about = "Schema migrations and maintenance for the campus database")]
#[command(version)]
pub struct Cli {
    /// Database connection URL, overriding CAMPUS_DATABASE_URL
    #[arg(long, global = true)]
    pub database_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Apply, roll back or inspect migrations
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
    /// Read or check the live schema
    Schema {
        #[command(subcommand)]
        action: SchemaAction,
    },
    /// Run every registered seeder
    Seed,
}

#[derive(Debug, Subcommand)]
pub enum MigrateAction {
    /// Apply pending migrations
    Up {
        /// Number of migrations to apply (default: all pending)
        #[arg(long)]
        steps: Option<u32>,
    },
    /// Roll back applied migrations
    Down {
        /// Number of migrations to roll back
        #[arg(long, default_value_t = 1)]
        steps: u32,
    },
    /// Show applied and pending migrations
    Status,
    /// Drop all tables, then apply every migration
    Fresh,
    /// Roll back every migration, then apply them again
    Refresh,
    /// Roll back every migration
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum SchemaAction {
    /// Print a JSON snapshot of the live schema
    Inspect {
        /// Only print this table
        #[arg(long)]
        table: Option<String>,
    },
    /// Check integrity and soft-delete coverage; fails when issues are found
    Verify,
}

/// Executes a parsed command against an open connection.
pub async fn run(command: Command, db: &DatabaseConnection) -> Result<()> {
    match command {
        Command::Migrate { action } => run_migrate(action, db).await,
        Command::Schema { action } => run_schema(action, db).await,
        Command::Seed => seeds::run_all(db).await,
    }
}

async fn run_migrate(action: MigrateAction, db: &DatabaseConnection) -> Result<()> {
    match action {
        MigrateAction::Up { steps } => migrate::up(db, steps).await,
        MigrateAction::Down { steps } => migrate::down(db, Some(steps)).await,
        MigrateAction::Fresh => migrate::fresh(db).await,
        MigrateAction::Refresh => migrate::refresh(db).await,
        MigrateAction::Reset => migrate::reset(db).await,
        MigrateAction::Status => {
            let states = migrate::status(db).await?;
            for state in &states {
                let label = if state.applied { "applied" } else { "pending" };
                println!("{label:<8} {}", state.name);
            }
            let applied = states.iter().filter(|s| s.applied).count();
            println!("{applied}/{} applied", states.len());
            Ok(())
        }
    }
}

async fn run_schema(action: SchemaAction, db: &DatabaseConnection) -> Result<()> {
    let snapshot = schema::inspect(db).await?;
    match action {
        SchemaAction::Inspect { table: Some(name) } => match snapshot.table(&name) {
            Some(table) => println!("{}", serde_json::to_string_pretty(table)?),
            None => bail!("table '{name}' does not exist"),
        },
        SchemaAction::Inspect { table: None } => {
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        SchemaAction::Verify => {
            let issues = schema::verify(&snapshot);
            if !issues.is_empty() {
                for issue in &issues {
                    println!("{issue}");
                }
                bail!("{} schema issue(s) found", issues.len());
            }
            println!("{} tables verified, no issues", snapshot.tables.len());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn down_defaults_to_one_step() {
        let cli = Cli::parse_from(["campus", "migrate", "down"]);
        assert!(matches!(
            cli.command,
            Command::Migrate {
                action: MigrateAction::Down { steps: 1 }
            }
        ));
    }

    #[test]
    fn database_url_is_accepted_after_subcommand() {
        let cli = Cli::parse_from([
            "campus",
            "schema",
            "verify",
            "--database-url",
            "sqlite::memory:",
        ]);
        assert_eq!(cli.database_url.as_deref(), Some("sqlite::memory:"));
    }
}
