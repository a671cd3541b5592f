//! # Campus CLI Entry Point

use anyhow::Context;
use campus::cli::Cli;
use campus::{config::ConfigLoader, db, telemetry};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration from layered env files and variables
    let config = ConfigLoader::new()
        .with_database_url(cli.database_url.clone())
        .load()?;

    telemetry::init_tracing(&config)?;

    if let Ok(redacted_json) = config.redacted_json() {
        tracing::debug!(config = %redacted_json, "Loaded configuration");
    }

    let db = db::init_pool(&config)
        .await
        .context("initializing database connection pool")?;

    campus::cli::run(cli.command, &db).await
}
