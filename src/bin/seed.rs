use anyhow::Context;
use clap::Parser;

use todo_api::config::Config;
use todo_api::repository::Database;
use todo_api::seed::{seed, DEFAULT_SEED_COUNT};
use todo_api::telemetry;

#[derive(Parser)]
#[command(name = "seed", about = "Replace every todo with generated sample data")]
struct Cli {
    /// Number of todos to generate
    #[arg(long, default_value_t = DEFAULT_SEED_COUNT)]
    count: usize,
}

fn run(cli: &Cli, config: &Config) -> anyhow::Result<usize> {
    let database = Database::connect(&config.database_url)?;
    database.run_migrations()?;
    Ok(seed(&database, cli.count)?)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;
    telemetry::init("seed", &config.log_level)?;

    tracing::info!("Seeding database");
    match run(&cli, &config) {
        Ok(count) => {
            tracing::info!(count, "Seeding complete");
            Ok(())
        }
        Err(err) => {
            tracing::error!(error = %err, "Failed to seed database");
            Err(err).context("Failed to seed database")
        }
    }
}
