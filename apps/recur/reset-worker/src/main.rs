//! Reset Worker
//!
//! Moves completed recurring tasks back to pending on the day they come due
//! and advances their due date to the next occurrence. Runs once, on a cron
//! schedule, or behind an HTTP trigger.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_recurring_tasks::service;
use eyre::Result;
use migration::Migrator;
use tracing::info;

mod config;
mod worker;

use config::Config;

#[derive(Parser)]
#[command(name = "reset-worker")]
#[command(about = "Reset completed recurring tasks that are due today")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the reset once and print the summary
    Run {
        /// Day to run against (YYYY-MM-DD). Defaults to today in UTC.
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// Run the reset on a cron schedule
    Schedule {
        /// Cron expression, seconds first (default: RESET_CRON or 00:05 UTC daily)
        #[arg(short, long)]
        cron: Option<String>,
    },

    /// Serve the HTTP trigger, status, health and metrics endpoints
    Serve,

    /// Show how many completed tasks are due and overdue
    Status {
        /// Day to report on (YYYY-MM-DD). Defaults to today in UTC.
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    install_color_eyre();

    let cli = Cli::parse();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    observability::init_metrics()?;

    info!(app = config.app.name, version = config.app.version, "Connecting to database...");
    let db = database::postgres::connect_from_config_with_retry(config.database.clone(), None)
        .await
        .map_err(|e| eyre::eyre!("Database connection failed: {}", e))?;

    if config.run_migrations {
        database::postgres::run_migrations::<Migrator>(&db, config.app.name).await?;
    }

    let reset_service = worker::build_service(db.clone(), &config.reset);

    match cli.command {
        Commands::Run { date } => {
            let today = date.unwrap_or_else(service::today);
            info!(run_date = %today, "Starting one-time reset");

            let summary = reset_service.run(today).await;
            println!("{}", serde_json::to_string_pretty(&summary)?);

            if !summary.success {
                return Err(eyre::eyre!(
                    "Reset finished with {} error(s)",
                    summary.errors.len()
                ));
            }
        }

        Commands::Schedule { cron } => {
            let cron = cron.unwrap_or_else(|| config.reset.cron.clone());
            worker::run_scheduled(reset_service, &cron).await?;
        }

        Commands::Serve => {
            worker::serve(
                reset_service,
                db,
                config.app,
                &config.server,
                config.reset.trigger_token.is_some(),
            )
            .await?;
        }

        Commands::Status { date } => {
            let today = date.unwrap_or_else(service::today);
            let status = reset_service.due_status(today).await?;
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
    }

    Ok(())
}
