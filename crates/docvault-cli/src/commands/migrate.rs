//! Database migration management commands.

use clap::{Args, Subcommand};

use docvault_core::config::{AppConfig, StoreProvider};
use docvault_core::error::AppError;
use docvault_database::DatabasePool;

use crate::output;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, config: &AppConfig) -> Result<(), AppError> {
    match &args.command {
        MigrateCommand::Run => {
            if config.database.provider != StoreProvider::Postgres {
                return Err(AppError::configuration(
                    "Migrations only apply to the postgres provider",
                ));
            }

            let pool = DatabasePool::connect(&config.database).await?;
            println!("Running database migrations...");
            docvault_database::migration::run_migrations(pool.pool()).await?;
            pool.close().await;
            output::print_success("All migrations applied successfully.");
        }
    }

    Ok(())
}
