//! CLI command definitions and dispatch.

pub mod audit;
pub mod category;
pub mod migrate;
pub mod token;
pub mod user;

use clap::{Parser, Subcommand};
use uuid::Uuid;

use docvault_core::config::AppConfig;
use docvault_core::error::AppError;
use docvault_database::Stores;
use docvault_service::RequestContext;

use crate::output::OutputFormat;

/// DocVault administration
#[derive(Debug, Parser)]
#[command(name = "docvault", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// User management
    User(user::UserArgs),
    /// Category management
    Category(category::CategoryArgs),
    /// Identity token minting
    Token(token::TokenArgs),
    /// Document access history
    Audit(audit::AuditArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = load_config(&self.config)?;
        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, &config).await,
            Commands::User(args) => user::execute(args, &config, self.format).await,
            Commands::Category(args) => category::execute(args, &config, self.format).await,
            Commands::Token(args) => token::execute(args, &config, self.format).await,
            Commands::Audit(args) => audit::execute(args, &config, self.format).await,
        }
    }
}

/// Load configuration from an explicit file.
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    AppConfig::from_file(config_path)
}

/// Open the configured entity stores without touching the schema.
pub async fn open_stores(config: &AppConfig) -> Result<Stores, AppError> {
    let mut database = config.database.clone();
    database.run_migrations = false;
    Stores::connect(&database).await
}

/// The identity recorded for administrative writes.
pub fn operator_context() -> RequestContext {
    RequestContext::new(Uuid::nil(), "docvault-cli")
}
