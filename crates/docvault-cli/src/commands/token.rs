//! Identity token minting for local use and testing.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use docvault_auth::jwt::JwtEncoder;
use docvault_core::config::AppConfig;
use docvault_core::error::AppError;
use docvault_service::UserService;

use crate::output::{self, OutputFormat};

/// Arguments for token commands
#[derive(Debug, Args)]
pub struct TokenArgs {
    /// Token subcommand
    #[command(subcommand)]
    pub command: TokenCommand,
}

/// Token subcommands
#[derive(Debug, Subcommand)]
pub enum TokenCommand {
    /// Issue a bearer token for an existing user
    Issue {
        /// Username
        username: String,
    },
}

#[derive(Debug, Serialize, Tabled)]
struct TokenRow {
    user_id: String,
    username: String,
    expires_at: String,
    token: String,
}

/// Execute token commands
pub async fn execute(
    args: &TokenArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        TokenCommand::Issue { username } => {
            let stores = super::open_stores(config).await?;
            let user = UserService::new(stores.users.clone())
                .get_by_username(username)
                .await?;
            stores.close().await;

            let (token, expires_at) =
                JwtEncoder::new(&config.auth).issue(user.id, &user.username)?;

            match format {
                OutputFormat::Table => {
                    output::print_kv("user", &user.username);
                    output::print_kv("expires", &expires_at.to_rfc3339());
                    println!("{token}");
                }
                OutputFormat::Json => output::print_item(
                    &TokenRow {
                        user_id: user.id.to_string(),
                        username: user.username,
                        expires_at: expires_at.to_rfc3339(),
                        token,
                    },
                    format,
                ),
            }
        }
    }

    Ok(())
}
