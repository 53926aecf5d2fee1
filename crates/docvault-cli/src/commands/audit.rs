//! Access history CLI commands.
//!
//! Reads the trail directly from the store; the operator is not subject to
//! document permissions.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use uuid::Uuid;

use docvault_core::config::AppConfig;
use docvault_core::error::AppError;
use docvault_core::types::pagination::PageRequest;
use docvault_entity::access::AccessHistory;

use crate::output::{self, OutputFormat};

/// Arguments for audit commands
#[derive(Debug, Args)]
pub struct AuditArgs {
    /// Audit subcommand
    #[command(subcommand)]
    pub command: AuditCommand,
}

/// Audit subcommands
#[derive(Debug, Subcommand)]
pub enum AuditCommand {
    /// List a document's access history, newest first
    List {
        /// Document id
        document: Uuid,
        /// Page number
        #[arg(short, long, default_value = "1")]
        page: u64,
        /// Number of results
        #[arg(short, long, default_value = "50")]
        limit: u64,
    },
}

#[derive(Debug, Serialize, Tabled)]
struct AuditRow {
    time: String,
    user: String,
    action: String,
    details: String,
}

impl From<&AccessHistory> for AuditRow {
    fn from(e: &AccessHistory) -> Self {
        Self {
            time: e.accessed_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            user: e.user_id.to_string(),
            action: e.action.to_string(),
            details: e.details.clone(),
        }
    }
}

/// Execute audit commands
pub async fn execute(
    args: &AuditArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let stores = super::open_stores(config).await?;

    match &args.command {
        AuditCommand::List {
            document,
            page,
            limit,
        } => {
            if stores.documents.find_document(*document).await?.is_none() {
                return Err(AppError::not_found(format!("Document {document} not found")));
            }

            let history = stores
                .access
                .list_access(*document, &PageRequest::new(*page, *limit))
                .await?;

            let rows: Vec<AuditRow> = history.items.iter().map(AuditRow::from).collect();
            output::print_list(&rows, format);
            if format == OutputFormat::Table {
                println!(
                    "page {} of {} ({} entries)",
                    history.page, history.total_pages, history.total_items
                );
            }
        }
    }

    stores.close().await;
    Ok(())
}
