//! Category management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use uuid::Uuid;

use docvault_core::config::AppConfig;
use docvault_core::error::AppError;
use docvault_entity::category::Category;
use docvault_service::CategoryService;

use crate::output::{self, OutputFormat};

/// Arguments for category commands
#[derive(Debug, Args)]
pub struct CategoryArgs {
    /// Category subcommand
    #[command(subcommand)]
    pub command: CategoryCommand,
}

/// Category subcommands
#[derive(Debug, Subcommand)]
pub enum CategoryCommand {
    /// Create a category
    Create {
        /// Name
        name: String,
        /// Description
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// List categories
    List,
    /// Delete a category; its documents become uncategorized
    Delete {
        /// Category id
        id: Uuid,
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Serialize, Tabled)]
struct CategoryRow {
    id: String,
    name: String,
    description: String,
}

impl From<&Category> for CategoryRow {
    fn from(c: &Category) -> Self {
        Self {
            id: c.id.to_string(),
            name: c.name.clone(),
            description: c.description.clone(),
        }
    }
}

/// Execute category commands
pub async fn execute(
    args: &CategoryArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let stores = super::open_stores(config).await?;
    let categories = CategoryService::new(stores.categories.clone());
    let ctx = super::operator_context();

    match &args.command {
        CategoryCommand::Create { name, description } => {
            let category = categories.create(&ctx, name, description).await?;
            output::print_item(&CategoryRow::from(&category), format);
        }
        CategoryCommand::List => {
            let rows: Vec<CategoryRow> =
                categories.list().await?.iter().map(CategoryRow::from).collect();
            output::print_list(&rows, format);
        }
        CategoryCommand::Delete { id, force } => {
            if !force {
                let confirm = dialoguer::Confirm::new()
                    .with_prompt(format!(
                        "Delete category {id}? Documents in it become uncategorized."
                    ))
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

                if !confirm {
                    println!("Cancelled.");
                    return Ok(());
                }
            }

            categories.delete(&ctx, *id).await?;
            output::print_success(&format!("Category {id} deleted"));
        }
    }

    stores.close().await;
    Ok(())
}
