//! Category service.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use docvault_core::error::AppError;
use docvault_core::result::AppResult;
use docvault_database::store::CategoryStore;
use docvault_entity::category::{Category, CreateCategory};

use crate::context::RequestContext;

/// Longest accepted category name.
const MAX_NAME_LENGTH: usize = 100;

/// Creates, lists, and deletes categories. Categories are shared by all
/// users; names need not be unique.
#[derive(Debug, Clone)]
pub struct CategoryService {
    categories: Arc<dyn CategoryStore>,
}

impl CategoryService {
    /// Creates a new category service.
    pub fn new(categories: Arc<dyn CategoryStore>) -> Self {
        Self { categories }
    }

    /// Creates a category.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        name: &str,
        description: &str,
    ) -> AppResult<Category> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Category name must not be empty"));
        }
        if name.chars().count() > MAX_NAME_LENGTH {
            return Err(AppError::validation(format!(
                "Category name must be at most {MAX_NAME_LENGTH} characters"
            )));
        }

        let category = self
            .categories
            .create_category(&CreateCategory {
                name: name.to_string(),
                description: description.trim().to_string(),
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            category_id = %category.id,
            name = %category.name,
            "Category created"
        );

        Ok(category)
    }

    /// All categories, ordered by name.
    pub async fn list(&self) -> AppResult<Vec<Category>> {
        self.categories.list_categories().await
    }

    /// Deletes a category; documents in it become uncategorized.
    pub async fn delete(&self, ctx: &RequestContext, category_id: Uuid) -> AppResult<()> {
        if !self.categories.delete_category(category_id).await? {
            return Err(AppError::not_found(format!(
                "Category {category_id} not found"
            )));
        }

        info!(
            user_id = %ctx.user_id,
            category_id = %category_id,
            "Category deleted"
        );

        Ok(())
    }
}
