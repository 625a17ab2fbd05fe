//! Menu item queries.

use sqlx::PgPool;
use tracing::instrument;

use iolo_core::menu::FoodItem;
use iolo_core::{Category, FoodId};

use super::RepositoryError;

const FOOD_COLUMNS: &str = "id, name, description, price, category, ingredients, images, \
                            is_available, created_at, updated_at";

/// Repository for reading menu items.
pub struct FoodRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> FoodRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List items newest first, optionally limited to one category.
    ///
    /// Unavailable items are included; callers decide what to show.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn list(&self, category: Option<Category>) -> Result<Vec<FoodItem>, RepositoryError> {
        let items = match category {
            Some(category) => {
                sqlx::query_as::<_, FoodItem>(&format!(
                    "SELECT {FOOD_COLUMNS} FROM menu.food WHERE category = $1 \
                     ORDER BY created_at DESC"
                ))
                .bind(category)
                .fetch_all(self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, FoodItem>(&format!(
                    "SELECT {FOOD_COLUMNS} FROM menu.food ORDER BY created_at DESC"
                ))
                .fetch_all(self.pool)
                .await?
            }
        };
        Ok(items)
    }

    /// First `limit` available items of a category, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn featured(
        &self,
        category: Category,
        limit: i64,
    ) -> Result<Vec<FoodItem>, RepositoryError> {
        let items = sqlx::query_as::<_, FoodItem>(&format!(
            "SELECT {FOOD_COLUMNS} FROM menu.food \
             WHERE category = $1 AND is_available \
             ORDER BY created_at ASC LIMIT $2"
        ))
        .bind(category)
        .bind(limit)
        .fetch_all(self.pool)
        .await?;
        Ok(items)
    }

    /// Get one item.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no item has this id.
    #[instrument(skip(self), fields(food_id = %id))]
    pub async fn get(&self, id: FoodId) -> Result<FoodItem, RepositoryError> {
        sqlx::query_as::<_, FoodItem>(&format!(
            "SELECT {FOOD_COLUMNS} FROM menu.food WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)
    }
}
