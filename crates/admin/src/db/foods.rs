//! Menu item repository.

use sqlx::PgPool;
use tracing::instrument;

use iolo_core::menu::{FoodDraft, FoodItem};
use iolo_core::FoodId;

use super::RepositoryError;

const FOOD_COLUMNS: &str = "id, name, description, price, category, ingredients, images, \
                            is_available, created_at, updated_at";

const INSERT_FOOD: &str = "INSERT INTO menu.food \
                               (id, name, description, price, category, ingredients, images, is_available) \
                           VALUES ($1, $2, $3, $4, $5, $6, $7, $8)";

/// Row counts from [`FoodRepository::seed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedOutcome {
    pub removed: u64,
    pub inserted: u64,
}

/// Repository for menu item reads and writes.
pub struct FoodRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> FoodRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Every item, including unavailable ones, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<FoodItem>, RepositoryError> {
        let items = sqlx::query_as::<_, FoodItem>(&format!(
            "SELECT {FOOD_COLUMNS} FROM menu.food ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;
        Ok(items)
    }

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

    /// Insert a validated item and return the stored row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub async fn create(&self, draft: &FoodDraft) -> Result<FoodItem, RepositoryError> {
        let item = sqlx::query_as::<_, FoodItem>(&format!("{INSERT_FOOD} RETURNING {FOOD_COLUMNS}"))
            .bind(FoodId::generate())
            .bind(&draft.name)
            .bind(&draft.description)
            .bind(draft.price)
            .bind(draft.category)
            .bind(&draft.ingredients)
            .bind(&draft.images)
            .bind(draft.is_available)
            .fetch_one(self.pool)
            .await?;
        Ok(item)
    }

    /// Overwrite every editable field of an existing item.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no item has this id.
    #[instrument(skip(self, draft), fields(food_id = %id))]
    pub async fn replace(&self, id: FoodId, draft: &FoodDraft) -> Result<FoodItem, RepositoryError> {
        sqlx::query_as::<_, FoodItem>(&format!(
            "UPDATE menu.food SET \
                 name = $2, description = $3, price = $4, category = $5, \
                 ingredients = $6, images = $7, is_available = $8, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {FOOD_COLUMNS}"
        ))
        .bind(id)
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.price)
        .bind(draft.category)
        .bind(&draft.ingredients)
        .bind(&draft.images)
        .bind(draft.is_available)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)
    }

    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no item has this id.
    #[instrument(skip(self), fields(food_id = %id))]
    pub async fn delete(&self, id: FoodId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM menu.food WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    /// Load `drafts` in one transaction, deleting every existing item first
    /// when `clear` is set. Nothing is written unless every insert succeeds.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails; the
    /// transaction is rolled back.
    #[instrument(skip(self, drafts), fields(count = drafts.len()))]
    pub async fn seed(&self, drafts: &[FoodDraft], clear: bool) -> Result<SeedOutcome, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let removed = if clear {
            sqlx::query("DELETE FROM menu.food")
                .execute(&mut *tx)
                .await?
                .rows_affected()
        } else {
            0
        };

        let mut inserted = 0;
        for draft in drafts {
            inserted += sqlx::query(INSERT_FOOD)
                .bind(FoodId::generate())
                .bind(&draft.name)
                .bind(&draft.description)
                .bind(draft.price)
                .bind(draft.category)
                .bind(&draft.ingredients)
                .bind(&draft.images)
                .bind(draft.is_available)
                .execute(&mut *tx)
                .await?
                .rows_affected();
        }

        tx.commit().await?;
        Ok(SeedOutcome { removed, inserted })
    }
}
