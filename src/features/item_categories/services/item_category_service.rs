use sqlx::SqlitePool;

use crate::core::database::BEGIN_WRITE;
use crate::core::error::{AppError, Result};
use crate::features::item_categories::dtos::{
    ItemCategoryResponseDto, PatchItemCategoryDto, WriteItemCategoryDto,
};
use crate::features::item_categories::models::ItemCategory;
use crate::shared::validation::require_name;

/// Service for item category operations
pub struct ItemCategoryService {
    pool: SqlitePool,
}

impl ItemCategoryService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List all categories ordered by id
    pub async fn list(&self) -> Result<Vec<ItemCategoryResponseDto>> {
        let categories = sqlx::query_as::<_, ItemCategory>(
            r#"
            SELECT id, item_category_name
            FROM item_categories
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list item categories: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(categories.into_iter().map(|c| c.into()).collect())
    }

    /// Get category by id
    pub async fn get(&self, id: i64) -> Result<ItemCategoryResponseDto> {
        let category = sqlx::query_as::<_, ItemCategory>(
            r#"
            SELECT id, item_category_name
            FROM item_categories
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get item category: {:?}", e);
            AppError::Database(e)
        })?;

        category.map(|c| c.into()).ok_or_else(|| not_found(id))
    }

    pub async fn create(&self, dto: WriteItemCategoryDto) -> Result<ItemCategoryResponseDto> {
        require_name("item_category_name", &dto.item_category_name)?;

        let category = sqlx::query_as::<_, ItemCategory>(
            r#"
            INSERT INTO item_categories (item_category_name)
            VALUES ($1)
            RETURNING id, item_category_name
            "#,
        )
        .bind(&dto.item_category_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create item category: {:?}", e);
            AppError::Database(e)
        })?;

        tracing::info!(
            "Item category created: id={}, name={:?}",
            category.id,
            category.item_category_name
        );

        Ok(category.into())
    }

    /// Replace every writable field of a category
    pub async fn update(
        &self,
        id: i64,
        dto: WriteItemCategoryDto,
    ) -> Result<ItemCategoryResponseDto> {
        require_name("item_category_name", &dto.item_category_name)?;

        let category = sqlx::query_as::<_, ItemCategory>(
            r#"
            UPDATE item_categories
            SET item_category_name = $1
            WHERE id = $2
            RETURNING id, item_category_name
            "#,
        )
        .bind(&dto.item_category_name)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update item category: {:?}", e);
            AppError::Database(e)
        })?;

        let category = category.ok_or_else(|| not_found(id))?;
        tracing::info!("Item category updated: id={}", category.id);

        Ok(category.into())
    }

    /// Apply only the supplied fields; absent fields keep their stored value
    pub async fn partial_update(
        &self,
        id: i64,
        dto: PatchItemCategoryDto,
    ) -> Result<ItemCategoryResponseDto> {
        if let Some(name) = &dto.item_category_name {
            require_name("item_category_name", name)?;
        }

        let category = sqlx::query_as::<_, ItemCategory>(
            r#"
            UPDATE item_categories
            SET item_category_name = COALESCE($1, item_category_name)
            WHERE id = $2
            RETURNING id, item_category_name
            "#,
        )
        .bind(&dto.item_category_name)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to partially update item category: {:?}", e);
            AppError::Database(e)
        })?;

        let category = category.ok_or_else(|| not_found(id))?;
        tracing::info!("Item category partially updated: id={}", category.id);

        Ok(category.into())
    }

    /// Delete a category together with all of its items.
    ///
    /// Both deletes share one transaction: a failure leaves the category and
    /// every item in place.
    pub async fn delete(&self, id: i64) -> Result<()> {
        let mut tx = self.pool.begin_with(BEGIN_WRITE).await?;

        // Children first so the foreign key never dangles
        let removed_items = sqlx::query("DELETE FROM items WHERE item_category_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete items of category {}: {:?}", id, e);
                AppError::Database(e)
            })?
            .rows_affected();

        let removed = sqlx::query("DELETE FROM item_categories WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete item category {}: {:?}", id, e);
                AppError::Database(e)
            })?
            .rows_affected();

        if removed == 0 {
            tx.rollback().await?;
            return Err(not_found(id));
        }

        tx.commit().await?;

        tracing::info!(
            "Item category deleted: id={}, cascaded_items={}",
            id,
            removed_items
        );

        Ok(())
    }
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Item category {} not found", id))
}
