use sqlx::{SqliteConnection, SqlitePool};

use crate::core::database::BEGIN_WRITE;
use crate::core::error::{AppError, Result};
use crate::features::items::dtos::{ItemResponseDto, PatchItemDto, WriteItemDto};
use crate::features::items::models::ItemWithCategory;
use crate::shared::validation::require_name;

const SELECT_ITEM_WITH_CATEGORY: &str = r#"
    SELECT i.id, i.item_name, i.item_category_id, c.item_category_name
    FROM items i
    JOIN item_categories c ON c.id = i.item_category_id
"#;

/// Service for item operations
pub struct ItemService {
    pool: SqlitePool,
}

impl ItemService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List all items ordered by id, each with its category name
    pub async fn list(&self) -> Result<Vec<ItemResponseDto>> {
        let items = sqlx::query_as::<_, ItemWithCategory>(&format!(
            "{} ORDER BY i.id",
            SELECT_ITEM_WITH_CATEGORY
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list items: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(items.into_iter().map(|i| i.into()).collect())
    }

    /// Get item by id
    pub async fn get(&self, id: i64) -> Result<ItemResponseDto> {
        let mut conn = self.pool.acquire().await?;
        let item = fetch_item(&mut conn, id).await?;

        item.map(|i| i.into()).ok_or_else(|| not_found(id))
    }

    pub async fn create(&self, dto: WriteItemDto) -> Result<ItemResponseDto> {
        require_name("item_name", &dto.item_name)?;
        let category_id = require_category_id(dto.item_category_id)?;

        let mut tx = self.pool.begin_with(BEGIN_WRITE).await?;
        ensure_category_exists(&mut tx, category_id).await?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO items (item_name, item_category_id)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(&dto.item_name)
        .bind(category_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create item: {:?}", e);
            AppError::Database(e)
        })?;

        let item = fetch_item(&mut tx, id).await?.ok_or_else(|| not_found(id))?;
        tx.commit().await?;

        tracing::info!(
            "Item created: id={}, name={:?}, category_id={}",
            item.id,
            item.item_name,
            item.item_category_id
        );

        Ok(item.into())
    }

    /// Replace every writable field of an item
    pub async fn update(&self, id: i64, dto: WriteItemDto) -> Result<ItemResponseDto> {
        require_name("item_name", &dto.item_name)?;
        let category_id = require_category_id(dto.item_category_id)?;

        let mut tx = self.pool.begin_with(BEGIN_WRITE).await?;
        ensure_item_exists(&mut tx, id).await?;
        ensure_category_exists(&mut tx, category_id).await?;

        sqlx::query(
            r#"
            UPDATE items
            SET item_name = $1, item_category_id = $2
            WHERE id = $3
            "#,
        )
        .bind(&dto.item_name)
        .bind(category_id)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update item: {:?}", e);
            AppError::Database(e)
        })?;

        let item = fetch_item(&mut tx, id).await?.ok_or_else(|| not_found(id))?;
        tx.commit().await?;

        tracing::info!("Item updated: id={}", id);

        Ok(item.into())
    }

    /// Apply only the supplied fields; absent fields keep their stored value
    pub async fn partial_update(&self, id: i64, dto: PatchItemDto) -> Result<ItemResponseDto> {
        if let Some(name) = &dto.item_name {
            require_name("item_name", name)?;
        }
        let category_id = dto.item_category_id.map(require_category_id).transpose()?;

        let mut tx = self.pool.begin_with(BEGIN_WRITE).await?;
        ensure_item_exists(&mut tx, id).await?;
        if let Some(category_id) = category_id {
            ensure_category_exists(&mut tx, category_id).await?;
        }

        sqlx::query(
            r#"
            UPDATE items
            SET item_name = COALESCE($1, item_name),
                item_category_id = COALESCE($2, item_category_id)
            WHERE id = $3
            "#,
        )
        .bind(&dto.item_name)
        .bind(category_id)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to partially update item: {:?}", e);
            AppError::Database(e)
        })?;

        let item = fetch_item(&mut tx, id).await?.ok_or_else(|| not_found(id))?;
        tx.commit().await?;

        tracing::info!("Item partially updated: id={}", id);

        Ok(item.into())
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        tracing::info!("Item deleted: id={}", id);

        Ok(())
    }
}

async fn fetch_item(conn: &mut SqliteConnection, id: i64) -> Result<Option<ItemWithCategory>> {
    sqlx::query_as::<_, ItemWithCategory>(&format!(
        "{} WHERE i.id = $1",
        SELECT_ITEM_WITH_CATEGORY
    ))
    .bind(id)
    .fetch_optional(&mut *conn)
    .await
    .map_err(|e| {
        tracing::error!("Failed to get item: {:?}", e);
        AppError::Database(e)
    })
}

async fn ensure_item_exists(conn: &mut SqliteConnection, id: i64) -> Result<()> {
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM items WHERE id = $1")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

    found.map(|_| ()).ok_or_else(|| not_found(id))
}

/// A dangling category reference is a client error, not a missing resource
async fn ensure_category_exists(conn: &mut SqliteConnection, category_id: i64) -> Result<()> {
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM item_categories WHERE id = $1")
        .bind(category_id)
        .fetch_optional(&mut *conn)
        .await?;

    found.map(|_| ()).ok_or_else(|| {
        AppError::Validation(format!(
            "Invalid item_category_id \"{}\": category does not exist",
            category_id
        ))
    })
}

fn require_category_id(category_id: Option<i64>) -> Result<i64> {
    category_id.ok_or_else(|| AppError::Validation("item_category_id is required".to_string()))
}

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Item {} not found", id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::item_categories::dtos::WriteItemCategoryDto;
    use crate::features::item_categories::ItemCategoryService;
    use crate::shared::test_helpers::{test_pool, TempDatabase};
    use std::sync::Arc;

    struct Fixture {
        pool: SqlitePool,
        items: ItemService,
        categories: ItemCategoryService,
    }

    async fn fixture() -> Fixture {
        let pool = test_pool().await;
        Fixture {
            items: ItemService::new(pool.clone()),
            categories: ItemCategoryService::new(pool.clone()),
            pool,
        }
    }

    impl Fixture {
        async fn category(&self, name: &str) -> i64 {
            self.categories
                .create(WriteItemCategoryDto {
                    item_category_name: name.to_string(),
                })
                .await
                .unwrap()
                .id
        }

        async fn item_count(&self) -> i64 {
            sqlx::query_scalar("SELECT COUNT(*) FROM items")
                .fetch_one(&self.pool)
                .await
                .unwrap()
        }
    }

    fn write(name: &str, category_id: Option<i64>) -> WriteItemDto {
        WriteItemDto {
            item_name: name.to_string(),
            item_category_id: category_id,
        }
    }

    #[tokio::test]
    async fn test_list_resolves_category_names_in_id_order() {
        let f = fixture().await;
        let fruit = f.category("フルーツ").await;

        let apple = f.items.create(write("りんご", Some(fruit))).await.unwrap();
        let orange = f.items.create(write("みかん", Some(fruit))).await.unwrap();

        let listed = f.items.list().await.unwrap();
        assert_eq!(listed, vec![apple, orange]);
        assert!(listed.iter().all(|i| i.item_category_name == "フルーツ"));
    }

    #[tokio::test]
    async fn test_category_name_is_resolved_at_read_time() {
        let f = fixture().await;
        let fruit = f.category("フルーツ").await;
        let apple = f.items.create(write("りんご", Some(fruit))).await.unwrap();

        f.categories
            .update(
                fruit,
                WriteItemCategoryDto {
                    item_category_name: "果物".to_string(),
                },
            )
            .await
            .unwrap();

        let fetched = f.items.get(apple.id).await.unwrap();
        assert_eq!(fetched.item_category_name, "果物");
    }

    #[tokio::test]
    async fn test_create_without_category_persists_nothing() {
        let f = fixture().await;

        let result = f.items.create(write("みかん", None)).await;
        assert!(matches!(result, Err(AppError::Validation(_))));

        let result = f.items.create(write("みかん", Some(99))).await;
        assert!(matches!(result, Err(AppError::Validation(_))));

        assert_eq!(f.item_count().await, 0);
    }

    #[tokio::test]
    async fn test_create_blank_name_persists_nothing() {
        let f = fixture().await;
        let fruit = f.category("フルーツ").await;

        let result = f.items.create(write("", Some(fruit))).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(f.item_count().await, 0);
    }

    #[tokio::test]
    async fn test_update_replaces_all_fields() {
        let f = fixture().await;
        let fruit = f.category("フルーツ").await;
        let vegetable = f.category("野菜").await;
        let item = f.items.create(write("りんご", Some(fruit))).await.unwrap();

        f.items
            .update(item.id, write("にんじん", Some(vegetable)))
            .await
            .unwrap();

        let fetched = f.items.get(item.id).await.unwrap();
        assert_eq!(fetched.item_name, "にんじん");
        assert_eq!(fetched.item_category_id, vegetable);
        assert_eq!(fetched.item_category_name, "野菜");
    }

    #[tokio::test]
    async fn test_update_to_missing_category_is_validation_error() {
        let f = fixture().await;
        let fruit = f.category("フルーツ").await;
        let item = f.items.create(write("りんご", Some(fruit))).await.unwrap();

        let result = f.items.update(item.id, write("りんご", Some(fruit + 50))).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
        assert_eq!(f.items.get(item.id).await.unwrap(), item);
    }

    #[tokio::test]
    async fn test_update_missing_item_is_not_found() {
        let f = fixture().await;
        let fruit = f.category("フルーツ").await;

        let result = f.items.update(5, write("りんご", Some(fruit))).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_partial_update_leaves_other_fields() {
        let f = fixture().await;
        let fruit = f.category("フルーツ").await;
        let vegetable = f.category("野菜").await;
        let item = f.items.create(write("りんご", Some(fruit))).await.unwrap();

        let patch = PatchItemDto {
            item_name: Some("みかん".to_string()),
            item_category_id: None,
        };
        f.items.partial_update(item.id, patch).await.unwrap();
        let fetched = f.items.get(item.id).await.unwrap();
        assert_eq!(fetched.item_name, "みかん");
        assert_eq!(fetched.item_category_id, fruit);

        let patch = PatchItemDto {
            item_name: None,
            item_category_id: Some(Some(vegetable)),
        };
        f.items.partial_update(item.id, patch).await.unwrap();
        let fetched = f.items.get(item.id).await.unwrap();
        assert_eq!(fetched.item_name, "みかん");
        assert_eq!(fetched.item_category_id, vegetable);
        assert_eq!(fetched.item_category_name, "野菜");
    }

    #[tokio::test]
    async fn test_partial_update_rejects_blank_or_dangling_category() {
        let f = fixture().await;
        let fruit = f.category("フルーツ").await;
        let item = f.items.create(write("りんご", Some(fruit))).await.unwrap();

        let blank = PatchItemDto {
            item_name: None,
            item_category_id: Some(None),
        };
        assert!(matches!(
            f.items.partial_update(item.id, blank).await,
            Err(AppError::Validation(_))
        ));

        let dangling = PatchItemDto {
            item_name: Some("みかん".to_string()),
            item_category_id: Some(Some(fruit + 1)),
        };
        assert!(matches!(
            f.items.partial_update(item.id, dangling).await,
            Err(AppError::Validation(_))
        ));

        assert_eq!(f.items.get(item.id).await.unwrap(), item);
    }

    #[tokio::test]
    async fn test_delete_removes_only_target() {
        let f = fixture().await;
        let fruit = f.category("フルーツ").await;
        let apple = f.items.create(write("りんご", Some(fruit))).await.unwrap();
        let orange = f.items.create(write("みかん", Some(fruit))).await.unwrap();

        f.items.delete(apple.id).await.unwrap();

        assert_eq!(f.items.list().await.unwrap(), vec![orange]);
        assert!(f.categories.get(fruit).await.is_ok());
        assert!(matches!(
            f.items.delete(apple.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_category_delete_cascades() {
        let f = fixture().await;
        let fruit = f.category("フルーツ").await;
        f.items.create(write("りんご", Some(fruit))).await.unwrap();
        f.items.create(write("みかん", Some(fruit))).await.unwrap();

        f.categories.delete(fruit).await.unwrap();

        assert!(f.items.list().await.unwrap().is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_writes_all_succeed() {
        let db = TempDatabase::create().await;
        let categories = ItemCategoryService::new(db.pool.clone());
        let items = Arc::new(ItemService::new(db.pool.clone()));

        let fruit = categories
            .create(WriteItemCategoryDto {
                item_category_name: "フルーツ".to_string(),
            })
            .await
            .unwrap()
            .id;
        let seed = items.create(write("りんご", Some(fruit))).await.unwrap().id;

        let handles: Vec<_> = (0..120)
            .map(|n| {
                let items = items.clone();
                tokio::spawn(async move {
                    match n % 3 {
                        0 => items.create(write(&format!("item-{}", n), Some(fruit))).await,
                        1 => {
                            items
                                .update(seed, write(&format!("item-{}", n), Some(fruit)))
                                .await
                        }
                        _ => {
                            let patch = PatchItemDto {
                                item_name: Some(format!("item-{}", n)),
                                item_category_id: None,
                            };
                            items.partial_update(seed, patch).await
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(items.list().await.unwrap().len(), 41);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_create_racing_category_delete_never_fails_in_storage() {
        let db = TempDatabase::create().await;
        let categories = Arc::new(ItemCategoryService::new(db.pool.clone()));
        let items = Arc::new(ItemService::new(db.pool.clone()));

        let fruit = categories
            .create(WriteItemCategoryDto {
                item_category_name: "フルーツ".to_string(),
            })
            .await
            .unwrap()
            .id;

        let creates: Vec<_> = (0..60)
            .map(|n| {
                let items = items.clone();
                tokio::spawn(async move {
                    items.create(write(&format!("item-{}", n), Some(fruit))).await
                })
            })
            .collect();
        let delete = {
            let categories = categories.clone();
            tokio::spawn(async move { categories.delete(fruit).await })
        };

        for handle in creates {
            match handle.await.unwrap() {
                Ok(_) | Err(AppError::Validation(_)) => {}
                Err(e) => panic!("unexpected error: {:?}", e),
            }
        }
        delete.await.unwrap().unwrap();

        assert!(items.list().await.unwrap().is_empty());
    }
}
