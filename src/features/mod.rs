pub mod api_root;
pub mod item_categories;
pub mod items;

use std::sync::Arc;

use axum::{routing::get, Router};
use sqlx::SqlitePool;

use crate::features::item_categories::{routes as item_categories_routes, ItemCategoryService};
use crate::features::items::{routes as items_routes, ItemService};

/// Route table for everything under `/app/`
pub fn routes(pool: SqlitePool) -> Router {
    let item_category_service = Arc::new(ItemCategoryService::new(pool.clone()));
    let item_service = Arc::new(ItemService::new(pool));

    Router::new()
        .route("/app/", get(api_root::api_root))
        .merge(item_categories_routes::routes(item_category_service))
        .merge(items_routes::routes(item_service))
}
