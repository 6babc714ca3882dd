use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::item_categories::handlers;
use crate::features::item_categories::services::ItemCategoryService;

/// Create routes for the item categories feature
pub fn routes(service: Arc<ItemCategoryService>) -> Router {
    Router::new()
        .route(
            "/app/itemcategory/",
            get(handlers::list_item_categories).post(handlers::create_item_category),
        )
        .route(
            "/app/itemcategory/{id}/",
            get(handlers::get_item_category)
                .put(handlers::update_item_category)
                .patch(handlers::partial_update_item_category)
                .delete(handlers::delete_item_category),
        )
        .with_state(service)
}
