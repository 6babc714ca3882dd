use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::items::handlers;
use crate::features::items::services::ItemService;

/// Create routes for the items feature
pub fn routes(service: Arc<ItemService>) -> Router {
    Router::new()
        .route(
            "/app/item/",
            get(handlers::list_items).post(handlers::create_item),
        )
        .route(
            "/app/item/{id}/",
            get(handlers::get_item)
                .put(handlers::update_item)
                .patch(handlers::partial_update_item)
                .delete(handlers::delete_item),
        )
        .with_state(service)
}
