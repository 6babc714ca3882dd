use utoipa::{Modify, OpenApi};

use crate::features::api_root;
use crate::features::item_categories::{
    dtos as item_categories_dtos, handlers as item_categories_handlers,
};
use crate::features::items::{dtos as items_dtos, handlers as items_handlers};
use crate::shared::types::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Root
        api_root::api_root,
        // Item categories
        item_categories_handlers::list_item_categories,
        item_categories_handlers::get_item_category,
        item_categories_handlers::create_item_category,
        item_categories_handlers::update_item_category,
        item_categories_handlers::partial_update_item_category,
        item_categories_handlers::delete_item_category,
        // Items
        items_handlers::list_items,
        items_handlers::get_item,
        items_handlers::create_item,
        items_handlers::update_item,
        items_handlers::partial_update_item,
        items_handlers::delete_item,
    ),
    components(
        schemas(
            // Shared
            ErrorResponse,
            api_root::ApiRootDto,
            // Item categories
            item_categories_dtos::ItemCategoryResponseDto,
            item_categories_dtos::WriteItemCategoryDto,
            item_categories_dtos::PatchItemCategoryDto,
            // Items
            items_dtos::ItemResponseDto,
            items_dtos::WriteItemDto,
            items_dtos::PatchItemDto,
        )
    ),
    tags(
        (name = "root", description = "Collection index"),
        (name = "item-categories", description = "Item categories; deleting one deletes its items"),
        (name = "items", description = "Items with their resolved category name"),
    ),
    info(
        title = "Item Catalog API",
        version = "0.1.0",
        description = "Item categories and items",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
