use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::item_categories::models::ItemCategory;
use crate::shared::validation::{trimmed, trimmed_some};

/// Response DTO for item category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ItemCategoryResponseDto {
    pub id: i64,
    pub item_category_name: String,
}

impl From<ItemCategory> for ItemCategoryResponseDto {
    fn from(c: ItemCategory) -> Self {
        Self {
            id: c.id,
            item_category_name: c.item_category_name,
        }
    }
}

/// Request DTO for creating or fully replacing an item category
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct WriteItemCategoryDto {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(
        min = 1,
        max = 255,
        message = "item_category_name must be 1-255 characters"
    ))]
    pub item_category_name: String,
}

/// Request DTO for partially updating an item category
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct PatchItemCategoryDto {
    #[serde(default, deserialize_with = "trimmed_some")]
    #[validate(length(
        min = 1,
        max = 255,
        message = "item_category_name must be 1-255 characters"
    ))]
    pub item_category_name: Option<String>,
}
