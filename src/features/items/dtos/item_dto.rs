use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::features::items::models::ItemWithCategory;
use crate::shared::validation::{patch_reference, reference, trimmed, trimmed_some};

/// Response DTO for item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ItemResponseDto {
    pub id: i64,
    pub item_name: String,
    pub item_category_id: i64,
    /// Name of the owning category, resolved at read time
    pub item_category_name: String,
}

impl From<ItemWithCategory> for ItemResponseDto {
    fn from(i: ItemWithCategory) -> Self {
        Self {
            id: i.id,
            item_name: i.item_name,
            item_category_id: i.item_category_id,
            item_category_name: i.item_category_name,
        }
    }
}

/// Request DTO for creating or fully replacing an item
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct WriteItemDto {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 255, message = "item_name must be 1-255 characters"))]
    pub item_name: String,

    /// Id of an existing item category; a numeric string is accepted too
    #[serde(default, deserialize_with = "reference")]
    #[validate(required(message = "item_category_id is required"))]
    pub item_category_id: Option<i64>,
}

/// Request DTO for partially updating an item
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_patch_category"))]
pub struct PatchItemDto {
    #[serde(default, deserialize_with = "trimmed_some")]
    #[validate(length(min = 1, max = 255, message = "item_name must be 1-255 characters"))]
    pub item_name: Option<String>,

    /// Outer `None` leaves the category unchanged; `Some(None)` is a blank value
    #[serde(default, deserialize_with = "patch_reference")]
    #[schema(value_type = Option<i64>)]
    pub item_category_id: Option<Option<i64>>,
}

fn validate_patch_category(dto: &PatchItemDto) -> Result<(), ValidationError> {
    if matches!(dto.item_category_id, Some(None)) {
        return Err(ValidationError::new("item_category_id")
            .with_message("item_category_id may not be blank".into()));
    }
    Ok(())
}
