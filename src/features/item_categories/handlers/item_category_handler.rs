use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, RecordId, UpdateBody};
use crate::features::item_categories::dtos::{
    ItemCategoryResponseDto, PatchItemCategoryDto, WriteItemCategoryDto,
};
use crate::features::item_categories::services::ItemCategoryService;
use crate::shared::types::ErrorResponse;

/// List all item categories ordered by id
#[utoipa::path(
    get,
    path = "/app/itemcategory/",
    responses(
        (status = 200, description = "List of item categories", body = Vec<ItemCategoryResponseDto>),
    ),
    tag = "item-categories"
)]
pub async fn list_item_categories(
    State(service): State<Arc<ItemCategoryService>>,
) -> Result<Json<Vec<ItemCategoryResponseDto>>> {
    let categories = service.list().await?;
    Ok(Json(categories))
}

/// Get item category by id
#[utoipa::path(
    get,
    path = "/app/itemcategory/{id}/",
    params(
        ("id" = i64, Path, description = "Item category id")
    ),
    responses(
        (status = 200, description = "Item category found", body = ItemCategoryResponseDto),
        (status = 404, description = "Item category not found", body = ErrorResponse)
    ),
    tag = "item-categories"
)]
pub async fn get_item_category(
    State(service): State<Arc<ItemCategoryService>>,
    RecordId(id): RecordId,
) -> Result<Json<ItemCategoryResponseDto>> {
    let category = service.get(id).await?;
    Ok(Json(category))
}

/// Create an item category
#[utoipa::path(
    post,
    path = "/app/itemcategory/",
    request_body = WriteItemCategoryDto,
    responses(
        (status = 201, description = "Item category created", body = ItemCategoryResponseDto),
        (status = 400, description = "Validation error", body = ErrorResponse)
    ),
    tag = "item-categories"
)]
pub async fn create_item_category(
    State(service): State<Arc<ItemCategoryService>>,
    AppJson(dto): AppJson<WriteItemCategoryDto>,
) -> Result<(StatusCode, Json<ItemCategoryResponseDto>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(format!("Invalid request: {}", e)))?;

    let category = service.create(dto).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// Replace an item category
#[utoipa::path(
    put,
    path = "/app/itemcategory/{id}/",
    params(
        ("id" = i64, Path, description = "Item category id")
    ),
    request_body = WriteItemCategoryDto,
    responses(
        (status = 200, description = "Item category updated", body = ItemCategoryResponseDto),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 404, description = "Item category not found", body = ErrorResponse)
    ),
    tag = "item-categories"
)]
pub async fn update_item_category(
    State(service): State<Arc<ItemCategoryService>>,
    RecordId(id): RecordId,
    body: UpdateBody<WriteItemCategoryDto>,
) -> Result<Json<ItemCategoryResponseDto>> {
    service.get(id).await?;
    let AppJson(dto) = body?;

    dto.validate()
        .map_err(|e| AppError::Validation(format!("Invalid request: {}", e)))?;

    let category = service.update(id, dto).await?;
    Ok(Json(category))
}

/// Partially update an item category
#[utoipa::path(
    patch,
    path = "/app/itemcategory/{id}/",
    params(
        ("id" = i64, Path, description = "Item category id")
    ),
    request_body = PatchItemCategoryDto,
    responses(
        (status = 200, description = "Item category updated", body = ItemCategoryResponseDto),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 404, description = "Item category not found", body = ErrorResponse)
    ),
    tag = "item-categories"
)]
pub async fn partial_update_item_category(
    State(service): State<Arc<ItemCategoryService>>,
    RecordId(id): RecordId,
    body: UpdateBody<PatchItemCategoryDto>,
) -> Result<Json<ItemCategoryResponseDto>> {
    service.get(id).await?;
    let AppJson(dto) = body?;

    dto.validate()
        .map_err(|e| AppError::Validation(format!("Invalid request: {}", e)))?;

    let category = service.partial_update(id, dto).await?;
    Ok(Json(category))
}

/// Delete an item category and every item in it
#[utoipa::path(
    delete,
    path = "/app/itemcategory/{id}/",
    params(
        ("id" = i64, Path, description = "Item category id")
    ),
    responses(
        (status = 204, description = "Item category and its items deleted"),
        (status = 404, description = "Item category not found", body = ErrorResponse)
    ),
    tag = "item-categories"
)]
pub async fn delete_item_category(
    State(service): State<Arc<ItemCategoryService>>,
    RecordId(id): RecordId,
) -> Result<StatusCode> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
