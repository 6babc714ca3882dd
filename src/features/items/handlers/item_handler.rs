use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, RecordId, UpdateBody};
use crate::features::items::dtos::{ItemResponseDto, PatchItemDto, WriteItemDto};
use crate::features::items::services::ItemService;
use crate::shared::types::ErrorResponse;

/// List all items ordered by id
#[utoipa::path(
    get,
    path = "/app/item/",
    responses(
        (status = 200, description = "List of items", body = Vec<ItemResponseDto>),
    ),
    tag = "items"
)]
pub async fn list_items(
    State(service): State<Arc<ItemService>>,
) -> Result<Json<Vec<ItemResponseDto>>> {
    let items = service.list().await?;
    Ok(Json(items))
}

/// Get item by id
#[utoipa::path(
    get,
    path = "/app/item/{id}/",
    params(
        ("id" = i64, Path, description = "Item id")
    ),
    responses(
        (status = 200, description = "Item found", body = ItemResponseDto),
        (status = 404, description = "Item not found", body = ErrorResponse)
    ),
    tag = "items"
)]
pub async fn get_item(
    State(service): State<Arc<ItemService>>,
    RecordId(id): RecordId,
) -> Result<Json<ItemResponseDto>> {
    let item = service.get(id).await?;
    Ok(Json(item))
}

/// Create an item in an existing category
#[utoipa::path(
    post,
    path = "/app/item/",
    request_body = WriteItemDto,
    responses(
        (status = 201, description = "Item created", body = ItemResponseDto),
        (status = 400, description = "Validation error or unknown category", body = ErrorResponse)
    ),
    tag = "items"
)]
pub async fn create_item(
    State(service): State<Arc<ItemService>>,
    AppJson(dto): AppJson<WriteItemDto>,
) -> Result<(StatusCode, Json<ItemResponseDto>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(format!("Invalid request: {}", e)))?;

    let item = service.create(dto).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Replace an item
#[utoipa::path(
    put,
    path = "/app/item/{id}/",
    params(
        ("id" = i64, Path, description = "Item id")
    ),
    request_body = WriteItemDto,
    responses(
        (status = 200, description = "Item updated", body = ItemResponseDto),
        (status = 400, description = "Validation error or unknown category", body = ErrorResponse),
        (status = 404, description = "Item not found", body = ErrorResponse)
    ),
    tag = "items"
)]
pub async fn update_item(
    State(service): State<Arc<ItemService>>,
    RecordId(id): RecordId,
    body: UpdateBody<WriteItemDto>,
) -> Result<Json<ItemResponseDto>> {
    service.get(id).await?;
    let AppJson(dto) = body?;

    dto.validate()
        .map_err(|e| AppError::Validation(format!("Invalid request: {}", e)))?;

    let item = service.update(id, dto).await?;
    Ok(Json(item))
}

/// Partially update an item
#[utoipa::path(
    patch,
    path = "/app/item/{id}/",
    params(
        ("id" = i64, Path, description = "Item id")
    ),
    request_body = PatchItemDto,
    responses(
        (status = 200, description = "Item updated", body = ItemResponseDto),
        (status = 400, description = "Validation error or unknown category", body = ErrorResponse),
        (status = 404, description = "Item not found", body = ErrorResponse)
    ),
    tag = "items"
)]
pub async fn partial_update_item(
    State(service): State<Arc<ItemService>>,
    RecordId(id): RecordId,
    body: UpdateBody<PatchItemDto>,
) -> Result<Json<ItemResponseDto>> {
    service.get(id).await?;
    let AppJson(dto) = body?;

    dto.validate()
        .map_err(|e| AppError::Validation(format!("Invalid request: {}", e)))?;

    let item = service.partial_update(id, dto).await?;
    Ok(Json(item))
}

/// Delete an item
#[utoipa::path(
    delete,
    path = "/app/item/{id}/",
    params(
        ("id" = i64, Path, description = "Item id")
    ),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 404, description = "Item not found", body = ErrorResponse)
    ),
    tag = "items"
)]
pub async fn delete_item(
    State(service): State<Arc<ItemService>>,
    RecordId(id): RecordId,
) -> Result<StatusCode> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
