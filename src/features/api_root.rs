use axum::{
    http::{header, HeaderMap},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Links to every collection served under `/app/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ApiRootDto {
    pub itemcategory: String,
    pub item: String,
}

/// Browsable entry point listing the collection URLs
#[utoipa::path(
    get,
    path = "/app/",
    responses(
        (status = 200, description = "Collection URLs", body = ApiRootDto),
    ),
    tag = "root"
)]
pub async fn api_root(headers: HeaderMap) -> Json<ApiRootDto> {
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");

    Json(ApiRootDto {
        itemcategory: format!("http://{}/app/itemcategory/", host),
        item: format!("http://{}/app/item/", host),
    })
}
