//! Item endpoints: submit, list, fetch by id, search.

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use curio_core::Item;
use serde::{Deserialize, Serialize};

/// Item list response: `{"items": [...]}`.
#[derive(Debug, Serialize)]
pub struct ItemListResponse {
    pub items: Vec<Item>,
}

/// POST /items
///
/// Accepts a multipart form with `name` and `category` text fields and an
/// `image` file field, and returns the persisted item.
pub async fn add_item(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<Item>> {
    let mut name = None;
    let mut category = None;
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("malformed multipart body: {e}")))?
    {
        let field_name = field.name().map(str::to_string);
        match field_name.as_deref() {
            Some("name") => {
                name = Some(field.text().await.map_err(|e| {
                    ApiError::BadRequest(format!("unreadable field 'name': {e}"))
                })?);
            }
            Some("category") => {
                category = Some(field.text().await.map_err(|e| {
                    ApiError::BadRequest(format!("unreadable field 'category': {e}"))
                })?);
            }
            Some("image") => {
                image = Some(field.bytes().await.map_err(|e| {
                    ApiError::BadRequest(format!("unreadable field 'image': {e}"))
                })?);
            }
            // Unknown fields are ignored
            _ => {}
        }
    }

    let name = name.ok_or_else(|| ApiError::BadRequest("missing field: name".to_string()))?;
    let category =
        category.ok_or_else(|| ApiError::BadRequest("missing field: category".to_string()))?;
    let image = image.ok_or_else(|| ApiError::BadRequest("missing field: image".to_string()))?;

    let item = state.service.add_item(name, category, &image).await?;
    Ok(Json(item))
}

/// GET /items
pub async fn list_items(State(state): State<AppState>) -> ApiResult<Json<ItemListResponse>> {
    let items = state.service.list_items().await?;
    Ok(Json(ItemListResponse { items }))
}

/// GET /items/{id}
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Item>> {
    let item = state.service.get_item(&id).await?;
    Ok(Json(item))
}

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub keyword: String,
}

/// GET /search?keyword=...
pub async fn search_items(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<ItemListResponse>> {
    let items = state.service.search_items(&query.keyword).await?;
    Ok(Json(ItemListResponse { items }))
}
