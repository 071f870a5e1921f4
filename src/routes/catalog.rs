use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::catalog::{CatalogItemRequest, CatalogList},
    entity::catalog_items::CatalogKind,
    error::AppResult,
    extract::AppJson,
    models::CatalogItem,
    response::ApiResponse,
    services::catalog_service,
    state::AppState,
};

/// CRUD over one catalog kind; the kind is supplied as an `Extension` by the mounting router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/{id}", get(get_item).put(update_item).delete(delete_item))
}

pub async fn list_items(
    State(state): State<AppState>,
    Extension(kind): Extension<CatalogKind>,
) -> AppResult<Json<ApiResponse<CatalogList>>> {
    let resp = catalog_service::list_items(&state, kind).await?;
    Ok(Json(resp))
}

pub async fn get_item(
    State(state): State<AppState>,
    Extension(kind): Extension<CatalogKind>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<CatalogItem>>> {
    let resp = catalog_service::get_item(&state, kind, &id).await?;
    Ok(Json(resp))
}

pub async fn create_item(
    State(state): State<AppState>,
    Extension(kind): Extension<CatalogKind>,
    AppJson(payload): AppJson<CatalogItemRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<CatalogItem>>)> {
    let resp = catalog_service::create_item(&state, kind, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

pub async fn update_item(
    State(state): State<AppState>,
    Extension(kind): Extension<CatalogKind>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<CatalogItemRequest>,
) -> AppResult<Json<ApiResponse<CatalogItem>>> {
    let resp = catalog_service::update_item(&state, kind, &id, payload).await?;
    Ok(Json(resp))
}

pub async fn delete_item(
    State(state): State<AppState>,
    Extension(kind): Extension<CatalogKind>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<CatalogItem>>> {
    let resp = catalog_service::delete_item(&state, kind, &id).await?;
    Ok(Json(resp))
}
