use axum::{
    Extension, Json, Router,
    http::{StatusCode, Uri},
    routing::get,
};

use crate::{entity::catalog_items::CatalogKind, response::ApiResponse, state::AppState};

pub mod bookings;
pub mod catalog;
pub mod doc;
pub mod health;
pub mod params;
pub mod products;
pub mod ratings;
pub mod users;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/users", users::router())
        .nest("/products", products::router())
        .nest("/bookings", bookings::router())
        .nest("/ratings", ratings::router())
        .nest("/product-services", catalog_router(CatalogKind::Service))
        .nest("/product-category", catalog_router(CatalogKind::Category))
        .nest("/product-audience", catalog_router(CatalogKind::Audience))
        .nest("/product-amenities", catalog_router(CatalogKind::Amenity))
        .nest("/product-types", catalog_router(CatalogKind::ProductType))
}

fn catalog_router(kind: CatalogKind) -> Router<AppState> {
    catalog::router().layer(Extension(kind))
}

/// Full application: health, versioned API, docs and a JSON 404 fallback.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/v1", create_api_router())
        .merge(doc::scalar_docs())
        .fallback(not_found)
        .with_state(state)
}

async fn not_found(uri: Uri) -> (StatusCode, Json<ApiResponse<serde_json::Value>>) {
    let body = ApiResponse::success("Not Found", serde_json::json!({ "path": uri.path() }));
    (StatusCode::NOT_FOUND, Json(body))
}
