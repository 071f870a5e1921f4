use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
};

use crate::{
    dto::{
        products::{ApprovalRequest, CreateProductRequest, ProductList, UpdateProductRequest},
        tours::{TourDetails, TourPayload},
    },
    error::AppResult,
    extract::{AppJson, AppQuery},
    models::Product,
    response::ApiResponse,
    routes::params::ProductQuery,
    services::{product_service, tour_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/{id}/approval", patch(set_approval))
        .route("/{id}/tour", get(get_tour).post(create_tour))
}

#[utoipa::path(
    get,
    path = "/api/v1/products",
    params(ProductQuery),
    responses(
        (status = 200, description = "List products", body = ApiResponse<ProductList>)
    ),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ProductQuery>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = product_service::list_products(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    params(("id" = uuid::Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Get product", body = ApiResponse<Product>),
        (status = 404, description = "Product not found"),
    ),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = product_service::get_product(&state, &id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/v1/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Create product", body = ApiResponse<Product>),
        (status = 400, description = "Invalid product or tour fields"),
    ),
    tag = "Products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateProductRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Product>>)> {
    let resp = product_service::create_product(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/v1/products/{id}",
    params(("id" = uuid::Uuid, Path, description = "Product ID")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Updated product", body = ApiResponse<Product>),
        (status = 404, description = "Product not found"),
    ),
    tag = "Products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdateProductRequest>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = product_service::update_product(&state, &id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/v1/products/{id}/approval",
    params(("id" = uuid::Uuid, Path, description = "Product ID")),
    request_body = ApprovalRequest,
    responses(
        (status = 200, description = "Approval flag updated", body = ApiResponse<Product>),
        (status = 404, description = "Product not found"),
    ),
    tag = "Products"
)]
pub async fn set_approval(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<ApprovalRequest>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = product_service::set_approval(&state, &id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/v1/products/{id}",
    params(("id" = uuid::Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Deleted product", body = ApiResponse<Product>),
        (status = 400, description = "Product still has bookings"),
        (status = 404, description = "Product not found"),
    ),
    tag = "Products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = product_service::delete_product(&state, &id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/products/{id}/tour",
    params(("id" = uuid::Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Tour with dates and amenities", body = ApiResponse<TourDetails>),
        (status = 404, description = "Product has no tour"),
    ),
    tag = "Tours"
)]
pub async fn get_tour(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<TourDetails>>> {
    let resp = tour_service::get_tour(&state, &id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/v1/products/{id}/tour",
    params(("id" = uuid::Uuid, Path, description = "Product ID")),
    request_body = TourPayload,
    responses(
        (status = 201, description = "Tour created", body = ApiResponse<TourDetails>),
        (status = 400, description = "Invalid tour fields, dates or amenities"),
        (status = 404, description = "Product not found"),
    ),
    tag = "Tours"
)]
pub async fn create_tour(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<TourPayload>,
) -> AppResult<(StatusCode, Json<ApiResponse<TourDetails>>)> {
    let resp = tour_service::create_tour(&state, &id, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}
