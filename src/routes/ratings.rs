use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::ratings::{CreateRatingRequest, RatingList, UpdateRatingRequest},
    error::AppResult,
    extract::AppJson,
    models::Rating,
    response::ApiResponse,
    services::rating_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_ratings).post(create_rating))
        .route("/product/{product_id}", get(list_product_ratings))
        .route(
            "/{id}",
            get(get_rating).put(update_rating).delete(delete_rating),
        )
}

#[utoipa::path(
    get,
    path = "/api/v1/ratings",
    responses((status = 200, description = "All ratings", body = ApiResponse<RatingList>)),
    tag = "Ratings"
)]
pub async fn list_ratings(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<RatingList>>> {
    let resp = rating_service::list_ratings(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/ratings/product/{product_id}",
    params(("product_id" = uuid::Uuid, Path, description = "Product ID")),
    responses((status = 200, description = "Ratings of a product", body = ApiResponse<RatingList>)),
    tag = "Ratings"
)]
pub async fn list_product_ratings(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> AppResult<Json<ApiResponse<RatingList>>> {
    let resp = rating_service::list_ratings_for_product(&state, &product_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/v1/ratings/{id}",
    params(("id" = uuid::Uuid, Path, description = "Rating ID")),
    responses(
        (status = 200, description = "Rating", body = ApiResponse<Rating>),
        (status = 404, description = "Rating not found"),
    ),
    tag = "Ratings"
)]
pub async fn get_rating(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Rating>>> {
    let resp = rating_service::get_rating(&state, &id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/v1/ratings",
    request_body = CreateRatingRequest,
    responses(
        (status = 201, description = "Rating created", body = ApiResponse<Rating>),
        (status = 400, description = "Invalid score or unknown user/product"),
    ),
    tag = "Ratings"
)]
pub async fn create_rating(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateRatingRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Rating>>)> {
    let resp = rating_service::create_rating(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/v1/ratings/{id}",
    params(("id" = uuid::Uuid, Path, description = "Rating ID")),
    request_body = UpdateRatingRequest,
    responses(
        (status = 200, description = "Rating updated", body = ApiResponse<Rating>),
        (status = 404, description = "Rating not found"),
    ),
    tag = "Ratings"
)]
pub async fn update_rating(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdateRatingRequest>,
) -> AppResult<Json<ApiResponse<Rating>>> {
    let resp = rating_service::update_rating(&state, &id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/v1/ratings/{id}",
    params(("id" = uuid::Uuid, Path, description = "Rating ID")),
    responses(
        (status = 200, description = "Deleted rating", body = ApiResponse<Rating>),
        (status = 404, description = "Rating not found"),
    ),
    tag = "Ratings"
)]
pub async fn delete_rating(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Rating>>> {
    let resp = rating_service::delete_rating(&state, &id).await?;
    Ok(Json(resp))
}
