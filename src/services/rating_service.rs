use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::{
    dto::ratings::{CreateRatingRequest, RatingList, UpdateRatingRequest},
    entity::{
        products::Entity as Products,
        ratings::{ActiveModel as RatingActive, Column as RatingCol, Entity as Ratings, Model as RatingModel},
        users::Entity as Users,
    },
    error::{AppError, AppResult},
    models::Rating,
    response::ApiResponse,
    services::{non_blank, parse_id, require_text, updated_or},
    state::AppState,
};

pub async fn list_ratings(state: &AppState) -> AppResult<ApiResponse<RatingList>> {
    let items = Ratings::find()
        .order_by_desc(RatingCol::CreatedAt)
        .all(state.db())
        .await?
        .into_iter()
        .map(rating_from_entity)
        .collect();
    Ok(ApiResponse::success("Ratings", RatingList { items }))
}

pub async fn list_ratings_for_product(
    state: &AppState,
    raw_product_id: &str,
) -> AppResult<ApiResponse<RatingList>> {
    let product_id = parse_id(raw_product_id, "product id")?;
    let items = Ratings::find()
        .filter(RatingCol::ProductId.eq(product_id))
        .order_by_desc(RatingCol::CreatedAt)
        .all(state.db())
        .await?
        .into_iter()
        .map(rating_from_entity)
        .collect();
    Ok(ApiResponse::success("Ratings", RatingList { items }))
}

pub async fn get_rating(state: &AppState, raw_id: &str) -> AppResult<ApiResponse<Rating>> {
    let id = parse_id(raw_id, "rating id")?;
    let rating = Ratings::find_by_id(id)
        .one(state.db())
        .await?
        .ok_or_else(|| AppError::not_found("Rating not found"))?;
    Ok(ApiResponse::success("Rating", rating_from_entity(rating)))
}

pub async fn create_rating(
    state: &AppState,
    payload: CreateRatingRequest,
) -> AppResult<ApiResponse<Rating>> {
    let user_id = require_text(&payload.user_id, "user_id")?.to_string();
    validate_score(payload.score)?;

    if Users::find_by_id(user_id.clone())
        .one(state.db())
        .await?
        .is_none()
    {
        return Err(AppError::validation(format!("user '{user_id}' does not exist")));
    }
    if Products::find_by_id(payload.product_id)
        .one(state.db())
        .await?
        .is_none()
    {
        return Err(AppError::validation(format!(
            "product '{}' does not exist",
            payload.product_id
        )));
    }

    let rating = RatingActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        product_id: Set(payload.product_id),
        score: Set(payload.score),
        comment: Set(non_blank(payload.comment)),
        created_at: NotSet,
    }
    .insert(state.db())
    .await?;

    Ok(ApiResponse::success("Rating created", rating_from_entity(rating)))
}

pub async fn update_rating(
    state: &AppState,
    raw_id: &str,
    payload: UpdateRatingRequest,
) -> AppResult<ApiResponse<Rating>> {
    let id = parse_id(raw_id, "rating id")?;
    if let Some(score) = payload.score {
        validate_score(score)?;
    }

    let existing = Ratings::find_by_id(id)
        .one(state.db())
        .await?
        .ok_or_else(|| AppError::not_found("Rating not found"))?;

    if payload.score.is_none() && payload.comment.is_none() {
        return Ok(ApiResponse::success("Rating updated", rating_from_entity(existing)));
    }

    let mut active: RatingActive = existing.into();
    if let Some(score) = payload.score {
        active.score = Set(score);
    }
    if payload.comment.is_some() {
        active.comment = Set(non_blank(payload.comment));
    }
    let rating = updated_or(active.update(state.db()).await, || {
        AppError::not_found("Rating not found")
    })?;

    Ok(ApiResponse::success("Rating updated", rating_from_entity(rating)))
}

pub async fn delete_rating(state: &AppState, raw_id: &str) -> AppResult<ApiResponse<Rating>> {
    let id = parse_id(raw_id, "rating id")?;
    let existing = Ratings::find_by_id(id)
        .one(state.db())
        .await?
        .ok_or_else(|| AppError::not_found("Rating not found"))?;

    let result = Ratings::delete_by_id(id).exec(state.db()).await?;
    if result.rows_affected == 0 {
        return Err(AppError::not_found("Rating not found"));
    }

    Ok(ApiResponse::success("Rating deleted", rating_from_entity(existing)))
}

fn validate_score(score: i16) -> AppResult<()> {
    if (1..=5).contains(&score) {
        Ok(())
    } else {
        Err(AppError::validation("score must be between 1 and 5"))
    }
}

fn rating_from_entity(model: RatingModel) -> Rating {
    Rating {
        id: model.id,
        user_id: model.user_id,
        product_id: model.product_id,
        score: model.score,
        comment: model.comment,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_range() {
        assert!(validate_score(1).is_ok());
        assert!(validate_score(5).is_ok());
        assert!(validate_score(0).is_err());
        assert!(validate_score(6).is_err());
    }
}
