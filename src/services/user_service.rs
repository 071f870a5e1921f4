use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use crate::{
    dto::users::{CreateUserRequest, UpdateUserRequest, UserList},
    entity::users::{ActiveModel as UserActive, Column as UserCol, Entity as Users, Model as UserModel},
    error::{AppError, AppResult},
    models::User,
    response::ApiResponse,
    services::{non_blank, require_text, updated_or},
    state::AppState,
};

pub async fn list_users(state: &AppState) -> AppResult<ApiResponse<UserList>> {
    let items = Users::find()
        .order_by_asc(UserCol::CreatedAt)
        .all(state.db())
        .await?
        .into_iter()
        .map(user_from_entity)
        .collect();

    Ok(ApiResponse::success("Users", UserList { items }))
}

pub async fn get_user(state: &AppState, raw_id: &str) -> AppResult<ApiResponse<User>> {
    let id = require_text(raw_id, "user id")?;
    let user = Users::find_by_id(id.to_string())
        .one(state.db())
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    Ok(ApiResponse::success("User", user_from_entity(user)))
}

pub async fn create_user(
    state: &AppState,
    payload: CreateUserRequest,
) -> AppResult<ApiResponse<User>> {
    let email = non_blank(payload.email).ok_or_else(|| AppError::validation("email is required"))?;
    validate_email(&email)?;
    let id = non_blank(payload.id).unwrap_or_else(|| Uuid::new_v4().to_string());

    let user = UserActive {
        id: Set(id),
        email: Set(email),
        first_name: Set(payload.first_name.trim().to_string()),
        last_name: Set(payload.last_name.trim().to_string()),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(state.db())
    .await?;

    tracing::info!(user_id = %user.id, "user created");

    Ok(ApiResponse::success("User created", user_from_entity(user)))
}

pub async fn update_user(
    state: &AppState,
    raw_id: &str,
    payload: UpdateUserRequest,
) -> AppResult<ApiResponse<User>> {
    let id = require_text(raw_id, "user id")?;
    let existing = Users::find_by_id(id.to_string())
        .one(state.db())
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    let mut active: UserActive = existing.into();
    if let Some(email) = payload.email {
        let email = email.trim().to_string();
        validate_email(&email)?;
        active.email = Set(email);
    }
    if let Some(first_name) = payload.first_name {
        active.first_name = Set(first_name.trim().to_string());
    }
    if let Some(last_name) = payload.last_name {
        active.last_name = Set(last_name.trim().to_string());
    }
    active.updated_at = Set(Utc::now().into());

    let user = updated_or(active.update(state.db()).await, || {
        AppError::not_found("User not found")
    })?;
    Ok(ApiResponse::success("User updated", user_from_entity(user)))
}

pub async fn delete_user(state: &AppState, raw_id: &str) -> AppResult<ApiResponse<User>> {
    let id = require_text(raw_id, "user id")?;
    let existing = Users::find_by_id(id.to_string())
        .one(state.db())
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    let result = Users::delete_by_id(id.to_string()).exec(state.db()).await?;
    if result.rows_affected == 0 {
        return Err(AppError::not_found("User not found"));
    }

    Ok(ApiResponse::success("User deleted", user_from_entity(existing)))
}

fn validate_email(email: &str) -> AppResult<()> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(AppError::validation(format!("email '{email}' is not valid"))),
    }
}

fn user_from_entity(model: UserModel) -> User {
    User {
        id: model.id,
        email: model.email,
        first_name: model.first_name,
        last_name: model.last_name,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shape() {
        assert!(validate_email("ana@example.com").is_ok());
        assert!(validate_email("ana").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("ana@localhost").is_err());
    }
}
