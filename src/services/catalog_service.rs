use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::{
    dto::catalog::{CatalogItemRequest, CatalogList},
    entity::catalog_items::{
        ActiveModel as CatalogActive, CatalogKind, Column as CatalogCol, Entity as CatalogItems,
        Model as CatalogModel,
    },
    error::{AppError, AppResult},
    models::CatalogItem,
    response::ApiResponse,
    services::{non_blank, parse_id, updated_or},
    state::AppState,
};

pub async fn list_items(state: &AppState, kind: CatalogKind) -> AppResult<ApiResponse<CatalogList>> {
    let items = CatalogItems::find()
        .filter(CatalogCol::Kind.eq(kind))
        .order_by_asc(CatalogCol::Name)
        .all(state.db())
        .await?
        .into_iter()
        .map(catalog_from_entity)
        .collect();

    Ok(ApiResponse::success("Catalog items", CatalogList { items }))
}

pub async fn get_item(
    state: &AppState,
    kind: CatalogKind,
    raw_id: &str,
) -> AppResult<ApiResponse<CatalogItem>> {
    let id = parse_id(raw_id, "id")?;
    let item = find_of_kind(state.db(), kind, id)
        .await?
        .ok_or_else(|| not_found(kind))?;
    Ok(ApiResponse::success("Catalog item", catalog_from_entity(item)))
}

pub async fn create_item(
    state: &AppState,
    kind: CatalogKind,
    payload: CatalogItemRequest,
) -> AppResult<ApiResponse<CatalogItem>> {
    let name = non_blank(payload.name)
        .ok_or_else(|| AppError::validation("name is required"))?;

    let item = CatalogActive {
        id: Set(Uuid::new_v4()),
        kind: Set(kind),
        name: Set(name),
        description: Set(non_blank(payload.description)),
        created_at: NotSet,
    }
    .insert(state.db())
    .await?;

    Ok(ApiResponse::success(
        format!("{} created", capitalize(kind.label())),
        catalog_from_entity(item),
    ))
}

pub async fn update_item(
    state: &AppState,
    kind: CatalogKind,
    raw_id: &str,
    payload: CatalogItemRequest,
) -> AppResult<ApiResponse<CatalogItem>> {
    let id = parse_id(raw_id, "id")?;
    let existing = find_of_kind(state.db(), kind, id)
        .await?
        .ok_or_else(|| not_found(kind))?;

    let mut active: CatalogActive = existing.into();
    if let Some(name) = payload.name {
        let name = non_blank(Some(name)).ok_or_else(|| AppError::validation("name must not be empty"))?;
        active.name = Set(name);
    }
    if payload.description.is_some() {
        active.description = Set(non_blank(payload.description));
    }

    let item = if active.is_changed() {
        updated_or(active.update(state.db()).await, || not_found(kind))?
    } else {
        find_of_kind(state.db(), kind, id)
            .await?
            .ok_or_else(|| not_found(kind))?
    };

    Ok(ApiResponse::success("Updated", catalog_from_entity(item)))
}

pub async fn delete_item(
    state: &AppState,
    kind: CatalogKind,
    raw_id: &str,
) -> AppResult<ApiResponse<CatalogItem>> {
    let id = parse_id(raw_id, "id")?;
    let existing = find_of_kind(state.db(), kind, id)
        .await?
        .ok_or_else(|| not_found(kind))?;

    let result = CatalogItems::delete_by_id(id).exec(state.db()).await?;
    if result.rows_affected == 0 {
        return Err(not_found(kind));
    }

    Ok(ApiResponse::success("Deleted", catalog_from_entity(existing)))
}

/// Resolves a foreign key that must point at a catalog item of `kind`.
pub async fn require_item<C: ConnectionTrait>(
    conn: &C,
    kind: CatalogKind,
    id: Uuid,
) -> AppResult<CatalogModel> {
    find_of_kind(conn, kind, id).await?.ok_or_else(|| {
        AppError::validation(format!("{} '{id}' does not exist", kind.label()))
    })
}

async fn find_of_kind<C: ConnectionTrait>(
    conn: &C,
    kind: CatalogKind,
    id: Uuid,
) -> AppResult<Option<CatalogModel>> {
    let item = CatalogItems::find_by_id(id)
        .filter(CatalogCol::Kind.eq(kind))
        .one(conn)
        .await?;
    Ok(item)
}

fn not_found(kind: CatalogKind) -> AppError {
    AppError::not_found(format!("{} not found", capitalize(kind.label())))
}

fn capitalize(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn catalog_from_entity(model: CatalogModel) -> CatalogItem {
    CatalogItem {
        id: model.id,
        kind: model.kind,
        name: model.name,
        description: model.description,
        created_at: model.created_at.with_timezone(&Utc),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_kind() {
        assert_eq!(
            not_found(CatalogKind::Amenity).to_string(),
            "Amenity not found"
        );
        assert_eq!(capitalize(CatalogKind::ProductType.label()), "Product type");
    }
}
