//! Category endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::AppResult,
    models::{
        category::{Category, CreateCategory, UpdateCategory},
        MessageResponse,
    },
};

use super::ApiJson;

/// Create a category
#[utoipa::path(
    post,
    path = "/categorias",
    tag = "categorias",
    request_body = CreateCategory,
    responses(
        (status = 200, description = "Category created", body = MessageResponse),
        (status = 400, description = "Missing name", body = crate::error::ErrorResponse),
        (status = 409, description = "Category already exists", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_category(
    State(state): State<crate::AppState>,
    ApiJson(data): ApiJson<CreateCategory>,
) -> AppResult<Json<MessageResponse>> {
    let category = state.services.categories.create(&data).await?;

    Ok(Json(MessageResponse::new(format!(
        "ID: {}, nombre: {}",
        category.id, category.nombre
    ))))
}

/// List every category
#[utoipa::path(
    get,
    path = "/categorias",
    tag = "categorias",
    responses(
        (status = 200, description = "All categories", body = Vec<Category>)
    )
)]
pub async fn list_categories(
    State(state): State<crate::AppState>,
) -> AppResult<Json<Vec<Category>>> {
    let categories = state.services.categories.list().await?;
    Ok(Json(categories))
}

/// Get a category by ID
#[utoipa::path(
    get,
    path = "/categorias/{id}",
    tag = "categorias",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Single-element list with the category", body = Vec<Category>),
        (status = 404, description = "Category not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_category(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<Category>>> {
    let category = state.services.categories.get_by_id(id).await?;
    Ok(Json(vec![category]))
}

/// Rename a category
#[utoipa::path(
    put,
    path = "/categorias/{id}",
    tag = "categorias",
    params(("id" = i32, Path, description = "Category ID")),
    request_body = UpdateCategory,
    responses(
        (status = 200, description = "Single-element list with the updated category", body = Vec<Category>),
        (status = 400, description = "Missing name", body = crate::error::ErrorResponse),
        (status = 404, description = "Category not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Name used by another category", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_category(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    ApiJson(data): ApiJson<UpdateCategory>,
) -> AppResult<Json<Vec<Category>>> {
    let category = state.services.categories.update(id, &data).await?;
    Ok(Json(vec![category]))
}

/// Delete a category without books
#[utoipa::path(
    delete,
    path = "/categorias/{id}",
    tag = "categorias",
    params(("id" = i32, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category deleted", body = MessageResponse),
        (status = 404, description = "Category not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Category has books", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_category(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    state.services.categories.delete(id).await?;
    Ok(Json(MessageResponse::new("La categoría se eliminó correctamente")))
}
