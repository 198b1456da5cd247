//! Person endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::AppResult,
    models::person::{CreatePerson, Person, UpdatePerson},
};

use super::ApiJson;

/// Register a person
#[utoipa::path(
    post,
    path = "/personas",
    tag = "personas",
    request_body = CreatePerson,
    responses(
        (status = 200, description = "Person created", body = Person),
        (status = 400, description = "Missing or invalid fields", body = crate::error::ErrorResponse),
        (status = 409, description = "Email already in use", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_person(
    State(state): State<crate::AppState>,
    ApiJson(data): ApiJson<CreatePerson>,
) -> AppResult<Json<Person>> {
    let person = state.services.persons.create(&data).await?;
    Ok(Json(person))
}

/// List every person
#[utoipa::path(
    get,
    path = "/personas",
    tag = "personas",
    responses(
        (status = 200, description = "All persons", body = Vec<Person>)
    )
)]
pub async fn list_persons(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Person>>> {
    let persons = state.services.persons.list().await?;
    Ok(Json(persons))
}

/// Get a person by ID
#[utoipa::path(
    get,
    path = "/personas/{id}",
    tag = "personas",
    params(("id" = i32, Path, description = "Person ID")),
    responses(
        (status = 200, description = "Person details", body = Person),
        (status = 404, description = "Person not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_person(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Person>> {
    let person = state.services.persons.get_by_id(id).await?;
    Ok(Json(person))
}

/// Update a person's names and alias
#[utoipa::path(
    put,
    path = "/personas/{id}",
    tag = "personas",
    params(("id" = i32, Path, description = "Person ID")),
    request_body = UpdatePerson,
    responses(
        (status = 200, description = "Person updated", body = Person),
        (status = 400, description = "Missing fields", body = crate::error::ErrorResponse),
        (status = 404, description = "Person not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_person(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    ApiJson(data): ApiJson<UpdatePerson>,
) -> AppResult<Json<Person>> {
    let person = state.services.persons.update(id, &data).await?;
    Ok(Json(person))
}

/// Delete a person holding no books
#[utoipa::path(
    delete,
    path = "/personas/{id}",
    tag = "personas",
    params(("id" = i32, Path, description = "Person ID")),
    responses(
        (status = 200, description = "Person deleted", body = String),
        (status = 404, description = "Person not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Person holds books", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_person(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<&'static str>> {
    state.services.persons.delete(id).await?;
    Ok(Json("La persona seleccionada se borró exitosamente."))
}
