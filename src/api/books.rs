//! Book catalog and loan endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::AppResult,
    models::{
        book::{Book, CreateBook, LendBook, UpdateBook},
        MessageResponse,
    },
};

use super::{ApiJson, OptionalJson};

/// Add a book to the catalog
#[utoipa::path(
    post,
    path = "/libros",
    tag = "libros",
    request_body = CreateBook,
    responses(
        (status = 200, description = "Single-element list with the new book", body = Vec<Book>),
        (status = 400, description = "Missing fields", body = crate::error::ErrorResponse),
        (status = 404, description = "Category or person not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Book already exists", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    ApiJson(data): ApiJson<CreateBook>,
) -> AppResult<Json<Vec<Book>>> {
    let book = state.services.books.create(&data).await?;
    Ok(Json(vec![book]))
}

/// List every book
#[utoipa::path(
    get,
    path = "/libros",
    tag = "libros",
    responses(
        (status = 200, description = "All books", body = Vec<Book>)
    )
)]
pub async fn list_books(State(state): State<crate::AppState>) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.books.list().await?;
    Ok(Json(books))
}

/// Get a book by ID
#[utoipa::path(
    get,
    path = "/libros/{id}",
    tag = "libros",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Single-element list with the book", body = Vec<Book>),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<Book>>> {
    let book = state.services.books.get_by_id(id).await?;
    Ok(Json(vec![book]))
}

/// Update a book's description
#[utoipa::path(
    put,
    path = "/libros/{id}",
    tag = "libros",
    params(("id" = i32, Path, description = "Book ID")),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Single-element list with the updated book", body = Vec<Book>),
        (status = 400, description = "Only the description may change", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    ApiJson(data): ApiJson<UpdateBook>,
) -> AppResult<Json<Vec<Book>>> {
    let book = state.services.books.update(id, &data).await?;
    Ok(Json(vec![book]))
}

/// Lend a book to a person
#[utoipa::path(
    put,
    path = "/libros/prestar/{id}",
    tag = "libros",
    params(("id" = i32, Path, description = "Book ID")),
    request_body = LendBook,
    responses(
        (status = 200, description = "Book lent", body = String),
        (status = 404, description = "Book or person not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Book already on loan", body = crate::error::ErrorResponse)
    )
)]
pub async fn lend_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    OptionalJson(data): OptionalJson<LendBook>,
) -> AppResult<Json<&'static str>> {
    state.services.books.lend(id, &data).await?;
    Ok(Json("Se presto correctamente"))
}

/// Return a lent book
#[utoipa::path(
    put,
    path = "/libros/devolver/{id}",
    tag = "libros",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book returned", body = String),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Book was not on loan", body = crate::error::ErrorResponse)
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<&'static str>> {
    state.services.books.give_back(id).await?;
    Ok(Json("Se realizo la devolucion correctamente"))
}

/// Delete a book that is in stock
#[utoipa::path(
    delete,
    path = "/libros/{id}",
    tag = "libros",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book deleted", body = MessageResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Book is on loan", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<MessageResponse>> {
    state.services.books.delete(id).await?;
    Ok(Json(MessageResponse::new("El libro se eliminó correctamente")))
}
