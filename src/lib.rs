//! Listalibros Library Lending Catalog
//!
//! A REST JSON API over three resources (categories, persons and books) with a
//! borrow/return workflow that keeps each book either in stock or held by
//! exactly one person.

use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<services::Services>,
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Categories
        .route(
            "/categorias",
            get(api::categories::list_categories).post(api::categories::create_category),
        )
        .route(
            "/categorias/:id",
            get(api::categories::get_category)
                .put(api::categories::update_category)
                .delete(api::categories::delete_category),
        )
        // Persons
        .route(
            "/personas",
            get(api::persons::list_persons).post(api::persons::create_person),
        )
        .route(
            "/personas/:id",
            get(api::persons::get_person)
                .put(api::persons::update_person)
                .delete(api::persons::delete_person),
        )
        // Books
        .route(
            "/libros",
            get(api::books::list_books).post(api::books::create_book),
        )
        .route(
            "/libros/:id",
            get(api::books::get_book)
                .put(api::books::update_book)
                .delete(api::books::delete_book),
        )
        // Loans
        .route("/libros/prestar/:id", put(api::books::lend_book))
        .route("/libros/devolver/:id", put(api::books::return_book))
        .with_state(state);

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api", api)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
