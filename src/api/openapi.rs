//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, categories, health, persons};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Listalibros API",
        version = "1.0.0",
        description = "Library lending catalog REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api", description = "API")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Categories
        categories::create_category,
        categories::list_categories,
        categories::get_category,
        categories::update_category,
        categories::delete_category,
        // Persons
        persons::create_person,
        persons::list_persons,
        persons::get_person,
        persons::update_person,
        persons::delete_person,
        // Books
        books::create_book,
        books::list_books,
        books::get_book,
        books::update_book,
        books::lend_book,
        books::return_book,
        books::delete_book,
    ),
    components(
        schemas(
            crate::models::category::Category,
            crate::models::category::CreateCategory,
            crate::models::category::UpdateCategory,
            crate::models::person::Person,
            crate::models::person::CreatePerson,
            crate::models::person::UpdatePerson,
            crate::models::book::Book,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            crate::models::book::LendBook,
            crate::models::MessageResponse,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "categorias", description = "Book categories"),
        (name = "personas", description = "Library members"),
        (name = "libros", description = "Book catalog and loans")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
