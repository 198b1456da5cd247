//! Person (library member) model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Person row from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Person {
    pub id: i32,
    pub nombre: String,
    pub apellido: String,
    pub alias: String,
    /// Unique and immutable after creation
    pub email: String,
}

/// Create person request
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreatePerson {
    pub nombre: Option<String>,
    pub apellido: Option<String>,
    pub alias: Option<String>,
    pub email: Option<String>,
}

/// Update person request. Any `email` sent by the client is ignored.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdatePerson {
    pub nombre: Option<String>,
    pub apellido: Option<String>,
    pub alias: Option<String>,
}

/// Normalized values ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPerson {
    pub nombre: String,
    pub apellido: String,
    pub alias: String,
    pub email: String,
}

/// Normalized mutable fields of a person
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonNames {
    pub nombre: String,
    pub apellido: String,
    pub alias: String,
}
