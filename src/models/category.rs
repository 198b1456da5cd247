//! Category model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Category row from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Category {
    pub id: i32,
    /// Uppercased, trimmed, unique
    pub nombre: String,
}

/// Create category request
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateCategory {
    pub nombre: Option<String>,
}

/// Update category request
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateCategory {
    pub nombre: Option<String>,
}
