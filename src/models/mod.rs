//! Data models for Listalibros

pub mod book;
pub mod category;
pub mod person;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// Re-export commonly used types
pub use book::{Book, LoanStatus};
pub use category::Category;
pub use person::Person;

/// Confirmation body used by create/delete endpoints
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub respuesta: String,
}

impl MessageResponse {
    pub fn new(respuesta: impl Into<String>) -> Self {
        Self {
            respuesta: respuesta.into(),
        }
    }
}
