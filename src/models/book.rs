//! Book model, loan status and request types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Book row from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub nombre: String,
    pub descripcion: String,
    pub categoria_id: i32,
    /// Person currently holding the book; `None` while in stock
    pub persona_id: Option<i32>,
}

/// Loan status derived from the holder reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanStatus {
    InStock,
    OnLoan(i32),
}

impl Book {
    pub fn loan_status(&self) -> LoanStatus {
        match self.persona_id {
            Some(persona_id) => LoanStatus::OnLoan(persona_id),
            None => LoanStatus::InStock,
        }
    }
}

/// Create book request
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateBook {
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
    pub categoria_id: Option<i32>,
    /// Optional initial holder; `0` and `null` both mean none
    pub persona_id: Option<i32>,
}

/// Update book request.
///
/// Only `descripcion` may change; the other fields must repeat the stored values.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateBook {
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
    pub categoria_id: Option<i32>,
    pub persona_id: Option<i32>,
}

/// Borrow request
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct LendBook {
    pub persona_id: Option<i32>,
}

/// Normalized values ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub nombre: String,
    pub descripcion: String,
    pub categoria_id: i32,
    pub persona_id: Option<i32>,
}
