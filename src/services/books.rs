//! Book catalog and loan service

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, CreateBook, LendBook, LoanStatus, NewBook, UpdateBook},
    repository::Repository,
};

use super::{non_zero_id, normalize, normalize_required};

const ALREADY_ON_LOAN: &str =
    "El libro ya se encuentra prestado, no se puede prestar hasta que no se devuelva";
const NOT_ON_LOAN: &str = "Ese libro no estaba prestado";
const BORROWER_NOT_FOUND: &str = "No se encontro la persona a la que se quiere prestar el libro";

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Add a book to the catalog, optionally already lent to someone
    pub async fn create(&self, data: &CreateBook) -> AppResult<Book> {
        let nombre = normalize_required(data.nombre.as_deref());
        let categoria_id = non_zero_id(data.categoria_id);
        let (Some(nombre), Some(categoria_id)) = (nombre, categoria_id) else {
            return Err(AppError::Validation(
                "nombre y categoria son datos obligatorios".to_string(),
            ));
        };

        let descripcion = normalize_required(data.descripcion.as_deref())
            .ok_or_else(|| AppError::Validation("Faltan enviar datos".to_string()))?;

        if self.repository.books.find_by_name(&nombre).await?.is_some() {
            return Err(AppError::Conflict("Ese libro ya existe".to_string()));
        }

        if self.repository.categories.get_by_id(categoria_id).await?.is_none() {
            return Err(AppError::NotFound("No existe esa categoria".to_string()));
        }

        let persona_id = non_zero_id(data.persona_id);
        if let Some(persona_id) = persona_id {
            if self.repository.persons.get_by_id(persona_id).await?.is_none() {
                return Err(AppError::NotFound("no existe la persona indicada".to_string()));
            }
        }

        let book = self
            .repository
            .books
            .create(&NewBook {
                nombre,
                descripcion,
                categoria_id,
                persona_id,
            })
            .await?;

        tracing::info!(id = book.id, nombre = %book.nombre, "Book created");
        Ok(book)
    }

    pub async fn list(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        self.repository
            .books
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("No se encuentra ese libro".to_string()))
    }

    /// Replace the description. Name, category and holder must match the stored row.
    pub async fn update(&self, id: i32, data: &UpdateBook) -> AppResult<Book> {
        let not_found = || AppError::NotFound("No se encuentra ese libro.".to_string());

        let stored = self
            .repository
            .books
            .get_by_id(id)
            .await?
            .ok_or_else(not_found)?;

        let nombre = data.nombre.as_deref().map(normalize);
        if nombre.as_deref() != Some(stored.nombre.as_str())
            || data.categoria_id != Some(stored.categoria_id)
            || non_zero_id(data.persona_id) != stored.persona_id
        {
            return Err(AppError::Validation(
                "Sólo se puede modificar la descripción del libro.".to_string(),
            ));
        }

        let descripcion = normalize_required(data.descripcion.as_deref())
            .ok_or_else(|| AppError::Validation("Faltan enviar datos".to_string()))?;

        let book = self
            .repository
            .books
            .update_description(id, &descripcion)
            .await?
            .ok_or_else(not_found)?;

        tracing::info!(id, "Book description updated");
        Ok(book)
    }

    /// Lend an in-stock book to an existing person
    pub async fn lend(&self, id: i32, data: &LendBook) -> AppResult<()> {
        let book = self
            .repository
            .books
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("No se encontro el libro".to_string()))?;

        if let LoanStatus::OnLoan(holder) = book.loan_status() {
            tracing::warn!(id, holder, "Borrow rejected: book already on loan");
            return Err(AppError::LoanState(ALREADY_ON_LOAN.to_string()));
        }

        let persona_id = non_zero_id(data.persona_id)
            .ok_or_else(|| AppError::NotFound(BORROWER_NOT_FOUND.to_string()))?;

        if self.repository.persons.get_by_id(persona_id).await?.is_none() {
            return Err(AppError::NotFound(BORROWER_NOT_FOUND.to_string()));
        }

        // Conditional on the book still being in stock
        if !self.repository.books.lend(id, persona_id).await? {
            tracing::warn!(id, persona_id, "Borrow lost a race with another borrow");
            return Err(AppError::LoanState(ALREADY_ON_LOAN.to_string()));
        }

        tracing::info!(id, persona_id, "Book lent");
        Ok(())
    }

    /// Bring a lent book back into stock
    pub async fn give_back(&self, id: i32) -> AppResult<()> {
        let book = self
            .repository
            .books
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Ese libro no existe".to_string()))?;

        if book.loan_status() == LoanStatus::InStock {
            tracing::warn!(id, "Return rejected: book is in stock");
            return Err(AppError::LoanState(NOT_ON_LOAN.to_string()));
        }

        if !self.repository.books.give_back(id).await? {
            return Err(AppError::LoanState(NOT_ON_LOAN.to_string()));
        }

        tracing::info!(id, "Book returned");
        Ok(())
    }

    /// Delete a book that is not on loan
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let book = self
            .repository
            .books
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("No se encuentra ese libro.".to_string()))?;

        let on_loan = || AppError::Conflict("Ese libro está prestado, NO se puede borrar.".to_string());

        if book.persona_id.is_some() {
            return Err(on_loan());
        }

        if !self.repository.books.delete_in_stock(id).await? {
            return Err(on_loan());
        }

        tracing::info!(id, "Book deleted");
        Ok(())
    }
}
