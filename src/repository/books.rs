//! Books repository, including the loan state transitions

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, NewBook},
};

const BOOK_COLUMNS: &str = "id, nombre, descripcion, categoria_id, persona_id";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BooksRepository: Send + Sync {
    async fn list(&self) -> AppResult<Vec<Book>>;

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Book>>;

    /// Exact match on the stored (normalized) name
    async fn find_by_name(&self, nombre: &str) -> AppResult<Option<Book>>;

    async fn create(&self, book: &NewBook) -> AppResult<Book>;

    async fn update_description(&self, id: i32, descripcion: &str) -> AppResult<Option<Book>>;

    /// Number of books classified under a category
    async fn count_by_category(&self, categoria_id: i32) -> AppResult<i64>;

    /// Number of books currently held by a person
    async fn count_by_holder(&self, persona_id: i32) -> AppResult<i64>;

    /// Set the holder only if the book is in stock.
    ///
    /// Returns `false` when no in-stock row matched.
    async fn lend(&self, id: i32, persona_id: i32) -> AppResult<bool>;

    /// Clear the holder only if the book is on loan.
    ///
    /// Returns `false` when no on-loan row matched.
    async fn give_back(&self, id: i32) -> AppResult<bool>;

    /// Delete only if the book is in stock; `false` when no such row matched
    async fn delete_in_stock(&self, id: i32) -> AppResult<bool>;
}

#[derive(Clone)]
pub struct PgBooksRepository {
    pool: Pool<Postgres>,
}

impl PgBooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BooksRepository for PgBooksRepository {
    async fn list(&self) -> AppResult<Vec<Book>> {
        let query = format!("SELECT {} FROM libro ORDER BY id", BOOK_COLUMNS);
        let rows = sqlx::query_as::<_, Book>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        let query = format!("SELECT {} FROM libro WHERE id = $1", BOOK_COLUMNS);
        let row = sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_name(&self, nombre: &str) -> AppResult<Option<Book>> {
        let query = format!("SELECT {} FROM libro WHERE nombre = $1", BOOK_COLUMNS);
        let row = sqlx::query_as::<_, Book>(&query)
            .bind(nombre)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, book: &NewBook) -> AppResult<Book> {
        let query = format!(
            r#"
            INSERT INTO libro (nombre, descripcion, categoria_id, persona_id)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            BOOK_COLUMNS
        );

        let row = sqlx::query_as::<_, Book>(&query)
            .bind(&book.nombre)
            .bind(&book.descripcion)
            .bind(book.categoria_id)
            .bind(book.persona_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::from_constraint(e, "Ese libro ya existe"))?;

        Ok(row)
    }

    async fn update_description(&self, id: i32, descripcion: &str) -> AppResult<Option<Book>> {
        let query = format!(
            "UPDATE libro SET descripcion = $1 WHERE id = $2 RETURNING {}",
            BOOK_COLUMNS
        );
        let row = sqlx::query_as::<_, Book>(&query)
            .bind(descripcion)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn count_by_category(&self, categoria_id: i32) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM libro WHERE categoria_id = $1")
            .bind(categoria_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn count_by_holder(&self, persona_id: i32) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM libro WHERE persona_id = $1")
            .bind(persona_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn lend(&self, id: i32, persona_id: i32) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE libro SET persona_id = $1 WHERE id = $2 AND persona_id IS NULL",
        )
        .bind(persona_id)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::from_missing_reference(
                e,
                "No se encontro la persona a la que se quiere prestar el libro",
            )
        })?;
        Ok(result.rows_affected() > 0)
    }

    async fn give_back(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE libro SET persona_id = NULL WHERE id = $1 AND persona_id IS NOT NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_in_stock(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM libro WHERE id = $1 AND persona_id IS NULL")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
