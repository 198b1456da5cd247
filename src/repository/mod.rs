//! Repository layer for database operations
//!
//! Each table is reached through a trait so services can run against the
//! Postgres implementations in production and against fakes in tests.

pub mod books;
pub mod categories;
pub mod persons;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::error::AppResult;

pub use books::{BooksRepository, PgBooksRepository};
pub use categories::{CategoriesRepository, PgCategoriesRepository};
pub use persons::{PersonsRepository, PgPersonsRepository};

/// Store liveness check used by the readiness endpoint
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HealthRepository: Send + Sync {
    async fn ping(&self) -> AppResult<()>;
}

#[derive(Clone)]
pub struct PgHealthRepository {
    pool: Pool<Postgres>,
}

impl PgHealthRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HealthRepository for PgHealthRepository {
    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Main repository struct holding one store handle per table
#[derive(Clone)]
pub struct Repository {
    pub categories: Arc<dyn CategoriesRepository>,
    pub persons: Arc<dyn PersonsRepository>,
    pub books: Arc<dyn BooksRepository>,
    pub health: Arc<dyn HealthRepository>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            categories: Arc::new(PgCategoriesRepository::new(pool.clone())),
            persons: Arc::new(PgPersonsRepository::new(pool.clone())),
            books: Arc::new(PgBooksRepository::new(pool.clone())),
            health: Arc::new(PgHealthRepository::new(pool)),
        }
    }

    /// Assemble a repository from arbitrary store implementations
    pub fn from_stores(
        categories: Arc<dyn CategoriesRepository>,
        persons: Arc<dyn PersonsRepository>,
        books: Arc<dyn BooksRepository>,
        health: Arc<dyn HealthRepository>,
    ) -> Self {
        Self {
            categories,
            persons,
            books,
            health,
        }
    }
}
