//! Categories repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::category::Category,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoriesRepository: Send + Sync {
    /// List every category
    async fn list(&self) -> AppResult<Vec<Category>>;

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Category>>;

    /// Exact match on the stored (normalized) name
    async fn find_by_name(&self, nombre: &str) -> AppResult<Option<Category>>;

    async fn create(&self, nombre: &str) -> AppResult<Category>;

    /// Overwrite the name; `None` when no row matched
    async fn update(&self, id: i32, nombre: &str) -> AppResult<Option<Category>>;

    /// Delete by ID; `false` when no row matched
    async fn delete(&self, id: i32) -> AppResult<bool>;
}

#[derive(Clone)]
pub struct PgCategoriesRepository {
    pool: Pool<Postgres>,
}

impl PgCategoriesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoriesRepository for PgCategoriesRepository {
    async fn list(&self) -> AppResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, Category>("SELECT id, nombre FROM categoria ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Category>> {
        let row = sqlx::query_as::<_, Category>("SELECT id, nombre FROM categoria WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_name(&self, nombre: &str) -> AppResult<Option<Category>> {
        let row =
            sqlx::query_as::<_, Category>("SELECT id, nombre FROM categoria WHERE nombre = $1")
                .bind(nombre)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row)
    }

    async fn create(&self, nombre: &str) -> AppResult<Category> {
        let row = sqlx::query_as::<_, Category>(
            "INSERT INTO categoria (nombre) VALUES ($1) RETURNING id, nombre",
        )
        .bind(nombre)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_constraint(e, "Esa categoria ya existe"))?;
        Ok(row)
    }

    async fn update(&self, id: i32, nombre: &str) -> AppResult<Option<Category>> {
        let row = sqlx::query_as::<_, Category>(
            "UPDATE categoria SET nombre = $1 WHERE id = $2 RETURNING id, nombre",
        )
        .bind(nombre)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_constraint(e, "Esa categoria ya existe"))?;
        Ok(row)
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM categoria WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::from_constraint(
                    e,
                    "La categoria tiene libros asociados. NO se puede ELIMINAR.",
                )
            })?;
        Ok(result.rows_affected() > 0)
    }
}
