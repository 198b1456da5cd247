//! Persons repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::person::{NewPerson, Person, PersonNames},
};

const PERSON_COLUMNS: &str = "id, nombre, apellido, alias, email";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PersonsRepository: Send + Sync {
    async fn list(&self) -> AppResult<Vec<Person>>;

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Person>>;

    /// Exact match on the stored (normalized) email
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Person>>;

    async fn create(&self, person: &NewPerson) -> AppResult<Person>;

    /// Overwrite nombre, apellido and alias; the email is never touched
    async fn update(&self, id: i32, names: &PersonNames) -> AppResult<Option<Person>>;

    async fn delete(&self, id: i32) -> AppResult<bool>;
}

#[derive(Clone)]
pub struct PgPersonsRepository {
    pool: Pool<Postgres>,
}

impl PgPersonsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PersonsRepository for PgPersonsRepository {
    async fn list(&self) -> AppResult<Vec<Person>> {
        let query = format!("SELECT {} FROM persona ORDER BY id", PERSON_COLUMNS);
        let rows = sqlx::query_as::<_, Person>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Person>> {
        let query = format!("SELECT {} FROM persona WHERE id = $1", PERSON_COLUMNS);
        let row = sqlx::query_as::<_, Person>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Person>> {
        let query = format!("SELECT {} FROM persona WHERE email = $1", PERSON_COLUMNS);
        let row = sqlx::query_as::<_, Person>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, person: &NewPerson) -> AppResult<Person> {
        let query = format!(
            r#"
            INSERT INTO persona (nombre, apellido, alias, email)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            PERSON_COLUMNS
        );

        let row = sqlx::query_as::<_, Person>(&query)
            .bind(&person.nombre)
            .bind(&person.apellido)
            .bind(&person.alias)
            .bind(&person.email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::from_constraint(e, "El e-mail proporcionado ya se encuentra en uso.")
            })?;

        Ok(row)
    }

    async fn update(&self, id: i32, names: &PersonNames) -> AppResult<Option<Person>> {
        let query = format!(
            r#"
            UPDATE persona SET nombre = $1, apellido = $2, alias = $3
            WHERE id = $4
            RETURNING {}
            "#,
            PERSON_COLUMNS
        );

        let row = sqlx::query_as::<_, Person>(&query)
            .bind(&names.nombre)
            .bind(&names.apellido)
            .bind(&names.alias)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM persona WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::from_constraint(
                    e,
                    "La persona que intenta eliminar tiene uno o más libros asociados.",
                )
            })?;
        Ok(result.rows_affected() > 0)
    }
}
