//! Category catalog service

use crate::{
    error::{AppError, AppResult},
    models::category::{Category, CreateCategory, UpdateCategory},
    repository::Repository,
};

use super::normalize_required;

#[derive(Clone)]
pub struct CategoriesService {
    repository: Repository,
}

impl CategoriesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a category with a unique normalized name
    pub async fn create(&self, data: &CreateCategory) -> AppResult<Category> {
        let nombre = normalize_required(data.nombre.as_deref())
            .ok_or_else(|| AppError::Validation("Falta enviar el nombre".to_string()))?;

        if self.repository.categories.find_by_name(&nombre).await?.is_some() {
            return Err(AppError::Conflict("Esa categoria ya existe".to_string()));
        }

        let category = self.repository.categories.create(&nombre).await?;
        tracing::info!(id = category.id, nombre = %category.nombre, "Category created");
        Ok(category)
    }

    pub async fn list(&self) -> AppResult<Vec<Category>> {
        self.repository.categories.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Category> {
        self.repository
            .categories
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("La categoría no existe.".to_string()))
    }

    /// Rename a category
    pub async fn update(&self, id: i32, data: &UpdateCategory) -> AppResult<Category> {
        let not_found = || {
            AppError::NotFound(
                "La categoria que intenta modificar no se encuentra en la base de datos."
                    .to_string(),
            )
        };

        self.repository
            .categories
            .get_by_id(id)
            .await?
            .ok_or_else(not_found)?;

        let nombre = normalize_required(data.nombre.as_deref())
            .ok_or_else(|| AppError::Validation("Faltan datos.".to_string()))?;

        if let Some(existing) = self.repository.categories.find_by_name(&nombre).await? {
            if existing.id != id {
                return Err(AppError::Conflict("Esa categoria ya existe".to_string()));
            }
        }

        let category = self
            .repository
            .categories
            .update(id, &nombre)
            .await?
            .ok_or_else(not_found)?;

        tracing::info!(id, nombre = %category.nombre, "Category updated");
        Ok(category)
    }

    /// Delete a category no book refers to
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        if self.repository.books.count_by_category(id).await? > 0 {
            return Err(AppError::Conflict(
                "La categoria tiene libros asociados. NO se puede ELIMINAR.".to_string(),
            ));
        }

        let not_found = || AppError::NotFound("No existe la categoría indicada.".to_string());

        self.repository
            .categories
            .get_by_id(id)
            .await?
            .ok_or_else(not_found)?;

        if !self.repository.categories.delete(id).await? {
            return Err(not_found());
        }

        tracing::info!(id, "Category deleted");
        Ok(())
    }
}
