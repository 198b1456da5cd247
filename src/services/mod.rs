//! Business logic services

pub mod books;
pub mod categories;
pub mod persons;

use crate::{error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub categories: categories::CategoriesService,
    pub persons: persons::PersonsService,
    pub books: books::BooksService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            categories: categories::CategoriesService::new(repository.clone()),
            persons: persons::PersonsService::new(repository.clone()),
            books: books::BooksService::new(repository.clone()),
            repository,
        }
    }

    /// Check that the store answers
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.health.ping().await
    }
}

/// Uppercase and trim a free-text field before it is compared or stored
pub fn normalize(value: &str) -> String {
    value.trim().to_uppercase()
}

/// Normalize an optional field, treating blank values as missing
pub fn normalize_required(value: Option<&str>) -> Option<String> {
    value.map(normalize).filter(|v| !v.is_empty())
}

/// Optional foreign key where `0` stands for "none"
pub fn non_zero_id(id: Option<i32>) -> Option<i32> {
    id.filter(|&id| id != 0)
}
