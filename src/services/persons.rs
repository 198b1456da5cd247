//! Library member service

use validator::ValidateEmail;

use crate::{
    error::{AppError, AppResult},
    models::person::{CreatePerson, NewPerson, Person, PersonNames, UpdatePerson},
    repository::Repository,
};

use super::normalize_required;

#[derive(Clone)]
pub struct PersonsService {
    repository: Repository,
}

impl PersonsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Register a person; the normalized email must be unused
    pub async fn create(&self, data: &CreatePerson) -> AppResult<Person> {
        let missing = || AppError::Validation("Todos los campos deben ser completados.".to_string());

        let person = NewPerson {
            nombre: normalize_required(data.nombre.as_deref()).ok_or_else(missing)?,
            apellido: normalize_required(data.apellido.as_deref()).ok_or_else(missing)?,
            alias: normalize_required(data.alias.as_deref()).ok_or_else(missing)?,
            email: normalize_required(data.email.as_deref()).ok_or_else(missing)?,
        };

        // Format is checked on the trimmed input, before uppercasing
        let email = data.email.as_deref().unwrap_or_default().trim().to_string();
        if !email.validate_email() {
            return Err(AppError::Validation(
                "El e-mail proporcionado no es válido.".to_string(),
            ));
        }

        if self.repository.persons.find_by_email(&person.email).await?.is_some() {
            return Err(AppError::Conflict(
                "El e-mail proporcionado ya se encuentra en uso.".to_string(),
            ));
        }

        let created = self.repository.persons.create(&person).await?;
        tracing::info!(id = created.id, "Person created");
        Ok(created)
    }

    pub async fn list(&self) -> AppResult<Vec<Person>> {
        self.repository.persons.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Person> {
        self.repository
            .persons
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("No se encuentra esa persona".to_string()))
    }

    /// Update names and alias; the email stays as registered
    pub async fn update(&self, id: i32, data: &UpdatePerson) -> AppResult<Person> {
        let not_found = || {
            AppError::NotFound(
                "La persona que intenta modificar no se encuentra en la base de datos."
                    .to_string(),
            )
        };

        self.repository
            .persons
            .get_by_id(id)
            .await?
            .ok_or_else(not_found)?;

        let missing = || AppError::Validation("Todos los campos son requeridos.".to_string());
        let names = PersonNames {
            nombre: normalize_required(data.nombre.as_deref()).ok_or_else(missing)?,
            apellido: normalize_required(data.apellido.as_deref()).ok_or_else(missing)?,
            alias: normalize_required(data.alias.as_deref()).ok_or_else(missing)?,
        };

        let person = self
            .repository
            .persons
            .update(id, &names)
            .await?
            .ok_or_else(not_found)?;

        tracing::info!(id, "Person updated");
        Ok(person)
    }

    /// Delete a person who holds no book
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let not_found = || {
            AppError::NotFound(
                "La persona que intenta eliminar no se encuentra en la base de datos."
                    .to_string(),
            )
        };

        self.repository
            .persons
            .get_by_id(id)
            .await?
            .ok_or_else(not_found)?;

        if self.repository.books.count_by_holder(id).await? > 0 {
            return Err(AppError::Conflict(
                "La persona que intenta eliminar tiene uno o más libros asociados.".to_string(),
            ));
        }

        if !self.repository.persons.delete(id).await? {
            return Err(not_found());
        }

        tracing::info!(id, "Person deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mockall::predicate::eq;

    use super::*;
    use crate::repository::{
        books::MockBooksRepository, categories::MockCategoriesRepository,
        persons::MockPersonsRepository, MockHealthRepository,
    };

    fn service(persons: MockPersonsRepository, books: MockBooksRepository) -> PersonsService {
        PersonsService::new(Repository::from_stores(
            Arc::new(MockCategoriesRepository::new()),
            Arc::new(persons),
            Arc::new(books),
            Arc::new(MockHealthRepository::new()),
        ))
    }

    fn alice() -> Person {
        Person {
            id: 3,
            nombre: "ALICE".to_string(),
            apellido: "LIDDELL".to_string(),
            alias: "ALI".to_string(),
            email: "A@X.COM".to_string(),
        }
    }

    fn alice_request(email: &str) -> CreatePerson {
        CreatePerson {
            nombre: Some("alice".to_string()),
            apellido: Some("liddell ".to_string()),
            alias: Some("ali".to_string()),
            email: Some(email.to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_normalizes_fields() {
        let mut persons = MockPersonsRepository::new();
        persons
            .expect_find_by_email()
            .with(eq("A@X.COM"))
            .returning(|_| Ok(None));
        persons
            .expect_create()
            .withf(|p| {
                p.nombre == "ALICE" && p.apellido == "LIDDELL" && p.alias == "ALI" && p.email == "A@X.COM"
            })
            .times(1)
            .returning(|_| Ok(alice()));

        let person = service(persons, MockBooksRepository::new())
            .create(&alice_request(" a@x.com"))
            .await
            .unwrap();
        assert_eq!(person, alice());
    }

    #[tokio::test]
    async fn test_create_rejects_email_in_use() {
        let mut persons = MockPersonsRepository::new();
        persons
            .expect_find_by_email()
            .with(eq("A@X.COM"))
            .returning(|_| Ok(Some(alice())));
        persons.expect_create().never();

        let err = service(persons, MockBooksRepository::new())
            .create(&alice_request("A@X.COM"))
            .await
            .unwrap_err();
        assert!(
            matches!(err, AppError::Conflict(msg) if msg == "El e-mail proporcionado ya se encuentra en uso.")
        );
    }

    #[tokio::test]
    async fn test_create_requires_every_field() {
        let mut request = alice_request("a@x.com");
        request.alias = None;

        let err = service(MockPersonsRepository::new(), MockBooksRepository::new())
            .create(&request)
            .await
            .unwrap_err();
        assert!(
            matches!(err, AppError::Validation(msg) if msg == "Todos los campos deben ser completados.")
        );
    }

    #[tokio::test]
    async fn test_create_rejects_malformed_email() {
        let err = service(MockPersonsRepository::new(), MockBooksRepository::new())
            .create(&alice_request("not-an-email"))
            .await
            .unwrap_err();
        assert!(
            matches!(err, AppError::Validation(msg) if msg == "El e-mail proporcionado no es válido.")
        );
    }

    #[tokio::test]
    async fn test_delete_blocked_while_holding_books() {
        let mut persons = MockPersonsRepository::new();
        persons.expect_get_by_id().returning(|_| Ok(Some(alice())));
        persons.expect_delete().never();
        let mut books = MockBooksRepository::new();
        books.expect_count_by_holder().with(eq(3)).returning(|_| Ok(1));

        let err = service(persons, books).delete(3).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_delete_without_books() {
        let mut persons = MockPersonsRepository::new();
        persons.expect_get_by_id().returning(|_| Ok(Some(alice())));
        persons.expect_delete().with(eq(3)).times(1).returning(|_| Ok(true));
        let mut books = MockBooksRepository::new();
        books.expect_count_by_holder().returning(|_| Ok(0));

        service(persons, books).delete(3).await.unwrap();
    }
}
