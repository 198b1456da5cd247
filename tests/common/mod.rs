//! Shared helpers: an in-memory store behind the repository traits and a
//! oneshot request helper for the full router.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use listalibros_server::{
    create_router,
    error::{AppError, AppResult},
    models::{
        book::{Book, NewBook},
        category::Category,
        person::{NewPerson, Person, PersonNames},
    },
    repository::{
        BooksRepository, CategoriesRepository, HealthRepository, PersonsRepository, Repository,
    },
    services::Services,
    AppState,
};

#[derive(Default)]
struct Tables {
    next_id: i32,
    categories: Vec<Category>,
    persons: Vec<Person>,
    books: Vec<Book>,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-memory stand-in for the three tables, enforcing the same unique and
/// foreign-key constraints as the schema.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn book(&self, id: i32) -> Option<Book> {
        let tables = self.tables.lock().unwrap();
        tables.books.iter().find(|b| b.id == id).cloned()
    }

    pub fn category_count(&self) -> usize {
        self.tables.lock().unwrap().categories.len()
    }
}

#[async_trait]
impl CategoriesRepository for MemoryStore {
    async fn list(&self) -> AppResult<Vec<Category>> {
        Ok(self.tables.lock().unwrap().categories.clone())
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Category>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_name(&self, nombre: &str) -> AppResult<Option<Category>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.categories.iter().find(|c| c.nombre == nombre).cloned())
    }

    async fn create(&self, nombre: &str) -> AppResult<Category> {
        let mut tables = self.tables.lock().unwrap();
        if tables.categories.iter().any(|c| c.nombre == nombre) {
            return Err(AppError::Conflict("Esa categoria ya existe".to_string()));
        }
        let category = Category {
            id: tables.next_id(),
            nombre: nombre.to_string(),
        };
        tables.categories.push(category.clone());
        Ok(category)
    }

    async fn update(&self, id: i32, nombre: &str) -> AppResult<Option<Category>> {
        let mut tables = self.tables.lock().unwrap();
        Ok(tables.categories.iter_mut().find(|c| c.id == id).map(|c| {
            c.nombre = nombre.to_string();
            c.clone()
        }))
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let mut tables = self.tables.lock().unwrap();
        if tables.books.iter().any(|b| b.categoria_id == id) {
            return Err(AppError::Conflict(
                "La categoria tiene libros asociados. NO se puede ELIMINAR.".to_string(),
            ));
        }
        let before = tables.categories.len();
        tables.categories.retain(|c| c.id != id);
        Ok(tables.categories.len() < before)
    }
}

#[async_trait]
impl PersonsRepository for MemoryStore {
    async fn list(&self) -> AppResult<Vec<Person>> {
        Ok(self.tables.lock().unwrap().persons.clone())
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Person>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.persons.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Person>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.persons.iter().find(|p| p.email == email).cloned())
    }

    async fn create(&self, person: &NewPerson) -> AppResult<Person> {
        let mut tables = self.tables.lock().unwrap();
        let person = Person {
            id: tables.next_id(),
            nombre: person.nombre.clone(),
            apellido: person.apellido.clone(),
            alias: person.alias.clone(),
            email: person.email.clone(),
        };
        tables.persons.push(person.clone());
        Ok(person)
    }

    async fn update(&self, id: i32, names: &PersonNames) -> AppResult<Option<Person>> {
        let mut tables = self.tables.lock().unwrap();
        Ok(tables.persons.iter_mut().find(|p| p.id == id).map(|p| {
            p.nombre = names.nombre.clone();
            p.apellido = names.apellido.clone();
            p.alias = names.alias.clone();
            p.clone()
        }))
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.persons.len();
        tables.persons.retain(|p| p.id != id);
        Ok(tables.persons.len() < before)
    }
}

#[async_trait]
impl BooksRepository for MemoryStore {
    async fn list(&self) -> AppResult<Vec<Book>> {
        Ok(self.tables.lock().unwrap().books.clone())
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        Ok(self.book(id))
    }

    async fn find_by_name(&self, nombre: &str) -> AppResult<Option<Book>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.books.iter().find(|b| b.nombre == nombre).cloned())
    }

    async fn create(&self, book: &NewBook) -> AppResult<Book> {
        let mut tables = self.tables.lock().unwrap();
        let book = Book {
            id: tables.next_id(),
            nombre: book.nombre.clone(),
            descripcion: book.descripcion.clone(),
            categoria_id: book.categoria_id,
            persona_id: book.persona_id,
        };
        tables.books.push(book.clone());
        Ok(book)
    }

    async fn update_description(&self, id: i32, descripcion: &str) -> AppResult<Option<Book>> {
        let mut tables = self.tables.lock().unwrap();
        Ok(tables.books.iter_mut().find(|b| b.id == id).map(|b| {
            b.descripcion = descripcion.to_string();
            b.clone()
        }))
    }

    async fn count_by_category(&self, categoria_id: i32) -> AppResult<i64> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.books.iter().filter(|b| b.categoria_id == categoria_id).count() as i64)
    }

    async fn count_by_holder(&self, persona_id: i32) -> AppResult<i64> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.books.iter().filter(|b| b.persona_id == Some(persona_id)).count() as i64)
    }

    async fn lend(&self, id: i32, persona_id: i32) -> AppResult<bool> {
        let mut tables = self.tables.lock().unwrap();
        match tables.books.iter_mut().find(|b| b.id == id && b.persona_id.is_none()) {
            Some(book) => {
                book.persona_id = Some(persona_id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn give_back(&self, id: i32) -> AppResult<bool> {
        let mut tables = self.tables.lock().unwrap();
        match tables.books.iter_mut().find(|b| b.id == id && b.persona_id.is_some()) {
            Some(book) => {
                book.persona_id = None;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_in_stock(&self, id: i32) -> AppResult<bool> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.books.len();
        tables.books.retain(|b| b.id != id || b.persona_id.is_some());
        Ok(tables.books.len() < before)
    }
}

#[async_trait]
impl HealthRepository for MemoryStore {
    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

/// Router wired to a fresh in-memory store
pub struct TestApp {
    pub router: Router,
    pub store: MemoryStore,
}

impl TestApp {
    pub fn new() -> Self {
        let store = MemoryStore::default();
        let repository = Repository::from_stores(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store.clone()),
        );
        let state = AppState {
            services: Arc::new(Services::new(repository)),
        };

        Self {
            router: create_router(state),
            store,
        }
    }

    /// Send a request and return the status and decoded JSON body
    pub async fn send(&self, method: Method, path: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(path);
        let request = match body {
            Some(json) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&json).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.dispatch(request).await
    }

    async fn dispatch(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, value)
    }

    /// Send a raw body with an optional Content-Type header
    pub async fn send_raw(
        &self,
        method: Method,
        path: &str,
        body: &str,
        content_type: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(content_type) = content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        let request = builder.body(Body::from(body.to_string())).unwrap();
        self.dispatch(request).await
    }

    pub async fn get(&self, path: &str) -> (StatusCode, Value) {
        self.send(Method::GET, path, None).await
    }

    pub async fn post(&self, path: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, path, Some(body)).await
    }

    pub async fn put(&self, path: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, path, None).await
    }

    /// Create a category and return its id
    pub async fn category(&self, nombre: &str) -> i32 {
        let (status, _) = self.post("/api/categorias", serde_json::json!({ "nombre": nombre })).await;
        assert_eq!(status, StatusCode::OK);
        let (_, list) = self.get("/api/categorias").await;
        list.as_array()
            .unwrap()
            .iter()
            .find(|c| c["nombre"] == nombre.trim().to_uppercase())
            .and_then(|c| c["id"].as_i64())
            .unwrap() as i32
    }

    /// Create a person and return its id
    pub async fn person(&self, nombre: &str, email: &str) -> i32 {
        let (status, body) = self
            .post(
                "/api/personas",
                serde_json::json!({
                    "nombre": nombre,
                    "apellido": "Tester",
                    "alias": nombre,
                    "email": email,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        body["id"].as_i64().unwrap() as i32
    }

    /// Create a book and return its id
    pub async fn book(&self, nombre: &str, categoria_id: i32) -> i32 {
        let (status, body) = self
            .post(
                "/api/libros",
                serde_json::json!({
                    "nombre": nombre,
                    "descripcion": "sin descripcion",
                    "categoria_id": categoria_id,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        body[0]["id"].as_i64().unwrap() as i32
    }
}
