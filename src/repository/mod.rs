//! Repository layer for database operations
//!
//! Services talk to the stores through [`AuthorStore`] and [`BookStore`];
//! `save` inserts entities without an id and updates the others.

pub mod authors;
pub mod books;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{Author, Book},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthorStore: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<Author>>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Author>>;

    /// Exact, case-sensitive match. The lowest id wins on duplicates.
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Author>>;

    async fn save(&self, author: Author) -> AppResult<Author>;

    async fn count(&self) -> AppResult<i64>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<Book>>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Book>>;

    /// The book's author must already be persisted.
    async fn save(&self, book: Book) -> AppResult<Book>;

    async fn save_all(&self, books: Vec<Book>) -> AppResult<Vec<Book>>;

    /// Deleting an absent id is not an error.
    async fn delete_by_id(&self, id: i64) -> AppResult<()>;

    async fn count(&self) -> AppResult<i64>;
}

/// Main repository struct holding the store handles
#[derive(Clone)]
pub struct Repository {
    pub authors: Arc<dyn AuthorStore>,
    pub books: Arc<dyn BookStore>,
}

impl Repository {
    /// Create a PostgreSQL-backed repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            authors: Arc::new(authors::AuthorsRepository::new(pool.clone())),
            books: Arc::new(books::BooksRepository::new(pool)),
        }
    }

    /// Create a repository backed by process memory
    pub fn in_memory() -> Self {
        let store = memory::MemoryStore::default();
        Self {
            authors: Arc::new(store.clone()),
            books: Arc::new(store),
        }
    }

    pub fn from_stores(authors: Arc<dyn AuthorStore>, books: Arc<dyn BookStore>) -> Self {
        Self { authors, books }
    }
}
