//! In-process store implementing both author and book contracts.
//!
//! Tables are keyed by id in `BTreeMap`s so iteration follows insertion
//! order, the same natural order the PostgreSQL queries use.

use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{AuthorStore, BookStore};
use crate::{
    error::{AppError, AppResult},
    models::{Author, Book},
};

#[derive(Debug)]
struct BookRecord {
    title: String,
    isbn: String,
    author_id: i64,
}

#[derive(Debug, Default)]
struct Tables {
    authors: BTreeMap<i64, String>,
    books: BTreeMap<i64, BookRecord>,
    last_author_id: i64,
    last_book_id: i64,
}

impl Tables {
    fn author(&self, id: i64) -> Option<Author> {
        self.authors.get(&id).map(|name| Author {
            id: Some(id),
            name: name.clone(),
        })
    }

    fn book(&self, id: i64) -> AppResult<Option<Book>> {
        let Some(record) = self.books.get(&id) else {
            return Ok(None);
        };
        let author = self.author(record.author_id).ok_or_else(|| {
            AppError::Internal(format!("Book {} references missing author {}", id, record.author_id))
        })?;
        Ok(Some(Book {
            id: Some(id),
            title: record.title.clone(),
            isbn: record.isbn.clone(),
            author,
        }))
    }

    /// Foreign-key and existence checks, returning the author id to store
    fn check_book(&self, book: &Book) -> AppResult<i64> {
        let author_id = match book.author.id {
            Some(id) if self.authors.contains_key(&id) => id,
            Some(id) => return Err(AppError::Internal(format!("Author {} does not exist", id))),
            None => {
                return Err(AppError::Internal(format!(
                    "Author '{}' is not persisted",
                    book.author.name
                )))
            }
        };

        match book.id {
            Some(id) if !self.books.contains_key(&id) => {
                Err(AppError::NotFound(format!("Book {} not found", id)))
            }
            _ => Ok(author_id),
        }
    }

    /// Write a book that already passed `check_book`
    fn insert_book(&mut self, mut book: Book, author_id: i64) -> Book {
        let id = match book.id {
            Some(id) => id,
            None => {
                self.last_book_id += 1;
                self.last_book_id
            }
        };

        self.books.insert(
            id,
            BookRecord {
                title: book.title.clone(),
                isbn: book.isbn.clone(),
                author_id,
            },
        );
        book.id = Some(id);
        book
    }
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

#[async_trait]
impl AuthorStore for MemoryStore {
    async fn find_all(&self) -> AppResult<Vec<Author>> {
        let tables = self.tables.read().await;
        Ok(tables
            .authors
            .iter()
            .map(|(id, name)| Author {
                id: Some(*id),
                name: name.clone(),
            })
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Author>> {
        Ok(self.tables.read().await.author(id))
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Author>> {
        let tables = self.tables.read().await;
        Ok(tables
            .authors
            .iter()
            .find(|(_, existing)| existing.as_str() == name)
            .map(|(id, existing)| Author {
                id: Some(*id),
                name: existing.clone(),
            }))
    }

    async fn save(&self, mut author: Author) -> AppResult<Author> {
        let mut tables = self.tables.write().await;
        let id = match author.id {
            Some(id) if tables.authors.contains_key(&id) => id,
            Some(id) => return Err(AppError::AuthorNotFound(format!("Author {} not found", id))),
            None => {
                tables.last_author_id += 1;
                tables.last_author_id
            }
        };
        tables.authors.insert(id, author.name.clone());
        author.id = Some(id);
        Ok(author)
    }

    async fn count(&self) -> AppResult<i64> {
        Ok(self.tables.read().await.authors.len() as i64)
    }
}

#[async_trait]
impl BookStore for MemoryStore {
    async fn find_all(&self) -> AppResult<Vec<Book>> {
        let tables = self.tables.read().await;
        let mut books = Vec::with_capacity(tables.books.len());
        for id in tables.books.keys() {
            if let Some(book) = tables.book(*id)? {
                books.push(book);
            }
        }
        Ok(books)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Book>> {
        self.tables.read().await.book(id)
    }

    async fn save(&self, book: Book) -> AppResult<Book> {
        let mut tables = self.tables.write().await;
        let author_id = tables.check_book(&book)?;
        Ok(tables.insert_book(book, author_id))
    }

    /// All or nothing: every book is checked before any is written.
    async fn save_all(&self, books: Vec<Book>) -> AppResult<Vec<Book>> {
        let mut tables = self.tables.write().await;
        let author_ids = books
            .iter()
            .map(|book| tables.check_book(book))
            .collect::<AppResult<Vec<_>>>()?;

        Ok(books
            .into_iter()
            .zip(author_ids)
            .map(|(book, author_id)| tables.insert_book(book, author_id))
            .collect())
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        self.tables.write().await.books.remove(&id);
        Ok(())
    }

    async fn count(&self) -> AppResult<i64> {
        Ok(self.tables.read().await.books.len() as i64)
    }
}
