//! Startup fixture loader
//!
//! Fills an empty catalog with a fixed set of Bulgarian authors and their
//! books. Every book gets a random UUID as a placeholder ISBN.

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Author, Book},
    repository::{AuthorStore, BookStore, Repository},
};

/// Authors with their titles, inserted in this order
const SEED_CATALOG: &[(&str, &[&str])] = &[
    (
        "Йордан Йовков",
        &["Старопланински легенди", "Чифликът край границата"],
    ),
    ("Николай Хайтов", &["Диви Разкази"]),
    ("Димитър Димов", &["Тютюн"]),
    (
        "Елин Пелин",
        &["Пижо и Пендо", "Ян Бибиян на луната", "Под манастирската лоза"],
    ),
    (
        "Иван Вазов",
        &["Пряпорец и Гусла", "Под Игото", "Тъгите на България"],
    ),
];

#[derive(Clone)]
pub struct SeedLoader {
    authors: Arc<dyn AuthorStore>,
    books: Arc<dyn BookStore>,
}

impl SeedLoader {
    pub fn new(repository: Repository) -> Self {
        Self {
            authors: repository.authors,
            books: repository.books,
        }
    }

    /// Insert the fixture catalog when both stores are empty.
    /// Returns whether anything was inserted.
    pub async fn load_if_empty(&self) -> AppResult<bool> {
        let books = self.books.count().await?;
        let authors = self.authors.count().await?;
        if books != 0 || authors != 0 {
            tracing::info!(
                "Catalog already populated ({} authors, {} books), skipping seed",
                authors,
                books
            );
            return Ok(false);
        }

        let mut inserted = 0;
        for (name, titles) in SEED_CATALOG {
            inserted += self.load_author(name, titles).await?;
        }

        tracing::info!(
            "Seeded catalog with {} authors and {} books",
            SEED_CATALOG.len(),
            inserted
        );
        Ok(true)
    }

    async fn load_author(&self, name: &str, titles: &[&str]) -> AppResult<usize> {
        let author = self.authors.save(Author::new(name)).await?;

        let books = titles
            .iter()
            .map(|title| Book::new(*title, Uuid::new_v4().to_string(), author.clone()))
            .collect();

        let saved = self.books.save_all(books).await?;
        Ok(saved.len())
    }
}
