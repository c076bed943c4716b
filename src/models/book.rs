//! Book model and its transfer representation

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::author::{Author, AuthorDto};

/// Persisted book with its author loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: Option<i64>,
    pub title: String,
    pub isbn: String,
    pub author: Author,
}

impl Book {
    pub fn new(title: impl Into<String>, isbn: impl Into<String>, author: Author) -> Self {
        Self {
            id: None,
            title: title.into(),
            isbn: isbn.into(),
            author,
        }
    }
}

/// Row shape of `books JOIN authors`
#[derive(Debug, FromRow)]
pub struct BookRow {
    pub id: i64,
    pub title: String,
    pub isbn: String,
    pub author_id: i64,
    pub author_name: String,
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Self {
            id: Some(row.id),
            title: row.title,
            isbn: row.isbn,
            author: Author {
                id: Some(row.author_id),
                name: row.author_name,
            },
        }
    }
}

/// Book as exchanged with API clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BookDto {
    /// Store-assigned identifier, ignored on input
    #[serde(default)]
    pub id: Option<i64>,
    pub title: String,
    /// Free-form ISBN, not validated
    pub isbn: String,
    pub author: AuthorDto,
}

impl From<&Book> for BookDto {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            isbn: book.isbn.clone(),
            author: AuthorDto::from(&book.author),
        }
    }
}

impl From<Book> for BookDto {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            author: AuthorDto::from(&book.author),
            title: book.title,
            isbn: book.isbn,
        }
    }
}

/// The author comes back unsaved: the DTO never carries author ids.
impl From<BookDto> for Book {
    fn from(dto: BookDto) -> Self {
        Self {
            id: dto.id,
            title: dto.title,
            isbn: dto.isbn,
            author: Author::from(dto.author),
        }
    }
}
