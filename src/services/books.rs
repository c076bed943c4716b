//! Book catalog service

use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{Author, Book, BookDto},
    repository::{AuthorStore, BookStore, Repository},
};

#[derive(Clone)]
pub struct BookService {
    authors: Arc<dyn AuthorStore>,
    books: Arc<dyn BookStore>,
}

impl BookService {
    pub fn new(repository: Repository) -> Self {
        Self {
            authors: repository.authors,
            books: repository.books,
        }
    }

    /// All books, in storage order
    pub async fn get_all_books(&self) -> AppResult<Vec<BookDto>> {
        let books = self.books.find_all().await?;
        Ok(books.into_iter().map(BookDto::from).collect())
    }

    pub async fn find_book_by_id(&self, id: i64) -> AppResult<Option<BookDto>> {
        let book = self.books.find_by_id(id).await?;
        Ok(book.map(BookDto::from))
    }

    /// Create a book, creating its author first when the name is unknown.
    /// Any id in the input is ignored.
    pub async fn create_book(&self, dto: BookDto) -> AppResult<BookDto> {
        let author = self.find_or_create_author(&dto.author.name).await?;
        let book = Book {
            id: None,
            author,
            ..Book::from(dto)
        };

        let saved = self.books.save(book).await?;
        tracing::debug!("Created book id={:?}", saved.id);
        Ok(saved.into())
    }

    /// Overwrite title, ISBN and author of an existing book.
    /// Returns `None` without creating anything when `id` is unknown.
    pub async fn update_book(&self, id: i64, dto: BookDto) -> AppResult<Option<BookDto>> {
        let Some(mut book) = self.books.find_by_id(id).await? else {
            return Ok(None);
        };

        book.title = dto.title;
        book.isbn = dto.isbn;
        book.author = self.find_or_create_author(&dto.author.name).await?;

        let saved = self.books.save(book).await?;
        tracing::debug!("Updated book id={}", id);
        Ok(Some(saved.into()))
    }

    pub async fn delete_book_by_id(&self, id: i64) -> AppResult<()> {
        tracing::debug!("Deleting book id={}", id);
        self.books.delete_by_id(id).await
    }

    pub async fn count_books(&self) -> AppResult<i64> {
        self.books.count().await
    }

    // Read-then-write: two concurrent calls for a new name may both insert.
    async fn find_or_create_author(&self, name: &str) -> AppResult<Author> {
        if let Some(author) = self.authors.find_by_name(name).await? {
            return Ok(author);
        }
        let author = self.authors.save(Author::new(name)).await?;
        tracing::info!("Created author '{}' id={:?}", author.name, author.id);
        Ok(author)
    }
}
