//! Books repository for PostgreSQL

use async_trait::async_trait;
use sqlx::{postgres::PgExecutor, Pool, Postgres};

use super::BookStore;
use crate::{
    error::{AppError, AppResult},
    models::{book::BookRow, Book},
};

const SELECT_BOOKS: &str = r#"
    SELECT b.id, b.title, b.isbn, a.id AS author_id, a.name AS author_name
    FROM books b
    JOIN authors a ON a.id = b.author_id
"#;

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

/// Insert or update one book row, returning its id
async fn write_book<'e, E>(executor: E, book: &Book) -> AppResult<i64>
where
    E: PgExecutor<'e>,
{
    let author_id = book.author.id.ok_or_else(|| {
        AppError::Internal(format!("Author '{}' is not persisted", book.author.name))
    })?;

    match book.id {
        None => {
            let id: i64 = sqlx::query_scalar(
                "INSERT INTO books (title, isbn, author_id) VALUES ($1, $2, $3) RETURNING id",
            )
            .bind(&book.title)
            .bind(&book.isbn)
            .bind(author_id)
            .fetch_one(executor)
            .await?;
            Ok(id)
        }
        Some(id) => sqlx::query_scalar(
            "UPDATE books SET title = $1, isbn = $2, author_id = $3 WHERE id = $4 RETURNING id",
        )
        .bind(&book.title)
        .bind(&book.isbn)
        .bind(author_id)
        .bind(id)
        .fetch_optional(executor)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id))),
    }
}

#[async_trait]
impl BookStore for BooksRepository {
    async fn find_all(&self) -> AppResult<Vec<Book>> {
        let query = format!("{} ORDER BY b.id", SELECT_BOOKS);
        let rows = sqlx::query_as::<_, BookRow>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Book>> {
        let query = format!("{} WHERE b.id = $1", SELECT_BOOKS);
        let row = sqlx::query_as::<_, BookRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Book::from))
    }

    async fn save(&self, mut book: Book) -> AppResult<Book> {
        let id = write_book(&self.pool, &book).await?;
        book.id = Some(id);
        Ok(book)
    }

    async fn save_all(&self, books: Vec<Book>) -> AppResult<Vec<Book>> {
        let mut tx = self.pool.begin().await?;
        let mut saved = Vec::with_capacity(books.len());
        for mut book in books {
            let id = write_book(&mut *tx, &book).await?;
            book.id = Some(id);
            saved.push(book);
        }
        tx.commit().await?;
        Ok(saved)
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            tracing::debug!("Delete of book {} matched no row", id);
        }
        Ok(())
    }

    async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
