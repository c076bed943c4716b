//! Authors repository for PostgreSQL

use async_trait::async_trait;
use sqlx::{FromRow, Pool, Postgres};

use super::AuthorStore;
use crate::{
    error::{AppError, AppResult},
    models::Author,
};

#[derive(Debug, FromRow)]
struct AuthorRow {
    id: i64,
    name: String,
}

impl From<AuthorRow> for Author {
    fn from(row: AuthorRow) -> Self {
        Author {
            id: Some(row.id),
            name: row.name,
        }
    }
}

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Postgres>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthorStore for AuthorsRepository {
    async fn find_all(&self) -> AppResult<Vec<Author>> {
        let rows = sqlx::query_as::<_, AuthorRow>("SELECT id, name FROM authors ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Author::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Author>> {
        let row = sqlx::query_as::<_, AuthorRow>("SELECT id, name FROM authors WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Author::from))
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Author>> {
        let row = sqlx::query_as::<_, AuthorRow>(
            "SELECT id, name FROM authors WHERE name = $1 ORDER BY id LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Author::from))
    }

    async fn save(&self, author: Author) -> AppResult<Author> {
        let row = match author.id {
            None => {
                sqlx::query_as::<_, AuthorRow>(
                    "INSERT INTO authors (name) VALUES ($1) RETURNING id, name",
                )
                .bind(&author.name)
                .fetch_one(&self.pool)
                .await?
            }
            Some(id) => sqlx::query_as::<_, AuthorRow>(
                "UPDATE authors SET name = $1 WHERE id = $2 RETURNING id, name",
            )
            .bind(&author.name)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::AuthorNotFound(format!("Author {} not found", id)))?,
        };
        Ok(row.into())
    }

    async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
