//! Book endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::{AppError, AppResult},
    models::BookDto,
};

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Book {} not found", id))
}

/// List all books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "All books", body = Vec<BookDto>)
    )
)]
pub async fn list_books(State(state): State<crate::AppState>) -> AppResult<Json<Vec<BookDto>>> {
    let books = state.services.books.get_all_books().await?;
    Ok(Json(books))
}

/// Get a book by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = BookDto),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<BookDto>> {
    state
        .services
        .books
        .find_book_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

/// Create a book, creating the author if the name is unknown
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = BookDto,
    responses(
        (status = 201, description = "Book created", body = BookDto)
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    Json(data): Json<BookDto>,
) -> AppResult<(StatusCode, Json<BookDto>)> {
    let book = state.services.books.create_book(data).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// Update a book
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book ID")),
    request_body = BookDto,
    responses(
        (status = 200, description = "Book updated", body = BookDto),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
    Json(data): Json<BookDto>,
) -> AppResult<Json<BookDto>> {
    state
        .services
        .books
        .update_book(id, data)
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

/// Delete a book. Succeeds whether or not the book existed.
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i64, Path, description = "Book ID")),
    responses(
        (status = 204, description = "Book deleted")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state.services.books.delete_book_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
