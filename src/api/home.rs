//! Server-rendered home page
//!
//! The page is a small client for the books API: rows come pre-rendered,
//! and `/static/js/app.js` drives the form and the Edit/Delete buttons.

use axum::extract::State;
use maud::{html, Markup, DOCTYPE};

use crate::{error::AppResult, models::BookDto};

/// Render the list of all books with the add/edit form
pub async fn index(State(state): State<crate::AppState>) -> AppResult<Markup> {
    let books = state.services.books.get_all_books().await?;
    Ok(render_books(&books))
}

fn render_form() -> Markup {
    html! {
        form id="bookForm" {
            input type="hidden" id="bookId" name="bookId";
            label for="title" { "Title" }
            input type="text" id="title" name="title" required;
            label for="author" { "Author" }
            input type="text" id="author" name="author" required;
            label for="isbn" { "ISBN" }
            input type="text" id="isbn" name="isbn" required;
            button type="submit" { "Save" }
            button type="reset" id="resetForm" { "Clear" }
        }
    }
}

fn render_row(book: &BookDto) -> Markup {
    let id = book.id.map(|id| id.to_string()).unwrap_or_default();
    html! {
        tr {
            td { (book.title) }
            td { (book.author.name) }
            td { (book.isbn) }
            td {
                button type="button" data-action="edit" data-id=(id) { "Edit" }
                button type="button" data-action="delete" data-id=(id) { "Delete" }
            }
        }
    }
}

fn render_books(books: &[BookDto]) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                title { "Bookshelf" }
            }
            body {
                h1 { "Books" }
                (render_form())
                button type="button" id="reloadBooks" { "Reload" }
                table {
                    thead {
                        tr { th { "Title" } th { "Author" } th { "ISBN" } th { "Actions" } }
                    }
                    tbody id="books-container" {
                        @if books.is_empty() {
                            tr { td colspan="4" { "The catalog is empty." } }
                        }
                        @for book in books {
                            (render_row(book))
                        }
                    }
                }
                script src="/static/js/app.js" {}
            }
        }
    }
}
