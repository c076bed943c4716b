//! Data models for the bookshelf catalog

pub mod author;
pub mod book;

// Re-export commonly used types
pub use author::{Author, AuthorDto};
pub use book::{Book, BookDto};
