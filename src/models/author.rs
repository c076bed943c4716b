//! Author model and its transfer representation

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Persisted author. `id` is `None` until the store assigns one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: Option<i64>,
    pub name: String,
}

impl Author {
    /// New, not yet persisted author
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }
}

/// Author as seen on the wire: the name only, never the books
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AuthorDto {
    /// Author name, matched exactly when resolving authors
    pub name: String,
}

impl From<&Author> for AuthorDto {
    fn from(author: &Author) -> Self {
        Self {
            name: author.name.clone(),
        }
    }
}

impl From<AuthorDto> for Author {
    fn from(dto: AuthorDto) -> Self {
        Author::new(dto.name)
    }
}
