//! Business logic services

pub mod books;
pub mod seed;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub books: books::BookService,
    pub seed: seed::SeedLoader,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            books: books::BookService::new(repository.clone()),
            seed: seed::SeedLoader::new(repository),
        }
    }
}
