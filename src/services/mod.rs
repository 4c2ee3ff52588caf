//! Catalog controllers: one service per entity.
//!
//! Each operation fetches what it needs from the store (joining independent
//! reads with `tokio::try_join!`), validates submissions, and answers with a
//! [`Page`](crate::views::Page): a rendered view or a redirect.

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod catalog;
pub mod genres;

use uuid::Uuid;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub authors: authors::AuthorsService,
    pub genres: genres::GenresService,
    pub books: books::BooksService,
    pub book_instances: book_instances::BookInstancesService,
}

impl Services {
    /// Create all services over the given store
    pub fn new(repository: Repository) -> Self {
        Self {
            catalog: catalog::CatalogService::new(repository.clone()),
            authors: authors::AuthorsService::new(repository.clone()),
            genres: genres::GenresService::new(repository.clone()),
            books: books::BooksService::new(repository.clone()),
            book_instances: book_instances::BookInstancesService::new(repository),
        }
    }
}

/// Record targeted by a delete confirmation: the id posted in the body,
/// falling back to the path id when it is absent or unparseable.
pub(crate) fn delete_target(body_id: Option<&str>, path_id: Uuid) -> Uuid {
    body_id
        .and_then(|id| Uuid::parse_str(id.trim()).ok())
        .unwrap_or(path_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_target() {
        let path = Uuid::new_v4();
        let body = Uuid::new_v4();
        assert_eq!(delete_target(Some(&body.to_string()), path), body);
        assert_eq!(delete_target(Some("garbage"), path), path);
        assert_eq!(delete_target(None, path), path);
    }
}
