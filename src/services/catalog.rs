//! Catalog home: record counts across all collections

use crate::{
    error::AppResult,
    models::BookInstanceStatus,
    repository::Repository,
    views::{
        catalog::{IndexPage, INDEX},
        Page,
    },
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Round trip to the store, for readiness probes
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.genres_count().await?;
        Ok(())
    }

    pub async fn index(&self) -> AppResult<Page> {
        let (books, instances, available, authors, genres) = tokio::try_join!(
            self.repository.books_count(),
            self.repository.book_instances_count(),
            self.repository
                .book_instances_count_by_status(BookInstanceStatus::Available),
            self.repository.authors_count(),
            self.repository.genres_count(),
        )?;
        tracing::debug!("Catalog counts: {} books, {} copies", books, instances);

        Page::render(
            INDEX,
            &IndexPage {
                title: "Local Library Home".to_string(),
                book_count: books,
                book_instance_count: instances,
                book_instance_available_count: available,
                author_count: authors,
                genre_count: genres,
            },
        )
    }
}
