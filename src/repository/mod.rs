//! Repository layer: the catalog document store.
//!
//! Lookups that find nothing return `Ok(None)` (or `false` for deletes);
//! errors are reserved for store failures.

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Author, Book, BookInstance, BookInstanceStatus, Genre},
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Document-store operations over the four catalog collections
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    // Authors

    /// All authors, sorted by family name
    async fn authors_list(&self) -> AppResult<Vec<Author>>;
    async fn authors_get(&self, id: Uuid) -> AppResult<Option<Author>>;
    async fn authors_create(&self, author: &Author) -> AppResult<Author>;
    async fn authors_update(&self, author: &Author) -> AppResult<Option<Author>>;
    async fn authors_delete(&self, id: Uuid) -> AppResult<bool>;
    async fn authors_count(&self) -> AppResult<i64>;

    // Genres

    /// All genres, sorted by name
    async fn genres_list(&self) -> AppResult<Vec<Genre>>;
    async fn genres_get(&self, id: Uuid) -> AppResult<Option<Genre>>;
    async fn genres_find_by_name(&self, name: &str) -> AppResult<Option<Genre>>;
    async fn genres_create(&self, genre: &Genre) -> AppResult<Genre>;
    async fn genres_update(&self, genre: &Genre) -> AppResult<Option<Genre>>;
    async fn genres_delete(&self, id: Uuid) -> AppResult<bool>;
    async fn genres_count(&self) -> AppResult<i64>;

    // Books

    /// All books, sorted by title
    async fn books_list(&self) -> AppResult<Vec<Book>>;
    async fn books_get(&self, id: Uuid) -> AppResult<Option<Book>>;
    async fn books_by_author(&self, author_id: Uuid) -> AppResult<Vec<Book>>;
    async fn books_by_genre(&self, genre_id: Uuid) -> AppResult<Vec<Book>>;
    async fn books_create(&self, book: &Book) -> AppResult<Book>;
    async fn books_update(&self, book: &Book) -> AppResult<Option<Book>>;
    async fn books_delete(&self, id: Uuid) -> AppResult<bool>;
    async fn books_count(&self) -> AppResult<i64>;

    // Book instances

    /// All copies, in insertion order
    async fn book_instances_list(&self) -> AppResult<Vec<BookInstance>>;
    async fn book_instances_get(&self, id: Uuid) -> AppResult<Option<BookInstance>>;
    async fn book_instances_by_book(&self, book_id: Uuid) -> AppResult<Vec<BookInstance>>;
    async fn book_instances_create(&self, instance: &BookInstance) -> AppResult<BookInstance>;
    async fn book_instances_update(&self, instance: &BookInstance) -> AppResult<Option<BookInstance>>;
    async fn book_instances_delete(&self, id: Uuid) -> AppResult<bool>;
    async fn book_instances_count(&self) -> AppResult<i64>;
    async fn book_instances_count_by_status(&self, status: BookInstanceStatus) -> AppResult<i64>;
}

/// Shared store handle injected into every service
pub type Repository = Arc<dyn CatalogStore>;
