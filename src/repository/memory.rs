//! In-process catalog store

use std::sync::Arc;

use async_trait::async_trait;
use indexmap::IndexMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::CatalogStore;
use crate::{
    error::AppResult,
    models::{Author, Book, BookInstance, BookInstanceStatus, Genre},
};

#[derive(Default)]
struct Collections {
    authors: IndexMap<Uuid, Author>,
    genres: IndexMap<Uuid, Genre>,
    books: IndexMap<Uuid, Book>,
    book_instances: IndexMap<Uuid, BookInstance>,
}

/// Catalog store kept in memory, in insertion order
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Collections>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Replace an existing record, returning the stored copy
fn replace<T: Clone>(map: &mut IndexMap<Uuid, T>, id: Uuid, record: &T) -> Option<T> {
    let slot = map.get_mut(&id)?;
    *slot = record.clone();
    Some(slot.clone())
}

fn count<T>(map: &IndexMap<Uuid, T>) -> i64 {
    map.len() as i64
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn authors_list(&self) -> AppResult<Vec<Author>> {
        let data = self.inner.read().await;
        let mut authors: Vec<Author> = data.authors.values().cloned().collect();
        authors.sort_by(|a, b| a.family_name.cmp(&b.family_name));
        Ok(authors)
    }

    async fn authors_get(&self, id: Uuid) -> AppResult<Option<Author>> {
        Ok(self.inner.read().await.authors.get(&id).cloned())
    }

    async fn authors_create(&self, author: &Author) -> AppResult<Author> {
        self.inner
            .write()
            .await
            .authors
            .insert(author.id, author.clone());
        Ok(author.clone())
    }

    async fn authors_update(&self, author: &Author) -> AppResult<Option<Author>> {
        Ok(replace(&mut self.inner.write().await.authors, author.id, author))
    }

    async fn authors_delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.inner.write().await.authors.shift_remove(&id).is_some())
    }

    async fn authors_count(&self) -> AppResult<i64> {
        Ok(count(&self.inner.read().await.authors))
    }

    async fn genres_list(&self) -> AppResult<Vec<Genre>> {
        let data = self.inner.read().await;
        let mut genres: Vec<Genre> = data.genres.values().cloned().collect();
        genres.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(genres)
    }

    async fn genres_get(&self, id: Uuid) -> AppResult<Option<Genre>> {
        Ok(self.inner.read().await.genres.get(&id).cloned())
    }

    async fn genres_find_by_name(&self, name: &str) -> AppResult<Option<Genre>> {
        let data = self.inner.read().await;
        Ok(data.genres.values().find(|g| g.name == name).cloned())
    }

    async fn genres_create(&self, genre: &Genre) -> AppResult<Genre> {
        self.inner
            .write()
            .await
            .genres
            .insert(genre.id, genre.clone());
        Ok(genre.clone())
    }

    async fn genres_update(&self, genre: &Genre) -> AppResult<Option<Genre>> {
        Ok(replace(&mut self.inner.write().await.genres, genre.id, genre))
    }

    async fn genres_delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.inner.write().await.genres.shift_remove(&id).is_some())
    }

    async fn genres_count(&self) -> AppResult<i64> {
        Ok(count(&self.inner.read().await.genres))
    }

    async fn books_list(&self) -> AppResult<Vec<Book>> {
        let data = self.inner.read().await;
        let mut books: Vec<Book> = data.books.values().cloned().collect();
        books.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(books)
    }

    async fn books_get(&self, id: Uuid) -> AppResult<Option<Book>> {
        Ok(self.inner.read().await.books.get(&id).cloned())
    }

    async fn books_by_author(&self, author_id: Uuid) -> AppResult<Vec<Book>> {
        let data = self.inner.read().await;
        Ok(data
            .books
            .values()
            .filter(|b| b.author == author_id)
            .cloned()
            .collect())
    }

    async fn books_by_genre(&self, genre_id: Uuid) -> AppResult<Vec<Book>> {
        let data = self.inner.read().await;
        Ok(data
            .books
            .values()
            .filter(|b| b.genre.contains(&genre_id))
            .cloned()
            .collect())
    }

    async fn books_create(&self, book: &Book) -> AppResult<Book> {
        self.inner.write().await.books.insert(book.id, book.clone());
        Ok(book.clone())
    }

    async fn books_update(&self, book: &Book) -> AppResult<Option<Book>> {
        Ok(replace(&mut self.inner.write().await.books, book.id, book))
    }

    async fn books_delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.inner.write().await.books.shift_remove(&id).is_some())
    }

    async fn books_count(&self) -> AppResult<i64> {
        Ok(count(&self.inner.read().await.books))
    }

    async fn book_instances_list(&self) -> AppResult<Vec<BookInstance>> {
        Ok(self
            .inner
            .read()
            .await
            .book_instances
            .values()
            .cloned()
            .collect())
    }

    async fn book_instances_get(&self, id: Uuid) -> AppResult<Option<BookInstance>> {
        Ok(self.inner.read().await.book_instances.get(&id).cloned())
    }

    async fn book_instances_by_book(&self, book_id: Uuid) -> AppResult<Vec<BookInstance>> {
        let data = self.inner.read().await;
        Ok(data
            .book_instances
            .values()
            .filter(|i| i.book == book_id)
            .cloned()
            .collect())
    }

    async fn book_instances_create(&self, instance: &BookInstance) -> AppResult<BookInstance> {
        self.inner
            .write()
            .await
            .book_instances
            .insert(instance.id, instance.clone());
        Ok(instance.clone())
    }

    async fn book_instances_update(&self, instance: &BookInstance) -> AppResult<Option<BookInstance>> {
        Ok(replace(
            &mut self.inner.write().await.book_instances,
            instance.id,
            instance,
        ))
    }

    async fn book_instances_delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self
            .inner
            .write()
            .await
            .book_instances
            .shift_remove(&id)
            .is_some())
    }

    async fn book_instances_count(&self) -> AppResult<i64> {
        Ok(count(&self.inner.read().await.book_instances))
    }

    async fn book_instances_count_by_status(&self, status: BookInstanceStatus) -> AppResult<i64> {
        let data = self.inner.read().await;
        Ok(data
            .book_instances
            .values()
            .filter(|i| i.status == status)
            .count() as i64)
    }
}
