//! PostgreSQL-backed catalog store

use async_trait::async_trait;
use sqlx::{postgres::PgRow, Pool, Postgres, Row};
use uuid::Uuid;

use super::CatalogStore;
use crate::{
    error::AppResult,
    models::{Author, Book, BookInstance, BookInstanceStatus, Genre},
};

const AUTHOR_COLUMNS: &str = "id, first_name, family_name, date_of_birth, date_of_death";
const GENRE_COLUMNS: &str = "id, name";
const BOOK_COLUMNS: &str = "id, title, author, summary, isbn, genre";
const BOOK_INSTANCE_COLUMNS: &str = "id, book, imprint, status, due_back";

fn author_from_row(row: &PgRow) -> Result<Author, sqlx::Error> {
    Ok(Author {
        id: row.try_get("id")?,
        first_name: row.try_get("first_name")?,
        family_name: row.try_get("family_name")?,
        date_of_birth: row.try_get("date_of_birth")?,
        date_of_death: row.try_get("date_of_death")?,
    })
}

fn genre_from_row(row: &PgRow) -> Result<Genre, sqlx::Error> {
    Ok(Genre {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
    })
}

fn book_from_row(row: &PgRow) -> Result<Book, sqlx::Error> {
    Ok(Book {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        author: row.try_get("author")?,
        summary: row.try_get("summary")?,
        isbn: row.try_get("isbn")?,
        genre: row.try_get("genre")?,
    })
}

fn book_instance_from_row(row: &PgRow) -> Result<BookInstance, sqlx::Error> {
    let status: String = row.try_get("status")?;
    Ok(BookInstance {
        id: row.try_get("id")?,
        book: row.try_get("book")?,
        imprint: row.try_get("imprint")?,
        status: status
            .parse::<BookInstanceStatus>()
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?,
        due_back: row.try_get("due_back")?,
    })
}

fn map_rows<T>(rows: &[PgRow], f: fn(&PgRow) -> Result<T, sqlx::Error>) -> AppResult<Vec<T>> {
    Ok(rows.iter().map(f).collect::<Result<Vec<_>, _>>()?)
}

fn map_optional<T>(
    row: Option<PgRow>,
    f: fn(&PgRow) -> Result<T, sqlx::Error>,
) -> AppResult<Option<T>> {
    Ok(row.as_ref().map(f).transpose()?)
}

#[derive(Clone)]
pub struct PgStore {
    pool: Pool<Postgres>,
}

impl PgStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    async fn count(&self, query: &str) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(query).fetch_one(&self.pool).await?;
        Ok(count)
    }

    async fn delete(&self, query: &str, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(query).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl CatalogStore for PgStore {
    // =========================================================================
    // AUTHORS
    // =========================================================================

    async fn authors_list(&self) -> AppResult<Vec<Author>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM authors ORDER BY family_name",
            AUTHOR_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        map_rows(&rows, author_from_row)
    }

    async fn authors_get(&self, id: Uuid) -> AppResult<Option<Author>> {
        let row = sqlx::query(&format!("SELECT {} FROM authors WHERE id = $1", AUTHOR_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        map_optional(row, author_from_row)
    }

    async fn authors_create(&self, author: &Author) -> AppResult<Author> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO authors (id, first_name, family_name, date_of_birth, date_of_death)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            AUTHOR_COLUMNS
        ))
        .bind(author.id)
        .bind(&author.first_name)
        .bind(&author.family_name)
        .bind(author.date_of_birth)
        .bind(author.date_of_death)
        .fetch_one(&self.pool)
        .await?;
        Ok(author_from_row(&row)?)
    }

    async fn authors_update(&self, author: &Author) -> AppResult<Option<Author>> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE authors
            SET first_name = $2, family_name = $3, date_of_birth = $4, date_of_death = $5
            WHERE id = $1
            RETURNING {}
            "#,
            AUTHOR_COLUMNS
        ))
        .bind(author.id)
        .bind(&author.first_name)
        .bind(&author.family_name)
        .bind(author.date_of_birth)
        .bind(author.date_of_death)
        .fetch_optional(&self.pool)
        .await?;
        map_optional(row, author_from_row)
    }

    async fn authors_delete(&self, id: Uuid) -> AppResult<bool> {
        self.delete("DELETE FROM authors WHERE id = $1", id).await
    }

    async fn authors_count(&self) -> AppResult<i64> {
        self.count("SELECT COUNT(*) FROM authors").await
    }

    // =========================================================================
    // GENRES
    // =========================================================================

    async fn genres_list(&self) -> AppResult<Vec<Genre>> {
        let rows = sqlx::query(&format!("SELECT {} FROM genres ORDER BY name", GENRE_COLUMNS))
            .fetch_all(&self.pool)
            .await?;
        map_rows(&rows, genre_from_row)
    }

    async fn genres_get(&self, id: Uuid) -> AppResult<Option<Genre>> {
        let row = sqlx::query(&format!("SELECT {} FROM genres WHERE id = $1", GENRE_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        map_optional(row, genre_from_row)
    }

    async fn genres_find_by_name(&self, name: &str) -> AppResult<Option<Genre>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM genres WHERE name = $1 ORDER BY created_at LIMIT 1",
            GENRE_COLUMNS
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        map_optional(row, genre_from_row)
    }

    async fn genres_create(&self, genre: &Genre) -> AppResult<Genre> {
        let row = sqlx::query(&format!(
            "INSERT INTO genres (id, name) VALUES ($1, $2) RETURNING {}",
            GENRE_COLUMNS
        ))
        .bind(genre.id)
        .bind(&genre.name)
        .fetch_one(&self.pool)
        .await?;
        Ok(genre_from_row(&row)?)
    }

    async fn genres_update(&self, genre: &Genre) -> AppResult<Option<Genre>> {
        let row = sqlx::query(&format!(
            "UPDATE genres SET name = $2 WHERE id = $1 RETURNING {}",
            GENRE_COLUMNS
        ))
        .bind(genre.id)
        .bind(&genre.name)
        .fetch_optional(&self.pool)
        .await?;
        map_optional(row, genre_from_row)
    }

    async fn genres_delete(&self, id: Uuid) -> AppResult<bool> {
        self.delete("DELETE FROM genres WHERE id = $1", id).await
    }

    async fn genres_count(&self) -> AppResult<i64> {
        self.count("SELECT COUNT(*) FROM genres").await
    }

    // =========================================================================
    // BOOKS
    // =========================================================================

    async fn books_list(&self) -> AppResult<Vec<Book>> {
        let rows = sqlx::query(&format!("SELECT {} FROM books ORDER BY title", BOOK_COLUMNS))
            .fetch_all(&self.pool)
            .await?;
        map_rows(&rows, book_from_row)
    }

    async fn books_get(&self, id: Uuid) -> AppResult<Option<Book>> {
        let row = sqlx::query(&format!("SELECT {} FROM books WHERE id = $1", BOOK_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        map_optional(row, book_from_row)
    }

    async fn books_by_author(&self, author_id: Uuid) -> AppResult<Vec<Book>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM books WHERE author = $1 ORDER BY created_at",
            BOOK_COLUMNS
        ))
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;
        map_rows(&rows, book_from_row)
    }

    async fn books_by_genre(&self, genre_id: Uuid) -> AppResult<Vec<Book>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM books WHERE $1 = ANY(genre) ORDER BY created_at",
            BOOK_COLUMNS
        ))
        .bind(genre_id)
        .fetch_all(&self.pool)
        .await?;
        map_rows(&rows, book_from_row)
    }

    async fn books_create(&self, book: &Book) -> AppResult<Book> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO books (id, title, author, summary, isbn, genre)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            BOOK_COLUMNS
        ))
        .bind(book.id)
        .bind(&book.title)
        .bind(book.author)
        .bind(&book.summary)
        .bind(&book.isbn)
        .bind(&book.genre)
        .fetch_one(&self.pool)
        .await?;
        Ok(book_from_row(&row)?)
    }

    async fn books_update(&self, book: &Book) -> AppResult<Option<Book>> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE books
            SET title = $2, author = $3, summary = $4, isbn = $5, genre = $6
            WHERE id = $1
            RETURNING {}
            "#,
            BOOK_COLUMNS
        ))
        .bind(book.id)
        .bind(&book.title)
        .bind(book.author)
        .bind(&book.summary)
        .bind(&book.isbn)
        .bind(&book.genre)
        .fetch_optional(&self.pool)
        .await?;
        map_optional(row, book_from_row)
    }

    async fn books_delete(&self, id: Uuid) -> AppResult<bool> {
        self.delete("DELETE FROM books WHERE id = $1", id).await
    }

    async fn books_count(&self) -> AppResult<i64> {
        self.count("SELECT COUNT(*) FROM books").await
    }

    // =========================================================================
    // BOOK INSTANCES
    // =========================================================================

    async fn book_instances_list(&self) -> AppResult<Vec<BookInstance>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM book_instances ORDER BY created_at",
            BOOK_INSTANCE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        map_rows(&rows, book_instance_from_row)
    }

    async fn book_instances_get(&self, id: Uuid) -> AppResult<Option<BookInstance>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM book_instances WHERE id = $1",
            BOOK_INSTANCE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        map_optional(row, book_instance_from_row)
    }

    async fn book_instances_by_book(&self, book_id: Uuid) -> AppResult<Vec<BookInstance>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM book_instances WHERE book = $1 ORDER BY created_at",
            BOOK_INSTANCE_COLUMNS
        ))
        .bind(book_id)
        .fetch_all(&self.pool)
        .await?;
        map_rows(&rows, book_instance_from_row)
    }

    async fn book_instances_create(&self, instance: &BookInstance) -> AppResult<BookInstance> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO book_instances (id, book, imprint, status, due_back)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            BOOK_INSTANCE_COLUMNS
        ))
        .bind(instance.id)
        .bind(instance.book)
        .bind(&instance.imprint)
        .bind(instance.status.as_str())
        .bind(instance.due_back)
        .fetch_one(&self.pool)
        .await?;
        Ok(book_instance_from_row(&row)?)
    }

    async fn book_instances_update(&self, instance: &BookInstance) -> AppResult<Option<BookInstance>> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE book_instances
            SET book = $2, imprint = $3, status = $4, due_back = $5
            WHERE id = $1
            RETURNING {}
            "#,
            BOOK_INSTANCE_COLUMNS
        ))
        .bind(instance.id)
        .bind(instance.book)
        .bind(&instance.imprint)
        .bind(instance.status.as_str())
        .bind(instance.due_back)
        .fetch_optional(&self.pool)
        .await?;
        map_optional(row, book_instance_from_row)
    }

    async fn book_instances_delete(&self, id: Uuid) -> AppResult<bool> {
        self.delete("DELETE FROM book_instances WHERE id = $1", id).await
    }

    async fn book_instances_count(&self) -> AppResult<i64> {
        self.count("SELECT COUNT(*) FROM book_instances").await
    }

    async fn book_instances_count_by_status(&self, status: BookInstanceStatus) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book_instances WHERE status = $1")
            .bind(status.as_str())
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
