//! Book controller

use uuid::Uuid;

use super::delete_target;
use crate::{
    error::{AppError, AppResult},
    models::{
        book::{BookDeleteForm, BookDraft, BookForm},
        Author, AuthorView, Book, BookInstanceView, Genre,
    },
    repository::Repository,
    validation::{self, FieldError, Validated},
    views::{
        book::{
            self as view, genre_choices, BookDeletePage, BookDetailPage, BookEntry, BookFormPage,
            BookListPage,
        },
        Page,
    },
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All books, sorted by title, with authors resolved
    pub async fn list(&self) -> AppResult<Page> {
        let (books, authors, genres) = tokio::try_join!(
            self.repository.books_list(),
            self.repository.authors_list(),
            self.repository.genres_list(),
        )?;
        Page::render(
            view::LIST,
            &BookListPage {
                title: "Book List".to_string(),
                book_list: books
                    .iter()
                    .map(|b| BookEntry::populate(b, &authors, &genres))
                    .collect(),
            },
        )
    }

    /// A book with its author, genres and copies
    pub async fn detail(&self, id: Uuid) -> AppResult<Page> {
        let (book, instances) = tokio::try_join!(
            self.repository.books_get(id),
            self.repository.book_instances_by_book(id),
        )?;
        let book = book.ok_or_else(|| AppError::NotFound("Book not found".to_string()))?;
        let entry = self.populate(&book).await?;

        Page::render(
            view::DETAIL,
            &BookDetailPage {
                title: book.title.clone(),
                book: entry,
                book_instances: instances.iter().map(BookInstanceView::from).collect(),
            },
        )
    }

    pub async fn create_form(&self) -> AppResult<Page> {
        let (authors, genres) = tokio::try_join!(
            self.repository.authors_list(),
            self.repository.genres_list(),
        )?;
        render_form("Create Book", None, &authors, &genres, Vec::new())
    }

    pub async fn create(&self, form: BookForm) -> AppResult<Page> {
        let book = match validation::book(form, None) {
            Validated::Valid(book) => book,
            Validated::Rejected { candidate, errors } => {
                return self.reject("Create Book", candidate, errors).await;
            }
        };

        let created = self.repository.books_create(&book).await?;
        tracing::info!("Created book '{}' ({})", created.title, created.id);
        Ok(Page::redirect(created.url()))
    }

    pub async fn delete_form(&self, id: Uuid) -> AppResult<Page> {
        let (book, instances) = tokio::try_join!(
            self.repository.books_get(id),
            self.repository.book_instances_by_book(id),
        )?;
        let Some(book) = book else {
            return Ok(Page::redirect(Book::LIST_URL));
        };
        let entry = self.populate(&book).await?;

        Page::render(
            view::DELETE,
            &BookDeletePage {
                title: "Delete Book".to_string(),
                book: entry,
                book_instances: instances.iter().map(BookInstanceView::from).collect(),
            },
        )
    }

    /// Delete by id. Copies of the book are left in place.
    pub async fn delete(&self, id: Uuid, form: BookDeleteForm) -> AppResult<Page> {
        let target = delete_target(form.bookid.as_deref(), id);
        if self.repository.books_delete(target).await? {
            tracing::info!("Deleted book {}", target);
        }
        Ok(Page::redirect(Book::LIST_URL))
    }

    pub async fn update_form(&self, id: Uuid) -> AppResult<Page> {
        let (book, authors, genres) = tokio::try_join!(
            self.repository.books_get(id),
            self.repository.authors_list(),
            self.repository.genres_list(),
        )?;
        let book = book.ok_or_else(|| AppError::NotFound("Book not found".to_string()))?;
        render_form(
            "Update Book",
            Some(BookDraft::from(&book)),
            &authors,
            &genres,
            Vec::new(),
        )
    }

    pub async fn update(&self, id: Uuid, form: BookForm) -> AppResult<Page> {
        let book = match validation::book(form, Some(id)) {
            Validated::Valid(book) => book,
            Validated::Rejected { candidate, errors } => {
                return self.reject("Update Book", candidate, errors).await;
            }
        };

        let updated = self
            .repository
            .books_update(&book)
            .await?
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))?;
        tracing::info!("Updated book {}", updated.id);
        Ok(Page::redirect(updated.url()))
    }

    async fn reject(&self, title: &str, candidate: BookDraft, errors: Vec<FieldError>) -> AppResult<Page> {
        let (authors, genres) = tokio::try_join!(
            self.repository.authors_list(),
            self.repository.genres_list(),
        )?;
        render_form(title, Some(candidate), &authors, &genres, errors)
    }

    async fn populate(&self, book: &Book) -> AppResult<BookEntry> {
        let (author, genres) = tokio::try_join!(
            self.repository.authors_get(book.author),
            self.repository.genres_list(),
        )?;
        let authors: Vec<Author> = author.into_iter().collect();
        Ok(BookEntry::populate(book, &authors, &genres))
    }
}

fn render_form(
    title: &str,
    book: Option<BookDraft>,
    authors: &[Author],
    genres: &[Genre],
    errors: Vec<FieldError>,
) -> AppResult<Page> {
    let selected_genres = book.as_ref().map(|b| b.genre.clone()).unwrap_or_default();
    let selected_author = book
        .as_ref()
        .map(|b| b.author.clone())
        .filter(|a| !a.is_empty());

    Page::render(
        view::FORM,
        &BookFormPage {
            title: title.to_string(),
            book,
            authors: authors.iter().map(AuthorView::from).collect(),
            genres: genre_choices(genres, &selected_genres),
            selected_author,
            errors,
        },
    )
}
