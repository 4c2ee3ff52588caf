//! Genre controller

use uuid::Uuid;

use super::delete_target;
use crate::{
    error::{AppError, AppResult},
    models::{
        genre::{GenreDeleteForm, GenreDraft, GenreForm},
        Book, BookView, Genre, GenreView,
    },
    repository::Repository,
    validation::{self, FieldError, Validated},
    views::{
        genre::{self as view, GenreDeletePage, GenreDetailPage, GenreFormPage, GenreListPage},
        Page,
    },
};

#[derive(Clone)]
pub struct GenresService {
    repository: Repository,
}

impl GenresService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All genres, sorted by name
    pub async fn list(&self) -> AppResult<Page> {
        let genres = self.repository.genres_list().await?;
        Page::render(
            view::LIST,
            &GenreListPage {
                title: "Genre List".to_string(),
                genre_list: genres.iter().map(GenreView::from).collect(),
            },
        )
    }

    /// A genre and the books filed under it
    pub async fn detail(&self, id: Uuid) -> AppResult<Page> {
        let (genre, books) = tokio::try_join!(
            self.repository.genres_get(id),
            self.repository.books_by_genre(id),
        )?;
        let genre = genre.ok_or_else(|| AppError::NotFound("Genre not found".to_string()))?;

        Page::render(
            view::DETAIL,
            &GenreDetailPage {
                title: "Genre Detail".to_string(),
                genre: GenreView::from(&genre),
                genre_books: books.iter().map(BookView::from).collect(),
            },
        )
    }

    pub async fn create_form(&self) -> AppResult<Page> {
        render_form("Create Genre", None, Vec::new())
    }

    /// Create a genre unless one with the same sanitized name exists, in
    /// which case the existing record's page is returned instead.
    pub async fn create(&self, form: GenreForm) -> AppResult<Page> {
        let genre = match validation::genre(form, None) {
            Validated::Valid(genre) => genre,
            Validated::Rejected { candidate, errors } => {
                return render_form("Create Genre", Some(candidate), errors);
            }
        };

        if let Some(existing) = self.repository.genres_find_by_name(&genre.name).await? {
            tracing::debug!("Genre '{}' already exists as {}", existing.name, existing.id);
            return Ok(Page::redirect(existing.url()));
        }

        let created = self.repository.genres_create(&genre).await?;
        tracing::info!("Created genre {} ({})", created.name, created.id);
        Ok(Page::redirect(created.url()))
    }

    pub async fn delete_form(&self, id: Uuid) -> AppResult<Page> {
        let (genre, books) = tokio::try_join!(
            self.repository.genres_get(id),
            self.repository.books_by_genre(id),
        )?;
        match genre {
            Some(genre) => render_delete(&genre, &books),
            None => Ok(Page::redirect(Genre::LIST_URL)),
        }
    }

    /// Delete a genre no book refers to; otherwise show the blocking books.
    ///
    /// The dependency check and the delete are separate store calls, so a
    /// book saved in between can still end up referring to a deleted genre.
    pub async fn delete(&self, id: Uuid, form: GenreDeleteForm) -> AppResult<Page> {
        let target = delete_target(form.genreid.as_deref(), id);
        let (genre, books) = tokio::try_join!(
            self.repository.genres_get(target),
            self.repository.books_by_genre(target),
        )?;
        let Some(genre) = genre else {
            return Ok(Page::redirect(Genre::LIST_URL));
        };

        if !books.is_empty() {
            tracing::warn!(
                "Refusing to delete genre {}: {} book(s) still reference it",
                genre.id,
                books.len()
            );
            return render_delete(&genre, &books);
        }

        self.repository.genres_delete(target).await?;
        tracing::info!("Deleted genre {} ({})", genre.name, genre.id);
        Ok(Page::redirect(Genre::LIST_URL))
    }

    pub async fn update_form(&self, id: Uuid) -> AppResult<Page> {
        let genre = self
            .repository
            .genres_get(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Genre not found".to_string()))?;
        render_form("Update Genre", Some(GenreDraft::from(&genre)), Vec::new())
    }

    pub async fn update(&self, id: Uuid, form: GenreForm) -> AppResult<Page> {
        let genre = match validation::genre(form, Some(id)) {
            Validated::Valid(genre) => genre,
            Validated::Rejected { candidate, errors } => {
                return render_form("Update Genre", Some(candidate), errors);
            }
        };

        let updated = self
            .repository
            .genres_update(&genre)
            .await?
            .ok_or_else(|| AppError::NotFound("Genre not found".to_string()))?;
        tracing::info!("Updated genre {}", updated.id);
        Ok(Page::redirect(updated.url()))
    }
}

fn render_form(title: &str, genre: Option<GenreDraft>, errors: Vec<FieldError>) -> AppResult<Page> {
    Page::render(
        view::FORM,
        &GenreFormPage {
            title: title.to_string(),
            genre,
            errors,
        },
    )
}

fn render_delete(genre: &Genre, books: &[Book]) -> AppResult<Page> {
    Page::render(
        view::DELETE,
        &GenreDeletePage {
            title: "Delete Genre".to_string(),
            genre: GenreView::from(genre),
            all_books_by_genre: books.iter().map(BookView::from).collect(),
        },
    )
}
