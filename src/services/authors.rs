//! Author controller

use uuid::Uuid;

use super::delete_target;
use crate::{
    error::{AppError, AppResult},
    models::{
        author::{AuthorDeleteForm, AuthorDraft, AuthorForm},
        Author, AuthorView, BookView,
    },
    repository::Repository,
    validation::{self, FieldError, Validated},
    views::{
        author::{self as view, AuthorDeletePage, AuthorDetailPage, AuthorFormPage, AuthorListPage},
        Page,
    },
};

#[derive(Clone)]
pub struct AuthorsService {
    repository: Repository,
}

impl AuthorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Page> {
        let authors = self.repository.authors_list().await?;
        Page::render(
            view::LIST,
            &AuthorListPage {
                title: "Author List".to_string(),
                author_list: authors.iter().map(AuthorView::from).collect(),
            },
        )
    }

    /// An author and the books they wrote
    pub async fn detail(&self, id: Uuid) -> AppResult<Page> {
        let (author, books) = tokio::try_join!(
            self.repository.authors_get(id),
            self.repository.books_by_author(id),
        )?;
        let author = author.ok_or_else(|| AppError::NotFound("Author not found".to_string()))?;

        Page::render(
            view::DETAIL,
            &AuthorDetailPage {
                title: "Author Detail".to_string(),
                author: AuthorView::from(&author),
                author_books: books.iter().map(BookView::from).collect(),
            },
        )
    }

    pub async fn create_form(&self) -> AppResult<Page> {
        render_form("Create Author", None, Vec::new())
    }

    pub async fn create(&self, form: AuthorForm) -> AppResult<Page> {
        let author = match validation::author(form, None) {
            Validated::Valid(author) => author,
            Validated::Rejected { candidate, errors } => {
                return render_form("Create Author", Some(candidate), errors);
            }
        };

        let created = self.repository.authors_create(&author).await?;
        tracing::info!("Created author {} ({})", created.name(), created.id);
        Ok(Page::redirect(created.url()))
    }

    pub async fn delete_form(&self, id: Uuid) -> AppResult<Page> {
        match self.repository.authors_get(id).await? {
            Some(author) => Page::render(
                view::DELETE,
                &AuthorDeletePage {
                    title: "Delete Author".to_string(),
                    author: AuthorView::from(&author),
                },
            ),
            None => Ok(Page::redirect(Author::LIST_URL)),
        }
    }

    /// Delete by id. Books by this author keep their reference.
    pub async fn delete(&self, id: Uuid, form: AuthorDeleteForm) -> AppResult<Page> {
        let target = delete_target(form.authorid.as_deref(), id);
        if self.repository.authors_delete(target).await? {
            tracing::info!("Deleted author {}", target);
        }
        Ok(Page::redirect(Author::LIST_URL))
    }

    pub async fn update_form(&self, id: Uuid) -> AppResult<Page> {
        let author = self
            .repository
            .authors_get(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Author not found".to_string()))?;
        render_form("Update Author", Some(AuthorDraft::from(&author)), Vec::new())
    }

    pub async fn update(&self, id: Uuid, form: AuthorForm) -> AppResult<Page> {
        let author = match validation::author(form, Some(id)) {
            Validated::Valid(author) => author,
            Validated::Rejected { candidate, errors } => {
                return render_form("Update Author", Some(candidate), errors);
            }
        };

        let updated = self
            .repository
            .authors_update(&author)
            .await?
            .ok_or_else(|| AppError::NotFound("Author not found".to_string()))?;
        tracing::info!("Updated author {}", updated.id);
        Ok(Page::redirect(updated.url()))
    }
}

fn render_form(title: &str, author: Option<AuthorDraft>, errors: Vec<FieldError>) -> AppResult<Page> {
    Page::render(
        view::FORM,
        &AuthorFormPage {
            title: title.to_string(),
            author,
            errors,
        },
    )
}
