//! Book instance controller

use uuid::Uuid;

use super::delete_target;
use crate::{
    error::{AppError, AppResult},
    models::{
        book_instance::{BookInstanceDeleteForm, BookInstanceDraft, BookInstanceForm},
        Book, BookInstance, BookView,
    },
    repository::Repository,
    validation::{self, FieldError, Validated},
    views::{
        book_instance::{
            self as view, status_list, BookInstanceDeletePage, BookInstanceDetailPage,
            BookInstanceEntry, BookInstanceFormPage, BookInstanceListPage,
        },
        Page,
    },
};

#[derive(Clone)]
pub struct BookInstancesService {
    repository: Repository,
}

impl BookInstancesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All copies with their books resolved
    pub async fn list(&self) -> AppResult<Page> {
        let (instances, books) = tokio::try_join!(
            self.repository.book_instances_list(),
            self.repository.books_list(),
        )?;
        Page::render(
            view::LIST,
            &BookInstanceListPage {
                title: "Book Instance List".to_string(),
                bookinstance_list: instances
                    .iter()
                    .map(|i| BookInstanceEntry::populate(i, books.iter().find(|b| b.id == i.book)))
                    .collect(),
            },
        )
    }

    pub async fn detail(&self, id: Uuid) -> AppResult<Page> {
        let instance = self
            .repository
            .book_instances_get(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Book copy not found".to_string()))?;
        let entry = self.populate(&instance).await?;

        Page::render(
            view::DETAIL,
            &BookInstanceDetailPage {
                title: "Book:".to_string(),
                bookinstance: entry,
            },
        )
    }

    pub async fn create_form(&self) -> AppResult<Page> {
        let books = self.repository.books_list().await?;
        render_form("Create Book Instance", None, &books, Vec::new())
    }

    pub async fn create(&self, form: BookInstanceForm) -> AppResult<Page> {
        let instance = match validation::book_instance(form, None) {
            Validated::Valid(instance) => instance,
            Validated::Rejected { candidate, errors } => {
                let books = self.repository.books_list().await?;
                return render_form("Create Book Instance", Some(candidate), &books, errors);
            }
        };

        let created = self.repository.book_instances_create(&instance).await?;
        tracing::info!("Created book instance {} of book {}", created.id, created.book);
        Ok(Page::redirect(created.url()))
    }

    pub async fn delete_form(&self, id: Uuid) -> AppResult<Page> {
        let Some(instance) = self.repository.book_instances_get(id).await? else {
            return Ok(Page::redirect(BookInstance::LIST_URL));
        };
        let entry = self.populate(&instance).await?;

        Page::render(
            view::DELETE,
            &BookInstanceDeletePage {
                title: "Delete Book Instance".to_string(),
                bookinstance: entry,
            },
        )
    }

    pub async fn delete(&self, id: Uuid, form: BookInstanceDeleteForm) -> AppResult<Page> {
        let target = delete_target(form.bookinstanceid.as_deref(), id);
        if self.repository.book_instances_delete(target).await? {
            tracing::info!("Deleted book instance {}", target);
        }
        Ok(Page::redirect(BookInstance::LIST_URL))
    }

    pub async fn update_form(&self, id: Uuid) -> AppResult<Page> {
        let (books, instance) = tokio::try_join!(
            self.repository.books_list(),
            self.repository.book_instances_get(id),
        )?;
        let instance =
            instance.ok_or_else(|| AppError::NotFound("Book Instance not found".to_string()))?;
        render_form(
            "Update Book Instance",
            Some(BookInstanceDraft::from(&instance)),
            &books,
            Vec::new(),
        )
    }

    pub async fn update(&self, id: Uuid, form: BookInstanceForm) -> AppResult<Page> {
        let instance = match validation::book_instance(form, Some(id)) {
            Validated::Valid(instance) => instance,
            Validated::Rejected { candidate, errors } => {
                let books = self.repository.books_list().await?;
                return render_form("Update Book Instance", Some(candidate), &books, errors);
            }
        };

        let updated = self
            .repository
            .book_instances_update(&instance)
            .await?
            .ok_or_else(|| AppError::NotFound("Book Instance not found".to_string()))?;
        tracing::info!("Updated book instance {}", updated.id);
        Ok(Page::redirect(updated.url()))
    }

    async fn populate(&self, instance: &BookInstance) -> AppResult<BookInstanceEntry> {
        let book = self.repository.books_get(instance.book).await?;
        Ok(BookInstanceEntry::populate(instance, book.as_ref()))
    }
}

fn render_form(
    title: &str,
    instance: Option<BookInstanceDraft>,
    books: &[Book],
    errors: Vec<FieldError>,
) -> AppResult<Page> {
    let selected_book = instance
        .as_ref()
        .map(|i| i.book.clone())
        .filter(|b| !b.is_empty());

    Page::render(
        view::FORM,
        &BookInstanceFormPage {
            title: title.to_string(),
            bookinstance: instance,
            book_list: books.iter().map(BookView::from).collect(),
            selected_book,
            status_list: status_list(),
            errors,
        },
    )
}
