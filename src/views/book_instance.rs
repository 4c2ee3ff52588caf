//! Book instance view contracts

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    models::{
        book_instance::BookInstanceDraft, Book, BookInstance, BookInstanceStatus, BookView,
    },
    validation::FieldError,
};

pub const LIST: &str = "bookinstance_list";
pub const DETAIL: &str = "bookinstance_detail";
pub const FORM: &str = "bookinstance_form";
pub const DELETE: &str = "bookinstance_delete";

/// Copy with its book resolved
#[derive(Debug, Clone, Serialize)]
pub struct BookInstanceEntry {
    pub id: Uuid,
    pub imprint: String,
    pub status: BookInstanceStatus,
    pub due_back: NaiveDate,
    pub url: String,
    pub due_back_formatted: String,
    pub due_back_yyyy_mm_dd: String,
    pub book: Option<BookView>,
}

impl BookInstanceEntry {
    pub fn populate(instance: &BookInstance, book: Option<&Book>) -> Self {
        Self {
            id: instance.id,
            imprint: instance.imprint.clone(),
            status: instance.status,
            due_back: instance.due_back,
            url: instance.url(),
            due_back_formatted: instance.due_back_formatted(),
            due_back_yyyy_mm_dd: instance.due_back_yyyy_mm_dd(),
            book: book.map(BookView::from),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BookInstanceListPage {
    pub title: String,
    pub bookinstance_list: Vec<BookInstanceEntry>,
}

#[derive(Debug, Serialize)]
pub struct BookInstanceDetailPage {
    pub title: String,
    pub bookinstance: BookInstanceEntry,
}

#[derive(Debug, Serialize)]
pub struct BookInstanceFormPage {
    pub title: String,
    pub bookinstance: Option<BookInstanceDraft>,
    /// Books to choose from, sorted by title
    pub book_list: Vec<BookView>,
    pub selected_book: Option<String>,
    pub status_list: Vec<&'static str>,
    pub errors: Vec<FieldError>,
}

#[derive(Debug, Serialize)]
pub struct BookInstanceDeletePage {
    pub title: String,
    pub bookinstance: BookInstanceEntry,
}

pub fn status_list() -> Vec<&'static str> {
    BookInstanceStatus::ALL.iter().map(|s| s.as_str()).collect()
}
