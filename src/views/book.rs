//! Book view contracts

use serde::Serialize;
use uuid::Uuid;

use crate::{
    models::{
        book::BookDraft, genre::GenreChoice, Author, AuthorView, Book, BookInstanceView, Genre,
        GenreView,
    },
    validation::FieldError,
};

pub const LIST: &str = "book_list";
pub const DETAIL: &str = "book_detail";
pub const FORM: &str = "book_form";
pub const DELETE: &str = "book_delete";

/// Book with its author and genres resolved.
///
/// References to records that no longer exist are left out.
#[derive(Debug, Clone, Serialize)]
pub struct BookEntry {
    pub id: Uuid,
    pub title: String,
    pub summary: String,
    pub isbn: String,
    pub url: String,
    pub author: Option<AuthorView>,
    pub genre: Vec<GenreView>,
}

impl BookEntry {
    pub fn populate(book: &Book, authors: &[Author], genres: &[Genre]) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            summary: book.summary.clone(),
            isbn: book.isbn.clone(),
            url: book.url(),
            author: authors
                .iter()
                .find(|a| a.id == book.author)
                .map(AuthorView::from),
            genre: book
                .genre
                .iter()
                .filter_map(|id| genres.iter().find(|g| g.id == *id))
                .map(GenreView::from)
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BookListPage {
    pub title: String,
    pub book_list: Vec<BookEntry>,
}

#[derive(Debug, Serialize)]
pub struct BookDetailPage {
    pub title: String,
    pub book: BookEntry,
    pub book_instances: Vec<BookInstanceView>,
}

#[derive(Debug, Serialize)]
pub struct BookFormPage {
    pub title: String,
    pub book: Option<BookDraft>,
    pub authors: Vec<AuthorView>,
    pub genres: Vec<GenreChoice>,
    pub selected_author: Option<String>,
    pub errors: Vec<FieldError>,
}

#[derive(Debug, Serialize)]
pub struct BookDeletePage {
    pub title: String,
    pub book: BookEntry,
    pub book_instances: Vec<BookInstanceView>,
}

/// Offer every genre, checking those named in `selected`
pub fn genre_choices(genres: &[Genre], selected: &[String]) -> Vec<GenreChoice> {
    genres
        .iter()
        .map(|g| GenreChoice {
            genre: GenreView::from(g),
            checked: selected.iter().any(|s| *s == g.id.to_string()),
        })
        .collect()
}
