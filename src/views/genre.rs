//! Genre view contracts

use serde::Serialize;

use crate::{
    models::{genre::GenreDraft, BookView, GenreView},
    validation::FieldError,
};

pub const LIST: &str = "genre_list";
pub const DETAIL: &str = "genre_detail";
pub const FORM: &str = "genre_form";
pub const DELETE: &str = "genre_delete";

#[derive(Debug, Serialize)]
pub struct GenreListPage {
    pub title: String,
    pub genre_list: Vec<GenreView>,
}

#[derive(Debug, Serialize)]
pub struct GenreDetailPage {
    pub title: String,
    pub genre: GenreView,
    pub genre_books: Vec<BookView>,
}

#[derive(Debug, Serialize)]
pub struct GenreFormPage {
    pub title: String,
    pub genre: Option<GenreDraft>,
    pub errors: Vec<FieldError>,
}

/// Delete confirmation; a non-empty `all_books_by_genre` blocks deletion
#[derive(Debug, Serialize)]
pub struct GenreDeletePage {
    pub title: String,
    pub genre: GenreView,
    pub all_books_by_genre: Vec<BookView>,
}
