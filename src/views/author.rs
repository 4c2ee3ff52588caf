//! Author view contracts

use serde::Serialize;

use crate::{
    models::{author::AuthorDraft, AuthorView, BookView},
    validation::FieldError,
};

pub const LIST: &str = "author_list";
pub const DETAIL: &str = "author_detail";
pub const FORM: &str = "author_form";
pub const DELETE: &str = "author_delete";

#[derive(Debug, Serialize)]
pub struct AuthorListPage {
    pub title: String,
    pub author_list: Vec<AuthorView>,
}

#[derive(Debug, Serialize)]
pub struct AuthorDetailPage {
    pub title: String,
    pub author: AuthorView,
    pub author_books: Vec<BookView>,
}

#[derive(Debug, Serialize)]
pub struct AuthorFormPage {
    pub title: String,
    pub author: Option<AuthorDraft>,
    pub errors: Vec<FieldError>,
}

#[derive(Debug, Serialize)]
pub struct AuthorDeletePage {
    pub title: String,
    pub author: AuthorView,
}
