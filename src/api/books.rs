//! Book endpoints

use axum::{
    extract::{Path, State},
    response::Response,
};
use uuid::Uuid;

use super::Submitted;
use crate::{
    error::AppResult,
    models::book::{BookDeleteForm, BookForm},
    AppState,
};

/// List all books, sorted by title
#[utoipa::path(
    get,
    path = "/catalog/books",
    tag = "books",
    responses(
        (status = 200, description = "book_list view")
    )
)]
pub async fn list_books(State(state): State<AppState>) -> AppResult<Response> {
    let page = state.services.books.list().await?;
    state.respond(page)
}

/// Book detail with its author, genres and copies
#[utoipa::path(
    get,
    path = "/catalog/book/{id}",
    tag = "books",
    params(("id" = Uuid, Path, description = "Book ID")),
    responses(
        (status = 200, description = "book_detail view"),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    let page = state.services.books.detail(id).await?;
    state.respond(page)
}

/// Empty book form
#[utoipa::path(
    get,
    path = "/catalog/book/create",
    tag = "books",
    responses((status = 200, description = "book_form view"))
)]
pub async fn create_book_form(State(state): State<AppState>) -> AppResult<Response> {
    let page = state.services.books.create_form().await?;
    state.respond(page)
}

/// Create a book
#[utoipa::path(
    post,
    path = "/catalog/book/create",
    tag = "books",
    request_body(content = BookForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "book_form view with validation errors"),
        (status = 303, description = "Redirect to the book detail page")
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    Submitted(form): Submitted<BookForm>,
) -> AppResult<Response> {
    let page = state.services.books.create(form).await?;
    state.respond(page)
}

/// Book delete confirmation listing its copies
#[utoipa::path(
    get,
    path = "/catalog/book/{id}/delete",
    tag = "books",
    params(("id" = Uuid, Path, description = "Book ID")),
    responses(
        (status = 200, description = "book_delete view"),
        (status = 303, description = "Book already gone, redirect to the list")
    )
)]
pub async fn delete_book_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    let page = state.services.books.delete_form(id).await?;
    state.respond(page)
}

/// Delete a book; its copies are kept
#[utoipa::path(
    post,
    path = "/catalog/book/{id}/delete",
    tag = "books",
    params(("id" = Uuid, Path, description = "Book ID")),
    request_body(content = BookDeleteForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect to the book list")
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Submitted(form): Submitted<BookDeleteForm>,
) -> AppResult<Response> {
    let page = state.services.books.delete(id, form).await?;
    state.respond(page)
}

/// Book form pre-filled with the current record
#[utoipa::path(
    get,
    path = "/catalog/book/{id}/update",
    tag = "books",
    params(("id" = Uuid, Path, description = "Book ID")),
    responses(
        (status = 200, description = "book_form view"),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    let page = state.services.books.update_form(id).await?;
    state.respond(page)
}

/// Update a book
#[utoipa::path(
    post,
    path = "/catalog/book/{id}/update",
    tag = "books",
    params(("id" = Uuid, Path, description = "Book ID")),
    request_body(content = BookForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "book_form view with validation errors"),
        (status = 303, description = "Redirect to the updated book"),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Submitted(form): Submitted<BookForm>,
) -> AppResult<Response> {
    let page = state.services.books.update(id, form).await?;
    state.respond(page)
}
