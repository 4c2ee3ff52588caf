//! Author endpoints

use axum::{
    extract::{Path, State},
    response::Response,
};
use uuid::Uuid;

use super::Submitted;
use crate::{
    error::AppResult,
    models::author::{AuthorDeleteForm, AuthorForm},
    AppState,
};

/// List all authors, sorted by family name
#[utoipa::path(
    get,
    path = "/catalog/authors",
    tag = "authors",
    responses(
        (status = 200, description = "author_list view")
    )
)]
pub async fn list_authors(State(state): State<AppState>) -> AppResult<Response> {
    let page = state.services.authors.list().await?;
    state.respond(page)
}

/// Author detail with the books they wrote
#[utoipa::path(
    get,
    path = "/catalog/author/{id}",
    tag = "authors",
    params(("id" = Uuid, Path, description = "Author ID")),
    responses(
        (status = 200, description = "author_detail view"),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_author(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    let page = state.services.authors.detail(id).await?;
    state.respond(page)
}

/// Empty author form
#[utoipa::path(
    get,
    path = "/catalog/author/create",
    tag = "authors",
    responses((status = 200, description = "author_form view"))
)]
pub async fn create_author_form(State(state): State<AppState>) -> AppResult<Response> {
    let page = state.services.authors.create_form().await?;
    state.respond(page)
}

/// Create an author
#[utoipa::path(
    post,
    path = "/catalog/author/create",
    tag = "authors",
    request_body(content = AuthorForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "author_form view with validation errors"),
        (status = 303, description = "Redirect to the author detail page")
    )
)]
pub async fn create_author(
    State(state): State<AppState>,
    Submitted(form): Submitted<AuthorForm>,
) -> AppResult<Response> {
    let page = state.services.authors.create(form).await?;
    state.respond(page)
}

/// Author delete confirmation
#[utoipa::path(
    get,
    path = "/catalog/author/{id}/delete",
    tag = "authors",
    params(("id" = Uuid, Path, description = "Author ID")),
    responses(
        (status = 200, description = "author_delete view"),
        (status = 303, description = "Author already gone, redirect to the list")
    )
)]
pub async fn delete_author_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    let page = state.services.authors.delete_form(id).await?;
    state.respond(page)
}

/// Delete an author
#[utoipa::path(
    post,
    path = "/catalog/author/{id}/delete",
    tag = "authors",
    params(("id" = Uuid, Path, description = "Author ID")),
    request_body(content = AuthorDeleteForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect to the author list")
    )
)]
pub async fn delete_author(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Submitted(form): Submitted<AuthorDeleteForm>,
) -> AppResult<Response> {
    let page = state.services.authors.delete(id, form).await?;
    state.respond(page)
}

/// Author form pre-filled with the current record
#[utoipa::path(
    get,
    path = "/catalog/author/{id}/update",
    tag = "authors",
    params(("id" = Uuid, Path, description = "Author ID")),
    responses(
        (status = 200, description = "author_form view"),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_author_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    let page = state.services.authors.update_form(id).await?;
    state.respond(page)
}

/// Update an author
#[utoipa::path(
    post,
    path = "/catalog/author/{id}/update",
    tag = "authors",
    params(("id" = Uuid, Path, description = "Author ID")),
    request_body(content = AuthorForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "author_form view with validation errors"),
        (status = 303, description = "Redirect to the updated author"),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_author(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Submitted(form): Submitted<AuthorForm>,
) -> AppResult<Response> {
    let page = state.services.authors.update(id, form).await?;
    state.respond(page)
}
