//! Book instance endpoints

use axum::{
    extract::{Path, State},
    response::Response,
};
use uuid::Uuid;

use super::Submitted;
use crate::{
    error::AppResult,
    models::book_instance::{BookInstanceDeleteForm, BookInstanceForm},
    AppState,
};

/// List all book instances
#[utoipa::path(
    get,
    path = "/catalog/bookinstances",
    tag = "book_instances",
    responses(
        (status = 200, description = "bookinstance_list view")
    )
)]
pub async fn list_book_instances(State(state): State<AppState>) -> AppResult<Response> {
    let page = state.services.book_instances.list().await?;
    state.respond(page)
}

/// Book instance detail with its book
#[utoipa::path(
    get,
    path = "/catalog/bookinstance/{id}",
    tag = "book_instances",
    params(("id" = Uuid, Path, description = "Book instance ID")),
    responses(
        (status = 200, description = "bookinstance_detail view"),
        (status = 404, description = "Book instance not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book_instance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    let page = state.services.book_instances.detail(id).await?;
    state.respond(page)
}

/// Empty book instance form
#[utoipa::path(
    get,
    path = "/catalog/bookinstance/create",
    tag = "book_instances",
    responses((status = 200, description = "bookinstance_form view"))
)]
pub async fn create_book_instance_form(State(state): State<AppState>) -> AppResult<Response> {
    let page = state.services.book_instances.create_form().await?;
    state.respond(page)
}

/// Create a book instance
#[utoipa::path(
    post,
    path = "/catalog/bookinstance/create",
    tag = "book_instances",
    request_body(content = BookInstanceForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "bookinstance_form view with validation errors"),
        (status = 303, description = "Redirect to the book instance detail page")
    )
)]
pub async fn create_book_instance(
    State(state): State<AppState>,
    Submitted(form): Submitted<BookInstanceForm>,
) -> AppResult<Response> {
    let page = state.services.book_instances.create(form).await?;
    state.respond(page)
}

/// Book instance delete confirmation
#[utoipa::path(
    get,
    path = "/catalog/bookinstance/{id}/delete",
    tag = "book_instances",
    params(("id" = Uuid, Path, description = "Book instance ID")),
    responses(
        (status = 200, description = "bookinstance_delete view"),
        (status = 303, description = "Book instance already gone, redirect to the list")
    )
)]
pub async fn delete_book_instance_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    let page = state.services.book_instances.delete_form(id).await?;
    state.respond(page)
}

/// Delete a book instance
#[utoipa::path(
    post,
    path = "/catalog/bookinstance/{id}/delete",
    tag = "book_instances",
    params(("id" = Uuid, Path, description = "Book instance ID")),
    request_body(content = BookInstanceDeleteForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirect to the book instance list")
    )
)]
pub async fn delete_book_instance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Submitted(form): Submitted<BookInstanceDeleteForm>,
) -> AppResult<Response> {
    let page = state.services.book_instances.delete(id, form).await?;
    state.respond(page)
}

/// Book instance form pre-filled with the current record
#[utoipa::path(
    get,
    path = "/catalog/bookinstance/{id}/update",
    tag = "book_instances",
    params(("id" = Uuid, Path, description = "Book instance ID")),
    responses(
        (status = 200, description = "bookinstance_form view"),
        (status = 404, description = "Book instance not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book_instance_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    let page = state.services.book_instances.update_form(id).await?;
    state.respond(page)
}

/// Update a book instance
#[utoipa::path(
    post,
    path = "/catalog/bookinstance/{id}/update",
    tag = "book_instances",
    params(("id" = Uuid, Path, description = "Book instance ID")),
    request_body(content = BookInstanceForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "bookinstance_form view with validation errors"),
        (status = 303, description = "Redirect to the updated book instance"),
        (status = 404, description = "Book instance not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book_instance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Submitted(form): Submitted<BookInstanceForm>,
) -> AppResult<Response> {
    let page = state.services.book_instances.update(id, form).await?;
    state.respond(page)
}
