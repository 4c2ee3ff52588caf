//! Genre endpoints

use axum::{
    extract::{Path, State},
    response::Response,
};
use uuid::Uuid;

use super::Submitted;
use crate::{
    error::AppResult,
    models::genre::{GenreDeleteForm, GenreForm},
    AppState,
};

/// List all genres, sorted by name
#[utoipa::path(
    get,
    path = "/catalog/genres",
    tag = "genres",
    responses(
        (status = 200, description = "genre_list view")
    )
)]
pub async fn list_genres(State(state): State<AppState>) -> AppResult<Response> {
    let page = state.services.genres.list().await?;
    state.respond(page)
}

/// Genre detail with the books filed under it
#[utoipa::path(
    get,
    path = "/catalog/genre/{id}",
    tag = "genres",
    params(("id" = Uuid, Path, description = "Genre ID")),
    responses(
        (status = 200, description = "genre_detail view"),
        (status = 404, description = "Genre not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_genre(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    let page = state.services.genres.detail(id).await?;
    state.respond(page)
}

/// Empty genre form
#[utoipa::path(
    get,
    path = "/catalog/genre/create",
    tag = "genres",
    responses((status = 200, description = "genre_form view"))
)]
pub async fn create_genre_form(State(state): State<AppState>) -> AppResult<Response> {
    let page = state.services.genres.create_form().await?;
    state.respond(page)
}

/// Create a genre, or redirect to the existing one with the same name
#[utoipa::path(
    post,
    path = "/catalog/genre/create",
    tag = "genres",
    request_body(content = GenreForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "genre_form view with validation errors"),
        (status = 303, description = "Redirect to the genre detail page")
    )
)]
pub async fn create_genre(
    State(state): State<AppState>,
    Submitted(form): Submitted<GenreForm>,
) -> AppResult<Response> {
    let page = state.services.genres.create(form).await?;
    state.respond(page)
}

/// Delete confirmation listing the books that block deletion
#[utoipa::path(
    get,
    path = "/catalog/genre/{id}/delete",
    tag = "genres",
    params(("id" = Uuid, Path, description = "Genre ID")),
    responses(
        (status = 200, description = "genre_delete view"),
        (status = 303, description = "Genre already gone, redirect to the list")
    )
)]
pub async fn delete_genre_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    let page = state.services.genres.delete_form(id).await?;
    state.respond(page)
}

/// Delete a genre that no book references
#[utoipa::path(
    post,
    path = "/catalog/genre/{id}/delete",
    tag = "genres",
    params(("id" = Uuid, Path, description = "Genre ID")),
    request_body(content = GenreDeleteForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "genre_delete view: books still reference the genre"),
        (status = 303, description = "Redirect to the genre list")
    )
)]
pub async fn delete_genre(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Submitted(form): Submitted<GenreDeleteForm>,
) -> AppResult<Response> {
    let page = state.services.genres.delete(id, form).await?;
    state.respond(page)
}

/// Genre form pre-filled with the current record
#[utoipa::path(
    get,
    path = "/catalog/genre/{id}/update",
    tag = "genres",
    params(("id" = Uuid, Path, description = "Genre ID")),
    responses(
        (status = 200, description = "genre_form view"),
        (status = 404, description = "Genre not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_genre_form(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    let page = state.services.genres.update_form(id).await?;
    state.respond(page)
}

/// Update a genre
#[utoipa::path(
    post,
    path = "/catalog/genre/{id}/update",
    tag = "genres",
    params(("id" = Uuid, Path, description = "Genre ID")),
    request_body(content = GenreForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "genre_form view with validation errors"),
        (status = 303, description = "Redirect to the updated genre"),
        (status = 404, description = "Genre not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_genre(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Submitted(form): Submitted<GenreForm>,
) -> AppResult<Response> {
    let page = state.services.genres.update(id, form).await?;
    state.respond(page)
}
