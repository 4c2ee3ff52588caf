//! Catalog home endpoint

use axum::{extract::State, response::Response};

use crate::{error::AppResult, AppState};

/// Catalog home with record counts
#[utoipa::path(
    get,
    path = "/catalog",
    tag = "catalog",
    responses(
        (status = 200, description = "index view")
    )
)]
pub async fn index(State(state): State<AppState>) -> AppResult<Response> {
    let page = state.services.catalog.index().await?;
    state.respond(page)
}
