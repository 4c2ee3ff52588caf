//! HTTP handlers for the catalog routes

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod catalog;
pub mod genres;
pub mod health;
pub mod openapi;

use axum::{
    async_trait,
    body::{to_bytes, Body},
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
    response::Redirect,
    routing::get,
    Json, Router,
};
use axum_extra::extract::Form;
use serde::de::DeserializeOwned;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{error::AppError, AppState};

/// Matches axum's default request body limit
const BODY_LIMIT: usize = 2 * 1024 * 1024;

/// Submitted form body, URL-encoded or JSON depending on `Content-Type`.
///
/// A request with neither a body nor a `Content-Type` yields `T::default()`,
/// so a bare delete confirmation falls back to the path id.
pub struct Submitted<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for Submitted<T>
where
    T: DeserializeOwned + Default + Send + 'static,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        match content_type {
            Some(ct) if ct.starts_with("application/json") => {
                let Json(value) = Json::<T>::from_request(req, state)
                    .await
                    .map_err(|e| AppError::BadRequest(e.body_text()))?;
                Ok(Submitted(value))
            }
            Some(_) => form(req, state).await,
            None => {
                let (parts, body) = req.into_parts();
                let bytes = to_bytes(body, BODY_LIMIT)
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                if bytes.is_empty() {
                    return Ok(Submitted(T::default()));
                }
                form(Request::from_parts(parts, Body::from(bytes)), state).await
            }
        }
    }
}

async fn form<T, S>(req: Request, state: &S) -> Result<Submitted<T>, AppError>
where
    T: DeserializeOwned + Send + 'static,
    S: Send + Sync,
{
    let Form(value) = Form::<T>::from_request(req, state)
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    Ok(Submitted(value))
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let catalog = Router::new()
        .route("/", get(catalog::index))
        // Authors
        .route("/authors", get(authors::list_authors))
        .route(
            "/author/create",
            get(authors::create_author_form).post(authors::create_author),
        )
        .route("/author/:id", get(authors::get_author))
        .route(
            "/author/:id/delete",
            get(authors::delete_author_form).post(authors::delete_author),
        )
        .route(
            "/author/:id/update",
            get(authors::update_author_form).post(authors::update_author),
        )
        // Books
        .route("/books", get(books::list_books))
        .route(
            "/book/create",
            get(books::create_book_form).post(books::create_book),
        )
        .route("/book/:id", get(books::get_book))
        .route(
            "/book/:id/delete",
            get(books::delete_book_form).post(books::delete_book),
        )
        .route(
            "/book/:id/update",
            get(books::update_book_form).post(books::update_book),
        )
        // Genres
        .route("/genres", get(genres::list_genres))
        .route(
            "/genre/create",
            get(genres::create_genre_form).post(genres::create_genre),
        )
        .route("/genre/:id", get(genres::get_genre))
        .route(
            "/genre/:id/delete",
            get(genres::delete_genre_form).post(genres::delete_genre),
        )
        .route(
            "/genre/:id/update",
            get(genres::update_genre_form).post(genres::update_genre),
        )
        // Book instances
        .route("/bookinstances", get(book_instances::list_book_instances))
        .route(
            "/bookinstance/create",
            get(book_instances::create_book_instance_form).post(book_instances::create_book_instance),
        )
        .route("/bookinstance/:id", get(book_instances::get_book_instance))
        .route(
            "/bookinstance/:id/delete",
            get(book_instances::delete_book_instance_form).post(book_instances::delete_book_instance),
        )
        .route(
            "/bookinstance/:id/update",
            get(book_instances::update_book_instance_form).post(book_instances::update_book_instance),
        );

    Router::new()
        .route("/", get(|| async { Redirect::to("/catalog") }))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .nest("/catalog", catalog)
        .with_state(state)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
