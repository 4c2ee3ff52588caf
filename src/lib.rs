//! Local Library catalog server
//!
//! Catalog management for a lending library: authors, books, genres and the
//! physical copies (book instances) patrons borrow.

use std::sync::Arc;

use axum::response::Response;

pub mod api;
pub mod config;
pub mod dates;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod validation;
pub mod views;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
    pub renderer: Arc<dyn views::ViewRenderer>,
}

impl AppState {
    /// State over the given store, rendering views as JSON
    pub fn new(config: AppConfig, repository: repository::Repository) -> Self {
        Self {
            config: Arc::new(config),
            services: Arc::new(services::Services::new(repository)),
            renderer: Arc::new(views::JsonRenderer),
        }
    }

    /// Turn a controller page into a response with the configured renderer
    pub fn respond(&self, page: views::Page) -> AppResult<Response> {
        views::respond(self.renderer.as_ref(), page)
    }
}
