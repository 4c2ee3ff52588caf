//! View data contracts and rendering.
//!
//! Controllers never build HTTP responses themselves: they return a [`Page`],
//! either a named view with its data or a redirect to a canonical path.

pub mod author;
pub mod book;
pub mod book_instance;
pub mod catalog;
pub mod genre;

use axum::{
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::AppResult;

/// A named view and the data handed to it
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub name: &'static str,
    pub data: Value,
}

impl View {
    /// Build a view from a serializable data contract
    pub fn new<T: Serialize>(name: &'static str, data: &T) -> AppResult<Self> {
        Ok(Self {
            name,
            data: serde_json::to_value(data)?,
        })
    }
}

/// Result of a controller operation
#[derive(Debug, Clone, PartialEq)]
pub enum Page {
    Render(View),
    Redirect(String),
}

impl Page {
    pub fn render<T: Serialize>(name: &'static str, data: &T) -> AppResult<Self> {
        Ok(Page::Render(View::new(name, data)?))
    }

    pub fn redirect(url: impl Into<String>) -> Self {
        Page::Redirect(url.into())
    }

    /// The rendered view, if this page is not a redirect
    pub fn view(&self) -> Option<&View> {
        match self {
            Page::Render(view) => Some(view),
            Page::Redirect(_) => None,
        }
    }

    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            Page::Redirect(url) => Some(url),
            Page::Render(_) => None,
        }
    }
}

/// Body produced by a view renderer
pub struct Rendered {
    pub content_type: &'static str,
    pub body: String,
}

/// Turns a view into a response body (template engine seam)
pub trait ViewRenderer: Send + Sync {
    fn render(&self, view: &View) -> AppResult<Rendered>;
}

/// Renders views as JSON documents: `{"view": name, ...data}`
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl ViewRenderer for JsonRenderer {
    fn render(&self, view: &View) -> AppResult<Rendered> {
        let mut document = Map::new();
        document.insert("view".to_string(), Value::String(view.name.to_string()));
        if let Value::Object(fields) = &view.data {
            document.extend(fields.clone());
        }
        Ok(Rendered {
            content_type: "application/json",
            body: serde_json::to_string(&Value::Object(document))?,
        })
    }
}

/// Convert a controller page into an HTTP response
pub fn respond(renderer: &dyn ViewRenderer, page: Page) -> AppResult<Response> {
    match page {
        Page::Redirect(url) => Ok(Redirect::to(&url).into_response()),
        Page::Render(view) => {
            let rendered = renderer.render(&view)?;
            Ok((StatusCode::OK, [(CONTENT_TYPE, rendered.content_type)], rendered.body).into_response())
        }
    }
}
