//! Genre model

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Genre {
    pub id: Uuid,
    pub name: String,
}

impl Genre {
    /// Canonical path of the genre list view
    pub const LIST_URL: &'static str = "/catalog/genres";

    pub fn url(&self) -> String {
        format!("/catalog/genre/{}", self.id)
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GenreView {
    pub id: Uuid,
    pub name: String,
    pub url: String,
}

impl From<&Genre> for GenreView {
    fn from(genre: &Genre) -> Self {
        Self {
            id: genre.id,
            name: genre.name.clone(),
            url: genre.url(),
        }
    }
}

/// Genre offered in a book form, flagged when already selected
#[derive(Debug, Clone, Serialize)]
pub struct GenreChoice {
    #[serde(flatten)]
    pub genre: GenreView,
    pub checked: bool,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct GenreForm {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GenreDraft {
    pub id: Option<Uuid>,
    pub name: String,
}

impl From<&Genre> for GenreDraft {
    fn from(genre: &Genre) -> Self {
        Self {
            id: Some(genre.id),
            name: genre.name.clone(),
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct GenreDeleteForm {
    pub genreid: Option<String>,
}
