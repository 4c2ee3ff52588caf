//! Author model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::dates;

/// Maximum length of either name part
pub const NAME_MAX_LENGTH: u64 = 100;

/// Stored author record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Author {
    pub id: Uuid,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    /// Canonical path of the author list view
    pub const LIST_URL: &'static str = "/catalog/authors";

    /// "family_name, first_name", or empty when either part is missing
    pub fn name(&self) -> String {
        if self.first_name.is_empty() || self.family_name.is_empty() {
            return String::new();
        }
        format!("{}, {}", self.family_name, self.first_name)
    }

    pub fn url(&self) -> String {
        format!("/catalog/author/{}", self.id)
    }

    pub fn date_of_birth_formatted(&self) -> String {
        dates::medium_date_or_empty(self.date_of_birth)
    }

    pub fn date_of_death_formatted(&self) -> String {
        dates::medium_date_or_empty(self.date_of_death)
    }

    /// "birth - death"; either side may be empty, the separator never is
    pub fn lifespan(&self) -> String {
        format!(
            "{} - {}",
            self.date_of_birth_formatted(),
            self.date_of_death_formatted()
        )
    }
}

/// Author as handed to views, with derived fields computed
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthorView {
    pub id: Uuid,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
    pub name: String,
    pub url: String,
    pub date_of_birth_formatted: String,
    pub date_of_death_formatted: String,
    pub lifespan: String,
    /// ISO values used to pre-fill date inputs
    pub date_of_birth_yyyy_mm_dd: String,
    pub date_of_death_yyyy_mm_dd: String,
}

impl From<&Author> for AuthorView {
    fn from(author: &Author) -> Self {
        Self {
            id: author.id,
            first_name: author.first_name.clone(),
            family_name: author.family_name.clone(),
            date_of_birth: author.date_of_birth,
            date_of_death: author.date_of_death,
            name: author.name(),
            url: author.url(),
            date_of_birth_formatted: author.date_of_birth_formatted(),
            date_of_death_formatted: author.date_of_death_formatted(),
            lifespan: author.lifespan(),
            date_of_birth_yyyy_mm_dd: author.date_of_birth.map(dates::iso_date).unwrap_or_default(),
            date_of_death_yyyy_mm_dd: author.date_of_death.map(dates::iso_date).unwrap_or_default(),
        }
    }
}

/// Submitted author form, as received
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct AuthorForm {
    pub first_name: Option<String>,
    pub family_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub date_of_death: Option<String>,
}

/// Sanitized author candidate used to pre-fill a rejected form
#[derive(Debug, Clone, Default, Serialize)]
pub struct AuthorDraft {
    pub id: Option<Uuid>,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: String,
    pub date_of_death: String,
}

impl From<&Author> for AuthorDraft {
    fn from(author: &Author) -> Self {
        Self {
            id: Some(author.id),
            first_name: author.first_name.clone(),
            family_name: author.family_name.clone(),
            date_of_birth: author.date_of_birth.map(dates::iso_date).unwrap_or_default(),
            date_of_death: author.date_of_death.map(dates::iso_date).unwrap_or_default(),
        }
    }
}

/// Delete confirmation body
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct AuthorDeleteForm {
    pub authorid: Option<String>,
}
