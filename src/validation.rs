//! Sanitization and validation of submitted catalog forms.
//!
//! Every field is trimmed, checked, then HTML-escaped. All rules run even
//! when an earlier one fails, and the resulting errors are reported in field
//! declaration order. Validation never aborts a request: a rejected
//! submission still yields a sanitized candidate for re-rendering the form.

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::{
    dates,
    models::{
        author::{Author, AuthorDraft, AuthorForm, NAME_MAX_LENGTH},
        book::{Book, BookDraft, BookForm},
        book_instance::{BookInstance, BookInstanceDraft, BookInstanceForm, BookInstanceStatus},
        genre::{Genre, GenreDraft, GenreForm},
    },
};

/// A single failed rule, tagged with the offending field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    pub value: String,
}

impl FieldError {
    fn new(field: &str, message: &str, value: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
            value: value.to_string(),
        }
    }
}

/// Outcome of validating a submission
#[derive(Debug)]
pub enum Validated<T, D> {
    /// Typed record built from sanitized fields
    Valid(T),
    /// Sanitized candidate and the ordered list of failures
    Rejected { candidate: D, errors: Vec<FieldError> },
}

impl<T, D> Validated<T, D> {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validated::Valid(_))
    }
}

/// Escape markup-significant characters
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            c => out.push(c),
        }
    }
    out
}

fn trimmed(value: &Option<String>) -> String {
    value.as_deref().unwrap_or_default().trim().to_string()
}

/// Flatten validator output, keeping `order` for field sequencing
fn collect(result: Result<(), ValidationErrors>, fields: &[(&str, &str)]) -> Vec<FieldError> {
    let Err(errors) = result else {
        return Vec::new();
    };
    let by_field = errors.field_errors();

    let mut out = Vec::new();
    for (field, value) in fields {
        if let Some(errs) = by_field.get(*field) {
            for err in errs.iter() {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                out.push(FieldError::new(field, &message, value));
            }
        }
    }
    out
}

fn sort_by_field(errors: &mut [FieldError], order: &[&str]) {
    errors.sort_by_key(|e| order.iter().position(|f| *f == e.field));
}

fn check_optional_date(
    errors: &mut Vec<FieldError>,
    field: &str,
    value: &str,
    message: &str,
) -> Option<NaiveDate> {
    if value.is_empty() {
        return None;
    }
    let parsed = dates::parse_iso8601(value);
    if parsed.is_none() {
        errors.push(FieldError::new(field, message, value));
    }
    parsed
}

fn check_max_length(errors: &mut Vec<FieldError>, field: &str, value: &str, max: u64, message: &str) {
    if value.chars().count() as u64 > max {
        errors.push(FieldError::new(field, message, value));
    }
}

// ---------------------------------------------------------------------------
// Genre
// ---------------------------------------------------------------------------

#[derive(Validate)]
struct GenreRules {
    #[validate(length(min = 3, message = "Genre name must contain at least 3 characters"))]
    name: String,
}

/// Validate a genre submission. `id` is the record being updated, if any.
pub fn genre(form: GenreForm, id: Option<Uuid>) -> Validated<Genre, GenreDraft> {
    let name = trimmed(&form.name);
    let rules = GenreRules { name: name.clone() };
    let errors = collect(rules.validate(), &[("name", &name)]);

    let name = escape(&name);
    if !errors.is_empty() {
        return Validated::Rejected {
            candidate: GenreDraft { id, name },
            errors,
        };
    }

    Validated::Valid(Genre {
        id: id.unwrap_or_else(Uuid::new_v4),
        name,
    })
}

// ---------------------------------------------------------------------------
// Author
// ---------------------------------------------------------------------------

const AUTHOR_FIELDS: [&str; 4] = ["first_name", "family_name", "date_of_birth", "date_of_death"];

#[derive(Validate)]
struct AuthorRules {
    #[validate(length(min = 1, message = "First name must be specified."))]
    first_name: String,
    #[validate(length(min = 1, message = "Family name must be specified."))]
    family_name: String,
}

pub fn author(form: AuthorForm, id: Option<Uuid>) -> Validated<Author, AuthorDraft> {
    let first_name = trimmed(&form.first_name);
    let family_name = trimmed(&form.family_name);
    let date_of_birth = trimmed(&form.date_of_birth);
    let date_of_death = trimmed(&form.date_of_death);

    let rules = AuthorRules {
        first_name: first_name.clone(),
        family_name: family_name.clone(),
    };
    let mut errors = collect(
        rules.validate(),
        &[("first_name", &first_name), ("family_name", &family_name)],
    );

    // The length bound applies to the stored, escaped text.
    let first_name = escape(&first_name);
    let family_name = escape(&family_name);
    check_max_length(
        &mut errors,
        "first_name",
        &first_name,
        NAME_MAX_LENGTH,
        "First name must not exceed 100 characters.",
    );
    check_max_length(
        &mut errors,
        "family_name",
        &family_name,
        NAME_MAX_LENGTH,
        "Family name must not exceed 100 characters.",
    );
    let born = check_optional_date(&mut errors, "date_of_birth", &date_of_birth, "Invalid date of birth");
    let died = check_optional_date(&mut errors, "date_of_death", &date_of_death, "Invalid date of death");
    sort_by_field(&mut errors, &AUTHOR_FIELDS);

    if !errors.is_empty() {
        return Validated::Rejected {
            candidate: AuthorDraft {
                id,
                first_name,
                family_name,
                date_of_birth: escape(&date_of_birth),
                date_of_death: escape(&date_of_death),
            },
            errors,
        };
    }

    Validated::Valid(Author {
        id: id.unwrap_or_else(Uuid::new_v4),
        first_name,
        family_name,
        date_of_birth: born,
        date_of_death: died,
    })
}

// ---------------------------------------------------------------------------
// Book
// ---------------------------------------------------------------------------

const BOOK_FIELDS: [&str; 5] = ["title", "author", "summary", "isbn", "genre"];

#[derive(Validate)]
struct BookRules {
    #[validate(length(min = 1, message = "Title must not be empty."))]
    title: String,
    #[validate(length(min = 1, message = "Author must not be empty."))]
    author: String,
    #[validate(length(min = 1, message = "Summary must not be empty."))]
    summary: String,
    #[validate(length(min = 1, message = "ISBN must not be empty"))]
    isbn: String,
}

pub fn book(form: BookForm, id: Option<Uuid>) -> Validated<Book, BookDraft> {
    let title = trimmed(&form.title);
    let author = trimmed(&form.author);
    let summary = trimmed(&form.summary);
    let isbn = trimmed(&form.isbn);
    let genre: Vec<String> = form
        .genre
        .iter()
        .map(|g| g.trim().to_string())
        .filter(|g| !g.is_empty())
        .collect();

    let rules = BookRules {
        title: title.clone(),
        author: author.clone(),
        summary: summary.clone(),
        isbn: isbn.clone(),
    };
    let mut errors = collect(
        rules.validate(),
        &[
            ("title", &title),
            ("author", &author),
            ("summary", &summary),
            ("isbn", &isbn),
        ],
    );

    let author_id = Uuid::parse_str(&author).ok();
    if author_id.is_none() && !author.is_empty() {
        errors.push(FieldError::new("author", "Author must not be empty.", &author));
    }

    let mut genre_ids = Vec::with_capacity(genre.len());
    for g in &genre {
        match Uuid::parse_str(g) {
            Ok(gid) if !genre_ids.contains(&gid) => genre_ids.push(gid),
            Ok(_) => {}
            Err(_) => errors.push(FieldError::new("genre", "Invalid genre", g)),
        }
    }
    sort_by_field(&mut errors, &BOOK_FIELDS);

    match author_id {
        Some(author) if errors.is_empty() => Validated::Valid(Book {
            id: id.unwrap_or_else(Uuid::new_v4),
            title: escape(&title),
            author,
            summary: escape(&summary),
            isbn: escape(&isbn),
            genre: genre_ids,
        }),
        _ => Validated::Rejected {
            candidate: BookDraft {
                id,
                title: escape(&title),
                author: escape(&author),
                summary: escape(&summary),
                isbn: escape(&isbn),
                genre: genre.iter().map(|g| escape(g)).collect(),
            },
            errors,
        },
    }
}

// ---------------------------------------------------------------------------
// BookInstance
// ---------------------------------------------------------------------------

const BOOK_INSTANCE_FIELDS: [&str; 4] = ["book", "imprint", "status", "due_back"];

#[derive(Validate)]
struct BookInstanceRules {
    #[validate(length(min = 1, message = "Book must be specified"))]
    book: String,
    #[validate(length(min = 1, message = "Imprint must be specified"))]
    imprint: String,
}

/// Validate a copy submission. A missing `due_back` defaults to today.
pub fn book_instance(
    form: BookInstanceForm,
    id: Option<Uuid>,
) -> Validated<BookInstance, BookInstanceDraft> {
    let book = trimmed(&form.book);
    let imprint = trimmed(&form.imprint);
    let status = trimmed(&form.status);
    let due_back = trimmed(&form.due_back);

    let rules = BookInstanceRules {
        book: book.clone(),
        imprint: imprint.clone(),
    };
    let mut errors = collect(rules.validate(), &[("book", &book), ("imprint", &imprint)]);

    let book_id = Uuid::parse_str(&book).ok();
    if book_id.is_none() && !book.is_empty() {
        errors.push(FieldError::new("book", "Book must be specified", &book));
    }

    let parsed_status = if status.is_empty() {
        Some(BookInstanceStatus::default())
    } else {
        let parsed = status.parse::<BookInstanceStatus>().ok();
        if parsed.is_none() {
            errors.push(FieldError::new("status", "Invalid status", &status));
        }
        parsed
    };

    let parsed_due_back = check_optional_date(&mut errors, "due_back", &due_back, "Invalid date");
    sort_by_field(&mut errors, &BOOK_INSTANCE_FIELDS);

    match (book_id, parsed_status) {
        (Some(book), Some(status)) if errors.is_empty() => Validated::Valid(BookInstance {
            id: id.unwrap_or_else(Uuid::new_v4),
            book,
            imprint: escape(&imprint),
            status,
            due_back: parsed_due_back.unwrap_or_else(|| Utc::now().date_naive()),
        }),
        _ => Validated::Rejected {
            candidate: BookInstanceDraft {
                id,
                book: escape(&book),
                imprint: escape(&imprint),
                status: escape(&status),
                due_back: escape(&due_back),
            },
            errors,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#x27;Jerry&#x27;&lt;&#x2F;b&gt;"
        );
        assert_eq!(escape("Science Fiction"), "Science Fiction");
    }

    #[test]
    fn test_genre_name_too_short() {
        let result = genre(GenreForm { name: Some("  Sf  ".to_string()) }, None);
        match result {
            Validated::Rejected { candidate, errors } => {
                assert_eq!(candidate.name, "Sf");
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "name");
                assert_eq!(errors[0].message, "Genre name must contain at least 3 characters");
            }
            Validated::Valid(_) => panic!("two-character name must be rejected"),
        }
    }

    #[test]
    fn test_genre_name_trimmed_and_escaped() {
        let id = Uuid::new_v4();
        match genre(GenreForm { name: Some("  Sci <Fi>  ".to_string()) }, Some(id)) {
            Validated::Valid(g) => {
                assert_eq!(g.id, id);
                assert_eq!(g.name, "Sci &lt;Fi&gt;");
            }
            Validated::Rejected { errors, .. } => panic!("unexpected errors: {:?}", errors),
        }
    }

    #[test]
    fn test_book_instance_reports_every_field() {
        let form = BookInstanceForm {
            book: Some("   ".to_string()),
            imprint: None,
            status: Some("Lost".to_string()),
            due_back: Some("not-a-date".to_string()),
        };
        match book_instance(form, None) {
            Validated::Rejected { errors, .. } => {
                let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, vec!["book", "imprint", "status", "due_back"]);
                assert_eq!(errors[3].message, "Invalid date");
            }
            Validated::Valid(_) => panic!("expected rejection"),
        }
    }

    #[test]
    fn test_book_instance_defaults() {
        let form = BookInstanceForm {
            book: Some(Uuid::new_v4().to_string()),
            imprint: Some("Penguin".to_string()),
            status: None,
            due_back: Some(String::new()),
        };
        match book_instance(form, None) {
            Validated::Valid(instance) => {
                assert_eq!(instance.status, BookInstanceStatus::Maintenance);
                assert_eq!(instance.due_back, Utc::now().date_naive());
            }
            Validated::Rejected { errors, .. } => panic!("unexpected errors: {:?}", errors),
        }
    }

    #[test]
    fn test_book_instance_unparseable_book_reference() {
        let form = BookInstanceForm {
            book: Some("abc".to_string()),
            imprint: Some("Penguin".to_string()),
            ..Default::default()
        };
        match book_instance(form, None) {
            Validated::Rejected { errors, candidate } => {
                assert_eq!(candidate.book, "abc");
                assert_eq!(errors, vec![FieldError::new("book", "Book must be specified", "abc")]);
            }
            Validated::Valid(_) => panic!("expected rejection"),
        }
    }

    #[test]
    fn test_author_rules() {
        let form = AuthorForm {
            first_name: Some("x".repeat(101)),
            family_name: Some(" ".to_string()),
            date_of_birth: Some("1920-01-02".to_string()),
            date_of_death: Some("yesterday".to_string()),
        };
        match author(form, None) {
            Validated::Rejected { errors, candidate } => {
                let messages: Vec<_> = errors.iter().map(|e| e.message.as_str()).collect();
                assert_eq!(
                    messages,
                    vec![
                        "First name must not exceed 100 characters.",
                        "Family name must be specified.",
                        "Invalid date of death",
                    ]
                );
                assert_eq!(candidate.date_of_birth, "1920-01-02");
            }
            Validated::Valid(_) => panic!("expected rejection"),
        }
    }

    #[test]
    fn test_author_name_length_counts_escaped_text() {
        let form = AuthorForm {
            first_name: Some("&".repeat(100)),
            family_name: Some("O'Brien".to_string()),
            ..Default::default()
        };
        match author(form, None) {
            Validated::Rejected { errors, candidate } => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "first_name");
                assert_eq!(errors[0].message, "First name must not exceed 100 characters.");
                assert_eq!(candidate.family_name, "O&#x27;Brien");
            }
            Validated::Valid(a) => panic!("stored {} characters", a.first_name.chars().count()),
        }

        let form = AuthorForm {
            first_name: Some("&".repeat(20)),
            family_name: Some("x".repeat(100)),
            ..Default::default()
        };
        match author(form, None) {
            Validated::Valid(a) => {
                assert_eq!(a.first_name.chars().count(), 100);
                assert_eq!(a.family_name.chars().count(), 100);
            }
            Validated::Rejected { errors, .. } => panic!("unexpected errors: {:?}", errors),
        }
    }

    #[test]
    fn test_rejected_author_dates_are_escaped() {
        let form = AuthorForm {
            first_name: Some("Ann".to_string()),
            family_name: Some("Leckie".to_string()),
            date_of_birth: Some("<script>".to_string()),
            date_of_death: None,
        };
        match author(form, None) {
            Validated::Rejected { errors, candidate } => {
                assert_eq!(errors[0].field, "date_of_birth");
                assert_eq!(candidate.date_of_birth, "&lt;script&gt;");
                assert_eq!(candidate.date_of_death, "");
            }
            Validated::Valid(_) => panic!("expected rejection"),
        }
    }

    #[test]
    fn test_book_rules() {
        let genre_id = Uuid::new_v4();
        let form = BookForm {
            title: Some("The Name of the Wind".to_string()),
            author: Some(Uuid::new_v4().to_string()),
            summary: Some("A story".to_string()),
            isbn: Some("9780756404741".to_string()),
            genre: vec![genre_id.to_string(), genre_id.to_string()],
        };
        match book(form, None) {
            Validated::Valid(b) => assert_eq!(b.genre, vec![genre_id]),
            Validated::Rejected { errors, .. } => panic!("unexpected errors: {:?}", errors),
        }

        let form = BookForm {
            title: Some("Untitled".to_string()),
            ..Default::default()
        };
        match book(form, None) {
            Validated::Rejected { errors, .. } => {
                let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, vec!["author", "summary", "isbn"]);
            }
            Validated::Valid(_) => panic!("expected rejection"),
        }
    }
}
