//! Catalog controller flows against the in-memory store

use std::sync::Arc;

use serde_json::Value;
use tokio_test::{assert_err, assert_ok};
use uuid::Uuid;

use locallibrary::{
    models::{
        author::{AuthorDeleteForm, AuthorForm},
        book::{BookDeleteForm, BookForm},
        book_instance::{BookInstanceDeleteForm, BookInstanceForm},
        genre::{GenreDeleteForm, GenreForm},
    },
    repository::{MemoryStore, Repository},
    services::Services,
    views::Page,
    AppError,
};

fn services() -> Services {
    let repository: Repository = Arc::new(MemoryStore::new());
    Services::new(repository)
}

fn view(page: &Page, name: &str) -> Value {
    let view = page.view().expect("expected a rendered view");
    assert_eq!(view.name, name);
    view.data.clone()
}

/// Id at the end of a redirect to a detail page
fn redirected_id(page: &Page, prefix: &str) -> Uuid {
    let target = page.redirect_target().expect("expected a redirect");
    let id = target
        .strip_prefix(prefix)
        .unwrap_or_else(|| panic!("unexpected redirect target {}", target));
    Uuid::parse_str(id).unwrap()
}

fn genre_form(name: &str) -> GenreForm {
    GenreForm {
        name: Some(name.to_string()),
    }
}

fn author_form(first: &str, family: &str, born: &str, died: &str) -> AuthorForm {
    AuthorForm {
        first_name: Some(first.to_string()),
        family_name: Some(family.to_string()),
        date_of_birth: Some(born.to_string()),
        date_of_death: Some(died.to_string()),
    }
}

fn book_form(title: &str, author: Uuid, genres: &[Uuid]) -> BookForm {
    BookForm {
        title: Some(title.to_string()),
        author: Some(author.to_string()),
        summary: Some("A summary".to_string()),
        isbn: Some("9781473211896".to_string()),
        genre: genres.iter().map(Uuid::to_string).collect(),
    }
}

fn instance_form(book: Uuid, status: &str, due_back: &str) -> BookInstanceForm {
    BookInstanceForm {
        book: Some(book.to_string()),
        imprint: Some("Gollancz, 2011.".to_string()),
        status: Some(status.to_string()),
        due_back: Some(due_back.to_string()),
    }
}

async fn create_genre(services: &Services, name: &str) -> Uuid {
    let page = services.genres.create(genre_form(name)).await.unwrap();
    redirected_id(&page, "/catalog/genre/")
}

async fn create_author(services: &Services, first: &str, family: &str) -> Uuid {
    let page = services
        .authors
        .create(author_form(first, family, "", ""))
        .await
        .unwrap();
    redirected_id(&page, "/catalog/author/")
}

async fn create_book(services: &Services, title: &str, author: Uuid, genres: &[Uuid]) -> Uuid {
    let page = services
        .books
        .create(book_form(title, author, genres))
        .await
        .unwrap();
    redirected_id(&page, "/catalog/book/")
}

#[tokio::test]
async fn test_author_detail_shows_lifespan_and_books() {
    let services = services();
    let page = services
        .authors
        .create(author_form("Isaac", "Asimov", "1920-01-02", "1992-04-06"))
        .await
        .unwrap();
    let author = redirected_id(&page, "/catalog/author/");
    create_book(&services, "The Gods Themselves", author, &[]).await;

    let page = services.authors.detail(author).await.unwrap();
    let data = view(&page, "author_detail");
    assert_eq!(data["author"]["name"], "Asimov, Isaac");
    assert_eq!(data["author"]["lifespan"], "Jan 2, 1920 - Apr 6, 1992");
    assert_eq!(data["author"]["date_of_birth_yyyy_mm_dd"], "1920-01-02");
    assert_eq!(data["author_books"].as_array().unwrap().len(), 1);
    assert_eq!(data["author_books"][0]["title"], "The Gods Themselves");
}

#[tokio::test]
async fn test_author_list_sorted_by_family_name() {
    let services = services();
    create_author(&services, "Patrick", "Rothfuss").await;
    create_author(&services, "Ben", "Bova").await;
    create_author(&services, "Isaac", "Asimov").await;

    let page = services.authors.list().await.unwrap();
    let data = view(&page, "author_list");
    let names: Vec<&str> = data["author_list"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["family_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Asimov", "Bova", "Rothfuss"]);
}

#[tokio::test]
async fn test_author_rejected_without_names() {
    let services = services();
    let page = services
        .authors
        .create(author_form("  ", "", "not a date", ""))
        .await
        .unwrap();
    let data = view(&page, "author_form");
    let fields: Vec<&str> = data["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["first_name", "family_name", "date_of_birth"]);

    let count = services.catalog.index().await.unwrap();
    assert_eq!(view(&count, "index")["author_count"], 0);
}

#[tokio::test]
async fn test_author_name_bound_applies_after_escaping() {
    let services = services();
    let page = services
        .authors
        .create(author_form(&"&".repeat(100), "Lee", "", ""))
        .await
        .unwrap();
    let data = view(&page, "author_form");
    assert_eq!(data["errors"][0]["field"], "first_name");
    assert_eq!(
        data["errors"][0]["message"],
        "First name must not exceed 100 characters."
    );

    let page = services.catalog.index().await.unwrap();
    assert_eq!(view(&page, "index")["author_count"], 0);
}

#[tokio::test]
async fn test_genre_name_too_short_is_rejected() {
    let services = services();
    let page = services.genres.create(genre_form("ab")).await.unwrap();
    let data = view(&page, "genre_form");
    assert_eq!(data["genre"]["name"], "ab");
    assert_eq!(
        data["errors"][0]["message"],
        "Genre name must contain at least 3 characters"
    );
}

#[tokio::test]
async fn test_genre_create_is_idempotent_by_name() {
    let services = services();
    let first = create_genre(&services, "Fantasy").await;
    let second = create_genre(&services, "  Fantasy ").await;
    assert_eq!(first, second);

    let page = services.genres.list().await.unwrap();
    let data = view(&page, "genre_list");
    assert_eq!(data["genre_list"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_genre_delete_blocked_while_books_reference_it() {
    let services = services();
    let genre = create_genre(&services, "Science Fiction").await;
    let author = create_author(&services, "Isaac", "Asimov").await;
    let book = create_book(&services, "Foundation", author, &[genre]).await;

    let page = services
        .genres
        .delete(genre, GenreDeleteForm { genreid: Some(genre.to_string()) })
        .await
        .unwrap();
    let data = view(&page, "genre_delete");
    assert_eq!(data["all_books_by_genre"][0]["title"], "Foundation");
    assert_ok!(services.genres.detail(genre).await);

    services
        .books
        .delete(book, BookDeleteForm { bookid: None })
        .await
        .unwrap();
    let page = services
        .genres
        .delete(genre, GenreDeleteForm { genreid: None })
        .await
        .unwrap();
    assert_eq!(page.redirect_target(), Some("/catalog/genres"));
    assert!(matches!(
        services.genres.detail(genre).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_genre_update_of_missing_record_is_not_found() {
    let services = services();
    let result = services
        .genres
        .update(Uuid::new_v4(), genre_form("Poetry"))
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_book_form_marks_selected_genres() {
    let services = services();
    let fantasy = create_genre(&services, "Fantasy").await;
    create_genre(&services, "Poetry").await;
    let author = create_author(&services, "Patrick", "Rothfuss").await;
    let book = create_book(&services, "The Name of the Wind", author, &[fantasy]).await;

    let page = services.books.update_form(book).await.unwrap();
    let data = view(&page, "book_form");
    assert_eq!(data["selected_author"], author.to_string());
    let genres = data["genres"].as_array().unwrap();
    assert_eq!(genres.len(), 2);
    for choice in genres {
        assert_eq!(choice["checked"], choice["name"] == "Fantasy");
    }
}

#[tokio::test]
async fn test_book_rejected_keeps_candidate_and_lists() {
    let services = services();
    create_author(&services, "Ben", "Bova").await;
    let form = BookForm {
        title: Some("<b>Mars</b>".to_string()),
        author: Some(String::new()),
        summary: None,
        isbn: None,
        genre: vec!["not-a-uuid".to_string()],
    };

    let page = services.books.create(form).await.unwrap();
    let data = view(&page, "book_form");
    assert_eq!(data["book"]["title"], "&lt;b&gt;Mars&lt;&#x2F;b&gt;");
    assert_eq!(data["authors"].as_array().unwrap().len(), 1);
    let messages: Vec<&str> = data["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["message"].as_str().unwrap())
        .collect();
    assert!(messages.contains(&"Author must not be empty."));
    assert!(messages.contains(&"Summary must not be empty."));
    assert!(messages.contains(&"ISBN must not be empty"));
    assert!(messages.contains(&"Invalid genre"));
}

#[tokio::test]
async fn test_book_detail_lists_instances() {
    let services = services();
    let author = create_author(&services, "Isaac", "Asimov").await;
    let book = create_book(&services, "Foundation", author, &[]).await;
    services
        .book_instances
        .create(instance_form(book, "Available", ""))
        .await
        .unwrap();

    let page = services.books.detail(book).await.unwrap();
    let data = view(&page, "book_detail");
    assert_eq!(data["title"], "Foundation");
    assert_eq!(data["book"]["author"]["name"], "Asimov, Isaac");
    assert_eq!(data["book_instances"][0]["status"], "Available");
}

#[tokio::test]
async fn test_book_instance_due_back_round_trip() {
    let services = services();
    let author = create_author(&services, "Isaac", "Asimov").await;
    let book = create_book(&services, "Foundation", author, &[]).await;

    let page = services
        .book_instances
        .create(instance_form(book, "Loaned", "2024-03-15"))
        .await
        .unwrap();
    let instance = redirected_id(&page, "/catalog/bookinstance/");

    let page = services.book_instances.detail(instance).await.unwrap();
    let data = view(&page, "bookinstance_detail");
    assert_eq!(data["bookinstance"]["due_back_formatted"], "Mar 15, 2024");
    assert_eq!(data["bookinstance"]["due_back_yyyy_mm_dd"], "2024-03-15");
    assert_eq!(data["bookinstance"]["book"]["title"], "Foundation");

    let page = services.book_instances.update_form(instance).await.unwrap();
    let data = view(&page, "bookinstance_form");
    assert_eq!(data["bookinstance"]["due_back"], "2024-03-15");
    assert_eq!(data["selected_book"], book.to_string());
}

#[tokio::test]
async fn test_book_instance_unknown_status_is_rejected() {
    let services = services();
    let author = create_author(&services, "Isaac", "Asimov").await;
    let book = create_book(&services, "Foundation", author, &[]).await;

    let page = services
        .book_instances
        .create(instance_form(book, "Lost", "2024-03-15"))
        .await
        .unwrap();
    let data = view(&page, "bookinstance_form");
    assert_eq!(data["errors"][0]["message"], "Invalid status");
    assert_eq!(data["status_list"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_book_instance_missing_is_not_found() {
    let services = services();
    let detail = services.book_instances.detail(Uuid::new_v4()).await;
    assert!(matches!(detail, Err(AppError::NotFound(ref m)) if m == "Book copy not found"));

    let form = services.book_instances.update_form(Uuid::new_v4()).await;
    assert!(matches!(form, Err(AppError::NotFound(ref m)) if m == "Book Instance not found"));
}

#[tokio::test]
async fn test_book_instance_update_and_delete() {
    let services = services();
    let author = create_author(&services, "Isaac", "Asimov").await;
    let book = create_book(&services, "Foundation", author, &[]).await;
    let page = services
        .book_instances
        .create(instance_form(book, "Maintenance", "2024-03-15"))
        .await
        .unwrap();
    let instance = redirected_id(&page, "/catalog/bookinstance/");

    let page = services
        .book_instances
        .update(instance, instance_form(book, "Available", "2024-04-01"))
        .await
        .unwrap();
    assert_eq!(
        page.redirect_target(),
        Some(format!("/catalog/bookinstance/{}", instance).as_str())
    );
    let page = services.catalog.index().await.unwrap();
    assert_eq!(view(&page, "index")["book_instance_available_count"], 1);

    let page = services
        .book_instances
        .delete(
            instance,
            BookInstanceDeleteForm {
                bookinstanceid: Some(instance.to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(page.redirect_target(), Some("/catalog/bookinstances"));
    assert_err!(services.book_instances.detail(instance).await);
}

#[tokio::test]
async fn test_delete_of_absent_record_redirects() {
    let services = services();
    let page = services
        .authors
        .delete(Uuid::new_v4(), AuthorDeleteForm { authorid: None })
        .await
        .unwrap();
    assert_eq!(page.redirect_target(), Some("/catalog/authors"));

    let page = services.genres.delete_form(Uuid::new_v4()).await.unwrap();
    assert_eq!(page.redirect_target(), Some("/catalog/genres"));
}

#[tokio::test]
async fn test_index_counts() {
    let services = services();
    let genre = create_genre(&services, "Fantasy").await;
    let author = create_author(&services, "Patrick", "Rothfuss").await;
    let book = create_book(&services, "The Name of the Wind", author, &[genre]).await;
    for status in ["Available", "Available", "Loaned"] {
        services
            .book_instances
            .create(instance_form(book, status, ""))
            .await
            .unwrap();
    }

    let page = services.catalog.index().await.unwrap();
    let data = view(&page, "index");
    assert_eq!(data["title"], "Local Library Home");
    assert_eq!(data["book_count"], 1);
    assert_eq!(data["book_instance_count"], 3);
    assert_eq!(data["book_instance_available_count"], 2);
    assert_eq!(data["author_count"], 1);
    assert_eq!(data["genre_count"], 1);
}
