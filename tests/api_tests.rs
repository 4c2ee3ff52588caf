//! HTTP routing tests over the in-memory store

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use locallibrary::{api, config::AppConfig, repository::MemoryStore, AppState};

fn app() -> Router {
    let state = AppState::new(AppConfig::default(), Arc::new(MemoryStore::new()));
    api::create_router(state)
}

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

async fn get(app: &Router, uri: &str) -> Response {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn post_form(app: &Router, uri: &str, body: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn post_json(app: &Router, uri: &str, body: Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn location(response: &Response) -> String {
    response.headers()[header::LOCATION]
        .to_str()
        .unwrap()
        .to_string()
}

fn id_from(location: &str) -> Uuid {
    Uuid::parse_str(location.rsplit('/').next().unwrap()).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let app = app();
    let response = get(&app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");

    let response = get(&app, "/ready").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_root_redirects_to_catalog() {
    let app = app();
    let response = get(&app, "/").await;
    assert!(response.status().is_redirection());
    assert_eq!(location(&response), "/catalog");
}

#[tokio::test]
async fn test_catalog_index_renders() {
    let app = app();
    let response = get(&app, "/catalog").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["view"], "index");
    assert_eq!(body["book_count"], 0);
}

#[tokio::test]
async fn test_create_genre_from_form_redirects() {
    let app = app();
    let response = post_form(&app, "/catalog/genre/create", "name=Fantasy").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let target = location(&response);
    assert!(target.starts_with("/catalog/genre/"));

    let body = json_body(get(&app, &target).await).await;
    assert_eq!(body["view"], "genre_detail");
    assert_eq!(body["genre"]["name"], "Fantasy");
    assert_eq!(body["genre"]["url"], target);
}

#[tokio::test]
async fn test_invalid_genre_renders_form_with_errors() {
    let app = app();
    let response = post_form(&app, "/catalog/genre/create", "name=ab").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["view"], "genre_form");
    assert_eq!(body["errors"][0]["field"], "name");
}

#[tokio::test]
async fn test_book_with_repeated_genre_keys() {
    let app = app();
    let fantasy = id_from(&location(
        &post_form(&app, "/catalog/genre/create", "name=Fantasy").await,
    ));
    let poetry = id_from(&location(
        &post_form(&app, "/catalog/genre/create", "name=Poetry").await,
    ));
    let author = id_from(&location(
        &post_form(
            &app,
            "/catalog/author/create",
            "first_name=Patrick&family_name=Rothfuss&date_of_birth=1973-06-06",
        )
        .await,
    ));

    let body = format!(
        "title=The+Name+of+the+Wind&author={}&summary=Kvothe&isbn=9780756404741&genre={}&genre={}",
        author, fantasy, poetry
    );
    let response = post_form(&app, "/catalog/book/create", &body).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let book_url = location(&response);

    let body = json_body(get(&app, &book_url).await).await;
    assert_eq!(body["view"], "book_detail");
    assert_eq!(body["book"]["genre"].as_array().unwrap().len(), 2);
    assert_eq!(body["book"]["author"]["name"], "Rothfuss, Patrick");
}

#[tokio::test]
async fn test_create_from_json_body() {
    let app = app();
    let response = post_json(
        &app,
        "/catalog/author/create",
        json!({ "first_name": "Isaac", "family_name": "Asimov" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let author = id_from(&location(&response));

    let response = post_json(
        &app,
        "/catalog/book/create",
        json!({
            "title": "Foundation",
            "author": author,
            "summary": "Psychohistory",
            "isbn": "9780553293357",
            "genre": []
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let body = json_body(get(&app, "/catalog/books").await).await;
    assert_eq!(body["view"], "book_list");
    assert_eq!(body["book_list"][0]["title"], "Foundation");
}

#[tokio::test]
async fn test_missing_record_renders_error_page() {
    let app = app();
    let response = get(&app, &format!("/catalog/genre/{}", Uuid::new_v4())).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["view"], "error");
    assert_eq!(body["status"], 404);
    assert_eq!(body["message"], "Genre not found");
}

#[tokio::test]
async fn test_malformed_id_is_rejected() {
    let app = app();
    let response = get(&app, "/catalog/book/not-a-uuid").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_uses_body_id() {
    let app = app();
    let response = post_form(&app, "/catalog/genre/create", "name=Horror").await;
    let genre = id_from(&location(&response));

    let response = post_form(
        &app,
        &format!("/catalog/genre/{}/delete", Uuid::new_v4()),
        &format!("genreid={}", genre),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/catalog/genres");

    let response = get(&app, &format!("/catalog/genre/{}", genre)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_without_body_uses_path_id() {
    let app = app();
    let response = post_form(&app, "/catalog/genre/create", "name=Western").await;
    let genre_url = location(&response);

    let request = Request::builder()
        .method(Method::POST)
        .uri(format!("{}/delete", genre_url))
        .body(Body::empty())
        .unwrap();
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/catalog/genres");

    let response = get(&app, &genre_url).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_body_without_content_type_is_rejected() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/catalog/genre/create")
        .body(Body::from("name=Western"))
        .unwrap();
    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_book_instance_via_form() {
    let app = app();
    let author = id_from(&location(
        &post_form(&app, "/catalog/author/create", "first_name=Ben&family_name=Bova").await,
    ));
    let book = id_from(&location(
        &post_form(
            &app,
            "/catalog/book/create",
            &format!("title=Mars&author={}&summary=Red&isbn=0553298828", author),
        )
        .await,
    ));
    let response = post_form(
        &app,
        "/catalog/bookinstance/create",
        &format!("book={}&imprint=Bantam&status=Loaned&due_back=2024-03-15", book),
    )
    .await;
    let instance_url = location(&response);

    let response = post_form(
        &app,
        &format!("{}/update", instance_url),
        &format!("book={}&imprint=Bantam&status=Available&due_back=2024-05-01", book),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), instance_url);

    let body = json_body(get(&app, &instance_url).await).await;
    assert_eq!(body["view"], "bookinstance_detail");
    assert_eq!(body["bookinstance"]["status"], "Available");
    assert_eq!(body["bookinstance"]["due_back_formatted"], "May 1, 2024");
}
