use std::collections::HashSet;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use marquee_catalog::{CatalogService, SeededRandom};
use marquee_core::NewMovie;
use marquee_gateway::{App, AppState};
use marquee_storage::InMemoryStore;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app_with(movies: Vec<NewMovie>) -> Router {
    let service = CatalogService::new(InMemoryStore::seeded(movies), SeededRandom::new(42));
    App::router(AppState::new(Arc::new(service)))
}

fn app() -> Router {
    app_with(vec![
        NewMovie::new("Dune", "Sci-Fi"),
        NewMovie::new("Dune Part Two", "Sci-Fi"),
        NewMovie::new("Amelie", "Drama"),
    ])
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("response expected");
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body should be readable");

    if body.is_empty() {
        return (status, Value::Null);
    }

    let json = serde_json::from_slice::<Value>(&body).expect("body should be valid JSON");
    (status, json)
}

async fn send_empty(app: &Router, method: Method, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request should build");
    send(app, request).await
}

async fn send_json(app: &Router, method: Method, uri: &str, payload: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request should build");
    send(app, request).await
}

fn titles(body: &Value) -> Vec<&str> {
    body.as_array()
        .expect("array body")
        .iter()
        .map(|movie| movie["title"].as_str().expect("title"))
        .collect()
}

#[tokio::test]
async fn health_is_ok() {
    let (status, body) = send_empty(&app(), Method::GET, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn titles_and_genres_are_sorted() {
    let app = app();

    let (status, body) = send_empty(&app, Method::GET, "/api/movies/titles").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["Amelie", "Dune", "Dune Part Two"]));

    let (status, body) = send_empty(&app, Method::GET, "/api/movies/genres").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["Drama", "Sci-Fi", "Sci-Fi"]));
}

#[tokio::test]
async fn searches() {
    let app = app();

    let (status, body) = send_empty(&app, Method::GET, "/api/movies/search/keyword/Dune").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body), vec!["Dune", "Dune Part Two"]);

    let (_, body) = send_empty(&app, Method::GET, "/api/movies/search/title/dune").await;
    assert_eq!(titles(&body), vec!["Dune"]);

    let (_, body) = send_empty(&app, Method::GET, "/api/movies/search/genre/Drama").await;
    assert_eq!(titles(&body), vec!["Amelie"]);

    let (_, body) = send_empty(
        &app,
        Method::GET,
        "/api/movies/search/title/Dune%20Part%20Two",
    )
    .await;
    assert_eq!(titles(&body), vec!["Dune Part Two"]);
}

#[tokio::test]
async fn random_movie_routes() {
    let app = app();

    let (status, body) = send_empty(&app, Method::GET, "/api/movies/random").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["id"].is_i64());

    let (status, body) = send_empty(&app, Method::GET, "/api/movies/random/genre/Sci").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["genre"], "Sci-Fi");

    let (status, body) = send_empty(&app, Method::GET, "/api/movies/random/genre/Western").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn random_list_returns_distinct_movies() {
    let app = app();

    let (status, body) = send_empty(&app, Method::GET, "/api/movies/random/list/3").await;
    assert_eq!(status, StatusCode::OK);
    let ids: HashSet<i64> = body
        .as_array()
        .expect("array body")
        .iter()
        .map(|movie| movie["id"].as_i64().expect("id"))
        .collect();
    assert_eq!(ids, HashSet::from([1, 2, 3]));

    let (status, body) = send_empty(&app, Method::GET, "/api/movies/random/list/0").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn random_list_rejects_bad_counts() {
    let app = app();

    for uri in [
        "/api/movies/random/list/4",
        "/api/movies/random/list/-1",
        "/api/movies/random/list/many",
    ] {
        let (status, body) = send_empty(&app, Method::GET, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(body["error"].is_string(), "{uri}");
    }
}

#[tokio::test]
async fn random_on_empty_catalog_is_not_found() {
    let app = app_with(Vec::new());

    let (status, _) = send_empty(&app, Method::GET, "/api/movies/random").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send_empty(&app, Method::GET, "/api/movies/titles").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn crud_lifecycle() {
    let app = app_with(Vec::new());

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/movies")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "title": "Heat", "genre": "Crime", "year": 1995 }).to_string(),
        ))
        .expect("request should build");
    let response = app.clone().oneshot(request).await.expect("response expected");
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.headers()[header::LOCATION], "/api/movies/1");

    let (status, body) = send_empty(&app, Method::GET, "/api/movies/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Heat");
    assert_eq!(body["year"], 1995);

    let (status, _) = send_json(
        &app,
        Method::PUT,
        "/api/movies/1",
        json!({ "id": 1, "title": "Heat", "genre": "Crime", "director": "Michael Mann" }),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send_empty(&app, Method::GET, "/api/movies").await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["director"], "Michael Mann");
    assert_eq!(body[0]["year"], Value::Null);

    let (status, _) = send_empty(&app, Method::DELETE, "/api/movies/1").await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send_empty(&app, Method::GET, "/api/movies/1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send_empty(&app, Method::DELETE, "/api/movies/1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_rejects_mismatched_or_missing_target() {
    let app = app();

    let (status, _) = send_json(
        &app,
        Method::PUT,
        "/api/movies/1",
        json!({ "id": 2, "title": "Dune", "genre": "Sci-Fi" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send_json(
        &app,
        Method::PUT,
        "/api/movies/99",
        json!({ "id": 99, "title": "Ghost", "genre": "Drama" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn blank_fields_are_rejected() {
    let app = app();

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/movies",
        json!({ "title": "  ", "genre": "Drama" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation failed: title must not be blank");
}

async fn send_raw(
    app: &Router,
    method: Method,
    uri: &str,
    body: &'static str,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .expect("request should build");
    send(app, request).await
}

#[tokio::test]
async fn malformed_bodies_are_bad_request() {
    let app = app();

    for (method, uri, body) in [
        (Method::POST, "/api/movies", r#"{"genre":"Drama"}"#),
        (Method::POST, "/api/movies", "{not json"),
        (Method::PUT, "/api/movies/1", r#"{"title":"Dune","genre":"Sci-Fi"}"#),
        (Method::PUT, "/api/movies/1", "{not json"),
    ] {
        let (status, response) = send_raw(&app, method, uri, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri} {body}");
        assert!(response["error"].is_string(), "{uri} {body}");
    }

    let (_, body) = send_empty(&app, Method::GET, "/api/movies").await;
    assert_eq!(body.as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn invalid_id_is_bad_request() {
    let (status, body) = send_empty(&app(), Method::GET, "/api/movies/abc").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}
