mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::{Duration, Utc};
use serde_json::{Value, json};
use std::sync::Arc;

use common::{BASE_URL, InMemoryStorage, create_test_state};
use digestlink::domain::entities::MAX_TTL_SECONDS;
use digestlink::routes::router;
use url::Url;

fn server(storage: Arc<InMemoryStorage>) -> TestServer {
    TestServer::new(router(create_test_state(storage, vec![]))).unwrap()
}

#[tokio::test]
async fn test_shorten_success() {
    let storage = Arc::new(InMemoryStorage::new());
    let server = server(storage.clone());

    let response = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com/page" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["url"], "https://example.com/page");
    assert!(
        body["short_url"]
            .as_str()
            .unwrap()
            .starts_with(&format!("{}/", BASE_URL))
    );
    assert!(body["ttl_in_seconds"].as_i64().unwrap() > 3500);
    assert_eq!(storage.len(), 1);
}

#[tokio::test]
async fn test_shorten_is_idempotent() {
    let storage = Arc::new(InMemoryStorage::new());
    let server = server(storage.clone());

    let first: Value = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com/page" }))
        .await
        .json();
    let second: Value = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com/page" }))
        .await
        .json();

    assert_eq!(first["short_url"], second["short_url"]);
    assert_eq!(storage.len(), 1);
}

#[tokio::test]
async fn test_shorten_adds_https_scheme() {
    let server = server(Arc::new(InMemoryStorage::new()));

    let response = server
        .post("/shorten")
        .json(&json!({ "url": "example.com/page" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["url"], "https://example.com/page");
}

#[tokio::test]
async fn test_shorten_adds_https_scheme_to_host_with_port() {
    let server = server(Arc::new(InMemoryStorage::new()));

    let response = server
        .post("/shorten")
        .json(&json!({ "url": "example.com:8080/x" }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["url"], "https://example.com:8080/x");
}

#[tokio::test]
async fn test_shorten_huge_ttl_is_clamped() {
    let storage = Arc::new(InMemoryStorage::new());
    let state = create_test_state(storage.clone(), vec![]);
    let original = Url::parse("https://example.com/a").unwrap();

    let record = state
        .shortener
        .shorten(&original, i64::MAX / 2)
        .await
        .unwrap();
    assert!(record.ttl_seconds >= MAX_TTL_SECONDS - 1 && record.ttl_seconds <= MAX_TTL_SECONDS);

    let custom = state
        .shortener
        .shorten_custom(&original, "forever", i64::MAX)
        .await
        .unwrap();
    assert!(custom.ttl_seconds >= MAX_TTL_SECONDS - 1 && custom.ttl_seconds <= MAX_TTL_SECONDS);
    assert_eq!(storage.len(), 2);
}

#[tokio::test]
async fn test_shorten_distinct_urls_get_distinct_codes() {
    let server = server(Arc::new(InMemoryStorage::new()));

    let a: Value = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com/a" }))
        .await
        .json();
    let b: Value = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com/b" }))
        .await
        .json();

    assert_ne!(a["short_url"], b["short_url"]);
}

#[tokio::test]
async fn test_shorten_with_expiry() {
    let server = server(Arc::new(InMemoryStorage::new()));
    let expires = Utc::now() + Duration::seconds(600);

    let response = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com/page", "expires": expires }))
        .await;

    response.assert_status_ok();
    let ttl = response.json::<Value>()["ttl_in_seconds"].as_i64().unwrap();
    assert!(ttl > 590 && ttl <= 600);
}

#[tokio::test]
async fn test_shorten_rejects_past_expiry() {
    let server = server(Arc::new(InMemoryStorage::new()));
    let expires = Utc::now() - Duration::seconds(60);

    let response = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com/page", "expires": expires }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_shorten_rejects_unsupported_scheme() {
    let server = server(Arc::new(InMemoryStorage::new()));

    let response = server
        .post("/shorten")
        .json(&json!({ "url": "ftp://example.com/file" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_shorten_storage_failure_is_500() {
    let storage = Arc::new(InMemoryStorage::new());
    storage.set_unavailable(true);
    let server = server(storage);

    let response = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com/page" }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>()["error"]["code"], "storage_error");
}

#[tokio::test]
async fn test_shorten_custom_success() {
    let server = server(Arc::new(InMemoryStorage::new()));

    let response = server
        .post("/shorten/custom")
        .json(&json!({ "url": "https://example.com/page", "custom_code": "promo2030" }))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["short_url"],
        format!("{}/promo2030", BASE_URL)
    );
}

#[tokio::test]
async fn test_shorten_custom_conflict() {
    let storage = Arc::new(InMemoryStorage::new());
    storage.seed(
        "https://example.com/first",
        &format!("{}/promo2030", BASE_URL),
        3600,
    );
    let server = server(storage);

    let response = server
        .post("/shorten/custom")
        .json(&json!({ "url": "https://example.com/second", "custom_code": "promo2030" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(response.json::<Value>()["error"]["code"], "not_available");
}

#[tokio::test]
async fn test_shorten_custom_same_url_returns_existing() {
    let storage = Arc::new(InMemoryStorage::new());
    storage.seed(
        "https://example.com/first",
        &format!("{}/promo2030", BASE_URL),
        100,
    );
    let server = server(storage);

    let response = server
        .post("/shorten/custom")
        .json(&json!({ "url": "https://example.com/first", "custom_code": "promo2030" }))
        .await;

    response.assert_status_ok();
    assert!(response.json::<Value>()["ttl_in_seconds"].as_i64().unwrap() <= 100);
}

#[tokio::test]
async fn test_shorten_custom_invalid_alias() {
    let server = server(Arc::new(InMemoryStorage::new()));

    for alias in ["abc", "has-dash", "this-alias-is-far-too-long"] {
        let response = server
            .post("/shorten/custom")
            .json(&json!({ "url": "https://example.com/page", "custom_code": alias }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["error"]["code"], "invalid_alias");
    }
}
