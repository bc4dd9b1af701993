mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};
use std::sync::Arc;

use common::{BASE_URL, InMemoryStorage, create_test_state};
use digestlink::routes::router;

fn server(storage: Arc<InMemoryStorage>) -> TestServer {
    TestServer::new(router(create_test_state(storage, vec![]))).unwrap()
}

#[tokio::test]
async fn test_redirect_success() {
    let storage = Arc::new(InMemoryStorage::new());
    storage.seed("https://example.com/target", &format!("{}/abcd", BASE_URL), 600);
    let server = server(storage);

    let response = server.get("/abcd").await;

    response.assert_status(StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.header("location"), "https://example.com/target");
}

#[tokio::test]
async fn test_redirect_not_found() {
    let server = server(Arc::new(InMemoryStorage::new()));

    let response = server.get("/missing").await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_redirect_expired_is_not_found() {
    let storage = Arc::new(InMemoryStorage::new());
    storage.seed("https://example.com/old", &format!("{}/gone", BASE_URL), -5);
    let server = server(storage);

    server.get("/gone").await.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_shorten_then_redirect() {
    let server = server(Arc::new(InMemoryStorage::new()));

    let body: Value = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com/round" }))
        .await
        .json();
    let short_url = body["short_url"].as_str().unwrap();
    let code = short_url.rsplit('/').next().unwrap();

    let response = server.get(&format!("/{}", code)).await;

    response.assert_status(StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.header("location"), "https://example.com/round");
}
