#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use onramp_api::types::CreateUserRequest;
use onramp_api::{ApiClient, Error, ErrorKind, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let client = ApiClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

fn user_body(id: i64, email: &str, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "email": email,
        "name": name,
        "created_at": "2024-06-15T10:30:00Z"
    })
}

// ── Health tests ────────────────────────────────────────────────────

#[tokio::test]
async fn test_health_ok() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": "ok", "version": "0.1.0"})),
        )
        .mount(&server)
        .await;

    let health = client.health().await.unwrap();
    assert!(health.is_ok());
    assert_eq!(health.version, "0.1.0");
}

// ── User creation tests ─────────────────────────────────────────────

#[tokio::test]
async fn test_create_user_success() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/users"))
        .and(body_json(json!({"email": "a@b.com", "name": "A"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(user_body(1, "a@b.com", "A")))
        .mount(&server)
        .await;

    let user = client
        .create_user(&CreateUserRequest {
            email: "a@b.com".into(),
            name: "A".into(),
        })
        .await
        .unwrap();

    assert_eq!(user.id, 1);
    assert_eq!(user.email, "a@b.com");
    assert_eq!(user.name, "A");
}

#[tokio::test]
async fn test_create_user_conflict() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/users"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({"detail": "Email already exists"})),
        )
        .mount(&server)
        .await;

    let result = client
        .create_user(&CreateUserRequest {
            email: "dup@b.com".into(),
            name: "A".into(),
        })
        .await;

    match result {
        Err(Error::Conflict { ref detail }) => {
            assert_eq!(detail, "Email already exists");
        }
        other => panic!("expected Conflict error, got: {other:?}"),
    }
}

// ── User fetch tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_get_user_success() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/users/42"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(user_body(42, "alice@example.com", "Alice")),
        )
        .mount(&server)
        .await;

    let user = client.get_user(42).await.unwrap();
    assert_eq!(user.id, 42);
    assert_eq!(user.name, "Alice");
}

#[tokio::test]
async fn test_get_user_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/users/999"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "User not found"})))
        .mount(&server)
        .await;

    let err = client.get_user(999).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    match err {
        Error::NotFound { detail } => assert_eq!(detail, "User not found"),
        other => panic!("expected NotFound error, got: {other:?}"),
    }
}

// ── Error shape tests ───────────────────────────────────────────────

#[tokio::test]
async fn test_server_error_without_envelope() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/users/1"))
        .respond_with(ResponseTemplate::new(502).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let result = client.get_user(1).await;

    match result {
        Err(Error::Api { status, ref detail }) => {
            assert_eq!(status, 502);
            assert_eq!(detail, "upstream exploded");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_unauthorized() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/users/1"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Not authenticated"})))
        .mount(&server)
        .await;

    let result = client.get_user(1).await;
    assert!(matches!(result, Err(Error::Unauthorized { .. })));
}

#[tokio::test]
async fn test_malformed_success_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/users/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let result = client.get_user(1).await;

    match result {
        Err(Error::Deserialization { ref message, .. }) => {
            assert!(message.contains("body preview"), "got: {message}");
        }
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}

// ── Auth header tests ───────────────────────────────────────────────

#[tokio::test]
async fn test_bearer_token_is_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/health"))
        .and(header("authorization", "Bearer stub-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .mount(&server)
        .await;

    let token: secrecy::SecretString = "stub-token".to_string().into();
    let client =
        ApiClient::with_bearer_token(&server.uri(), &token, &TransportConfig::default()).unwrap();

    let health = client.health().await.unwrap();
    assert!(health.is_ok());
}
