//! Integration tests for the HTTP session client against a mock auth service.

use tempfile::tempdir;
use techstore_core::config::AuthConfig;
use techstore_core::session::{AuthError, HttpSessionClient, SessionClient};
use wiremock::matchers::{bearer_token, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn session_body(user_id: &str, email: &str) -> serde_json::Value {
    serde_json::json!({
        "access_token": "jwt-abc123",
        "token_type": "bearer",
        "expires_in": 3600,
        "refresh_token": "refresh-xyz",
        "user": {
            "id": user_id,
            "email": email,
            "role": "authenticated"
        }
    })
}

fn client_for(server: &MockServer, session_path: std::path::PathBuf) -> HttpSessionClient {
    HttpSessionClient::from_config(&AuthConfig {
        url: Some(server.uri()),
        anon_key: Some("test-anon-key".to_string()),
    })
    .with_session_path(session_path)
}

#[tokio::test]
async fn test_sign_in_success_stores_and_broadcasts_session() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();
    let session_path = dir.path().join("session.json");

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "password"))
        .and(header("apikey", "test-anon-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_body("u1", "a@b.com")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, session_path.clone());
    let mut watcher = client.subscribe();

    let session = client
        .sign_in_with_password("a@b.com", "hunter2")
        .await
        .unwrap();
    assert_eq!(session.principal.id, "u1");
    assert_eq!(session.principal.email.as_deref(), Some("a@b.com"));

    // Watcher saw the new session, the client kept it, and it hit disk.
    assert_eq!(watcher.try_next(), Some(Some(session.clone())));
    assert_eq!(client.current_session().await, Some(session));
    assert!(session_path.exists());
}

#[tokio::test]
async fn test_sign_in_failure_surfaces_provider_message() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": "invalid_grant",
            "error_description": "Invalid login credentials"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, dir.path().join("session.json"));
    let mut watcher = client.subscribe();

    let err = client
        .sign_in_with_password("a@b.com", "wrong")
        .await
        .unwrap_err();
    assert_eq!(
        err,
        AuthError::Service("Invalid login credentials".to_string())
    );

    // Failure changes nothing: no session, no notification.
    assert_eq!(client.current_session().await, None);
    assert_eq!(watcher.try_next(), None);
}

#[tokio::test]
async fn test_sign_up_hits_signup_endpoint() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/auth/v1/signup"))
        .and(header("apikey", "test-anon-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_body("u2", "new@b.com")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, dir.path().join("session.json"));
    let session = client.sign_up("new@b.com", "hunter2").await.unwrap();
    assert_eq!(session.principal.id, "u2");
}

#[tokio::test]
async fn test_sign_out_revokes_clears_and_notifies() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();
    let session_path = dir.path().join("session.json");

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(session_body("u1", "a@b.com")))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/logout"))
        .and(bearer_token("jwt-abc123"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, session_path.clone());
    client
        .sign_in_with_password("a@b.com", "hunter2")
        .await
        .unwrap();
    let mut watcher = client.subscribe();

    client.sign_out().await.unwrap();

    // Absence arrives through the subscription channel and disk is clean.
    assert_eq!(watcher.try_next(), Some(None));
    assert_eq!(client.current_session().await, None);
    assert!(!session_path.exists());
}

#[tokio::test]
async fn test_error_body_without_known_fields_falls_back_to_status() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/auth/v1/signup"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = client_for(&server, dir.path().join("session.json"));
    let err = client.sign_up("a@b.com", "pw").await.unwrap_err();
    let AuthError::Service(message) = err else {
        panic!("expected service error");
    };
    assert!(message.contains("500"), "got: {message}");
}
