use crate::api_client::helpers::{CREATOR_ID, client_for};

use client_core::error::api_client::ApiClientError;
use models::Credentials;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Log in / log out
// ============================================================================

/// **VALUE**: Verifies a successful login stores the credential cookie and sends it back.
///
/// **WHY THIS MATTERS**: The `jwt` cookie is the only real credential. If the jar does
/// not keep it, every write after login fails with 401.
///
/// **BUG THIS CATCHES**: Would catch the client being built without a cookie provider.
#[tokio::test]
async fn given_valid_credentials_when_authenticating_then_cookie_is_sent_on_next_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/users/auth"))
        .and(body_json(json!({"username": "alice", "password": "hunter22"})))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "jwt=token-abc; Path=/; HttpOnly")
                .set_body_json(json!({"username": "alice"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/threads/7"))
        .and(header("cookie", "jwt=token-abc"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);

    let user = client
        .authenticate(&Credentials::new("alice", "hunter22"))
        .await
        .unwrap();
    assert_eq!(user.username, "alice");
    assert_eq!(client.credential_cookie().as_deref(), Some("jwt=token-abc"));

    client.delete_thread(7).await.unwrap();
}

/// **VALUE**: Verifies a 401 from the login endpoint means wrong credentials.
///
/// **BUG THIS CATCHES**: Would catch it being reported as a generic "not logged in".
#[tokio::test]
async fn given_wrong_password_when_authenticating_then_invalid_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/users/auth"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"error": "Invalid credentials"})),
        )
        .mount(&server)
        .await;

    let result = client_for(&server)
        .authenticate(&Credentials::new("alice", "wrongpass"))
        .await;

    let error = result.unwrap_err();
    assert!(matches!(error, ApiClientError::InvalidCredentials { .. }));
    assert_eq!(error.user_message(), "The username or password is incorrect");
}

/// **VALUE**: Verifies invalid input never reaches the server.
#[tokio::test]
async fn given_short_password_when_authenticating_then_no_request_is_made() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = client_for(&server)
        .authenticate(&Credentials::new("alice", "short"))
        .await;

    assert!(matches!(result, Err(ApiClientError::Validation(_))));
}

/// **VALUE**: Verifies a credential exported from one client works in another.
///
/// **WHY THIS MATTERS**: The CLI runs as a new process per command and restores the
/// cookie from local storage.
///
/// **BUG THIS CATCHES**: Would catch the restored cookie being scoped to the wrong URL.
#[tokio::test]
async fn given_exported_cookie_when_restored_in_new_client_then_sent_with_requests() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/comments/3"))
        .and(header("cookie", "jwt=restored"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.restore_credential_cookie("jwt=restored");

    client.delete_comment(3).await.unwrap();
}

#[tokio::test]
async fn given_logged_in_client_when_logging_out_then_cookie_is_forgotten() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/unauth"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.restore_credential_cookie("jwt=token-abc");

    client.logout().await.unwrap();

    assert_eq!(client.credential_cookie(), None);
}

// ============================================================================
// Sign up / users
// ============================================================================

/// **VALUE**: Verifies a 409 on sign-up is reported as a taken username.
#[tokio::test]
async fn given_existing_username_when_signing_up_then_username_taken() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({"error": "exists"})))
        .mount(&server)
        .await;

    let result = client_for(&server)
        .create_user(&Credentials::new("alice", "hunter22"))
        .await;

    assert!(matches!(
        result,
        Err(ApiClientError::UsernameTaken { username, .. }) if username == "alice"
    ));
}

#[tokio::test]
async fn given_new_username_when_signing_up_then_returns_user_info() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/users"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"id": CREATOR_ID, "username": "bob"})),
        )
        .mount(&server)
        .await;

    let user = client_for(&server)
        .create_user(&Credentials::new("bob", "hunter22"))
        .await
        .unwrap();

    assert_eq!(user.username, "bob");
    assert_eq!(user.id.to_string(), CREATOR_ID);
}

/// **VALUE**: Verifies usernames are fetched once per user id.
///
/// **WHY THIS MATTERS**: A page of ten comments by one author would otherwise make ten
/// identical lookups.
#[tokio::test]
async fn given_repeated_lookups_when_resolving_username_then_fetched_once() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/users/{CREATOR_ID}")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": CREATOR_ID, "username": "alice"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let id = CREATOR_ID.parse().unwrap();

    assert_eq!(client.resolve_username(id).await.unwrap(), "alice");
    assert_eq!(client.resolve_username(id).await.unwrap(), "alice");
}

#[tokio::test]
async fn given_healthy_server_when_checking_health_then_true() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    assert!(client_for(&server).health().await.unwrap());
}
