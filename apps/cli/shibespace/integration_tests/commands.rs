use crate::helpers::{ALICE_ID, BOB_ID, app_for, comment_json, thread_json, user_json};

use shibespace::cli::CredentialArgs;
use shibespace::commands::{auth, comments, threads};
use shibespace::error::ShibespaceError;
use shibespace::state::CREDENTIAL_STORAGE_KEY;

use client_core::session::{LocalStorage, SESSION_STORAGE_KEY};

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn alice() -> CredentialArgs {
    CredentialArgs {
        username: "alice".to_string(),
        password: "hunter22".to_string(),
    }
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/users/auth"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "jwt=alice-token; Path=/; HttpOnly")
                .set_body_json(json!({"username": "alice"})),
        )
        .mount(server)
        .await;
}

async fn mount_user(server: &MockServer, id: &str, username: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/users/{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(id, username)))
        .mount(server)
        .await;
}

// ============================================================================
// Login / logout
// ============================================================================

/// **VALUE**: Verifies the login command wires the API, tracker and storage together.
///
/// **WHY THIS MATTERS**: Login must record the session AND trigger a recheck, otherwise
/// the user stays "logged out" until the next poll.
///
/// **BUG THIS CATCHES**: Would catch a missing `trigger_recheck` or the cookie not being
/// persisted for the next invocation.
#[tokio::test]
async fn given_valid_credentials_when_logging_in_then_session_and_cookie_stored() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    let app = app_for(&server);

    let user = auth::login(&app.state, alice()).await.unwrap();

    assert_eq!(user.username, "alice");
    assert_eq!(auth::whoami(&app.state).as_deref(), Some("alice"));
    assert!(app.storage.get(SESSION_STORAGE_KEY).unwrap().is_some());
    assert_eq!(
        app.storage.get(CREDENTIAL_STORAGE_KEY).unwrap().as_deref(),
        Some("jwt=alice-token")
    );
}

#[tokio::test]
async fn given_wrong_password_when_logging_in_then_no_session_recorded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/auth"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    let app = app_for(&server);

    let err = auth::login(&app.state, alice()).await.unwrap_err();

    assert_eq!(err.user_message(), "The username or password is incorrect");
    assert_eq!(auth::whoami(&app.state), None);
    assert_eq!(app.storage.get(SESSION_STORAGE_KEY).unwrap(), None);
}

/// **VALUE**: Verifies logout clears local state even when the API is down.
///
/// **BUG THIS CATCHES**: Would catch an API failure leaving the user stuck "logged in".
#[tokio::test]
async fn given_api_down_when_logging_out_then_local_session_cleared() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/users/unauth"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let app = app_for(&server);
    auth::login(&app.state, alice()).await.unwrap();

    auth::logout(&app.state).await.unwrap();

    assert_eq!(auth::whoami(&app.state), None);
    assert_eq!(app.storage.get(SESSION_STORAGE_KEY).unwrap(), None);
    assert_eq!(app.storage.get(CREDENTIAL_STORAGE_KEY).unwrap(), None);
}

/// **VALUE**: Verifies watch reports the current user and then the logout.
#[tokio::test]
async fn given_logged_in_when_watching_and_session_ends_then_reports_both_states() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    let app = app_for(&server);
    auth::login(&app.state, alice()).await.unwrap();

    let mut seen: Vec<Option<String>> = Vec::new();
    let watching = auth::watch(&app.state, |u| seen.push(u.map(str::to_string)));
    let ending = async {
        tokio::task::yield_now().await;
        app.state.tracker.record_logout().unwrap();
    };

    let (result, ()) = tokio::join!(watching, ending);

    assert!(result.is_ok());
    assert_eq!(seen, vec![Some("alice".to_string()), None]);
}

#[tokio::test]
async fn given_logged_out_when_watching_then_not_logged_in_error() {
    let server = MockServer::start().await;
    let app = app_for(&server);

    let result = auth::watch(&app.state, |_| {}).await;

    assert!(matches!(result, Err(ShibespaceError::NotLoggedIn { .. })));
}

// ============================================================================
// Threads
// ============================================================================

/// **VALUE**: Verifies listing resolves authors and passes tags through.
#[tokio::test]
async fn given_threads_when_listing_then_authors_resolved() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/threads"))
        .and(query_param("tags", "rust"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-total-count", "2")
                .set_body_json(json!([thread_json(1, ALICE_ID), thread_json(2, BOB_ID)])),
        )
        .mount(&server)
        .await;
    mount_user(&server, ALICE_ID, "alice").await;
    mount_user(&server, BOB_ID, "bob").await;
    let app = app_for(&server);

    let listing = threads::list(&app.state, &["rust".to_string()], 1)
        .await
        .unwrap();

    let authors: Vec<&str> = listing
        .threads
        .items
        .iter()
        .map(|s| s.author.as_str())
        .collect();
    assert_eq!(authors, vec!["alice", "bob"]);
    assert_eq!(listing.tags, vec!["rust"]);
}

#[tokio::test]
async fn given_six_tags_when_listing_then_validation_error_without_request() {
    let server = MockServer::start().await;
    let app = app_for(&server);
    let tags: Vec<String> = ["a", "b", "c", "d", "e", "f"].map(String::from).to_vec();

    let err = threads::list(&app.state, &tags, 1).await.unwrap_err();

    assert_eq!(err.user_message(), "There cannot be more than 5 tags");
}

/// **VALUE**: Verifies the thread view marks only the logged-in user's items as editable.
#[tokio::test]
async fn given_logged_in_alice_when_showing_bobs_thread_then_only_her_comment_editable() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/threads/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(thread_json(1, BOB_ID)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/comments"))
        .and(query_param("thread_id", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-total-count", "2")
                .set_body_json(json!([comment_json(1, 1, BOB_ID), comment_json(2, 1, ALICE_ID)])),
        )
        .mount(&server)
        .await;
    mount_user(&server, ALICE_ID, "alice").await;
    mount_user(&server, BOB_ID, "bob").await;
    let app = app_for(&server);
    auth::login(&app.state, alice()).await.unwrap();

    let view = threads::show(&app.state, 1, 1).await.unwrap();

    assert!(!view.can_edit);
    let editable: Vec<bool> = view.comments.items.iter().map(|c| c.can_edit).collect();
    assert_eq!(editable, vec![false, true]);
}

#[tokio::test]
async fn given_logged_out_when_creating_thread_then_not_logged_in() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;
    let app = app_for(&server);

    let result = threads::create(&app.state, "Title", "Body", &[]).await;

    assert!(matches!(result, Err(ShibespaceError::NotLoggedIn { .. })));
}

/// **VALUE**: Verifies deleting someone else's thread is refused before the DELETE.
///
/// **BUG THIS CATCHES**: Would catch the surface check being skipped for deletes.
#[tokio::test]
async fn given_not_owner_when_deleting_thread_then_refused_locally() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/threads/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(thread_json(1, BOB_ID)))
        .mount(&server)
        .await;
    mount_user(&server, BOB_ID, "bob").await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;
    let app = app_for(&server);
    auth::login(&app.state, alice()).await.unwrap();

    let result = threads::delete(&app.state, 1).await;

    assert!(matches!(result, Err(ShibespaceError::NotOwner { .. })));
}

#[tokio::test]
async fn given_owner_when_deleting_thread_then_delete_sent_with_cookie() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/threads/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(thread_json(1, ALICE_ID)))
        .mount(&server)
        .await;
    mount_user(&server, ALICE_ID, "alice").await;
    Mock::given(method("DELETE"))
        .and(path("/threads/1"))
        .and(header("cookie", "jwt=alice-token"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    let app = app_for(&server);
    auth::login(&app.state, alice()).await.unwrap();

    threads::delete(&app.state, 1).await.unwrap();
}

// ============================================================================
// Comments
// ============================================================================

/// **VALUE**: Verifies a new comment reports the page it landed on.
#[tokio::test]
async fn given_ten_comments_when_commenting_then_lands_on_page_two() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/comments"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-total-count", "10")
                .set_body_json(json!([comment_json(1, 1, BOB_ID)])),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/comments"))
        .respond_with(ResponseTemplate::new(201).set_body_json(comment_json(11, 1, ALICE_ID)))
        .mount(&server)
        .await;
    let app = app_for(&server);
    auth::login(&app.state, alice()).await.unwrap();

    let posted = comments::create(&app.state, 1, "hello").await.unwrap();

    assert_eq!(posted.comment.id, 11);
    assert_eq!(posted.page, 2);
}

/// **VALUE**: Verifies deleting the only comment on the last page reports the page before it.
///
/// **BUG THIS CATCHES**: Would catch the listing being sent back to a page that no
/// longer exists, or the count being read after the delete instead of before.
#[tokio::test]
async fn given_eleven_comments_when_deleting_last_on_page_two_then_reports_page_one() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/comments"))
        .and(query_param("thread_id", "1"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-total-count", "11")
                .set_body_json(json!([comment_json(11, 1, ALICE_ID)])),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/comments/11"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    let app = app_for(&server);
    auth::login(&app.state, alice()).await.unwrap();

    let deleted = comments::delete(&app.state, 11, Some((1, 2))).await.unwrap();

    assert_eq!(deleted.deleted_comment, 11);
    assert_eq!(deleted.page, Some(1));
}

#[tokio::test]
async fn given_no_thread_when_deleting_comment_then_no_page_reported() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("DELETE"))
        .and(path("/comments/4"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    let app = app_for(&server);
    auth::login(&app.state, alice()).await.unwrap();

    let deleted = comments::delete(&app.state, 4, None).await.unwrap();

    assert_eq!(deleted.page, None);
}

/// **VALUE**: Verifies an expired session blocks writes without a round trip.
///
/// **WHY THIS MATTERS**: After an hour the cookie is gone server-side too; sending the
/// request would only produce a confusing 401.
#[tokio::test]
async fn given_expired_session_when_rechecked_then_comment_refused() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    let app = app_for(&server);
    auth::login(&app.state, alice()).await.unwrap();

    app.clock.advance(3_600_000);
    app.state.tracker.trigger_recheck();

    let result = comments::delete(&app.state, 5, None).await;
    assert!(matches!(result, Err(ShibespaceError::NotLoggedIn { .. })));
}
