use crate::api_client::helpers::{client_for, thread_json};

use client_core::error::api_client::ApiClientError;
use client_core::listing::ThreadListQuery;
use client_core::validation::build_thread_draft;

use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies the list request carries tags, page and limit, and the total
/// comes from the `x-total-count` header.
///
/// **WHY THIS MATTERS**: Page navigation is computed from the header total, not from
/// the number of items returned.
///
/// **BUG THIS CATCHES**: Would catch the total being taken from the body length.
#[tokio::test]
async fn given_tag_filter_when_listing_threads_then_query_and_total_are_used() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/threads"))
        .and(query_param("tags", "rust,help"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "10"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-total-count", "23")
                .set_body_json(json!([thread_json(11, "eleven", &["rust", "help"])])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut query = ThreadListQuery::new();
    query.add_tag("rust").unwrap();
    query.add_tag("help").unwrap();
    query.set_page(2).unwrap();

    let page = client_for(&server).list_threads(&query).await.unwrap();

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].tags, vec!["rust", "help"]);
    assert_eq!(page.total_count, 23);
    assert_eq!(page.total_pages(), 3);
    assert!(page.has_next());
}

/// **VALUE**: Verifies 204 is an empty page rather than a JSON error.
///
/// **BUG THIS CATCHES**: Would catch decoding an empty body as JSON.
#[tokio::test]
async fn given_no_threads_when_listing_then_empty_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/threads"))
        .and(query_param_is_missing("tags"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let page = client_for(&server)
        .list_threads(&ThreadListQuery::new())
        .await
        .unwrap();

    assert!(page.is_empty());
    assert_eq!(page.total_count, 0);
    assert_eq!(page.total_pages(), 0);
}

/// **VALUE**: Verifies GETs are retried after a transient 503.
///
/// **WHY THIS MATTERS**: A restarting API should not surface as an error on reads.
///
/// **BUG THIS CATCHES**: Would catch retries being disabled or limited to transport errors.
#[tokio::test]
async fn given_transient_503_when_getting_thread_then_retried_and_succeeds() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/threads/5"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .with_priority(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/threads/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(thread_json(5, "five", &[])))
        .mount(&server)
        .await;

    let thread = client_for(&server).get_thread(5).await.unwrap();

    assert_eq!(thread.id, 5);
    assert!(!thread.was_edited());
}

/// **VALUE**: Verifies writes are never retried.
///
/// **BUG THIS CATCHES**: Would catch a POST being replayed and creating duplicates.
#[tokio::test]
async fn given_503_when_creating_thread_then_single_attempt_and_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/threads"))
        .and(body_json(json!({"title": "Hi", "content": "Body", "tags": ["rust"]})))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let draft = build_thread_draft("Hi", "Body", &["rust".to_string()]).unwrap();
    let result = client_for(&server).create_thread(&draft).await;

    assert!(matches!(result, Err(ApiClientError::Server { .. })));
}

/// **VALUE**: Verifies a 401 on edit maps to the owner-only message.
#[tokio::test]
async fn given_not_owner_when_editing_thread_then_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/threads/9/content"))
        .and(body_json(json!({"content": "new"})))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "Unauthorized"})))
        .mount(&server)
        .await;

    let error = client_for(&server)
        .update_thread_content(9, "new")
        .await
        .unwrap_err();

    assert!(matches!(error, ApiClientError::Unauthorized { .. }));
    assert_eq!(
        error.user_message(),
        "You must be logged in as the owner to do that"
    );
}

#[tokio::test]
async fn given_missing_thread_when_getting_then_not_found_with_server_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/threads/404"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"error": "Thread not found"})),
        )
        .mount(&server)
        .await;

    let error = client_for(&server).get_thread(404).await.unwrap_err();

    assert_eq!(error.user_message(), "Thread not found");
}
