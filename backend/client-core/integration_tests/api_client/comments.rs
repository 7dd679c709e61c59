use crate::api_client::helpers::{client_for, comment_json};

use client_core::error::api_client::ApiClientError;
use client_core::listing::last_page_after_create;

use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies comments are listed per thread with offsets preserved.
///
/// **BUG THIS CATCHES**: Would catch timestamps with offsets failing to parse.
#[tokio::test]
async fn given_thread_with_comments_when_listing_then_page_and_edit_flag() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/comments"))
        .and(query_param("thread_id", "4"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "10"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-total-count", "1")
                .set_body_json(json!([comment_json(1, 4, "first")])),
        )
        .mount(&server)
        .await;

    let page = client_for(&server).list_comments(4, 1, 10).await.unwrap();

    assert_eq!(page.total_count, 1);
    assert_eq!(page.items[0].content, "first");
    assert!(page.items[0].was_edited());
}

/// **VALUE**: Verifies posting a comment sends the thread id and lands on the right page.
#[tokio::test]
async fn given_full_page_when_commenting_then_created_on_next_page() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/comments"))
        .and(body_json(json!({"content": "hello", "thread_id": 4})))
        .respond_with(ResponseTemplate::new(201).set_body_json(comment_json(11, 4, "hello")))
        .expect(1)
        .mount(&server)
        .await;

    let comment = client_for(&server).create_comment(4, "hello").await.unwrap();

    assert_eq!(comment.id, 11);
    assert_eq!(last_page_after_create(10, 10), 2);
}

#[tokio::test]
async fn given_empty_content_when_commenting_then_validation_error_without_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let result = client_for(&server).create_comment(4, "").await;

    assert!(matches!(result, Err(ApiClientError::Validation(_))));
}

#[tokio::test]
async fn given_owner_when_editing_comment_then_updated_comment_returned() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/comments/2/content"))
        .and(body_json(json!({"content": "edited"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(comment_json(2, 4, "edited")))
        .mount(&server)
        .await;

    let comment = client_for(&server)
        .update_comment_content(2, "edited")
        .await
        .unwrap();

    assert_eq!(comment.content, "edited");
}

#[tokio::test]
async fn given_page_zero_when_listing_comments_then_validation_error() {
    let server = MockServer::start().await;

    let result = client_for(&server).list_comments(4, 0, 10).await;

    assert!(matches!(result, Err(ApiClientError::Validation(_))));
}
