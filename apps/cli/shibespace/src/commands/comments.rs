use crate::error::ShibespaceError;
use crate::state::AppState;

use client_core::listing::{last_page_after_create, page_after_delete};
use models::Comment;
use models::limits::DEFAULT_PAGE_SIZE;

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct PostedComment {
    #[serde(flatten)]
    pub comment: Comment,
    /// Comment page the new comment landed on.
    pub page: u32,
}

pub async fn create(
    state: &AppState,
    thread_id: i32,
    content: &str,
) -> Result<PostedComment, ShibespaceError> {
    state.require_login()?;

    let before = state
        .client
        .list_comments(thread_id, 1, DEFAULT_PAGE_SIZE)
        .await?;
    let comment = state.client.create_comment(thread_id, content).await?;

    Ok(PostedComment {
        comment,
        page: last_page_after_create(before.total_count, DEFAULT_PAGE_SIZE),
    })
}

// Comments have no single-item endpoint, so ownership is left to the API here

pub async fn edit(
    state: &AppState,
    comment_id: i32,
    content: &str,
) -> Result<Comment, ShibespaceError> {
    state.require_login()?;
    Ok(state.client.update_comment_content(comment_id, content).await?)
}

#[derive(Debug, Clone, Serialize)]
pub struct DeletedComment {
    pub deleted_comment: i32,
    /// Comment page to show next, when the thread and page were given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

/// Delete a comment. With `shown_on = Some((thread_id, page))` the page the
/// listing should move to afterwards is reported too.
pub async fn delete(
    state: &AppState,
    comment_id: i32,
    shown_on: Option<(i32, u32)>,
) -> Result<DeletedComment, ShibespaceError> {
    state.require_login()?;

    let total_before = match shown_on {
        Some((thread_id, page)) => Some(
            state
                .client
                .list_comments(thread_id, page, DEFAULT_PAGE_SIZE)
                .await?
                .total_count,
        ),
        None => None,
    };

    state.client.delete_comment(comment_id).await?;

    let page = shown_on
        .zip(total_before)
        .map(|((_, page), total)| page_after_delete(page, total, DEFAULT_PAGE_SIZE));

    Ok(DeletedComment {
        deleted_comment: comment_id,
        page,
    })
}
