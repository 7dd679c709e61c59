use crate::commands::author_of;
use crate::error::ShibespaceError;
use crate::state::AppState;

use client_core::listing::ThreadListQuery;
use client_core::permissions::{can_create, check_surface};
use client_core::validation::build_thread_draft;
use models::limits::DEFAULT_PAGE_SIZE;
use models::{Comment, Page, Thread};

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ThreadSummary {
    #[serde(flatten)]
    pub thread: Thread,
    pub author: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ThreadListing {
    pub tags: Vec<String>,
    pub threads: Page<ThreadSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentView {
    #[serde(flatten)]
    pub comment: Comment,
    pub author: String,
    pub can_edit: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ThreadView {
    #[serde(flatten)]
    pub summary: ThreadSummary,
    pub can_edit: bool,
    pub comments: Page<CommentView>,
}

pub async fn list(
    state: &AppState,
    tags: &[String],
    page: u32,
) -> Result<ThreadListing, ShibespaceError> {
    let mut query = ThreadListQuery::new();
    for tag in tags {
        query.add_tag(tag.as_str())?;
    }
    query.set_page(page)?;

    let listed = state.client.list_threads(&query).await?;

    let mut items = Vec::with_capacity(listed.items.len());
    for thread in listed.items {
        let author = author_of(&state.client, thread.creator_id).await;
        items.push(ThreadSummary { thread, author });
    }

    Ok(ThreadListing {
        tags: query.tags().to_vec(),
        threads: Page {
            items,
            total_count: listed.total_count,
            page: listed.page,
            page_size: listed.page_size,
        },
    })
}

pub async fn show(
    state: &AppState,
    thread_id: i32,
    comment_page: u32,
) -> Result<ThreadView, ShibespaceError> {
    let thread = state.client.get_thread(thread_id).await?;
    let author = author_of(&state.client, thread.creator_id).await;
    let can_edit = check_surface(&state.tracker, &author);

    let listed = state
        .client
        .list_comments(thread_id, comment_page, DEFAULT_PAGE_SIZE)
        .await?;

    let mut comments = Vec::with_capacity(listed.items.len());
    for comment in listed.items {
        let author = author_of(&state.client, comment.creator_id).await;
        let can_edit = check_surface(&state.tracker, &author);
        comments.push(CommentView {
            comment,
            author,
            can_edit,
        });
    }

    Ok(ThreadView {
        summary: ThreadSummary { thread, author },
        can_edit,
        comments: Page {
            items: comments,
            total_count: listed.total_count,
            page: listed.page,
            page_size: listed.page_size,
        },
    })
}

pub async fn create(
    state: &AppState,
    title: &str,
    content: &str,
    tags: &[String],
) -> Result<Thread, ShibespaceError> {
    if !can_create(&state.tracker) {
        return Err(ShibespaceError::not_logged_in());
    }

    let draft = build_thread_draft(title, content, tags)?;
    Ok(state.client.create_thread(&draft).await?)
}

pub async fn edit(state: &AppState, thread_id: i32, content: &str) -> Result<Thread, ShibespaceError> {
    ensure_owner(state, thread_id).await?;
    Ok(state.client.update_thread_content(thread_id, content).await?)
}

pub async fn delete(state: &AppState, thread_id: i32) -> Result<(), ShibespaceError> {
    ensure_owner(state, thread_id).await?;
    Ok(state.client.delete_thread(thread_id).await?)
}

/// Refuse early when the tracked user is clearly not the creator.
async fn ensure_owner(state: &AppState, thread_id: i32) -> Result<(), ShibespaceError> {
    state.require_login()?;

    let thread = state.client.get_thread(thread_id).await?;
    let author = author_of(&state.client, thread.creator_id).await;

    if check_surface(&state.tracker, &author) {
        Ok(())
    } else {
        Err(ShibespaceError::not_owner("thread"))
    }
}
