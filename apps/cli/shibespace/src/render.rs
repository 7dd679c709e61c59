//! Plain-text rendering of command results.

use crate::commands::auth::HealthReport;
use crate::commands::comments::{DeletedComment, PostedComment};
use crate::commands::threads::{ThreadListing, ThreadView};
use crate::error::ShibespaceError;

use client_core::display::{relative_time, user_icon_url};
use models::{Thread, UserInfo};

use std::fmt::Write;

use chrono::{DateTime, Utc};
use log::warn;
use serde::Serialize;

pub fn health(report: &HealthReport) -> String {
    let status = if report.healthy { "up" } else { "down" };
    format!("{} is {status}", report.base_url)
}

pub fn signed_up(user: &UserInfo) -> String {
    format!("Created user '{}'. Log in to start posting.", user.username)
}

pub fn whoami(username: Option<&str>) -> String {
    match username {
        Some(username) => format!("{username}\n{}", user_icon_url(username)),
        None => String::from("Not logged in"),
    }
}

pub fn session_change(username: Option<&str>) -> String {
    match username {
        Some(username) => format!("Logged in as {username}"),
        None => String::from("Logged out"),
    }
}

pub fn thread_listing(listing: &ThreadListing, now: DateTime<Utc>) -> String {
    let mut out = String::new();

    if !listing.tags.is_empty() {
        let _ = writeln!(out, "Tags: {}", listing.tags.join(", "));
    }

    if listing.threads.is_empty() {
        out.push_str("No threads found");
        return out;
    }

    for summary in &listing.threads.items {
        let thread = &summary.thread;
        let _ = writeln!(
            out,
            "#{} {}  by {}, {}{}",
            thread.id,
            thread.title,
            summary.author,
            relative_time(thread.created_timestamp, now),
            tag_suffix(&thread.tags),
        );
    }

    let _ = write!(
        out,
        "Page {} of {} ({} threads)",
        listing.threads.page,
        listing.threads.total_pages(),
        listing.threads.total_count
    );
    out
}

pub fn thread_view(view: &ThreadView, now: DateTime<Utc>) -> String {
    let thread = &view.summary.thread;
    let mut out = String::new();

    let _ = writeln!(out, "#{} {}{}", thread.id, thread.title, tag_suffix(&thread.tags));
    let _ = writeln!(
        out,
        "by {}, {}{}{}",
        view.summary.author,
        relative_time(thread.created_timestamp, now),
        edited_suffix(thread.was_edited(), thread.updated_timestamp, now),
        if view.can_edit { " [yours]" } else { "" },
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", thread.content);
    let _ = writeln!(out);

    if view.comments.is_empty() {
        out.push_str("No comments yet");
        return out;
    }

    for entry in &view.comments.items {
        let comment = &entry.comment;
        let _ = writeln!(
            out,
            "  [{}] {}, {}{}{}",
            comment.id,
            entry.author,
            relative_time(comment.created_timestamp, now),
            edited_suffix(comment.was_edited(), comment.updated_timestamp, now),
            if entry.can_edit { " [yours]" } else { "" },
        );
        let _ = writeln!(out, "  {}", comment.content);
    }

    let _ = write!(
        out,
        "Comments page {} of {}",
        view.comments.page,
        view.comments.total_pages()
    );
    out
}

pub fn thread_saved(verb: &str, thread: &Thread) -> String {
    format!("{verb} thread #{} {}", thread.id, thread.title)
}

pub fn comment_posted(posted: &PostedComment) -> String {
    format!(
        "Posted comment {} on thread #{} (comments page {})",
        posted.comment.id, posted.comment.thread_id, posted.page
    )
}

pub fn comment_deleted(deleted: &DeletedComment) -> String {
    match deleted.page {
        Some(page) => format!(
            "Deleted comment {} (comments page {page})",
            deleted.deleted_comment
        ),
        None => format!("Deleted comment {}", deleted.deleted_comment),
    }
}

fn tag_suffix(tags: &[String]) -> String {
    if tags.is_empty() {
        String::new()
    } else {
        format!("  [{}]", tags.join(", "))
    }
}

fn edited_suffix(edited: bool, updated: DateTime<Utc>, now: DateTime<Utc>) -> String {
    if edited {
        format!(" (edited {})", relative_time(updated, now))
    } else {
        String::new()
    }
}

/// Writes results to stdout as text or JSON.
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    pub json: bool,
}

impl Printer {
    pub fn emit<T: Serialize>(
        &self,
        value: &T,
        text: impl FnOnce(&T) -> String,
    ) -> Result<(), ShibespaceError> {
        if self.json {
            let encoded = serde_json::to_string(value)
                .map_err(|e| ShibespaceError::app(format!("Failed to encode output: {e}")))?;
            println!("{encoded}");
        } else {
            println!("{}", text(value));
        }
        Ok(())
    }

    /// Like [`emit`](Self::emit) for long-running output, where a failed line is
    /// logged and skipped. Returns whether the line was written.
    pub fn emit_logged<T: Serialize>(&self, value: &T, text: impl FnOnce(&T) -> String) -> bool {
        match self.emit(value, text) {
            Ok(()) => true,
            Err(e) => {
                warn!("Failed to print output: {e}");
                false
            }
        }
    }
}
