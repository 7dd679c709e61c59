use crate::error::model_error::ModelError;
use crate::limits::{
    CONTENT_MIN_CHARS, MAX_TAGS, TAG_MAX_CHARS, TAG_MIN_CHARS, TITLE_MAX_CHARS, TITLE_MIN_CHARS,
};
use crate::thread_draft::ThreadDraft;

/// Builder for creating validated ThreadDraft instances.
///
/// Limits mirror the forum API: title 1-255 characters, non-empty content,
/// at most five distinct tags of 1-35 characters each.
#[derive(Debug, Default)]
pub struct ThreadDraftBuilder {
    title: Option<String>,
    content: Option<String>,
    tags: Vec<String>,
}

impl ThreadDraftBuilder {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Build the ThreadDraft with validation.
    #[track_caller]
    pub fn build(self) -> Result<ThreadDraft, ModelError> {
        let title = self
            .title
            .ok_or_else(|| ModelError::validation("Title is required"))?;

        let title_chars = title.chars().count();
        if !(TITLE_MIN_CHARS..=TITLE_MAX_CHARS).contains(&title_chars) {
            return Err(ModelError::validation(format!(
                "Title must be between {TITLE_MIN_CHARS} and {TITLE_MAX_CHARS} characters long"
            )));
        }

        let content = self
            .content
            .ok_or_else(|| ModelError::validation("Content is required"))?;

        if content.chars().count() < CONTENT_MIN_CHARS {
            return Err(ModelError::validation(format!(
                "Content must be at least {CONTENT_MIN_CHARS} character long"
            )));
        }

        if self.tags.len() > MAX_TAGS {
            return Err(ModelError::validation(format!(
                "There cannot be more than {MAX_TAGS} tags"
            )));
        }

        for (index, tag) in self.tags.iter().enumerate() {
            let tag_chars = tag.chars().count();
            if !(TAG_MIN_CHARS..=TAG_MAX_CHARS).contains(&tag_chars) {
                return Err(ModelError::validation(format!(
                    "Tag must be between {TAG_MIN_CHARS} and {TAG_MAX_CHARS} characters long"
                )));
            }

            if self.tags[..index].contains(tag) {
                return Err(ModelError::validation(format!("Duplicate tag: {tag}")));
            }
        }

        Ok(ThreadDraft {
            title,
            content,
            tags: self.tags,
        })
    }
}
