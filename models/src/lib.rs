//! Domain models for the shibespace forum client.
//!
//! This crate contains pure data structures representing the resources
//! exchanged with the forum API plus the locally persisted session record.
//! Models have no I/O - they're just data that can be passed between layers.
//!
//! ## Architecture
//!
//! - **models** (this crate): Pure data structures
//! - **client-core**: Session tracking, REST client and client-side rules
//! - **shibespace**: Command-line application wiring everything together

pub mod comment;
pub mod error;
pub mod error_response;
pub mod limits;
pub mod page;
pub mod session_record;
pub mod thread;
pub mod thread_draft;
pub mod user;

pub use comment::Comment;
pub use common::ErrorLocation;
pub use error::model_error::ModelError;
pub use error_response::ErrorResponse;
pub use page::Page;
pub use session_record::SessionRecord;
pub use thread::Thread;
pub use thread_draft::{ThreadDraft, builder::ThreadDraftBuilder};
pub use user::{Credentials, User, UserInfo};

#[cfg(test)]
mod tests;
