//! Field limits enforced by the forum API.
//!
//! The client checks these before sending a request so obviously invalid
//! input never costs a round trip.

pub const USERNAME_MIN_CHARS: usize = 3;
pub const USERNAME_MAX_CHARS: usize = 20;
pub const PASSWORD_MIN_CHARS: usize = 8;

pub const TITLE_MIN_CHARS: usize = 1;
pub const TITLE_MAX_CHARS: usize = 255;
pub const CONTENT_MIN_CHARS: usize = 1;

pub const TAG_MIN_CHARS: usize = 1;
pub const TAG_MAX_CHARS: usize = 35;
pub const MAX_TAGS: usize = 5;

/// Server-side default for the `limit` query parameter.
pub const DEFAULT_PAGE_SIZE: u32 = 10;
