//! Shared building blocks for the shibespace client.
//!
//! Everything here is domain-agnostic plumbing used by every other crate
//! in the workspace:
//!
//! - **models**: pure data exchanged with the forum API
//! - **client-core**: session tracking, REST client, client-side rules
//! - **shibespace**: the command-line application
//!
//! Keeping these types in a leaf crate lets `models` and `client-core`
//! agree on error locations and status codes without depending on each other.

pub mod error;
pub mod http_status;
pub mod redacted_password;

pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;
pub use redacted_password::RedactedPassword;

#[cfg(test)]
mod tests;
