pub mod api_client;
pub mod config;
pub mod display;
pub mod error;
pub mod listing;
pub mod permissions;
pub mod session;
pub mod validation;

#[cfg(test)]
mod tests;

pub use api_client::ShibespaceClient;
pub use api_client::retry::RetryPolicy;
pub use session::{SessionSettings, SessionTracker};

pub const DEFAULT_API_HOSTNAME: &str = "localhost";
pub const DEFAULT_API_PORT: u16 = 8080;
pub const DEFAULT_API_BASE_URL: &str =
    const_format::concatcp!("http://", DEFAULT_API_HOSTNAME, ":", DEFAULT_API_PORT);
