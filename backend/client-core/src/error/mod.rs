pub mod api_client;
pub mod config;
pub mod session;
pub mod storage;
pub mod validation;

pub use api_client::ApiClientError;
pub use config::ConfigError;
pub use session::SessionError;
pub use storage::StorageError;
pub use validation::{ValidationError, ValidationFailure};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    ApiClient(#[from] ApiClientError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
