//! Error types for `simplebank` core library.

use thiserror::Error;

/// Result type alias using `simplebank` Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for `simplebank` operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Token maker could not be built from the configuration
    #[error("Token maker error: {0}")]
    Maker(#[from] simplebank_token::MakerError),
}
