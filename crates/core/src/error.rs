//! Error types for the core domain.

use thiserror::Error;

/// Core domain error type.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid item id: {0}")]
    InvalidItemId(String),

    #[error("invalid image name: {0}")]
    InvalidImageName(String),

    #[error("invalid hash: {0}")]
    InvalidHash(String),

    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;
