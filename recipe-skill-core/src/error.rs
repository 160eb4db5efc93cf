//! Error types for recipe-skill

use thiserror::Error;

/// The main error type for recipe-skill operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// An intent could not be built from the host's fields
    #[error("Intent error: {0}")]
    Intent(String),

    /// Message bus errors
    #[error("Channel error: {0}")]
    Channel(String),
}

/// A specialized Result type for recipe-skill operations
pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
