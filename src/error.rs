//! Error types for the referral service.

use std::path::PathBuf;
use thiserror::Error;

/// Failures of the store, configuration and token layers.
#[derive(Error, Debug)]
pub enum Error {
    /// File system operation on the store failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The delimited store could not be read or written.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Failed to create the directory holding the store.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation { message: String },

    /// Signing key or token encoding failure.
    #[error("token error: {0}")]
    Token(String),
}

/// A specialized Result type for referral operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl From<jwt::Error> for Error {
    fn from(err: jwt::Error) -> Self {
        Self::Token(err.to_string())
    }
}

impl Error {
    #[must_use]
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }
}
