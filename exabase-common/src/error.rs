//! Common error types for the Exabase importers

use thiserror::Error;

/// Common result type for Exabase operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the import flows
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}
