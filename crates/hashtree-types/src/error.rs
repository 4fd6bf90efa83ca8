//! Error types for hashtree-types

use thiserror::Error;

/// Errors that can occur in hashtree-types
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid hex/base64 encoding or wrong digest length
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),
}

/// Result type for hashtree-types operations
pub type Result<T> = std::result::Result<T, Error>;
