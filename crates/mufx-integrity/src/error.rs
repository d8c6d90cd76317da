//! Error types for integrity operations.

use thiserror::Error;

/// Result type alias for integrity operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while hashing or verifying articles.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from mufx-core (I/O, configuration).
    #[error(transparent)]
    Core(#[from] mufx_core::Error),

    /// A string that is not a 64-character lowercase hex SHA-256 digest.
    #[error("Invalid integrity hash: {0}")]
    InvalidHash(String),
}

impl Error {
    /// Whether the underlying cause is a missing file or directory.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Core(e) if e.is_not_found())
    }
}
