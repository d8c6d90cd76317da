//! Error types for mufx-cli

use thiserror::Error;

/// Result type alias for mufx-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in mufx-cli
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from mufx-core
    #[error(transparent)]
    Core(#[from] mufx_core::Error),

    /// Error from mufx-integrity
    #[error(transparent)]
    Integrity(#[from] mufx_integrity::Error),

    /// One or more articles failed verification
    #[error("{failed} of {total} article(s) failed verification")]
    VerificationFailed {
        /// Articles not verified.
        failed: usize,
        /// Articles checked.
        total: usize,
    },
}
