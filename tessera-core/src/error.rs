//! Error taxonomy shared by all Tessera crates.

use thiserror::Error;

/// Errors produced by the membership directory and tenant resolution.
#[derive(Debug, Error)]
pub enum TenancyError {
    /// A field failed validation (empty name, malformed slug, unknown role).
    #[error("Validation error: {0}")]
    Validation(String),

    /// A uniqueness constraint was violated.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A referenced entity does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The backing store is unavailable or failed mid-operation.
    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

impl TenancyError {
    /// Whether this error indicates a caller mistake rather than a
    /// system fault.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Infrastructure(_))
    }
}
