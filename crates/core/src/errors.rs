//! Error types for the swimlog core.

use thiserror::Error;

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by repositories, derived views and the import pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or out-of-range input, caught before any network call.
    /// No state is mutated.
    #[error("validation error: {0}")]
    Validation(String),

    /// The remote store reported a failure. The corresponding optimistic
    /// change has been rolled back; the message is the store's own.
    #[error("remote store error: {0}")]
    Remote(String),

    /// Mutation attempted without a signed-in owner.
    #[error("not signed in")]
    SignedOut,

    /// A mutation for this record is still waiting on its remote round-trip.
    #[error("mutation already in flight for record {0}")]
    MutationInFlight(String),
}

impl Error {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a remote store error
    pub fn remote(message: impl Into<String>) -> Self {
        Self::Remote(message.into())
    }

    /// True when the failure was caught before any network or state change.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
