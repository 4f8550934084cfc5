//! Common error types for hwvault.

use thiserror::Error;

/// Validation errors raised by the vault creation form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum FormError {
    /// No usable name was entered.
    #[error("a descriptive name is required")]
    NoName,

    /// The name is already used by a known vault.
    #[error("a vault with this name already exists")]
    DuplicateName,

    /// Password and repeated password differ.
    #[error("the supplied passwords do not match")]
    NoMatchPassword,
}

/// Top-level error type for hwvault operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Hardware transport failed (no device, USB error, app not open).
    #[error("Transport error: {0}")]
    Transport(String),

    /// Remote node call failed.
    #[error("Api error: {0}")]
    Api(String),

    /// Form validation failed before any remote call.
    #[error("Validation error: {0}")]
    Validation(#[from] FormError),

    /// A bounded fetch did not settle in time.
    #[error("Timed out: {0}")]
    Timeout(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Resource already exists.
    #[error("Already exists: {0}")]
    AlreadyExists(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Result type alias using the common Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Settled result of an operation that degrades instead of failing.
///
/// Fetch-type operations never surface their failures to the caller; they log,
/// fall back to an empty or unchanged state and report `Degraded`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The operation reached its collaborator and state was refreshed.
    Completed,
    /// The collaborator failed; state was left as is or replaced by a default.
    Degraded { reason: String },
}

impl Outcome {
    /// Build a degraded outcome from any displayable error.
    pub fn degraded(err: impl std::fmt::Display) -> Self {
        Outcome::Degraded {
            reason: err.to_string(),
        }
    }

    /// Check whether the operation completed.
    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed)
    }
}
