//! Director errors.

use thiserror::Error;

/// Errors surfaced at the director boundary.
///
/// The update, policy and safety steps themselves are total; every variant
/// here describes a request that should never have reached them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DirectorError {
    /// A required field was absent from the payload.
    #[error("Missing '{0}' field")]
    MissingField(&'static str),

    /// A field was present but outside its allowed range.
    #[error("Invalid '{field}': {reason}")]
    InvalidField {
        field: &'static str,
        reason: String,
    },

    /// The payload could not be decoded at all.
    #[error("Malformed payload: {0}")]
    Malformed(String),

    /// A stateless evaluation was requested without a profile snapshot.
    #[error("Stateless evaluation requires both 'logic_confidence' and 'trust_level'")]
    MissingSnapshot,

    /// No profile is stored under the session key.
    #[error("Session not found: {0}")]
    SessionNotFound(String),
}

impl DirectorError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        DirectorError::InvalidField {
            field,
            reason: reason.into(),
        }
    }

    /// Whether the caller sent a bad request (as opposed to naming a
    /// resource that does not exist).
    pub fn is_validation(&self) -> bool {
        !matches!(self, DirectorError::SessionNotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, DirectorError>;
