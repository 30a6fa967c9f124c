//! Error types for identity checks.

use thiserror::Error;

/// Result alias for identity operations.
pub type Result<T> = std::result::Result<T, IdentityError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    /// The caller asked for a mismatch mode that does not exist.
    #[error("{value} is an unrecognized value of on_mismatch")]
    InvalidArgument { value: String },

    /// The foreign identifier differs from the identifier stamped into this build.
    #[error("Program id ({local}) does not match given id ({foreign}).")]
    VersionMismatch { local: String, foreign: String },
}

impl IdentityError {
    pub fn is_mismatch(&self) -> bool {
        matches!(self, IdentityError::VersionMismatch { .. })
    }
}

/// Message shared by the raise and warn paths.
pub(crate) fn mismatch_message(local: &str, foreign: &str) -> String {
    format!(
        "Program id ({}) does not match given id ({}).",
        local, foreign
    )
}
