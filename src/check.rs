//! Identifier comparison against the stamped build.

use std::fmt;
use std::panic::Location;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::build_info::{VersionIdentity, BUILD};
use crate::error::{mismatch_message, IdentityError, Result};
use crate::util::logging::standards::events;

/// What `check_match` does when identifiers differ.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnMismatch {
    #[default]
    Raise,
    Warn,
}

impl OnMismatch {
    pub fn as_str(&self) -> &'static str {
        match self {
            OnMismatch::Raise => "raise",
            OnMismatch::Warn => "warn",
        }
    }
}

impl fmt::Display for OnMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OnMismatch {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "raise" => Ok(OnMismatch::Raise),
            "warn" => Ok(OnMismatch::Warn),
            other => Err(IdentityError::InvalidArgument {
                value: other.to_string(),
            }),
        }
    }
}

impl VersionIdentity {
    /// Compare `foreign_id` with this build's identifier.
    ///
    /// Equal identifiers return `Ok(())` without side effects. On mismatch,
    /// `Raise` returns [`IdentityError::VersionMismatch`] and `Warn` emits one
    /// warning attributed to the caller and returns `Ok(())`.
    ///
    /// The warning goes through `tracing` only. Without an installed
    /// subscriber (see [`crate::util::log::log_init_with_config`]) it is
    /// dropped, so callers relying on `Warn` must set one up.
    #[track_caller]
    pub fn check_match(&self, foreign_id: &str, on_mismatch: OnMismatch) -> Result<()> {
        if foreign_id == self.identifier {
            tracing::trace!(event = events::IDENTITY_MATCH, id = %foreign_id);
            return Ok(());
        }

        match on_mismatch {
            OnMismatch::Raise => Err(IdentityError::VersionMismatch {
                local: self.identifier.to_string(),
                foreign: foreign_id.to_string(),
            }),
            OnMismatch::Warn => {
                let caller = Location::caller();
                tracing::warn!(
                    event = events::IDENTITY_MISMATCH,
                    category = "UserWarning",
                    caller.file = caller.file(),
                    caller.line = caller.line(),
                    caller.column = caller.column(),
                    "{}",
                    mismatch_message(self.identifier, foreign_id)
                );
                Ok(())
            }
        }
    }

    /// Like [`check_match`](Self::check_match) with the mode given as text.
    /// An unknown mode fails with [`IdentityError::InvalidArgument`] before
    /// the identifiers are compared.
    #[track_caller]
    pub fn check_match_str(&self, foreign_id: &str, on_mismatch: &str) -> Result<()> {
        let mode = on_mismatch.parse::<OnMismatch>().map_err(|err| {
            tracing::debug!(event = events::IDENTITY_INVALID_MODE, mode = %on_mismatch);
            err
        })?;
        self.check_match(foreign_id, mode)
    }
}

/// Check `foreign_id` against the running build.
#[track_caller]
pub fn check_match(foreign_id: &str, on_mismatch: OnMismatch) -> Result<()> {
    BUILD.check_match(foreign_id, on_mismatch)
}

/// Check `foreign_id` against the running build, mode given as text.
#[track_caller]
pub fn check_match_str(foreign_id: &str, on_mismatch: &str) -> Result<()> {
    BUILD.check_match_str(foreign_id, on_mismatch)
}
