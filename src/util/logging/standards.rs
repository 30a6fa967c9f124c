//! Centralised logging metadata (event names, shared keys, etc.).

/// Canonical event names used across the crate.
pub mod events {
    /// Identity checks.
    pub const IDENTITY_MATCH: &str = "identity.match";
    pub const IDENTITY_MISMATCH: &str = "identity.mismatch";
    pub const IDENTITY_INVALID_MODE: &str = "identity.invalid_mode";

    /// Configuration lifecycle.
    pub const CONFIG_LOAD_SUCCESS: &str = "config.load.success";
    pub const CONFIG_LOAD_FAILED: &str = "config.load.failed";
    pub const CONFIG_MISSING: &str = "config.missing";
    pub const CONFIG_OVERRIDE: &str = "config.override";
    pub const CONFIG_VALIDATION: &str = "config.validation";

    pub const LOG_INIT: &str = "log.init";
}

/// Shared field keys.
pub mod keys {
    pub const CALLER_FILE: &str = "caller.file";
    pub const CALLER_LINE: &str = "caller.line";
    pub const CALLER_COLUMN: &str = "caller.column";
}
