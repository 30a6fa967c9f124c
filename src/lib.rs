//! Build identity stamped at compile time, and a check that foreign
//! identifiers (for example a version recorded in an input file) match it.
//!
//! ```no_run
//! use build_identity::{check_match, OnMismatch, BUILD};
//!
//! println!("{}", BUILD.verbose_message());
//! check_match("1.0.dev3", OnMismatch::Warn)?;
//! # Ok::<(), build_identity::IdentityError>(())
//! ```

pub mod build_info;
pub mod check;
pub mod cli;
pub mod error;
pub mod util;

#[cfg(test)]
mod test_support;

pub use build_info::{VersionIdentity, BUILD};
pub use check::{check_match, check_match_str, OnMismatch};
pub use error::{IdentityError, Result};

use util::config::{ConfigLoader, LoadedConfig};

/// Locate the configuration file: `$BUILD_IDENTITY_CONFIG`, else `build-identity.yaml`
/// in the working directory.
pub fn find_config_file_path() -> std::path::PathBuf {
    std::env::var_os("BUILD_IDENTITY_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|| std::path::PathBuf::from("build-identity.yaml"))
}

/// Load configuration from `path` or the default location.
///
/// Warnings found while loading are returned, not logged; call
/// [`LoadedConfig::log_warnings`] once logging is initialised.
pub fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<LoadedConfig> {
    match path {
        Some(path) => ConfigLoader::load_with_env_overrides(path),
        None => ConfigLoader::load_with_env_overrides(find_config_file_path()),
    }
}
