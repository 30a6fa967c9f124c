//! Configuration management
//!
//! - types: configuration data structures
//! - loader: file loading and environment overrides
//! - validator: configuration checks

pub mod loader;
pub mod types;
pub mod validator;

pub use loader::{ConfigLoader, ConfigWriter, LoadedConfig};
pub use types::*;
pub use validator::{ConfigValidator, ValidationIssue, ValidationReport};
