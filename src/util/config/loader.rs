//! Configuration loading: YAML file, environment overrides, validation.

use super::types::*;
use super::validator::{ConfigValidator, ValidationIssue};
use crate::check::OnMismatch;
use crate::util::logging::standards::events;
use anyhow::Result;
use std::fs;
use std::path::Path;

pub const ENV_ON_MISMATCH: &str = "BUILD_IDENTITY_ON_MISMATCH";
pub const ENV_LOG_LEVEL: &str = "BUILD_IDENTITY_LOG_LEVEL";
pub const ENV_LOG_JSON: &str = "BUILD_IDENTITY_LOG_JSON";

/// A loaded configuration plus the warnings raised while loading it.
///
/// Loading usually happens before logging is initialised, so warnings are
/// kept here and emitted with [`LoadedConfig::log_warnings`] afterwards.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub config: Config,
    pub warnings: Vec<ValidationIssue>,
}

impl LoadedConfig {
    pub fn log_warnings(&self) {
        for warning in &self.warnings {
            tracing::warn!(event = events::CONFIG_VALIDATION, field = %warning.field, "{}", warning.message);
        }
    }
}

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn read_yaml(path: impl AsRef<Path>) -> Result<Config> {
        let config_str = fs::read_to_string(path)?;
        let config = serde_yaml::from_str(&config_str)?;
        Ok(config)
    }

    /// Apply overrides read through `lookup`. Values that cannot be applied
    /// are reported in `warnings` and leave the field unchanged.
    pub fn apply_overrides_from<F>(
        mut config: Config,
        lookup: F,
        warnings: &mut Vec<ValidationIssue>,
    ) -> Config
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(mode) = lookup(ENV_ON_MISMATCH) {
            match mode.trim().parse::<OnMismatch>() {
                Ok(mode) => {
                    config.on_mismatch = mode;
                    tracing::debug!(event = events::CONFIG_OVERRIDE, key = ENV_ON_MISMATCH, value = %mode);
                }
                Err(err) => warnings.push(ValidationIssue {
                    field: ENV_ON_MISMATCH.to_string(),
                    message: format!("override ignored: {}", err),
                }),
            }
        }

        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            let level = level.trim().to_string();
            if !level.is_empty() {
                tracing::debug!(event = events::CONFIG_OVERRIDE, key = ENV_LOG_LEVEL, value = %level);
                config.logging.level = level;
            }
        }

        if let Some(json) = lookup(ENV_LOG_JSON) {
            let json = json.trim().to_ascii_lowercase();
            config.logging.structured = matches!(json.as_str(), "1" | "true" | "yes" | "on");
        }

        config
    }

    /// Read `path` if it exists (defaults otherwise), apply environment overrides, validate.
    pub fn load_with_env_overrides(path: impl AsRef<Path>) -> Result<LoadedConfig> {
        Self::load_with(path, |name| std::env::var(name).ok())
    }

    pub fn load_with<F>(path: impl AsRef<Path>, lookup: F) -> Result<LoadedConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = path.as_ref();
        let base_config = if path.exists() {
            Self::read_yaml(path)?
        } else {
            tracing::debug!(event = events::CONFIG_MISSING, path = %path.display());
            Config::default()
        };

        let mut warnings = Vec::new();
        let config = Self::apply_overrides_from(base_config, lookup, &mut warnings);

        let report = ConfigValidator::validate_all(&config);
        if let Some(first) = report.errors.first() {
            tracing::error!(event = events::CONFIG_LOAD_FAILED, path = %path.display(), issue = %first);
            return Err(anyhow::anyhow!("invalid configuration: {}", first));
        }
        warnings.extend(report.warnings);

        tracing::debug!(event = events::CONFIG_LOAD_SUCCESS, path = %path.display());
        Ok(LoadedConfig { config, warnings })
    }
}

/// Configuration writer
pub struct ConfigWriter;

impl ConfigWriter {
    pub fn write_yaml(config: &Config, path: impl AsRef<Path>) -> Result<()> {
        let yaml_content = serde_yaml::to_string(config)?;
        fs::write(path, yaml_content)?;
        Ok(())
    }

    /// Write the configuration, creating parent directories first.
    pub fn write_yaml_with_dir(config: &Config, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Self::write_yaml(config, path)
    }

    pub fn generate_template() -> Config {
        Config::default()
    }
}
