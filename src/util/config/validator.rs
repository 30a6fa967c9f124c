//! Configuration validation.

use super::types::*;

const KNOWN_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate_all(config: &Config) -> ValidationReport {
        let mut report = ValidationReport::new();
        Self::validate_logging_config(&config.logging, &mut report);
        report
    }

    fn validate_logging_config(logging: &LoggingConfig, report: &mut ValidationReport) {
        let level = logging.level.to_lowercase();
        if !KNOWN_LEVELS.contains(&level.as_str()) {
            report.add_error(
                "logging.level",
                &format!("unknown log level: {}", logging.level),
            );
        }

        if logging.file.enabled {
            if logging.file.directory.trim().is_empty() {
                report.add_error(
                    "logging.file.directory",
                    "file logging is enabled but no directory is set",
                );
            }
            if logging.file.prefix.trim().is_empty() {
                report.add_warning("logging.file.prefix", "empty log file prefix");
            }
        }
    }
}

/// Validation report
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, field: &str, message: &str) {
        self.errors.push(ValidationIssue {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn add_warning(&mut self, field: &str, message: &str) {
        self.warnings.push(ValidationIssue {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}
