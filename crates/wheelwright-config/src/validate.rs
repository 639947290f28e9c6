//! Configuration validation with descriptive issues.

use crate::error::{ConfigError, Result};
use crate::types::ResolvedConfig;

/// Validation severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Informational message.
    Info,
    /// Warning (may indicate issues).
    Warning,
    /// Error (must be fixed).
    Error,
}

/// Validation issue.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Severity level.
    pub severity: Severity,
    /// Issue code for programmatic handling.
    pub code: &'static str,
    /// Field path (dot-notation).
    pub field: String,
    /// Human-readable message.
    pub message: String,
    /// Suggested fix.
    pub hint: Option<String>,
}

impl ValidationIssue {
    /// Create a new error.
    #[must_use]
    pub fn error(code: &'static str, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            field: field.into(),
            message: message.into(),
            hint: None,
        }
    }

    /// Create a new warning.
    #[must_use]
    pub fn warning(
        code: &'static str,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            field: field.into(),
            message: message.into(),
            hint: None,
        }
    }

    /// Add a hint to the issue.
    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Validation result containing all issues.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// All validation issues.
    pub issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Create a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an issue.
    pub fn add(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    /// Check if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Error)
    }

    /// Error count.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    /// Warning count.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }

    /// Convert to a result, failing if there are errors.
    ///
    /// # Errors
    /// Returns `ConfigError::Other` summarizing the errors if any are present.
    pub fn into_result(self) -> Result<()> {
        if self.has_errors() {
            let errors: Vec<String> = self
                .issues
                .iter()
                .filter(|i| i.severity == Severity::Error)
                .map(|i| format!("{}: {}", i.field, i.message))
                .collect();
            Err(ConfigError::Other(format!(
                "configuration validation failed with {} error(s): {}",
                errors.len(),
                errors.join("; ")
            )))
        } else {
            Ok(())
        }
    }
}

const KNOWN_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Validates a fully resolved configuration.
#[derive(Debug, Default)]
pub struct Validator;

impl Validator {
    /// Create a new validator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Validate a resolved configuration.
    ///
    /// Registry paths that don't exist on disk are reported as
    /// warnings, not errors — a registry search path pointing at a
    /// not-yet-created directory is valid (the compound registry
    /// simply finds nothing there).
    #[must_use]
    pub fn validate(&self, config: &ResolvedConfig) -> ValidationResult {
        let mut result = ValidationResult::new();

        for (i, path) in config.registry_paths.iter().enumerate() {
            if !path.exists() {
                result.add(
                    ValidationIssue::warning(
                        "registry_path.missing",
                        format!("registryPaths[{i}]"),
                        format!("'{}' does not exist", path.display()),
                    )
                    .with_hint("check the path or remove the entry"),
                );
            }
        }

        let level = config
            .log_level
            .split(',')
            .next()
            .unwrap_or(&config.log_level)
            .split('=')
            .next_back()
            .unwrap_or(&config.log_level);
        if !KNOWN_LOG_LEVELS.contains(&level) {
            result.add(
                ValidationIssue::warning(
                    "log_level.unrecognized",
                    "logLevel",
                    format!("'{level}' is not a standard tracing level"),
                )
                .with_hint("use one of error, warn, info, debug, trace"),
            );
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn missing_registry_path_is_a_warning_not_an_error() {
        let config = ResolvedConfig {
            registry_paths: vec![PathBuf::from("/does/not/exist.tsv")],
            ..ResolvedConfig::default()
        };
        let result = Validator::new().validate(&config);
        assert!(!result.has_errors());
        assert_eq!(result.warning_count(), 1);
    }

    #[test]
    fn default_config_validates_cleanly() {
        let result = Validator::new().validate(&ResolvedConfig::default());
        assert!(!result.has_errors());
    }

    #[test]
    fn unrecognized_log_level_warns() {
        let config = ResolvedConfig {
            log_level: "verbose".to_string(),
            ..ResolvedConfig::default()
        };
        let result = Validator::new().validate(&config);
        assert_eq!(result.warning_count(), 1);
    }
}
