//! Layered configuration loading.
//!
//! Resolves `ResolutionPrefs` defaults and registry search paths from,
//! in ascending priority: built-in defaults, `wheelwright.json` in the
//! platform config directory, `WHEELWRIGHT_*` environment variables,
//! and finally CLI flags.

pub mod env;
pub mod error;
pub mod loader;
pub mod types;
pub mod validate;

pub use env::{EnvConfig, WheelwrightEnvVar};
pub use error::{ConfigError, Result};
pub use loader::{CliOverrides, ConfigLoader};
pub use types::{FileConfig, ResolvedConfig};
pub use validate::{Severity, ValidationIssue, ValidationResult, Validator};
