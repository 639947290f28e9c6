//! Error types for the wheelwright resolve/fetch/build/install pipeline.
//!
//! Each error has:
//! - A unique error code (e.g., E0201) for easy reference and searching
//! - A clear error message explaining what went wrong
//! - Suggestions for how to fix the issue

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Error codes for wheelwright errors, grouped by the pipeline stage that raises them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Registry errors (E01xx)
    /// Name not present in any leaf registry.
    E0101,
    /// Registry file could not be parsed.
    E0102,

    // Fetch errors (E02xx)
    /// Source-control subprocess failed.
    E0201,
    /// Registry named a fetcher the core cannot dispatch.
    E0202,

    // Metadata errors (E03xx)
    /// No build-system/project metadata found.
    E0301,
    /// Metadata present but malformed.
    E0302,
    /// Extracted name failed validation.
    E0303,
    /// Partial evaluator could not fold a referenced symbol.
    E0304,

    // Build errors (E04xx)
    /// Build-backend hook or legacy command failed.
    E0401,

    // Install errors (E05xx)
    /// Wheel installation failed.
    E0501,
    /// Uninstall of a previous distribution failed.
    E0502,

    // Bootstrap errors (E06xx)
    /// Self-bootstrapper detected unmet essential packages.
    E0601,

    // Ambient IO / config errors (E09xx)
    /// Filesystem error.
    E0901,
    /// Configuration error.
    E0902,
}

impl ErrorCode {
    /// Get the string representation of the error code.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::E0101 => "E0101",
            Self::E0102 => "E0102",
            Self::E0201 => "E0201",
            Self::E0202 => "E0202",
            Self::E0301 => "E0301",
            Self::E0302 => "E0302",
            Self::E0303 => "E0303",
            Self::E0304 => "E0304",
            Self::E0401 => "E0401",
            Self::E0501 => "E0501",
            Self::E0502 => "E0502",
            Self::E0601 => "E0601",
            Self::E0901 => "E0901",
            Self::E0902 => "E0902",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Wrapper to make `ErrorCode` usable as an `Error::source`.
#[derive(Debug)]
pub struct ErrorCodeSource(pub ErrorCode);

impl fmt::Display for ErrorCodeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ErrorCodeSource {}

/// The pipeline-wide error type.
#[derive(Error, Debug)]
pub enum Error {
    /// No leaf registry contained the name.
    #[error("[{code}] package '{name}' not found in any registry")]
    RegistryNotFound {
        /// Error code.
        #[source]
        code: ErrorCodeSource,
        /// Requested package name (canonical form).
        name: String,
        /// Suggestions for fixing.
        suggestions: Vec<String>,
    },

    /// A registry TSV file could not be parsed.
    #[error("[{code}] malformed registry record in {path}: {message}")]
    RegistryMalformed {
        /// Error code.
        #[source]
        code: ErrorCodeSource,
        /// Registry file path.
        path: PathBuf,
        /// Parse failure message.
        message: String,
        /// Suggestions for fixing.
        suggestions: Vec<String>,
    },

    /// Source control subprocess failed.
    #[error("[{code}] fetch of {uri} failed (exit {exit_code:?}): {stderr}")]
    FetchFailed {
        /// Error code.
        #[source]
        code: ErrorCodeSource,
        /// Source repository URI.
        uri: String,
        /// Subprocess exit code, if it ran at all.
        exit_code: Option<i32>,
        /// Captured stderr.
        stderr: String,
        /// Suggestions for fixing.
        suggestions: Vec<String>,
    },

    /// Registry named a fetcher the core cannot dispatch.
    #[error("[{code}] unsupported fetcher for {name}: {fetcher}")]
    UnsupportedFetcher {
        /// Error code.
        #[source]
        code: ErrorCodeSource,
        /// Package name.
        name: String,
        /// The unsupported fetcher token.
        fetcher: String,
        /// Suggestions for fixing.
        suggestions: Vec<String>,
    },

    /// Source tree has no extractable metadata.
    #[error("[{code}] no metadata found in {path}")]
    MetadataMissing {
        /// Error code.
        #[source]
        code: ErrorCodeSource,
        /// Source directory that was scanned.
        path: PathBuf,
        /// Suggestions for fixing.
        suggestions: Vec<String>,
    },

    /// Source tree has metadata but it could not be interpreted.
    #[error("[{code}] malformed metadata in {path}: {cause}")]
    MetadataMalformed {
        /// Error code.
        #[source]
        code: ErrorCodeSource,
        /// Source directory.
        path: PathBuf,
        /// Underlying cause.
        cause: String,
        /// Suggestions for fixing.
        suggestions: Vec<String>,
    },

    /// An extracted name failed the `^[\w.-]+$` check.
    #[error("[{code}] invalid package name: {name}")]
    InvalidName {
        /// Error code.
        #[source]
        code: ErrorCodeSource,
        /// The invalid name.
        name: String,
        /// Suggestions for fixing.
        suggestions: Vec<String>,
    },

    /// The partial evaluator needed a symbol it could not fold.
    #[error("[{code}] could not fold setup.py reference to `{var_name}` without it")]
    PartialEvaluationInsufficient {
        /// Error code.
        #[source]
        code: ErrorCodeSource,
        /// Name of the unresolved free variable.
        var_name: String,
        /// Suggestions for fixing.
        suggestions: Vec<String>,
    },

    /// Build-backend hook or legacy command failed.
    #[error("[{code}] build failed for {package_dir}: {output}")]
    BuildFailed {
        /// Error code.
        #[source]
        code: ErrorCodeSource,
        /// Directory that was being built.
        package_dir: PathBuf,
        /// Captured build output.
        output: String,
        /// Suggestions for fixing.
        suggestions: Vec<String>,
    },

    /// A wheel could not be installed.
    #[error("[{code}] failed to install {wheel}: {cause}")]
    InstallFailed {
        /// Error code.
        #[source]
        code: ErrorCodeSource,
        /// Wheel path.
        wheel: PathBuf,
        /// Underlying cause.
        cause: String,
        /// Suggestions for fixing.
        suggestions: Vec<String>,
    },

    /// A previously-installed distribution could not be removed.
    #[error("[{code}] failed to uninstall {name}: {cause}")]
    UninstallFailed {
        /// Error code.
        #[source]
        code: ErrorCodeSource,
        /// Distribution name.
        name: String,
        /// Underlying cause.
        cause: String,
        /// Suggestions for fixing.
        suggestions: Vec<String>,
    },

    /// Self-bootstrapper detected unmet essential packages.
    #[error("[{code}] bootstrap precondition failed, missing: {}", missing.join(", "))]
    BootstrapPrecondition {
        /// Error code.
        #[source]
        code: ErrorCodeSource,
        /// Missing essential packages.
        missing: Vec<String>,
        /// Suggestions for fixing.
        suggestions: Vec<String>,
    },

    /// Filesystem error with path context.
    #[error("[{code}] io error at {path}: {message}")]
    Io {
        /// Error code.
        #[source]
        code: ErrorCodeSource,
        /// File path.
        path: PathBuf,
        /// Error message.
        message: String,
        /// Suggestions for fixing.
        suggestions: Vec<String>,
    },

    /// Configuration error, wrapping `wheelwright-config`'s own error type.
    #[error("[{code}] configuration error: {message}")]
    Config {
        /// Error code.
        #[source]
        code: ErrorCodeSource,
        /// Error message.
        message: String,
        /// Suggestions for fixing.
        suggestions: Vec<String>,
    },

    /// VCS error, wrapping `wheelwright-vcs`'s own error type.
    #[error("[{code}] vcs error: {0}", code = ErrorCodeSource(ErrorCode::E0201))]
    Vcs(String),

    /// Archive extraction error.
    #[error("archive error: {0}")]
    Archive(String),
}

impl Error {
    /// Get the error code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::RegistryNotFound { code, .. }
            | Self::RegistryMalformed { code, .. }
            | Self::FetchFailed { code, .. }
            | Self::UnsupportedFetcher { code, .. }
            | Self::MetadataMissing { code, .. }
            | Self::MetadataMalformed { code, .. }
            | Self::InvalidName { code, .. }
            | Self::PartialEvaluationInsufficient { code, .. }
            | Self::BuildFailed { code, .. }
            | Self::InstallFailed { code, .. }
            | Self::UninstallFailed { code, .. }
            | Self::BootstrapPrecondition { code, .. }
            | Self::Io { code, .. }
            | Self::Config { code, .. } => code.0,
            Self::Vcs(_) => ErrorCode::E0201,
            Self::Archive(_) => ErrorCode::E0901,
        }
    }

    /// Get suggestions for fixing this error.
    #[must_use]
    pub fn suggestions(&self) -> &[String] {
        match self {
            Self::RegistryNotFound { suggestions, .. }
            | Self::RegistryMalformed { suggestions, .. }
            | Self::FetchFailed { suggestions, .. }
            | Self::UnsupportedFetcher { suggestions, .. }
            | Self::MetadataMissing { suggestions, .. }
            | Self::MetadataMalformed { suggestions, .. }
            | Self::InvalidName { suggestions, .. }
            | Self::PartialEvaluationInsufficient { suggestions, .. }
            | Self::BuildFailed { suggestions, .. }
            | Self::InstallFailed { suggestions, .. }
            | Self::UninstallFailed { suggestions, .. }
            | Self::BootstrapPrecondition { suggestions, .. }
            | Self::Io { suggestions, .. }
            | Self::Config { suggestions, .. } => suggestions,
            Self::Vcs(_) | Self::Archive(_) => &[],
        }
    }

    /// Create a registry-not-found error with suggestions.
    #[must_use]
    pub fn registry_not_found(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::RegistryNotFound {
            code: ErrorCodeSource(ErrorCode::E0101),
            suggestions: vec![
                "add the package to a registry TSV file".to_string(),
                "check the spelling against the registry's canonical form".to_string(),
            ],
            name,
        }
    }

    /// Create a fetch-failed error with suggestions.
    #[must_use]
    pub fn fetch_failed(
        uri: impl Into<String>,
        exit_code: Option<i32>,
        stderr: impl Into<String>,
    ) -> Self {
        Self::FetchFailed {
            code: ErrorCodeSource(ErrorCode::E0201),
            uri: uri.into(),
            exit_code,
            stderr: stderr.into(),
            suggestions: vec![
                "check network connectivity to the source repository".to_string(),
                "verify the refSpec/branch exists upstream".to_string(),
            ],
        }
    }

    /// Create an unsupported-fetcher error.
    #[must_use]
    pub fn unsupported_fetcher(name: impl Into<String>, fetcher: impl Into<String>) -> Self {
        Self::UnsupportedFetcher {
            code: ErrorCodeSource(ErrorCode::E0202),
            name: name.into(),
            fetcher: fetcher.into(),
            suggestions: vec!["supported fetchers are: git, hg, system".to_string()],
        }
    }

    /// Create a metadata-missing error.
    #[must_use]
    pub fn metadata_missing(path: impl Into<PathBuf>) -> Self {
        Self::MetadataMissing {
            code: ErrorCodeSource(ErrorCode::E0301),
            path: path.into(),
            suggestions: vec![
                "add a pyproject.toml with [project] or [build-system]".to_string(),
                "or add a setup.py / setup.cfg".to_string(),
            ],
        }
    }

    /// Create a metadata-malformed error.
    #[must_use]
    pub fn metadata_malformed(path: impl Into<PathBuf>, cause: impl Into<String>) -> Self {
        Self::MetadataMalformed {
            code: ErrorCodeSource(ErrorCode::E0302),
            path: path.into(),
            cause: cause.into(),
            suggestions: vec!["inspect the build-system/project declaration by hand".to_string()],
        }
    }

    /// Create an invalid-name error.
    #[must_use]
    pub fn invalid_name(name: impl Into<String>) -> Self {
        Self::InvalidName {
            code: ErrorCodeSource(ErrorCode::E0303),
            name: name.into(),
            suggestions: vec!["package names must match ^[\\w.-]+$".to_string()],
        }
    }

    /// Create a partial-evaluation-insufficient error.
    #[must_use]
    pub fn partial_evaluation_insufficient(var_name: impl Into<String>) -> Self {
        Self::PartialEvaluationInsufficient {
            code: ErrorCodeSource(ErrorCode::E0304),
            var_name: var_name.into(),
            suggestions: vec![
                "rewrite the setup.py metadata as static pyproject.toml fields".to_string(),
            ],
        }
    }

    /// Create a build-failed error.
    #[must_use]
    pub fn build_failed(package_dir: impl Into<PathBuf>, output: impl Into<String>) -> Self {
        Self::BuildFailed {
            code: ErrorCodeSource(ErrorCode::E0401),
            package_dir: package_dir.into(),
            output: output.into(),
            suggestions: vec!["re-run the build backend hook directly for full output".to_string()],
        }
    }

    /// Create an install-failed error.
    #[must_use]
    pub fn install_failed(wheel: impl Into<PathBuf>, cause: impl Into<String>) -> Self {
        Self::InstallFailed {
            code: ErrorCodeSource(ErrorCode::E0501),
            wheel: wheel.into(),
            cause: cause.into(),
            suggestions: vec!["check installation-scheme directory permissions".to_string()],
        }
    }

    /// Create an uninstall-failed error.
    #[must_use]
    pub fn uninstall_failed(name: impl Into<String>, cause: impl Into<String>) -> Self {
        Self::UninstallFailed {
            code: ErrorCodeSource(ErrorCode::E0502),
            name: name.into(),
            cause: cause.into(),
            suggestions: vec!["remove the distribution's files manually if it is orphaned".to_string()],
        }
    }

    /// Create a bootstrap-precondition error.
    #[must_use]
    pub fn bootstrap_precondition(missing: Vec<String>) -> Self {
        Self::BootstrapPrecondition {
            code: ErrorCodeSource(ErrorCode::E0601),
            suggestions: vec!["run `wheelwright bootstrap self` from a fresh checkout".to_string()],
            missing,
        }
    }

    /// Create an IO error with context.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        let path = path.into();
        let (code, suggestions) = match err.kind() {
            std::io::ErrorKind::NotFound => (
                ErrorCode::E0901,
                vec![format!("check if the path exists: {}", path.display())],
            ),
            std::io::ErrorKind::PermissionDenied => (
                ErrorCode::E0901,
                vec![format!("check permissions on: {}", path.display())],
            ),
            _ => (
                ErrorCode::E0901,
                vec![format!("check the file: {}", path.display())],
            ),
        };
        Self::Io {
            code: ErrorCodeSource(code),
            path,
            message: err.to_string(),
            suggestions,
        }
    }

    /// Create a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            code: ErrorCodeSource(ErrorCode::E0902),
            message: message.into(),
            suggestions: vec!["check wheelwright.json / WHEELWRIGHT_* environment variables".to_string()],
        }
    }

    /// Format the error with its suggestions appended, for a top-level CLI report.
    #[must_use]
    pub fn display_with_suggestions(&self) -> String {
        let mut output = format!("{self}");
        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str("\n\nSuggestions:");
            for suggestion in suggestions {
                output.push_str(&format!("\n  - {suggestion}"));
            }
        }
        output
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::io(PathBuf::new(), err)
    }
}

impl From<sonic_rs::Error> for Error {
    fn from(err: sonic_rs::Error) -> Self {
        Self::MetadataMalformed {
            code: ErrorCodeSource(ErrorCode::E0302),
            path: PathBuf::new(),
            cause: err.to_string(),
            suggestions: vec!["validate the JSON against its expected shape".to_string()],
        }
    }
}

/// Result type for wheelwright operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_not_found_has_suggestions() {
        let err = Error::registry_not_found("left-pad");
        assert_eq!(err.code(), ErrorCode::E0101);
        assert!(!err.suggestions().is_empty());
        assert!(err.to_string().contains("left-pad"));
    }

    #[test]
    fn display_with_suggestions_lists_bullets() {
        let err = Error::invalid_name("bad name!");
        let rendered = err.display_with_suggestions();
        assert!(rendered.contains("Suggestions:"));
        assert!(rendered.contains("^[\\w.-]+$"));
    }

    #[test]
    fn bootstrap_precondition_lists_missing() {
        let err = Error::bootstrap_precondition(vec!["setuptools".into(), "wheel".into()]);
        assert!(err.to_string().contains("setuptools, wheel"));
    }
}
