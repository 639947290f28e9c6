//! VCS error types with rich context for debugging and recovery.

use std::path::PathBuf;
use thiserror::Error;

/// VCS-specific error types with detailed context.
#[derive(Error, Debug)]
pub enum VcsError {
    /// Git operation failed.
    #[error("git error: {message}")]
    Git {
        /// Error message.
        message: String,
    },

    /// Mercurial operation failed.
    #[error("mercurial error: {message}")]
    Mercurial {
        /// Error message.
        message: String,
    },

    /// Clone operation failed.
    #[error("clone failed for {url}: {reason}")]
    CloneFailed {
        /// Repository URL.
        url: String,
        /// Failure reason.
        reason: String,
        /// Whether this error is retryable.
        retryable: bool,
    },

    /// Checkout failed.
    #[error("checkout failed for ref '{reference}': {reason}")]
    CheckoutFailed {
        /// Reference that failed.
        reference: String,
        /// Failure reason.
        reason: String,
    },

    /// Repository not found.
    #[error("repository not found: {url}")]
    RepositoryNotFound {
        /// Repository URL.
        url: String,
    },

    /// Not a repository.
    #[error("not a repository: {}", path.display())]
    NotRepository {
        /// Path that is not a repository.
        path: PathBuf,
    },

    /// IO error.
    #[error("io error at {}: {message}", path.display())]
    Io {
        /// File path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Command execution failed to even run.
    #[error("command '{command}' failed: {message}")]
    Command {
        /// Command that failed.
        command: String,
        /// Error message.
        message: String,
        /// Exit code if available.
        exit_code: Option<i32>,
    },

    /// VCS tool not available.
    #[error("{vcs_type} is not installed or not in PATH")]
    ToolNotAvailable {
        /// VCS type (git, hg).
        vcs_type: String,
    },
}

impl VcsError {
    /// Create a Git error from a message.
    #[must_use]
    pub fn git(message: impl Into<String>) -> Self {
        Self::Git {
            message: message.into(),
        }
    }

    /// Create an IO error.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// Check if this error is retryable.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::CloneFailed { retryable, .. } => *retryable,
            Self::Git { message } | Self::Mercurial { message } => {
                message.contains("network")
                    || message.contains("timeout")
                    || message.contains("connection")
                    || message.contains("temporary")
            }
            _ => false,
        }
    }

    /// Check if this is a "not found" error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::RepositoryNotFound { .. })
    }
}

impl From<std::io::Error> for VcsError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: PathBuf::new(),
            message: err.to_string(),
        }
    }
}

impl From<VcsError> for wheelwright_core::Error {
    fn from(err: VcsError) -> Self {
        Self::Vcs(err.to_string())
    }
}

/// Result type for VCS operations.
pub type Result<T> = std::result::Result<T, VcsError>;
