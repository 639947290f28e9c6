//! Mercurial (hg) operations via the `hg` CLI.
//!
//! Mercurial's clone protocol has no shallow-depth equivalent to
//! git's `--depth`; a depth request is accepted and ignored, with a
//! one-time warning, rather than rejected.

use crate::error::{Result, VcsError};
use crate::types::{CloneOptions, CloneResult, VcsRef, VcsType};
use std::path::Path;
use std::process::Command;
use std::sync::Once;
use tracing::{debug, info, warn};

static DEPTH_WARNING: Once = Once::new();

/// Clone a Mercurial repository, optionally checking out a specific ref.
///
/// # Errors
/// Returns `VcsError::CloneFailed` (or a more specific variant) if the
/// subprocess reports failure.
pub fn clone(url: &str, dest: &Path, reference: Option<&VcsRef>, options: &CloneOptions) -> Result<CloneResult> {
    debug!(url, dest = ?dest, reference = ?reference, "cloning hg repository");

    if options.depth.is_some() {
        DEPTH_WARNING.call_once(|| {
            warn!("mercurial has no shallow-clone protocol; ignoring requested depth");
        });
    }

    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent).map_err(|e| VcsError::io(parent, e))?;
    }

    let mut cmd = Command::new("hg");
    cmd.arg("clone");
    if let Some(reference) = reference {
        cmd.arg("--updaterev").arg(reference.as_str());
    }
    cmd.arg(url);
    cmd.arg(dest);

    let output = run(cmd, "hg clone")?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(parse_hg_error(&stderr, url.to_string()));
    }

    let commit = head_commit(dest)?;
    info!(url, commit, "hg clone complete");

    Ok(CloneResult {
        path: dest.to_path_buf(),
        commit,
        vcs_type: VcsType::Hg,
        reference: reference.cloned().unwrap_or_default(),
    })
}

/// Get the current tip commit hash of a checkout.
///
/// # Errors
/// Returns `VcsError::Mercurial` if `hg identify` fails.
pub fn head_commit(repo_path: &Path) -> Result<String> {
    let output = run(
        {
            let mut cmd = Command::new("hg");
            cmd.current_dir(repo_path).args(["identify", "--id"]);
            cmd
        },
        "hg identify",
    )?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(VcsError::Mercurial {
            message: format!("failed to identify checkout: {stderr}"),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Whether `path` looks like an hg checkout.
#[must_use]
pub fn is_repository(path: &Path) -> bool {
    path.join(".hg").exists()
}

fn run(mut cmd: Command, label: &str) -> Result<std::process::Output> {
    cmd.output().map_err(|e| VcsError::Command {
        command: label.to_string(),
        message: e.to_string(),
        exit_code: None,
    })
}

fn parse_hg_error(stderr: &str, url: String) -> VcsError {
    let stderr_lower = stderr.to_lowercase();
    if stderr_lower.contains("not found") || stderr_lower.contains("404") {
        return VcsError::RepositoryNotFound { url };
    }
    let retryable = stderr_lower.contains("network") || stderr_lower.contains("timed out");
    VcsError::CloneFailed {
        url,
        reason: stderr.to_string(),
        retryable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_not_repository_for_empty_dir() {
        let temp = tempfile::tempdir().unwrap();
        assert!(!is_repository(temp.path()));
    }

    #[test]
    fn parse_hg_error_not_found() {
        let err = parse_hg_error("abort: HTTP Error 404: Not Found", "url".to_string());
        assert!(matches!(err, VcsError::RepositoryNotFound { .. }));
    }
}
