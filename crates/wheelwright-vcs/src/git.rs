//! Git operations via the `git` CLI.
//!
//! Shelling out rather than binding to a native git library keeps
//! clone semantics (shallow depth, credential helpers, protocol
//! negotiation) identical to whatever `git` the host already has
//! configured.

use crate::error::{Result, VcsError};
use crate::types::{CloneOptions, CloneResult, VcsRef, VcsType};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info, trace};

/// Clone a git repository, optionally checking out a specific ref.
///
/// # Errors
/// Returns `VcsError::CloneFailed` (or a more specific variant) if the
/// subprocess reports failure.
pub fn clone(url: &str, dest: &Path, reference: Option<&VcsRef>, options: &CloneOptions) -> Result<CloneResult> {
    debug!(url, dest = ?dest, reference = ?reference, "cloning git repository");

    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent).map_err(|e| VcsError::io(parent, e))?;
    }

    let mut cmd = Command::new("git");
    cmd.arg("clone");

    if let Some(depth) = options.depth {
        cmd.arg("--depth").arg(depth.to_string());
    }
    if options.single_branch {
        cmd.arg("--single-branch");
    }
    match reference {
        Some(VcsRef::Branch(branch)) | Some(VcsRef::Tag(branch)) => {
            cmd.arg("--branch").arg(branch);
        }
        Some(VcsRef::Commit(_) | VcsRef::Default) | None => {}
    }
    cmd.env("GIT_PROTOCOL", "version=2");
    cmd.arg(url);
    cmd.arg(dest);

    trace!(command = ?cmd, "executing git clone");
    let output = run(cmd, "git clone")?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(parse_git_error(&stderr, url.to_string()));
    }

    if let Some(VcsRef::Commit(sha)) = reference {
        checkout_commit(dest, sha)?;
    }

    let commit = head_commit(dest)?;
    info!(url, commit, "git clone complete");

    Ok(CloneResult {
        path: dest.to_path_buf(),
        commit,
        vcs_type: VcsType::Git,
        reference: reference.cloned().unwrap_or_default(),
    })
}

fn checkout_commit(repo_path: &Path, sha: &str) -> Result<()> {
    let fetch = Command::new("git")
        .current_dir(repo_path)
        .args(["fetch", "--depth", "1", "origin", sha])
        .output();
    if fetch.is_err() || !fetch.expect("checked").status.success() {
        let _ = Command::new("git")
            .current_dir(repo_path)
            .args(["fetch", "--unshallow"])
            .output();
    }

    let output = run(
        {
            let mut cmd = Command::new("git");
            cmd.current_dir(repo_path).args(["checkout", sha]);
            cmd
        },
        "git checkout",
    )?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(VcsError::CheckoutFailed {
            reference: sha.to_string(),
            reason: stderr.to_string(),
        });
    }
    Ok(())
}

/// Check out an additional ref in an already-cloned repository.
///
/// # Errors
/// Returns `VcsError::CheckoutFailed` on subprocess failure.
pub fn checkout(repo_path: &Path, reference: &VcsRef) -> Result<()> {
    debug!(?reference, "git checkout");
    match reference {
        VcsRef::Commit(sha) => checkout_commit(repo_path, sha),
        VcsRef::Branch(name) | VcsRef::Tag(name) => {
            let output = run(
                {
                    let mut cmd = Command::new("git");
                    cmd.current_dir(repo_path).args(["checkout", name]);
                    cmd
                },
                "git checkout",
            )?;
            if !output.status.success() {
                let stderr = String::from_utf8_lossy(&output.stderr);
                return Err(VcsError::CheckoutFailed {
                    reference: name.clone(),
                    reason: stderr.to_string(),
                });
            }
            Ok(())
        }
        VcsRef::Default => Ok(()),
    }
}

/// Get the current HEAD commit of a checkout.
///
/// # Errors
/// Returns `VcsError::Git` if `rev-parse` fails.
pub fn head_commit(repo_path: &Path) -> Result<String> {
    let output = run(
        {
            let mut cmd = Command::new("git");
            cmd.current_dir(repo_path).args(["rev-parse", "HEAD"]);
            cmd
        },
        "git rev-parse HEAD",
    )?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(VcsError::git(format!("failed to get HEAD: {stderr}")));
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Whether `path` looks like a git checkout.
#[must_use]
pub fn is_repository(path: &Path) -> bool {
    path.join(".git").exists() || (path.join("HEAD").exists() && path.join("objects").exists())
}

fn run(mut cmd: Command, label: &str) -> Result<std::process::Output> {
    cmd.output().map_err(|e| VcsError::Command {
        command: label.to_string(),
        message: e.to_string(),
        exit_code: None,
    })
}

fn parse_git_error(stderr: &str, url: String) -> VcsError {
    let stderr_lower = stderr.to_lowercase();

    if stderr_lower.contains("repository not found")
        || stderr_lower.contains("does not exist")
        || stderr_lower.contains("not found")
    {
        return VcsError::RepositoryNotFound { url };
    }

    let retryable = stderr_lower.contains("network")
        || stderr_lower.contains("connection")
        || stderr_lower.contains("temporary")
        || stderr_lower.contains("timeout");

    VcsError::CloneFailed {
        url,
        reason: stderr.to_string(),
        retryable,
    }
}

/// Locate the sub-directory holding the buildable project within a
/// clone, honoring the registry's declared `subDir`.
#[must_use]
pub fn resolve_sub_dir(checkout_root: &Path, sub_dir: Option<&str>) -> PathBuf {
    match sub_dir {
        Some(sub) => checkout_root.join(sub),
        None => checkout_root.to_path_buf(),
    }
}
