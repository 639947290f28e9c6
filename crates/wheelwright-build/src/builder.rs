//! Top-level wheel-building entry point (C4): resolve which path
//! applies to a fetched source tree and invoke it.
//!
//! The hook protocol is the default path for anything with a
//! `[build-system]` declaration, or a bare `setup.py` under a
//! setuptools new enough to answer the hook calls itself. If the hook
//! invocation fails and a `setup.py` is present, this falls back to
//! the legacy `bdist_wheel` path before giving up.

use crate::hook;
use crate::legacy;
use std::path::{Path, PathBuf};
use wheelwright_core::Result;

/// Build a wheel from `source_dir` into `out_dir`.
///
/// `extra_import_path` is made importable to the build process for the
/// duration of the call — typically the directories a package's build
/// dependencies were fetched into but not yet installed anywhere
/// permanent (see [`crate::scoped_path::ScopedImportPath`]).
///
/// # Errors
/// Returns `Error::MetadataMissing` if neither a `[build-system]`
/// declaration nor a `setup.py` is present, and `Error::BuildFailed` if
/// every path that does apply fails.
pub fn build_wheel(
    source_dir: &Path,
    out_dir: &Path,
    extra_import_path: &[PathBuf],
) -> Result<PathBuf> {
    let backend = hook::resolve_backend(source_dir)?;

    match hook::build_wheel(source_dir, out_dir, &backend, extra_import_path) {
        Ok(wheel) => Ok(wheel),
        Err(hook_err) => {
            if source_dir.join("setup.py").exists() {
                tracing::warn!(
                    source_dir = ?source_dir,
                    error = %hook_err,
                    "build_wheel hook failed, falling back to legacy bdist_wheel"
                );
                legacy::build_wheel_legacy(source_dir, out_dir, extra_import_path)
            } else {
                Err(hook_err)
            }
        }
    }
}
