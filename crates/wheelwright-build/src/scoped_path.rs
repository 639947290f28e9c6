//! Scoped mutation of the process-wide module search path variable
//! (`PYTHONPATH`), mirroring `WithPythonPath`: the build backend needs
//! its build dependencies importable, but those dependencies may have
//! just been fetched and not yet installed anywhere permanent, so the
//! extra directories are only visible for the duration of one build.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

const PYTHONPATH: &str = "PYTHONPATH";

/// `std::env::set_var`/`remove_var` are `unsafe` because mutating the
/// process environment races with concurrent reads on other threads.
/// The pipeline this guard is scoped to is single-threaded and
/// synchronous end to end (§5 Concurrency & Resource Model), so no
/// such race is reachable here.
#[allow(unsafe_code)]
fn set_pythonpath(value: &std::ffi::OsStr) {
    unsafe { std::env::set_var(PYTHONPATH, value) }
}

#[allow(unsafe_code)]
fn clear_pythonpath() {
    unsafe { std::env::remove_var(PYTHONPATH) }
}

/// An RAII guard that prepends directories to `PYTHONPATH` for its
/// lifetime and restores the exact prior value on drop, including when
/// unwinding from a panic.
#[derive(Debug)]
pub struct ScopedImportPath {
    previous: Option<OsString>,
}

impl ScopedImportPath {
    /// Snapshot the current `PYTHONPATH` and prepend `dirs`,
    /// deduplicated and order-preserving.
    #[must_use]
    pub fn new(dirs: &[PathBuf]) -> Self {
        let previous = std::env::var_os(PYTHONPATH);
        if dirs.is_empty() {
            return Self { previous };
        }

        let mut seen = std::collections::HashSet::new();
        let mut combined: Vec<PathBuf> = Vec::new();
        for dir in dirs {
            if seen.insert(dir.clone()) {
                combined.push(dir.clone());
            }
        }
        if let Some(existing) = &previous {
            for part in std::env::split_paths(existing) {
                if seen.insert(part.clone()) {
                    combined.push(part);
                }
            }
        }

        let joined = std::env::join_paths(&combined).unwrap_or_default();
        set_pythonpath(&joined);

        Self { previous }
    }

    /// The directories currently visible, for diagnostics/tests.
    #[must_use]
    pub fn current() -> Vec<PathBuf> {
        std::env::var_os(PYTHONPATH)
            .map(|v| std::env::split_paths(&v).collect())
            .unwrap_or_default()
    }
}

impl Drop for ScopedImportPath {
    fn drop(&mut self) {
        match self.previous.take() {
            Some(value) => set_pythonpath(&value),
            None => clear_pythonpath(),
        }
    }
}
