//! The PEP 517 build-backend hook protocol: reads the backend
//! identifier from `pyproject.toml` and invokes its `build_wheel` hook
//! in a subprocess, with `extraImportPath` made importable only for
//! the duration of the call.

use crate::scoped_path::ScopedImportPath;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;
use wheelwright_core::{Error, Result};
use wheelwright_metadata::extractor::read_pyproject;

/// The build backend a hook call targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendSpec {
    /// Dotted module:object identifier, e.g. `setuptools.build_meta`.
    pub build_backend: String,
    /// Extra `sys.path` entries the backend itself lives on.
    pub backend_path: Vec<String>,
}

/// Determine which backend to invoke for `source_dir`: the declared
/// `[build-system]` backend if present, else `setuptools.build_meta`
/// iff a legacy `setup.py` exists.
///
/// # Errors
/// Returns `Error::MetadataMissing` if neither is present.
pub fn resolve_backend(source_dir: &Path) -> Result<BackendSpec> {
    if let Some(build_system) = read_pyproject(source_dir)?.and_then(|doc| doc.build_system) {
        if let Some(backend) = build_system.build_backend {
            return Ok(BackendSpec {
                build_backend: backend,
                backend_path: build_system.backend_path,
            });
        }
    }

    if source_dir.join("setup.py").exists() {
        return Ok(BackendSpec {
            build_backend: "setuptools.build_meta".to_string(),
            backend_path: Vec::new(),
        });
    }

    Err(Error::metadata_missing(source_dir))
}

/// Invoke the backend's `build_wheel` hook, producing a wheel in
/// `out_dir`. `extra_import_path` is prepended to `PYTHONPATH` only
/// for the duration of this call (see [`ScopedImportPath`]).
///
/// # Errors
/// Returns `Error::BuildFailed` if the subprocess exits non-zero or
/// the hook doesn't report a wheel filename.
pub fn build_wheel(
    source_dir: &Path,
    out_dir: &Path,
    backend: &BackendSpec,
    extra_import_path: &[PathBuf],
) -> Result<PathBuf> {
    std::fs::create_dir_all(out_dir).map_err(|e| Error::io(out_dir, e))?;

    let mut import_path = extra_import_path.to_vec();
    import_path.push(source_dir.to_path_buf());
    for extra in &backend.backend_path {
        import_path.push(source_dir.join(extra));
    }
    let _scoped = ScopedImportPath::new(&import_path);

    let script = build_wheel_script(&backend.build_backend, out_dir);
    debug!(backend = %backend.build_backend, source_dir = ?source_dir, "invoking build_wheel hook");

    let output = Command::new("python3")
        .arg("-c")
        .arg(&script)
        .current_dir(source_dir)
        .output()
        .map_err(|e| Error::build_failed(source_dir, format!("failed to spawn python3: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::build_failed(source_dir, stderr.into_owned()));
    }

    let filename = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if filename.is_empty() {
        return Err(Error::build_failed(
            source_dir,
            "build_wheel hook produced no filename",
        ));
    }

    Ok(out_dir.join(filename))
}

fn build_wheel_script(build_backend: &str, out_dir: &Path) -> String {
    let (module, object) = build_backend
        .split_once(':')
        .unwrap_or((build_backend, "build_wheel"));
    format!(
        "import {module}\nprint({module}.{object}({out_dir:?}, {{}}))",
        module = module,
        object = object,
        out_dir = out_dir.to_string_lossy(),
    )
}
