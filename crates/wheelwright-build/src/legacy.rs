//! The legacy build path: `python3 setup.py bdist_wheel` for source
//! trees that have a `setup.py` but no usable `[build-system]`
//! declaration for the hook protocol to dispatch on.

use crate::scoped_path::ScopedImportPath;
use std::path::{Path, PathBuf};
use std::process::Command;
use wheelwright_core::{Error, Result};

/// Invoke `setup.py bdist_wheel` with `out_dir` as its dist directory,
/// then resolve the wheel it produced by scanning `out_dir` for
/// exactly one `*.whl` file.
///
/// Unlike best-guessing the newest file in the directory, this refuses
/// to pick among several candidates: `BuildFailed` names every `.whl`
/// found rather than silently choosing one.
///
/// # Errors
/// Returns `Error::BuildFailed` if the subprocess exits non-zero, or
/// if `out_dir` doesn't contain exactly one `*.whl` file afterward.
pub fn build_wheel_legacy(
    source_dir: &Path,
    out_dir: &Path,
    extra_import_path: &[PathBuf],
) -> Result<PathBuf> {
    std::fs::create_dir_all(out_dir).map_err(|e| Error::io(out_dir, e))?;

    let _scoped = ScopedImportPath::new(extra_import_path);

    let output = Command::new("python3")
        .arg("setup.py")
        .arg("bdist_wheel")
        .arg("--dist-dir")
        .arg(out_dir)
        .current_dir(source_dir)
        .output()
        .map_err(|e| Error::build_failed(source_dir, format!("failed to spawn python3: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::build_failed(source_dir, stderr.into_owned()));
    }

    find_single_wheel(source_dir, out_dir)
}

fn find_single_wheel(source_dir: &Path, out_dir: &Path) -> Result<PathBuf> {
    let mut candidates: Vec<PathBuf> = std::fs::read_dir(out_dir)
        .map_err(|e| Error::io(out_dir, e))?
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|e| e.to_str()) == Some("whl"))
        .collect();
    candidates.sort();

    match candidates.len() {
        1 => Ok(candidates.into_iter().next().expect("length checked above")),
        0 => Err(Error::build_failed(
            source_dir,
            "bdist_wheel produced no .whl file in the output directory",
        )),
        _ => {
            let names: Vec<String> = candidates.iter().map(|p| p.display().to_string()).collect();
            Err(Error::build_failed(
                source_dir,
                format!(
                    "bdist_wheel produced multiple candidate wheels, refusing to guess: {}",
                    names.join(", ")
                ),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_wheel_is_build_failed() {
        let dir = tempfile::tempdir().unwrap();
        let err = find_single_wheel(dir.path(), dir.path()).unwrap_err();
        assert!(matches!(err, Error::BuildFailed { .. }));
    }

    #[test]
    fn single_wheel_resolves() {
        let dir = tempfile::tempdir().unwrap();
        let wheel = dir.path().join("left_pad-1.0-py3-none-any.whl");
        std::fs::write(&wheel, b"").unwrap();
        let found = find_single_wheel(dir.path(), dir.path()).unwrap();
        assert_eq!(found, wheel);
    }

    #[test]
    fn multiple_wheels_is_build_failed_not_a_guess() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a-1.0-py3-none-any.whl"), b"").unwrap();
        std::fs::write(dir.path().join("b-1.0-py3-none-any.whl"), b"").unwrap();
        let err = find_single_wheel(dir.path(), dir.path()).unwrap_err();
        assert!(matches!(err, Error::BuildFailed { .. }));
    }
}
