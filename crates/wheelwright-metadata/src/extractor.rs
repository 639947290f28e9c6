//! Metadata-extractor dispatch (C3).
//!
//! Tried in order:
//! 1. Standard project metadata: a `pyproject.toml` carrying both
//!    `[project]` and `[build-system]` — name and run-time deps come
//!    from the project table, build deps from `build-system.requires`.
//! 2. Build-system only: a `pyproject.toml` with `[build-system]` but
//!    no `[project]` — name and run-time deps come from a
//!    backend-specific extractor keyed on the first dotted component
//!    of `build-backend`; build deps still come from `requires`.
//! 3. No usable `pyproject.toml`: fall back to the `setuptools`
//!    dialect (`setup.cfg`, then `setup.py`).
//!
//! Every requirement that comes out, regardless of path, is passed
//! through the unpinner (C8) before being returned.

use crate::extracted::ExtractedMetadata;
use crate::pyproject::{self, PyProjectToml};
use crate::requirement_parse::parse_requirement;
use crate::setuptools;
use crate::unpin::unpin_all;
use std::path::{Path, PathBuf};
use wheelwright_core::{Error, PackageName, Requirement, Result};

const PYPROJECT_FILENAME: &str = "pyproject.toml";

/// Extract build/runtime metadata from a fetched source tree.
///
/// # Errors
/// Returns `Error::MetadataMissing` if nothing usable is found, and
/// `Error::MetadataMalformed` / `Error::InvalidName` if something is
/// found but cannot be interpreted.
pub fn extract_metadata(source_dir: &Path) -> Result<ExtractedMetadata> {
    if let Some(doc) = read_pyproject(source_dir)? {
        if let Some(metadata) = try_extract_from_pyproject(&doc, source_dir)? {
            return finish(metadata);
        }
    }

    finish(setuptools::extract(source_dir)?)
}

/// Read and parse `pyproject.toml` out of `source_dir`, if present.
///
/// Returns `Ok(None)` both when the file is absent and when it exists
/// but fails to parse — either way the caller falls back to the next
/// extractor in the chain, so a parse failure is logged, not returned
/// as an error.
pub fn read_pyproject(source_dir: &Path) -> Result<Option<PyProjectToml>> {
    let pyproject_path = source_dir.join(PYPROJECT_FILENAME);
    let Ok(text) = std::fs::read_to_string(&pyproject_path) else {
        return Ok(None);
    };
    match pyproject::parse(&text) {
        Ok(doc) => Ok(Some(doc)),
        Err(e) => {
            tracing::warn!(
                path = %pyproject_path.display(),
                error = %e,
                "pyproject.toml present but unparsable, falling back to setuptools"
            );
            Ok(None)
        }
    }
}

fn finish(metadata: ExtractedMetadata) -> Result<ExtractedMetadata> {
    if !PackageName::is_valid(metadata.name.as_str()) {
        return Err(Error::invalid_name(metadata.name.as_str()));
    }
    Ok(ExtractedMetadata {
        name: metadata.name,
        build_deps: unpin_all(&metadata.build_deps),
        deps: unpin_all(&metadata.deps),
    })
}

/// Returns `Ok(None)` when this document doesn't resolve to anything
/// (no `[project]` and no recognized/backend-only table), signaling
/// the caller should fall through to the setuptools dialect.
fn try_extract_from_pyproject(doc: &PyProjectToml, source_dir: &Path) -> Result<Option<ExtractedMetadata>> {
    let build_deps = doc
        .build_system
        .as_ref()
        .map(|bs| parse_requirement_list(&bs.requires))
        .unwrap_or_default();

    if let Some(project) = &doc.project {
        let Some(name) = &project.name else {
            return Ok(None);
        };
        let deps = parse_requirement_list(&project.dependencies);
        return Ok(Some(ExtractedMetadata {
            name: PackageName::new(name),
            build_deps,
            deps,
        }));
    }

    let Some(build_system) = &doc.build_system else {
        return Ok(None);
    };
    let Some(backend_family) = build_system.backend_family() else {
        return Ok(None);
    };

    let (name, deps) = match backend_family {
        // No [project] table and the backend is plain setuptools: name
        // and runtime deps still come from the setuptools dialect
        // (setup.cfg / setup.py), but build deps keep coming from
        // build-system.requires rather than whatever the legacy
        // dialect would derive (setup_requires / setup.cfg), matching
        // every other branch here.
        "setuptools" => {
            let delegated = setuptools::extract(source_dir)?;
            return Ok(Some(ExtractedMetadata {
                name: delegated.name,
                build_deps,
                deps: delegated.deps,
            }));
        }
        "flit_core" => extract_flit(doc)?,
        "poetry" => extract_poetry(doc)?,
        "pdm" => extract_pdm(doc)?,
        _ => return Ok(None),
    };

    Ok(Some(ExtractedMetadata {
        name,
        build_deps,
        deps,
    }))
}

fn extract_flit(doc: &PyProjectToml) -> Result<(PackageName, Vec<Requirement>)> {
    let metadata = doc
        .tool
        .as_ref()
        .and_then(|t| t.flit.as_ref())
        .and_then(|f| f.metadata.as_ref())
        .ok_or_else(|| pyproject_malformed("missing [tool.flit.metadata]"))?;
    metadata
        .dist_name
        .clone()
        .or_else(|| metadata.module.clone())
        .ok_or_else(|| {
            pyproject_malformed("tool.flit.metadata has neither dist-name nor module")
        })?;
    // Name resolves; deps do not, so the whole extraction still fails here.
    Err(pyproject_malformed(
        "flit_core exposes no runtime dependency list to a build-backend-only extractor",
    ))
}

fn extract_poetry(doc: &PyProjectToml) -> Result<(PackageName, Vec<Requirement>)> {
    let poetry = doc
        .tool
        .as_ref()
        .and_then(|t| t.poetry.as_ref())
        .ok_or_else(|| pyproject_malformed("missing [tool.poetry]"))?;
    let name = poetry
        .name
        .clone()
        .ok_or_else(|| pyproject_malformed("tool.poetry has no name"))?;
    let mut keys: Vec<&String> = poetry
        .dependencies
        .keys()
        .filter(|k| k.as_str() != "python")
        .collect();
    keys.sort();
    let deps = keys.into_iter().map(|k| Requirement::new(k.as_str())).collect();
    Ok((PackageName::new(name), deps))
}

fn extract_pdm(doc: &PyProjectToml) -> Result<(PackageName, Vec<Requirement>)> {
    let pdm = doc
        .tool
        .as_ref()
        .and_then(|t| t.pdm.as_ref())
        .ok_or_else(|| pyproject_malformed("missing [tool.pdm]"))?;
    pdm.name
        .clone()
        .ok_or_else(|| pyproject_malformed("tool.pdm has no name"))?;
    Err(pyproject_malformed(
        "pdm exposes no runtime dependency list to a build-backend-only extractor",
    ))
}

fn pyproject_malformed(cause: impl Into<String>) -> Error {
    Error::metadata_malformed(PathBuf::from(PYPROJECT_FILENAME), cause)
}

fn parse_requirement_list(raw: &[String]) -> Vec<Requirement> {
    raw.iter()
        .filter_map(|s| match parse_requirement(s) {
            Ok(req) => Some(req),
            Err(e) => {
                tracing::warn!(raw = %s, error = %e, "skipping unparsable requirement string");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn standard_project_metadata_wins_when_present() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("pyproject.toml"),
            r#"
[build-system]
requires = ["setuptools>=61", "wheel"]
build-backend = "setuptools.build_meta"

[project]
name = "Left_Pad"
dependencies = ["six>=1.0"]
"#,
        )
        .unwrap();
        let metadata = extract_metadata(dir.path()).unwrap();
        assert_eq!(metadata.name.as_str(), "left-pad");
        assert_eq!(metadata.build_deps.len(), 2);
        assert_eq!(metadata.deps.len(), 1);
        // unpinned: specifier cleared
        assert!(metadata.deps[0].specifier.as_ref().unwrap().is_any());
    }

    #[test]
    fn poetry_backend_only_falls_through_to_tool_table() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("pyproject.toml"),
            r#"
[build-system]
requires = ["poetry-core"]
build-backend = "poetry.core.masonry.api"

[tool.poetry]
name = "left-pad"

[tool.poetry.dependencies]
python = "^3.8"
requests = "^2.0"
"#,
        )
        .unwrap();
        let metadata = extract_metadata(dir.path()).unwrap();
        assert_eq!(metadata.name.as_str(), "left-pad");
        assert_eq!(metadata.deps.len(), 1);
        assert_eq!(metadata.deps[0].name.as_str(), "requests");
    }

    #[test]
    fn flit_backend_only_reports_malformed_deps() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("pyproject.toml"),
            r#"
[build-system]
requires = ["flit_core"]
build-backend = "flit_core.buildapi"

[tool.flit.metadata]
module = "leftpad"
"#,
        )
        .unwrap();
        assert!(extract_metadata(dir.path()).is_err());
    }

    #[test]
    fn setuptools_backend_only_keeps_build_deps_from_pyproject_requires() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("pyproject.toml"),
            r#"
[build-system]
requires = ["setuptools>=61", "wheel"]
build-backend = "setuptools.build_meta"
"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("setup.cfg"),
            "[metadata]\nname = left-pad\n\n[options]\ninstall_requires =\n    six\nsetup_requires =\n    some-legacy-shim\n",
        )
        .unwrap();
        let metadata = extract_metadata(dir.path()).unwrap();
        assert_eq!(metadata.name.as_str(), "left-pad");
        assert_eq!(metadata.deps.len(), 1);
        // build deps come from [build-system].requires, not setup.cfg's setup_requires.
        let build_dep_names: Vec<_> = metadata.build_deps.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(build_dep_names, vec!["setuptools", "wheel"]);
    }

    #[test]
    fn no_pyproject_falls_back_to_setup_cfg() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("setup.cfg"),
            "[metadata]\nname = left-pad\n\n[options]\ninstall_requires =\n    six\n",
        )
        .unwrap();
        let metadata = extract_metadata(dir.path()).unwrap();
        assert_eq!(metadata.name.as_str(), "left-pad");
        assert_eq!(metadata.deps.len(), 1);
    }

    #[test]
    fn missing_everything_is_metadata_missing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(extract_metadata(dir.path()).is_err());
    }
}
