//! `pyproject.toml` parsing into the handful of tables this pipeline
//! reads: `[build-system]`, `[project]`, and the tool-specific tables
//! a build-backend-only document falls back to (`tool.poetry`,
//! `tool.flit`, `tool.pdm`).

use serde::Deserialize;
use std::collections::BTreeMap;

/// A parsed `pyproject.toml` document.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PyProjectToml {
    /// `[build-system]`.
    #[serde(rename = "build-system")]
    pub build_system: Option<BuildSystem>,
    /// `[project]` (PEP 621).
    pub project: Option<Project>,
    /// `[tool.*]`.
    pub tool: Option<Tool>,
}

/// `[build-system]`: what the build backend needs before it can run.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct BuildSystem {
    /// Build-time dependencies.
    #[serde(default)]
    pub requires: Vec<String>,
    /// Dotted build-backend identifier (e.g. `setuptools.build_meta`).
    #[serde(rename = "build-backend")]
    pub build_backend: Option<String>,
    /// Extra import paths the backend is loaded from.
    #[serde(rename = "backend-path", default)]
    pub backend_path: Vec<String>,
}

impl BuildSystem {
    /// The first dotted component of `build_backend`, used to select
    /// a backend-specific extractor (`setuptools`, `flit_core`,
    /// `poetry`, `pdm`).
    #[must_use]
    pub fn backend_family(&self) -> Option<&str> {
        self.build_backend
            .as_deref()
            .map(|b| b.split('.').next().unwrap_or(b))
    }
}

/// `[project]` (PEP 621).
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Project {
    /// Project name.
    pub name: Option<String>,
    /// Run-time dependencies.
    #[serde(default)]
    pub dependencies: Vec<String>,
}

/// `[tool.*]` tables read by the backend-specific fallback extractors.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Tool {
    /// `[tool.poetry]`.
    pub poetry: Option<PoetryTool>,
    /// `[tool.flit]`.
    pub flit: Option<FlitTool>,
    /// `[tool.pdm]`.
    pub pdm: Option<PdmTool>,
}

/// `[tool.poetry]`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PoetryTool {
    /// Project name.
    pub name: Option<String>,
    /// `[tool.poetry.dependencies]`; values are left unparsed since
    /// only the keys are used.
    #[serde(default)]
    pub dependencies: BTreeMap<String, toml::Value>,
}

/// `[tool.flit]`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct FlitTool {
    /// `[tool.flit.metadata]`.
    pub metadata: Option<FlitMetadata>,
}

/// `[tool.flit.metadata]`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct FlitMetadata {
    /// Explicit distribution name, if set.
    #[serde(rename = "dist-name")]
    pub dist_name: Option<String>,
    /// Module name, used to derive the distribution name when
    /// `dist-name` is absent.
    pub module: Option<String>,
}

/// `[tool.pdm]`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PdmTool {
    /// Project name.
    pub name: Option<String>,
}

/// Parse `pyproject.toml` text.
///
/// # Errors
/// Returns the underlying `toml` parse error. Callers treat a parse
/// failure as "fall back to the next extractor in the chain", not a
/// hard failure.
pub fn parse(text: &str) -> Result<PyProjectToml, toml::de::Error> {
    toml::from_str(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_standard_project_and_build_system() {
        let text = r#"
[build-system]
requires = ["setuptools>=61", "wheel"]
build-backend = "setuptools.build_meta"

[project]
name = "left-pad"
dependencies = ["six"]
"#;
        let doc = parse(text).unwrap();
        assert_eq!(doc.project.unwrap().name.unwrap(), "left-pad");
        assert_eq!(doc.build_system.as_ref().unwrap().requires.len(), 2);
        assert_eq!(doc.build_system.unwrap().backend_family(), Some("setuptools"));
    }

    #[test]
    fn parses_poetry_tool_table() {
        let text = r#"
[build-system]
requires = ["poetry-core"]
build-backend = "poetry.core.masonry.api"

[tool.poetry]
name = "left-pad"

[tool.poetry.dependencies]
python = "^3.8"
requests = "^2.0"
"#;
        let doc = parse(text).unwrap();
        let poetry = doc.tool.unwrap().poetry.unwrap();
        assert_eq!(poetry.name.unwrap(), "left-pad");
        assert!(poetry.dependencies.contains_key("requests"));
        assert!(poetry.dependencies.contains_key("python"));
    }

    #[test]
    fn missing_project_table_yields_none() {
        let text = "[build-system]\nrequires = []\n";
        let doc = parse(text).unwrap();
        assert!(doc.project.is_none());
    }
}
