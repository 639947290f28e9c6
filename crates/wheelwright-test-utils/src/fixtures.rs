//! Pre-built test fixtures for common testing scenarios: `pyproject.toml`
//! documents, registry TSV snippets, and small Python source files.

use serde_json::{Value, json};

/// Collection of pre-built test fixtures.
#[derive(Debug)]
pub struct Fixtures;

impl Fixtures {
    /// An empty PEP 621 `pyproject.toml` with no dependencies.
    #[must_use]
    pub fn empty_pyproject_toml() -> String {
        r#"[build-system]
requires = ["setuptools>=61.0"]
build-backend = "setuptools.build_meta"

[project]
name = "test-project"
version = "0.1.0"
dependencies = []
"#
        .to_string()
    }

    /// A `pyproject.toml` with a handful of run-time dependencies.
    #[must_use]
    pub fn simple_pyproject_toml() -> String {
        r#"[build-system]
requires = ["setuptools>=61.0", "wheel"]
build-backend = "setuptools.build_meta"

[project]
name = "simple-project"
version = "0.1.0"
dependencies = [
    "requests>=2.28",
    "click~=8.1",
]

[project.optional-dependencies]
test = ["pytest>=7.0"]
"#
        .to_string()
    }

    /// A `pyproject.toml` built around a `hatchling` backend, mirroring
    /// a typical modern library layout.
    #[must_use]
    pub fn hatchling_pyproject_toml() -> String {
        r#"[build-system]
requires = ["hatchling"]
build-backend = "hatchling.build"

[project]
name = "hatch-project"
version = "1.2.3"
dependencies = [
    "packaging>=23.0",
]
"#
        .to_string()
    }

    /// A legacy `setup.py`-only project with no `pyproject.toml` at all.
    #[must_use]
    pub fn legacy_setup_py() -> String {
        r"from setuptools import setup, find_packages

setup(
    name='legacy-project',
    version='0.9.0',
    packages=find_packages(),
    install_requires=[
        'six>=1.16',
    ],
)
"
        .to_string()
    }

    /// A `setup.cfg` companion to a minimal `setup.py`.
    #[must_use]
    pub fn setup_cfg() -> String {
        r"[metadata]
name = cfg-project
version = 0.4.0

[options]
install_requires =
    attrs>=22.0
"
        .to_string()
    }

    /// A flat TSV registry with a handful of git-sourced records.
    #[must_use]
    pub fn simple_registry_tsv() -> String {
        "name\trepo\tfetcher\trefSpec\n\
         requests\thttps://github.com/psf/requests.git\tgit\tv2.31.0\n\
         click\thttps://github.com/pallets/click.git\tgit\t8.1.7\n\
         six\thttps://github.com/benjaminp/six.git\tgit\t1.16.0\n"
            .to_string()
    }

    /// A registry record for a `system`-sourced package: never fetched,
    /// assumed already present on the host.
    #[must_use]
    pub fn system_dependency_registry_tsv() -> String {
        "name\trepo\tfetcher\n\
         setuptools\t\tsystem\n"
            .to_string()
    }

    /// Packaging-ecosystem registry covering the bootstrap essentials.
    #[must_use]
    pub fn bootstrap_registry_tsv() -> String {
        "name\trepo\tfetcher\trefSpec\n\
         setuptools\thttps://github.com/pypa/setuptools.git\tgit\tv69.0.0\n\
         wheel\thttps://github.com/pypa/wheel.git\tgit\t0.42.0\n\
         packaging\thttps://github.com/pypa/packaging.git\tgit\t23.2\n\
         pyparsing\thttps://github.com/pyparsing/pyparsing.git\tgit\t3.1.1\n"
            .to_string()
    }

    /// A minimal `METADATA`/`PKG-INFO`-equivalent JSON shape, for tests
    /// that assert against extracted-metadata results rather than
    /// parsing real `pyproject.toml` text.
    #[must_use]
    pub fn extracted_metadata_json(name: &str, deps: &[&str]) -> Value {
        json!({
            "name": name,
            "build_deps": ["setuptools"],
            "deps": deps,
        })
    }

    /// Minimal Python module content, for populating a fake source tree.
    #[must_use]
    pub fn python_module_content(class_name: &str) -> String {
        format!(
            "class {class_name}:\n    def __init__(self, value=0):\n        self.value = value\n\n    def get_value(self):\n        return self.value\n"
        )
    }
}
