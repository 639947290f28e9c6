//! Temporary project creation and management for integration tests.
//!
//! This module builds isolated source trees (`pyproject.toml` /
//! `setup.py` plus a package directory) and installed-environment
//! layouts (`site-packages` with `.dist-info` metadata), the two
//! on-disk shapes the resolve/fetch/build/install pipeline works with.

use std::path::{Path, PathBuf};

use tempfile::{TempDir, tempdir};
use wheelwright_core::Error;

use crate::fixtures::Fixtures;

/// A temporary source tree for testing: a project root holding
/// `pyproject.toml` and/or `setup.py`, cleaned up on drop.
#[derive(Debug)]
pub struct TempProject {
    dir: TempDir,
}

impl TempProject {
    /// Create a new temporary project builder.
    #[must_use]
    pub fn new() -> TempProjectBuilder {
        TempProjectBuilder::default()
    }

    /// The root directory of the project.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path to `pyproject.toml`.
    #[must_use]
    pub fn pyproject_toml_path(&self) -> PathBuf {
        self.dir.path().join("pyproject.toml")
    }

    /// Whether `pyproject.toml` exists in this project.
    #[must_use]
    pub fn has_pyproject_toml(&self) -> bool {
        self.pyproject_toml_path().exists()
    }

    /// Read `pyproject.toml`'s content.
    ///
    /// # Errors
    /// `Error::Io` if the file cannot be read.
    pub fn read_pyproject_toml(&self) -> wheelwright_core::Result<String> {
        std::fs::read_to_string(self.pyproject_toml_path()).map_err(|e| Error::io(self.pyproject_toml_path(), e))
    }

    /// Create a file at `relative_path` with `content`, creating parent
    /// directories as needed.
    ///
    /// # Errors
    /// `Error::Io` if any directory or the file cannot be created.
    pub fn create_file(&self, relative_path: &str, content: &str) -> wheelwright_core::Result<PathBuf> {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        std::fs::write(&path, content).map_err(|e| Error::io(&path, e))?;
        Ok(path)
    }

    /// Whether a file exists at `relative_path`.
    #[must_use]
    pub fn file_exists(&self, relative_path: &str) -> bool {
        self.dir.path().join(relative_path).exists()
    }

    /// Read a file at `relative_path`.
    ///
    /// # Errors
    /// `Error::Io` if the file cannot be read.
    pub fn read_file(&self, relative_path: &str) -> wheelwright_core::Result<String> {
        let path = self.dir.path().join(relative_path);
        std::fs::read_to_string(&path).map_err(|e| Error::io(&path, e))
    }

    /// Keep the temporary directory (prevent cleanup on drop), returning
    /// its path.
    #[must_use]
    pub fn persist(self) -> PathBuf {
        self.dir.keep()
    }
}

/// Builder for [`TempProject`].
#[derive(Debug, Default)]
pub struct TempProjectBuilder {
    pyproject_toml: Option<String>,
    setup_py: Option<String>,
    setup_cfg: Option<String>,
    files: Vec<(String, String)>,
}

impl TempProjectBuilder {
    /// Set `pyproject.toml`'s content.
    #[must_use]
    pub fn with_pyproject_toml(mut self, content: impl Into<String>) -> Self {
        self.pyproject_toml = Some(content.into());
        self
    }

    /// Set `setup.py`'s content.
    #[must_use]
    pub fn with_setup_py(mut self, content: impl Into<String>) -> Self {
        self.setup_py = Some(content.into());
        self
    }

    /// Set `setup.cfg`'s content.
    #[must_use]
    pub fn with_setup_cfg(mut self, content: impl Into<String>) -> Self {
        self.setup_cfg = Some(content.into());
        self
    }

    /// Add an arbitrary file to be created.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.push((path.into(), content.into()));
        self
    }

    /// Use the simple `pyproject.toml` fixture.
    #[must_use]
    pub fn simple(mut self) -> Self {
        self.pyproject_toml = Some(Fixtures::simple_pyproject_toml());
        self
    }

    /// Use the `hatchling`-backed `pyproject.toml` fixture.
    #[must_use]
    pub fn hatchling_like(mut self) -> Self {
        self.pyproject_toml = Some(Fixtures::hatchling_pyproject_toml());
        self
    }

    /// Use the legacy `setup.py`-only fixture.
    #[must_use]
    pub fn legacy_setup_py_like(mut self) -> Self {
        self.setup_py = Some(Fixtures::legacy_setup_py());
        self
    }

    /// Build the temporary project.
    ///
    /// # Errors
    /// `Error::Io` if the temp directory or any of its files cannot be created.
    pub fn build(self) -> wheelwright_core::Result<TempProject> {
        let dir = tempdir().map_err(|e| Error::io(Path::new("<tempdir>"), e))?;
        let root = dir.path();

        if let Some(content) = &self.pyproject_toml {
            std::fs::write(root.join("pyproject.toml"), content).map_err(|e| Error::io(root, e))?;
        }
        if let Some(content) = &self.setup_py {
            std::fs::write(root.join("setup.py"), content).map_err(|e| Error::io(root, e))?;
        }
        if let Some(content) = &self.setup_cfg {
            std::fs::write(root.join("setup.cfg"), content).map_err(|e| Error::io(root, e))?;
        }
        for (path, content) in &self.files {
            let file_path = root.join(path);
            if let Some(parent) = file_path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
            }
            std::fs::write(&file_path, content).map_err(|e| Error::io(&file_path, e))?;
        }

        Ok(TempProject { dir })
    }
}

/// A temporary installation root: a `site-packages`-style tree this
/// crate's own tests can assert against without going through the
/// real `wheelwright-install` catalog machinery.
#[derive(Debug)]
pub struct TempInstallRoot {
    dir: TempDir,
}

impl TempInstallRoot {
    /// Create an empty installation root.
    ///
    /// # Errors
    /// `Error::Io` if the temp directory cannot be created.
    pub fn new() -> wheelwright_core::Result<Self> {
        let dir = tempdir().map_err(|e| Error::io(Path::new("<tempdir>"), e))?;
        Ok(Self { dir })
    }

    /// The root directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Fabricate a `<name>-<version>.dist-info/METADATA` entry, as if
    /// a wheel for `name` had already been installed.
    ///
    /// # Errors
    /// `Error::Io` if the `.dist-info` directory cannot be created.
    pub fn fake_installed(&self, name: &str, version: &str) -> wheelwright_core::Result<PathBuf> {
        let dist_info = self.dir.path().join(format!("{name}-{version}.dist-info"));
        std::fs::create_dir_all(&dist_info).map_err(|e| Error::io(&dist_info, e))?;
        let metadata = dist_info.join("METADATA");
        std::fs::write(&metadata, format!("Metadata-Version: 2.1\nName: {name}\nVersion: {version}\n"))
            .map_err(|e| Error::io(&metadata, e))?;
        Ok(dist_info)
    }
}
