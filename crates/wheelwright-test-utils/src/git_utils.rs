//! Helpers for building real git repositories on disk, for tests that
//! exercise the git fetcher end to end rather than stubbing it out.

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::{TempDir, tempdir};
use wheelwright_core::Error;

use crate::fixtures::Fixtures;

/// Whether a `git` binary is available on `PATH`. Tests that need a
/// real repository should skip (not fail) when this is false.
#[must_use]
pub fn git_available() -> bool {
    Command::new("git").arg("--version").output().map(|o| o.status.success()).unwrap_or(false)
}

/// A temporary git repository with a working tree, for fetcher tests.
#[derive(Debug)]
pub struct TempGitRepo {
    dir: TempDir,
}

impl TempGitRepo {
    /// Initialize an empty repository with a single commit containing
    /// `pyproject.toml` built from the simple fixture.
    ///
    /// # Errors
    /// `Error::Io` if the directory can't be created, or a domain error
    /// if any `git` invocation fails.
    pub fn new() -> wheelwright_core::Result<Self> {
        let dir = tempdir().map_err(|e| Error::io(Path::new("<tempdir>"), e))?;
        let repo = Self { dir };
        repo.init()?;
        repo.write_file("pyproject.toml", &Fixtures::simple_pyproject_toml())?;
        repo.commit_all("initial commit")?;
        Ok(repo)
    }

    /// Initialize an empty repository with `content` as its only file.
    ///
    /// # Errors
    /// Same as [`Self::new`].
    pub fn with_content(relative_path: &str, content: &str) -> wheelwright_core::Result<Self> {
        let dir = tempdir().map_err(|e| Error::io(Path::new("<tempdir>"), e))?;
        let repo = Self { dir };
        repo.init()?;
        repo.write_file(relative_path, content)?;
        repo.commit_all("initial commit")?;
        Ok(repo)
    }

    /// Build a repository shaped like a fetchable Python package: a
    /// `pyproject.toml` declaring `package_name` plus a single module
    /// under `src/<package_name>/__init__.py`.
    ///
    /// # Errors
    /// Same as [`Self::new`].
    pub fn python_package(package_name: &str) -> wheelwright_core::Result<Self> {
        let dir = tempdir().map_err(|e| Error::io(Path::new("<tempdir>"), e))?;
        let repo = Self { dir };
        repo.init()?;
        let pyproject = format!(
            "[build-system]\nrequires = [\"setuptools>=61.0\"]\nbuild-backend = \"setuptools.build_meta\"\n\n[project]\nname = \"{package_name}\"\nversion = \"0.1.0\"\ndependencies = []\n"
        );
        repo.write_file("pyproject.toml", &pyproject)?;
        repo.write_file(&format!("src/{package_name}/__init__.py"), "__version__ = \"0.1.0\"\n")?;
        repo.commit_all("initial commit")?;
        Ok(repo)
    }

    /// The repository's working tree root.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    fn init(&self) -> wheelwright_core::Result<()> {
        self.run(&["init", "--initial-branch=main"])?;
        self.run(&["config", "user.email", "test@example.invalid"])?;
        self.run(&["config", "user.name", "Test User"])?;
        Ok(())
    }

    /// Write (or overwrite) a file in the working tree, creating parent
    /// directories as needed.
    ///
    /// # Errors
    /// `Error::Io` if the file cannot be written.
    pub fn write_file(&self, relative_path: &str, content: &str) -> wheelwright_core::Result<PathBuf> {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        std::fs::write(&path, content).map_err(|e| Error::io(&path, e))?;
        Ok(path)
    }

    /// Read a file from the working tree.
    ///
    /// # Errors
    /// `Error::Io` if the file cannot be read.
    pub fn read_file(&self, relative_path: &str) -> wheelwright_core::Result<String> {
        let path = self.dir.path().join(relative_path);
        std::fs::read_to_string(&path).map_err(|e| Error::io(&path, e))
    }

    /// Stage and commit all pending changes.
    ///
    /// # Errors
    /// A domain error if `git add`/`git commit` fails.
    pub fn commit_all(&self, message: &str) -> wheelwright_core::Result<String> {
        self.run(&["add", "-A"])?;
        self.run(&["commit", "--message", message, "--allow-empty"])?;
        self.head_commit()
    }

    /// Create a lightweight tag at the current `HEAD`.
    ///
    /// # Errors
    /// A domain error if `git tag` fails.
    pub fn create_tag(&self, name: &str) -> wheelwright_core::Result<()> {
        self.run(&["tag", name])?;
        Ok(())
    }

    /// Create an annotated tag at the current `HEAD`.
    ///
    /// # Errors
    /// A domain error if `git tag` fails.
    pub fn create_annotated_tag(&self, name: &str, message: &str) -> wheelwright_core::Result<()> {
        self.run(&["tag", "-a", name, "-m", message])?;
        Ok(())
    }

    /// Create a branch at the current `HEAD` without checking it out.
    ///
    /// # Errors
    /// A domain error if `git branch` fails.
    pub fn create_branch(&self, name: &str) -> wheelwright_core::Result<()> {
        self.run(&["branch", name])?;
        Ok(())
    }

    /// Check out an existing branch, tag, or commit.
    ///
    /// # Errors
    /// A domain error if `git checkout` fails.
    pub fn checkout(&self, reference: &str) -> wheelwright_core::Result<()> {
        self.run(&["checkout", reference])?;
        Ok(())
    }

    /// The current `HEAD` commit SHA.
    ///
    /// # Errors
    /// A domain error if `git rev-parse` fails.
    pub fn head_commit(&self) -> wheelwright_core::Result<String> {
        let output = self.run(&["rev-parse", "HEAD"])?;
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// List all tags, sorted by creation.
    ///
    /// # Errors
    /// A domain error if `git tag` fails.
    pub fn list_tags(&self) -> wheelwright_core::Result<Vec<String>> {
        let output = self.run(&["tag", "--list"])?;
        Ok(String::from_utf8_lossy(&output.stdout).lines().map(str::to_string).collect())
    }

    /// List all local branches.
    ///
    /// # Errors
    /// A domain error if `git branch` fails.
    pub fn list_branches(&self) -> wheelwright_core::Result<Vec<String>> {
        let output = self.run(&["branch", "--format=%(refname:short)"])?;
        Ok(String::from_utf8_lossy(&output.stdout).lines().map(str::to_string).collect())
    }

    /// Clone this repository to `dest` via the local filesystem transport.
    ///
    /// # Errors
    /// A domain error if `git clone` fails.
    pub fn clone_to(&self, dest: &Path) -> wheelwright_core::Result<()> {
        let output = Command::new("git")
            .args(["clone", &self.dir.path().display().to_string(), &dest.display().to_string()])
            .output()
            .map_err(|e| Error::io(dest, e))?;
        if !output.status.success() {
            return Err(Error::io(
                dest,
                std::io::Error::other(String::from_utf8_lossy(&output.stderr).to_string()),
            ));
        }
        Ok(())
    }

    /// Add `repo` as a submodule at `path`.
    ///
    /// # Errors
    /// A domain error if `git submodule add` fails.
    pub fn add_submodule(&self, repo: &TempGitRepo, path: &str) -> wheelwright_core::Result<()> {
        self.run(&["-c", "protocol.file.allow=always", "submodule", "add", &repo.path().display().to_string(), path])?;
        self.run(&["commit", "--message", &format!("add submodule {path}")])?;
        Ok(())
    }

    /// Keep the temporary directory (prevent cleanup on drop), returning
    /// its path.
    #[must_use]
    pub fn persist(self) -> PathBuf {
        self.dir.keep()
    }

    fn run(&self, args: &[&str]) -> wheelwright_core::Result<std::process::Output> {
        let output = Command::new("git")
            .current_dir(self.dir.path())
            .args(args)
            .output()
            .map_err(|e| Error::io(self.dir.path(), e))?;
        if !output.status.success() {
            return Err(Error::io(
                self.dir.path(),
                std::io::Error::other(format!("git {}: {}", args.join(" "), String::from_utf8_lossy(&output.stderr))),
            ));
        }
        Ok(output)
    }
}

/// Create a bare repository at `dest`, suitable as a clone/push target.
///
/// # Errors
/// A domain error if `git init --bare` fails.
pub fn create_bare_repo(dest: &Path) -> wheelwright_core::Result<()> {
    std::fs::create_dir_all(dest).map_err(|e| Error::io(dest, e))?;
    let output =
        Command::new("git").current_dir(dest).args(["init", "--bare", "--initial-branch=main"]).output().map_err(|e| Error::io(dest, e))?;
    if !output.status.success() {
        return Err(Error::io(dest, std::io::Error::other(String::from_utf8_lossy(&output.stderr).to_string())));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_a_repo_with_initial_commit() {
        if !git_available() {
            return;
        }
        let repo = TempGitRepo::new().unwrap();
        assert!(!repo.head_commit().unwrap().is_empty());
        assert!(repo.read_file("pyproject.toml").unwrap().contains("requests"));
    }

    #[test]
    fn tags_and_branches_are_listed() {
        if !git_available() {
            return;
        }
        let repo = TempGitRepo::new().unwrap();
        repo.create_tag("v1.0.0").unwrap();
        repo.create_branch("feature").unwrap();
        assert_eq!(repo.list_tags().unwrap(), vec!["v1.0.0".to_string()]);
        assert!(repo.list_branches().unwrap().iter().any(|b| b == "feature"));
    }

    #[test]
    fn clone_to_produces_a_working_checkout() {
        if !git_available() {
            return;
        }
        let repo = TempGitRepo::new().unwrap();
        let dest = tempfile::tempdir().unwrap();
        let clone_path = dest.path().join("clone");
        repo.clone_to(&clone_path).unwrap();
        assert!(clone_path.join("pyproject.toml").exists());
    }

    #[test]
    fn python_package_fixture_declares_its_own_name() {
        if !git_available() {
            return;
        }
        let repo = TempGitRepo::python_package("demo-pkg").unwrap();
        assert!(repo.read_file("pyproject.toml").unwrap().contains("demo-pkg"));
        assert!(repo.path().join("src/demo-pkg/__init__.py").exists());
    }
}
