//! The "is this already installed, and at what version" question the
//! resolver's decision tree (step 3) consults for every requirement.

use crate::scheme::InstallationScheme;
use std::collections::HashMap;
use std::path::Path;
use wheelwright_core::{PackageName, Version};

/// Looks up an installed package's version, if any.
///
/// A trait rather than a concrete filesystem scanner so the resolver
/// can be exercised against a fake catalog in tests without a real
/// installation tree.
pub trait Catalog {
    /// The version installed under `name`, if any.
    fn installed_version(&self, name: &PackageName) -> Option<Version>;
}

/// An in-memory catalog, for tests and for the self-bootstrapper's
/// `alreadyInstalled` set before any real scheme exists yet.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    versions: HashMap<PackageName, Version>,
}

impl InMemoryCatalog {
    /// An empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `name` as installed at `version`.
    pub fn insert(&mut self, name: PackageName, version: Version) {
        self.versions.insert(name, version);
    }
}

impl Catalog for InMemoryCatalog {
    fn installed_version(&self, name: &PackageName) -> Option<Version> {
        self.versions.get(name).cloned()
    }
}

/// A catalog backed by `<purelib>/*.dist-info/METADATA` files, read
/// the way `importlib.metadata`/`distlib` do: by scanning installed
/// `.dist-info` directories rather than invoking a package manager.
#[derive(Debug, Clone)]
pub struct FilesystemCatalog {
    purelib: std::path::PathBuf,
}

impl FilesystemCatalog {
    /// A catalog scanning `scheme.purelib`.
    #[must_use]
    pub fn new(scheme: &InstallationScheme) -> Self {
        Self {
            purelib: scheme.purelib.clone(),
        }
    }

    fn dist_info_dir(&self, name: &PackageName) -> Option<std::path::PathBuf> {
        let entries = std::fs::read_dir(&self.purelib).ok()?;
        for entry in entries.filter_map(std::result::Result::ok) {
            let file_name = entry.file_name();
            let file_name = file_name.to_string_lossy();
            let Some(stem) = file_name.strip_suffix(".dist-info") else {
                continue;
            };
            let Some((dist_name, _version)) = stem.rsplit_once('-') else {
                continue;
            };
            if PackageName::new(dist_name) == *name {
                return Some(entry.path());
            }
        }
        None
    }
}

impl Catalog for FilesystemCatalog {
    fn installed_version(&self, name: &PackageName) -> Option<Version> {
        let dir = self.dist_info_dir(name)?;
        let metadata = std::fs::read_to_string(dir.join("METADATA")).ok()?;
        metadata
            .lines()
            .find_map(|line| line.strip_prefix("Version: "))
            .and_then(|v| crate::wheel_name::parse_version_loose(v.trim()))
    }
}

/// Write a minimal `.dist-info/METADATA` file under `purelib`, used by
/// [`crate::installer::WheelInstaller`] to record what it just
/// installed so [`FilesystemCatalog`] can see it on a later run.
pub(crate) fn write_dist_info(
    purelib: &Path,
    name: &PackageName,
    version: Option<&Version>,
) -> std::io::Result<()> {
    let version_str = version.map(ToString::to_string).unwrap_or_default();
    let dir = purelib.join(format!("{}-{version_str}.dist-info", name.as_str()));
    std::fs::create_dir_all(&dir)?;
    std::fs::write(
        dir.join("METADATA"),
        format!("Metadata-Version: 2.1\nName: {}\nVersion: {version_str}\n", name.as_str()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_catalog_round_trips() {
        let mut catalog = InMemoryCatalog::new();
        let name = PackageName::new("left-pad");
        catalog.insert(name.clone(), Version::new(1, 0, 0));
        assert_eq!(catalog.installed_version(&name), Some(Version::new(1, 0, 0)));
        assert_eq!(catalog.installed_version(&PackageName::new("other")), None);
    }

    #[test]
    fn filesystem_catalog_reads_dist_info_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let scheme = InstallationScheme::rooted_at(dir.path());
        std::fs::create_dir_all(&scheme.purelib).unwrap();
        let name = PackageName::new("left-pad");
        write_dist_info(&scheme.purelib, &name, Some(&Version::new(1, 2, 3))).unwrap();

        let catalog = FilesystemCatalog::new(&scheme);
        assert_eq!(catalog.installed_version(&name), Some(Version::new(1, 2, 3)));
        assert_eq!(catalog.installed_version(&PackageName::new("missing")), None);
    }
}
