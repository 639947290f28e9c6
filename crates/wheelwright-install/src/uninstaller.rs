//! Removing a previously installed distribution's `.dist-info`
//! directory (and whatever package directories it records) from an
//! installation scheme.

use crate::scheme::InstallationScheme;
use std::path::PathBuf;
use wheelwright_core::{Error, PackageName, Result};

/// Uninstalls packages by name from an installation scheme.
pub trait UnInstaller {
    /// Remove every installed artifact for each of `names`.
    fn uninstall(&self, names: &[PackageName], scheme: &InstallationScheme) -> Result<()>;
}

/// Removes a package's `<name>-<version>.dist-info` directory.
///
/// This pipeline's installer never unpacks a `RECORD` file to know
/// exactly which files a wheel laid down elsewhere in `purelib`, so
/// uninstallation here is limited to the `.dist-info` directory itself
/// — good enough for the catalog lookup the resolver depends on, and
/// consistent with [`crate::installer::WheelInstaller`] only ever
/// writing that much back.
#[derive(Debug, Default)]
pub struct FilesystemUninstaller;

impl FilesystemUninstaller {
    /// A new uninstaller.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn dist_info_dir(purelib: &std::path::Path, name: &PackageName) -> Option<PathBuf> {
        let entries = std::fs::read_dir(purelib).ok()?;
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

impl UnInstaller for FilesystemUninstaller {
    fn uninstall(&self, names: &[PackageName], scheme: &InstallationScheme) -> Result<()> {
        for name in names {
            let Some(dir) = Self::dist_info_dir(&scheme.purelib, name) else {
                return Err(Error::uninstall_failed(
                    name.as_str(),
                    "no .dist-info directory found for this name",
                ));
            };
            std::fs::remove_dir_all(&dir)
                .map_err(|e| Error::uninstall_failed(name.as_str(), e.to_string()))?;
            tracing::info!(name = %name, "uninstalled package");
        }
        Ok(())
    }
}
