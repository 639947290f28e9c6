//! Composing an installer and an uninstaller behind the catalog: a
//! wheel whose package is already installed gets uninstalled first,
//! then (re)installed; one that's fresh just gets installed.

use crate::catalog::Catalog;
use crate::installer::Installer;
use crate::scheme::InstallationScheme;
use crate::uninstaller::UnInstaller;
use crate::wheel_name::parse_wheel_filename;
use std::path::Path;
use wheelwright_core::{Error, PackageName, Result};

/// Installs a batch of wheels, uninstalling any already-present
/// version of each one first.
#[derive(Debug)]
pub struct ReInstaller<I, U, C> {
    installer: I,
    uninstaller: U,
    catalog: C,
}

impl<I: Installer, U: UnInstaller, C: Catalog> ReInstaller<I, U, C> {
    /// Build a reinstaller from its three collaborators.
    #[must_use]
    pub const fn new(installer: I, uninstaller: U, catalog: C) -> Self {
        Self {
            installer,
            uninstaller,
            catalog,
        }
    }

    /// Reinstall `wheels`: uninstall whichever of them are already
    /// present according to `self.catalog`, then install all of them.
    pub fn reinstall(&self, wheels: &[&Path], scheme: &InstallationScheme) -> Result<()> {
        let mut already_installed: Vec<PackageName> = Vec::new();
        for wheel in wheels {
            let filename = wheel
                .file_name()
                .and_then(|f| f.to_str())
                .ok_or_else(|| Error::install_failed(*wheel, "wheel path has no filename"))?;
            let identity = parse_wheel_filename(filename)
                .ok_or_else(|| Error::install_failed(*wheel, "could not parse wheel filename"))?;
            if self.catalog.installed_version(&identity.name).is_some() {
                already_installed.push(identity.name);
            }
        }

        if !already_installed.is_empty() {
            self.uninstaller.uninstall(&already_installed, scheme)?;
        }
        self.installer.install(wheels, scheme)
    }
}
