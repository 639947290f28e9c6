//! Installing a wheel: unpack its ZIP contents into the installation
//! scheme's library directory and record a minimal `.dist-info` so a
//! [`crate::catalog::FilesystemCatalog`] can see it afterward.

use crate::catalog::write_dist_info;
use crate::scheme::InstallationScheme;
use crate::wheel_name::parse_wheel_filename;
use std::path::Path;
use wheelwright_archive::Extractor;
use wheelwright_core::{Error, Result};

/// Installs a set of built wheels into an installation scheme.
pub trait Installer {
    /// Install `wheels` into `scheme`.
    fn install(&self, wheels: &[&Path], scheme: &InstallationScheme) -> Result<()>;
}

/// Extracts each wheel's ZIP contents straight into `scheme.purelib`.
///
/// This pipeline never builds platform-specific extensions (the
/// wheels it produces are themselves the build's only output), so
/// `purelib` is the only destination that matters; `platlib` exists in
/// the scheme purely to keep the interface symmetrical with a real
/// installer.
#[derive(Debug, Default)]
pub struct WheelInstaller {
    extractor: Extractor,
}

impl WheelInstaller {
    /// A new installer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Installer for WheelInstaller {
    fn install(&self, wheels: &[&Path], scheme: &InstallationScheme) -> Result<()> {
        std::fs::create_dir_all(&scheme.purelib).map_err(|e| Error::io(&scheme.purelib, e))?;

        for wheel in wheels {
            let filename = wheel
                .file_name()
                .and_then(|f| f.to_str())
                .ok_or_else(|| Error::install_failed(*wheel, "wheel path has no filename"))?;
            let identity = parse_wheel_filename(filename)
                .ok_or_else(|| Error::install_failed(*wheel, "could not parse wheel filename"))?;

            self.extractor
                .extract(wheel, &scheme.purelib)
                .map_err(|e| Error::install_failed(*wheel, e.to_string()))?;

            write_dist_info(&scheme.purelib, &identity.name, identity.version.as_ref())
                .map_err(|e| Error::install_failed(*wheel, e.to_string()))?;

            tracing::info!(wheel = %wheel.display(), name = %identity.name, "installed wheel");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn build_wheel(dir: &Path, name: &str) -> std::path::PathBuf {
        let src = dir.join("src");
        std::fs::create_dir_all(&src).unwrap();
        std::fs::write(src.join("module.py"), b"x = 1\n").unwrap();

        let mut buf = Cursor::new(Vec::new());
        wheelwright_archive::create_zip(&mut buf, &src, None).unwrap();
        let wheel_path = dir.join(format!("{name}-1.0.0-py3-none-any.whl"));
        std::fs::write(&wheel_path, buf.into_inner()).unwrap();
        wheel_path
    }

    #[test]
    fn installs_wheel_contents_and_records_dist_info() {
        let root = tempfile::tempdir().unwrap();
        let wheel = build_wheel(root.path(), "left_pad");
        let scheme = InstallationScheme::rooted_at(&root.path().join("venv"));

        WheelInstaller::new().install(&[&wheel], &scheme).unwrap();

        assert!(scheme.purelib.join("module.py").exists());
        assert!(scheme.purelib.join("left-pad-1.0.0.dist-info/METADATA").exists());
    }
}
