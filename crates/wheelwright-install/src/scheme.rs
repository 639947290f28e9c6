//! The installation-scheme interface: the set of directories a wheel's
//! contents are unpacked into, keyed the same way `sysconfig`/`pip`
//! key them.

use std::path::{Path, PathBuf};

/// Where each category of a wheel's payload lands on disk.
///
/// Mirrors the `purelib`/`platlib`/`platstdlib`/`scripts`/`include`/
/// `data` keys the original reads off `sysconfig.get_paths()` plus
/// pip's own scheme override — this crate never shells out to either,
/// since the whole point is not depending on a live Python to drive
/// the pipeline, but the shape of the interface is the same.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallationScheme {
    /// Pure-Python library directory (`<pkg>.dist-info`, `.py` files).
    pub purelib: PathBuf,
    /// Platform-specific library directory (C extensions).
    pub platlib: PathBuf,
    /// Platform-specific standard-library directory.
    pub platstdlib: PathBuf,
    /// Console-script / entry-point directory.
    pub scripts: PathBuf,
    /// Header files directory.
    pub include: PathBuf,
    /// `<distribution>.data` payload root.
    pub data: PathBuf,
}

impl InstallationScheme {
    /// A scheme rooted at a single directory, laid out the way a venv
    /// is: `<root>/lib` for both library categories, `<root>/bin` for
    /// scripts, `<root>/include` for headers, `<root>` itself for data.
    #[must_use]
    pub fn rooted_at(root: &Path) -> Self {
        let lib = root.join("lib");
        Self {
            purelib: lib.clone(),
            platlib: lib.clone(),
            platstdlib: lib,
            scripts: root.join("bin"),
            include: root.join("include"),
            data: root.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rooted_at_shares_lib_between_purelib_and_platlib() {
        let scheme = InstallationScheme::rooted_at(Path::new("/venv"));
        assert_eq!(scheme.purelib, scheme.platlib);
        assert_eq!(scheme.scripts, Path::new("/venv/bin"));
        assert_eq!(scheme.data, Path::new("/venv"));
    }
}
