//! Custom assertion helpers for wheelwright testing: verifying
//! installed packages, registry records, and resolution output.

use std::path::Path;

use wheelwright_core::Error;

/// Assert that `name`-`version` was installed into `site_packages`
/// (a `.dist-info` directory exists and its `METADATA` names match).
///
/// # Errors
/// Returns an error describing the mismatch.
pub fn assert_package_installed(site_packages: &Path, name: &str, version: &str) -> wheelwright_core::Result<()> {
    let dist_info = site_packages.join(format!("{name}-{version}.dist-info"));
    if !dist_info.exists() {
        return Err(invalid(format!("package {name} {version} not found at {}", dist_info.display())));
    }

    let metadata_path = dist_info.join("METADATA");
    let content = std::fs::read_to_string(&metadata_path).map_err(|e| Error::io(&metadata_path, e))?;
    if !content.contains(&format!("Name: {name}")) {
        return Err(invalid(format!("METADATA at {} does not name {name}", metadata_path.display())));
    }
    Ok(())
}

/// Assert that no `.dist-info` directory for `name` exists anywhere
/// under `site_packages`.
///
/// # Errors
/// Returns an error if a matching `.dist-info` directory is found.
pub fn assert_package_not_installed(site_packages: &Path, name: &str) -> wheelwright_core::Result<()> {
    if !site_packages.exists() {
        return Ok(());
    }
    let entries = std::fs::read_dir(site_packages).map_err(|e| Error::io(site_packages, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(site_packages, e))?;
        let file_name = entry.file_name();
        let file_name = file_name.to_string_lossy();
        if file_name.starts_with(&format!("{name}-")) && file_name.ends_with(".dist-info") {
            return Err(invalid(format!("{name} should not be installed, found {file_name}")));
        }
    }
    Ok(())
}

/// Assert that a registry TSV file parses and contains a record for `name`.
///
/// # Errors
/// Returns an error if the file cannot be read, fails to parse, or has
/// no record for `name`.
pub fn assert_registry_contains(tsv_path: &Path, name: &str) -> wheelwright_core::Result<()> {
    let registry = wheelwright_registry::FlatRegistry::from_file(tsv_path)?;
    let canonical = wheelwright_core::PackageName::new(name);
    if registry.lookup(&canonical).is_none() {
        return Err(invalid(format!("registry at {} has no record for {name}", tsv_path.display())));
    }
    Ok(())
}

/// Assert that a file exists and contains `expected` as a substring.
///
/// # Errors
/// Returns an error if the file is missing or does not contain `expected`.
pub fn assert_file_contains(path: &Path, expected: &str) -> wheelwright_core::Result<()> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    if !content.contains(expected) {
        return Err(invalid(format!("{} does not contain {expected:?}", path.display())));
    }
    Ok(())
}

/// Assert that a directory contains exactly `expected` files (not
/// counting subdirectories).
///
/// # Errors
/// Returns an error if the directory is missing or the file count differs.
pub fn assert_dir_file_count(dir: &Path, expected: usize) -> wheelwright_core::Result<()> {
    let entries = std::fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;
    let mut count = 0;
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        if entry.file_type().map_err(|e| Error::io(dir, e))?.is_file() {
            count += 1;
        }
    }
    if count != expected {
        return Err(invalid(format!("{} has {count} files, expected {expected}", dir.display())));
    }
    Ok(())
}

fn invalid(message: String) -> Error {
    Error::metadata_malformed(Path::new("<assertion>"), message)
}
