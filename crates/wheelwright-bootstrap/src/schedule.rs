//! The hand-verified packaging-ecosystem bootstrap schedule.
//!
//! This is data, not logic, on purpose: the dependency order was
//! worked out by hand against what each of these packages' own build
//! actually needs at import time, and keeping it in one list lets that
//! order be audited without reading the stage driver.

use wheelwright_core::PackageName;

/// One entry in a staged install schedule: a package to build and
/// install, plus the names of other schedule entries that must be
/// importable — but are not necessarily installed anywhere permanent
/// yet — while it builds.
#[derive(Debug, Clone)]
pub struct ScheduleEntry {
    /// The package this entry builds and installs.
    pub name: PackageName,
    /// Sibling schedule entries whose (already-cloned) source
    /// directories should be added to this build's import path.
    pub extra_import_path_names: Vec<PackageName>,
}

fn entry(name: &str, extra_import_path_names: &[&str]) -> ScheduleEntry {
    ScheduleEntry {
        name: PackageName::new(name),
        extra_import_path_names: extra_import_path_names.iter().map(|n| PackageName::new(n)).collect(),
    }
}

/// `setuptools` and `wheel`, the foundational pair installed via the
/// legacy `bdist_wheel` path before anything declarative — including
/// their own `pyproject.toml` — can be trusted to build correctly.
#[must_use]
pub fn foundational_pair() -> Vec<ScheduleEntry> {
    vec![entry("setuptools", &[]), entry("wheel", &[])]
}

/// The rest of the essential packaging ecosystem: the core metadata
/// and build-frontend libraries, staged in the order verified to build
/// against only already-cloned (not yet installed) siblings.
#[must_use]
pub fn packaging_ecosystem_schedule() -> Vec<ScheduleEntry> {
    vec![
        entry("tomli", &[]),
        entry("pyparsing", &[]),
        entry("flit_core", &[]),
        entry("pyproject-hooks", &[]),
        entry("typing_extensions", &[]),
        entry("packaging", &["pyparsing"]),
        entry("setuptools_scm", &["packaging", "typing_extensions"]),
        entry("build", &["packaging", "pyproject-hooks"]),
    ]
}

/// The optional `hatchling` build-backend bundle, staged the same way
/// once the core packaging ecosystem above is in place.
#[must_use]
pub fn hatchling_bundle_schedule() -> Vec<ScheduleEntry> {
    vec![
        entry("pathspec", &[]),
        entry("editables", &[]),
        entry("pluggy", &[]),
        entry("hatchling", &["pathspec", "editables", "pluggy", "packaging"]),
    ]
}

/// Every package name the packaging-bootstrap sequence installs, for
/// the essential-packages precondition check.
#[must_use]
pub fn essential_package_names() -> Vec<PackageName> {
    foundational_pair()
        .into_iter()
        .chain(packaging_ecosystem_schedule())
        .chain(hatchling_bundle_schedule())
        .map(|entry| entry.name)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packaging_precedes_its_dependents_in_schedule_order() {
        let schedule = packaging_ecosystem_schedule();
        let position = |name: &str| schedule.iter().position(|e| e.name.as_str() == name).unwrap();
        assert!(position("packaging") < position("setuptools_scm"));
        assert!(position("packaging") < position("build"));
        assert!(position("pyproject-hooks") < position("build"));
    }

    #[test]
    fn essential_package_names_covers_every_schedule() {
        let names = essential_package_names();
        assert!(names.iter().any(|n| n.as_str() == "setuptools"));
        assert!(names.iter().any(|n| n.as_str() == "build"));
        assert!(names.iter().any(|n| n.as_str() == "hatchling"));
    }
}
