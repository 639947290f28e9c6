//! The essential-packages precondition check: what a bare interpreter
//! is still missing before `resolve`/`build` can be trusted to run
//! without hitting a self-bootstrap chicken-and-egg failure.

use wheelwright_core::PackageName;
use wheelwright_install::Catalog;

use crate::schedule::essential_package_names;

/// Names from [`essential_package_names`] not satisfied by `catalog`.
///
/// An empty result means the packaging ecosystem is already fully
/// bootstrapped and `wheelwright bootstrap packaging` has nothing left
/// to do.
#[must_use]
pub fn missing_essential_packages(catalog: &dyn Catalog) -> Vec<PackageName> {
    essential_package_names().into_iter().filter(|name| catalog.installed_version(name).is_none()).collect()
}
