//! The result of extracting metadata from a fetched source tree.

use wheelwright_core::{PackageName, Requirement};

/// A package's name plus its build-time and run-time dependency lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedMetadata {
    /// Canonical package name.
    pub name: PackageName,
    /// Dependencies declared as build-time-only (e.g. `[build-system] requires`).
    pub build_deps: Vec<Requirement>,
    /// Run-time dependencies.
    pub deps: Vec<Requirement>,
}
