//! A registry record: a name bound to a source descriptor.

use wheelwright_core::{PackageName, SourceDescriptor};

/// One entry in a registry: the canonical name it's known by, and
/// where its source comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    /// Canonical package name.
    pub name: PackageName,
    /// Where to fetch this package's source from.
    pub source: SourceDescriptor,
}

impl Package {
    /// Build a new registry record.
    #[must_use]
    pub fn new(name: PackageName, source: SourceDescriptor) -> Self {
        Self { name, source }
    }
}

/// Derive a package name from a repository URI, the same way a
/// registry record with no explicit `name` column falls back: the
/// URI's final path component, with a trailing `.git` stripped.
#[must_use]
pub fn derive_package_name_from_uri(uri: &str) -> String {
    let trimmed = uri.trim_end_matches('/');
    let last = trimmed.rsplit('/').next().unwrap_or(trimmed);
    last.strip_suffix(".git")
        .or_else(|| last.strip_suffix(".GIT"))
        .unwrap_or(last)
        .to_string()
}
