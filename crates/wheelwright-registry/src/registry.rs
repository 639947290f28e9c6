//! Leaf and compound registries.

use crate::package::Package;
use crate::parse::parse_tsv;
use std::fmt;
use std::path::Path;
use wheelwright_core::{AHashMap, Error, PackageName, Result};

/// A name→`Package` lookup, possibly delegating to children.
///
/// Every registry carries a human-readable name so lookup failures
/// can report which registry (or chain of registries) was searched.
pub trait Registry: fmt::Debug {
    /// This registry's human-readable name.
    fn name(&self) -> &str;

    /// Look up a canonical package name, returning the registry path
    /// (outermost first) that resolved it on success.
    fn lookup(&self, name: &PackageName) -> Option<(Package, Vec<String>)>;
}

/// A flat registry: one TSV file's worth of records.
#[derive(Debug, Clone)]
pub struct FlatRegistry {
    name: String,
    records: AHashMap<PackageName, Package>,
}

impl FlatRegistry {
    /// Build a registry directly from already-parsed records.
    #[must_use]
    pub fn new(name: impl Into<String>, records: Vec<Package>) -> Self {
        Self {
            name: name.into(),
            records: records.into_iter().map(|p| (p.name.clone(), p)).collect(),
        }
    }

    /// Parse a registry from TSV text.
    ///
    /// # Errors
    /// Returns `Error::MetadataMalformed` if a record is malformed.
    pub fn from_tsv(name: impl Into<String>, path: &Path, text: &str) -> Result<Self> {
        Ok(Self::new(name, parse_tsv(path, text)?))
    }

    /// Parse a registry from a TSV file on disk.
    ///
    /// # Errors
    /// Returns `Error::Io` if the file cannot be read, or
    /// `Error::MetadataMalformed` if a record is malformed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let name = path.to_string_lossy().to_string();
        Self::from_tsv(name, path, &text)
    }

    /// Number of records in this registry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether this registry has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Registry for FlatRegistry {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookup(&self, name: &PackageName) -> Option<(Package, Vec<String>)> {
        self.records
            .get(name)
            .cloned()
            .map(|pkg| (pkg, vec![self.name.clone()]))
    }
}

/// A registry that searches its children in order, returning the
/// first match.
#[derive(Debug)]
pub struct CompoundRegistry {
    name: String,
    children: Vec<Box<dyn Registry + Send + Sync>>,
}

impl CompoundRegistry {
    /// Build a compound registry from an ordered list of children.
    #[must_use]
    pub fn new(name: impl Into<String>, children: Vec<Box<dyn Registry + Send + Sync>>) -> Self {
        Self {
            name: name.into(),
            children,
        }
    }

    /// Load every `*.tsv` file in a directory as a child registry,
    /// in directory-listing order.
    ///
    /// # Errors
    /// Returns `Error::Io` if the directory cannot be read, or
    /// `Error::MetadataMalformed` if a registry file is malformed.
    pub fn from_dir(name: impl Into<String>, dir: &Path) -> Result<Self> {
        let mut children: Vec<Box<dyn Registry + Send + Sync>> = Vec::new();
        let entries = std::fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;
        let mut paths: Vec<_> = entries
            .filter_map(std::result::Result::ok)
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "tsv"))
            .collect();
        paths.sort();
        for path in paths {
            children.push(Box::new(FlatRegistry::from_file(&path)?));
        }
        Ok(Self::new(name, children))
    }

    /// Look up a name, returning a not-found error if no child resolves it.
    ///
    /// # Errors
    /// Returns `Error::RegistryNotFound` if no child registry resolves `name`.
    pub fn find(&self, name: &PackageName) -> Result<(Package, Vec<String>)> {
        self.lookup(name)
            .ok_or_else(|| Error::registry_not_found(name.as_str()))
    }
}

impl Registry for CompoundRegistry {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookup(&self, name: &PackageName) -> Option<(Package, Vec<String>)> {
        for child in &self.children {
            if let Some((pkg, mut path)) = child.lookup(name) {
                path.insert(0, self.name.clone());
                return Some((pkg, path));
            }
        }
        None
    }
}
