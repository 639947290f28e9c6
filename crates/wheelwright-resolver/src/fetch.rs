//! Resolving a package name to a source descriptor and fetching it.
//!
//! A `system` descriptor never reaches `wheelwright_vcs::fetch` — that
//! crate treats `system` as an unsupported fetcher, since from its
//! point of view there is nothing to dispatch. The resolver is the
//! layer that knows `system` means "assume it's already on the host"
//! rather than "this is an error".

use std::path::PathBuf;

use wheelwright_core::{PackageName, Result, SourceDescriptor};
use wheelwright_registry::Registry;

/// What came of trying to fetch a package.
#[derive(Debug)]
pub enum FetchOutcome {
    /// The package was fetched into this local directory.
    Fetched(PathBuf),
    /// The package is a `system` descriptor: assumed already present,
    /// never installed by this pipeline.
    Ignored,
}

/// Resolves a name through a registry, then fetches its source.
pub trait Fetcher {
    /// Fetch `name`, or classify it as ignored.
    ///
    /// # Errors
    /// Returns `Error::RegistryNotFound` if no registry resolves the
    /// name, or a fetch/VCS error if the source cannot be retrieved.
    fn fetch(&self, name: &PackageName) -> Result<FetchOutcome>;
}

/// A [`Fetcher`] backed by a real registry and `wheelwright_vcs`.
pub struct RegistryFetcher<'a, R: Registry + ?Sized> {
    registry: &'a R,
    dest_root: PathBuf,
}

impl<'a, R: Registry + ?Sized> RegistryFetcher<'a, R> {
    /// Fetch packages resolved through `registry` into subdirectories
    /// of `dest_root`.
    pub fn new(registry: &'a R, dest_root: impl Into<PathBuf>) -> Self {
        Self {
            registry,
            dest_root: dest_root.into(),
        }
    }
}

impl<R: Registry + ?Sized> Fetcher for RegistryFetcher<'_, R> {
    fn fetch(&self, name: &PackageName) -> Result<FetchOutcome> {
        let (package, path) = self
            .registry
            .lookup(name)
            .ok_or_else(|| wheelwright_core::Error::registry_not_found(name.as_str()))?;

        if matches!(package.source, SourceDescriptor::System) {
            tracing::debug!(name = %name, registry_path = ?path, "system dependency, assuming already installed");
            return Ok(FetchOutcome::Ignored);
        }

        let dest: PathBuf = self.dest_root.join(name.as_str());
        let dir = wheelwright_vcs::fetch(&package.source, &dest)?;
        tracing::debug!(name = %name, dir = %dir.display(), "fetched package source");
        Ok(FetchOutcome::Fetched(dir))
    }
}

/// A [`Fetcher`] for tests: a fixed name → outcome table, no registry
/// or subprocess involved.
#[cfg(test)]
pub(crate) struct FakeFetcher {
    pub outcomes: std::collections::HashMap<PackageName, FetchOutcome>,
}

#[cfg(test)]
impl Fetcher for FakeFetcher {
    fn fetch(&self, name: &PackageName) -> Result<FetchOutcome> {
        match self.outcomes.get(name) {
            Some(FetchOutcome::Fetched(dir)) => Ok(FetchOutcome::Fetched(dir.clone())),
            Some(FetchOutcome::Ignored) => Ok(FetchOutcome::Ignored),
            None => Err(wheelwright_core::Error::registry_not_found(name.as_str())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wheelwright_core::Error;

    #[test]
    fn fake_fetcher_reports_not_found_for_unknown_name() {
        let fetcher = FakeFetcher {
            outcomes: std::collections::HashMap::new(),
        };
        let err = fetcher.fetch(&PackageName::new("missing")).unwrap_err();
        assert!(matches!(err, Error::RegistryNotFound { .. }));
    }
}
