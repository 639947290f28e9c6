//! The top-level round loop: seed the initial round with the
//! requested names, step rounds until both phases run dry, and return
//! each phase's resolution order.

use std::path::PathBuf;

use wheelwright_core::{AHashSet, PackageName, ResolutionPrefs, Result};
use wheelwright_install::Catalog;

use crate::engine::Engine;
use crate::fetch::Fetcher;
use crate::metadata_source::MetadataSource;
use crate::round::Round;

/// What a resolve produced: each phase's resolved packages, in
/// discovery order (dependency before dependent is the *reverse* of
/// this order — see [`ResolutionOutcome::install_order`]).
#[derive(Debug, Default, Clone)]
pub struct ResolutionOutcome {
    /// Build-phase packages, in discovery order.
    pub build: Vec<(PackageName, PathBuf)>,
    /// Runtime-phase packages, in discovery order.
    pub runtime: Vec<(PackageName, PathBuf)>,
}

impl ResolutionOutcome {
    /// The order packages should be installed in: dependencies before
    /// dependents (the reverse of discovery order), Build phase
    /// installed in full before Runtime phase begins.
    #[must_use]
    pub fn install_order(&self) -> Vec<(PackageName, PathBuf)> {
        self.build
            .iter()
            .rev()
            .chain(self.runtime.iter().rev())
            .cloned()
            .collect()
    }
}

/// Resolves a set of requested package names into an ordered install plan.
pub struct Resolver<'a, F, M, C> {
    engine: Engine<'a, F, M, C>,
}

impl<'a, F: Fetcher, M: MetadataSource, C: Catalog> Resolver<'a, F, M, C> {
    /// Build a resolver from its three collaborators.
    pub const fn new(fetcher: &'a F, metadata_source: &'a M, catalog: &'a C) -> Self {
        Self {
            engine: Engine::new(fetcher, metadata_source, catalog),
        }
    }

    /// Resolve `names` (seeded into the Runtime phase, matching a
    /// plain `wheelwright install <names>` invocation) into an
    /// ordered install plan.
    ///
    /// # Errors
    /// Propagates any registry, fetch, or metadata-extraction error
    /// encountered while processing a round; resolution aborts on the
    /// first one rather than skipping the offending name.
    pub fn resolve(&self, prefs: ResolutionPrefs, names: &[PackageName]) -> Result<ResolutionOutcome> {
        let mut round = Round::default();
        let mut claimed: AHashSet<PackageName> = AHashSet::default();
        for name in names {
            if claimed.insert(name.clone()) {
                round.runtime.to_fetch.insert(name.clone());
            }
        }

        let mut outcome = ResolutionOutcome::default();
        let mut round_number = 0u32;

        while !round.is_empty() {
            round_number += 1;
            tracing::debug!(round = round_number, "starting resolution round");

            self.engine.fetch_round(&mut round)?;

            let mut successor = Round::default();
            self.engine.resolve_round(prefs, &round, &mut successor, &mut claimed)?;

            outcome.build.extend(successor.build.resolved.iter().map(|(n, d)| (n.clone(), d.clone())));
            outcome.runtime.extend(successor.runtime.resolved.iter().map(|(n, d)| (n.clone(), d.clone())));

            round = successor;
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FakeFetcher;
    use crate::fetch::FetchOutcome;
    use crate::metadata_source::FakeMetadataSource;
    use wheelwright_core::Requirement;
    use wheelwright_install::InMemoryCatalog;
    use wheelwright_metadata::ExtractedMetadata;

    fn fake_fetched(path: &str) -> FetchOutcome {
        FetchOutcome::Fetched(PathBuf::from(path))
    }

    #[test]
    fn transitive_runtime_chain_resolves_in_discovery_order() {
        let fetcher = FakeFetcher {
            outcomes: [
                (PackageName::new("app"), fake_fetched("/src/app")),
                (PackageName::new("lib"), fake_fetched("/src/lib")),
                (PackageName::new("leaf"), fake_fetched("/src/leaf")),
            ]
            .into_iter()
            .collect(),
        };
        let metadata = FakeMetadataSource {
            table: [
                (
                    PathBuf::from("/src/app"),
                    ExtractedMetadata {
                        name: PackageName::new("app"),
                        build_deps: vec![],
                        deps: vec![Requirement::new("lib")],
                    },
                ),
                (
                    PathBuf::from("/src/lib"),
                    ExtractedMetadata {
                        name: PackageName::new("lib"),
                        build_deps: vec![],
                        deps: vec![Requirement::new("leaf")],
                    },
                ),
                (
                    PathBuf::from("/src/leaf"),
                    ExtractedMetadata {
                        name: PackageName::new("leaf"),
                        build_deps: vec![],
                        deps: vec![],
                    },
                ),
            ]
            .into_iter()
            .collect(),
        };
        let catalog = InMemoryCatalog::new();
        let resolver = Resolver::new(&fetcher, &metadata, &catalog);

        let outcome = resolver.resolve(ResolutionPrefs::new(), &[PackageName::new("app")]).unwrap();

        let discovery: Vec<_> = outcome.runtime.iter().map(|(n, _)| n.as_str().to_string()).collect();
        assert_eq!(discovery, vec!["app", "lib", "leaf"]);

        let install: Vec<_> = outcome.install_order().iter().map(|(n, _)| n.as_str().to_string()).collect();
        assert_eq!(install, vec!["leaf", "lib", "app"]);
    }

    #[test]
    fn build_and_runtime_migration_keeps_shared_dep_in_build_only() {
        // x (runtime dep: shared), y (build dep: shared); shared has no deps of its own.
        let fetcher = FakeFetcher {
            outcomes: [
                (PackageName::new("x"), fake_fetched("/src/x")),
                (PackageName::new("y"), fake_fetched("/src/y")),
                (PackageName::new("shared"), fake_fetched("/src/shared")),
            ]
            .into_iter()
            .collect(),
        };
        let metadata = FakeMetadataSource {
            table: [
                (
                    PathBuf::from("/src/x"),
                    ExtractedMetadata {
                        name: PackageName::new("x"),
                        build_deps: vec![],
                        deps: vec![Requirement::new("shared")],
                    },
                ),
                (
                    PathBuf::from("/src/y"),
                    ExtractedMetadata {
                        name: PackageName::new("y"),
                        build_deps: vec![Requirement::new("shared")],
                        deps: vec![],
                    },
                ),
                (
                    PathBuf::from("/src/shared"),
                    ExtractedMetadata {
                        name: PackageName::new("shared"),
                        build_deps: vec![],
                        deps: vec![],
                    },
                ),
            ]
            .into_iter()
            .collect(),
        };
        let catalog = InMemoryCatalog::new();
        let resolver = Resolver::new(&fetcher, &metadata, &catalog);

        let outcome = resolver
            .resolve(ResolutionPrefs::new(), &[PackageName::new("x"), PackageName::new("y")])
            .unwrap();

        assert!(outcome.build.iter().any(|(n, _)| n.as_str() == "shared"));
        assert!(!outcome.runtime.iter().any(|(n, _)| n.as_str() == "shared"));
    }

    #[test]
    fn system_ignored_dependency_never_appears_in_output() {
        let fetcher = FakeFetcher {
            outcomes: [
                (PackageName::new("consumer"), fake_fetched("/src/consumer")),
                (PackageName::new("libxml"), FetchOutcome::Ignored),
            ]
            .into_iter()
            .collect(),
        };
        let metadata = FakeMetadataSource {
            table: [(
                PathBuf::from("/src/consumer"),
                ExtractedMetadata {
                    name: PackageName::new("consumer"),
                    build_deps: vec![],
                    deps: vec![Requirement::new("libxml")],
                },
            )]
            .into_iter()
            .collect(),
        };
        let catalog = InMemoryCatalog::new();
        let resolver = Resolver::new(&fetcher, &metadata, &catalog);

        let outcome = resolver.resolve(ResolutionPrefs::new(), &[PackageName::new("consumer")]).unwrap();

        assert!(outcome.runtime.iter().any(|(n, _)| n.as_str() == "consumer"));
        assert!(!outcome.runtime.iter().any(|(n, _)| n.as_str() == "libxml"));
        assert!(!outcome.build.iter().any(|(n, _)| n.as_str() == "libxml"));
    }
}
