//! The round engine: fetches a round's scheduled names, extracts each
//! one's declared dependencies, and decides where (or whether) each
//! dependency is scheduled for the next round.
//!
//! The cross-phase migration (step 4 below) must be keyed on the
//! dependency's own phase, not on whichever phase the enclosing loop
//! happens to be iterating — keying it on the wrong phase would make a
//! build-time dependency shared with a runtime sibling get fetched and
//! resolved twice instead of being owned by the Build phase alone. The
//! six-step decision tree below is keyed on the dependency's own phase
//! throughout to keep that migration correct.

use wheelwright_core::{PackageName, ResolutionPrefs};
use wheelwright_install::Catalog;

use crate::fetch::{FetchOutcome, Fetcher};
use crate::metadata_source::MetadataSource;
use crate::phase::PhaseId;
use crate::round::Round;

/// Drives one round's fetch + dependency-extraction pass.
pub struct Engine<'a, F, M, C> {
    fetcher: &'a F,
    metadata_source: &'a M,
    catalog: &'a C,
}

impl<'a, F: Fetcher, M: MetadataSource, C: Catalog> Engine<'a, F, M, C> {
    /// Build an engine from its three collaborators.
    pub const fn new(fetcher: &'a F, metadata_source: &'a M, catalog: &'a C) -> Self {
        Self {
            fetcher,
            metadata_source,
            catalog,
        }
    }

    /// Fetch every name scheduled in `round`, classifying each as
    /// fetched or ignored, then clear `toFetch`.
    ///
    /// # Errors
    /// Propagates any registry or fetch error; a single unresolvable
    /// or unfetchable name aborts the whole resolve.
    pub fn fetch_round(&self, round: &mut Round) -> wheelwright_core::Result<()> {
        for phase in PhaseId::ALL {
            let names = round.sub_round(phase).to_fetch.drain();
            for name in names {
                match self.fetcher.fetch(&name)? {
                    FetchOutcome::Fetched(dir) => {
                        round.sub_round_mut(phase).fetched.insert(name, dir);
                    }
                    FetchOutcome::Ignored => {
                        round.sub_round_mut(phase).ignored.insert(name);
                    }
                }
            }
        }
        Ok(())
    }

    /// Extract dependencies from every fetched package in `round`,
    /// deciding per-requirement where each dependency lands in
    /// `successor`, and move each processed package into its phase's
    /// `resolved` set.
    ///
    /// `claimed` tracks, across the whole resolve invocation, every
    /// name ever added to a successor's `toFetch` — the global
    /// at-most-once guarantee.
    ///
    /// # Errors
    /// Propagates metadata-extraction errors.
    pub fn resolve_round(
        &self,
        prefs: ResolutionPrefs,
        round: &Round,
        successor: &mut Round,
        claimed: &mut wheelwright_core::AHashSet<PackageName>,
    ) -> wheelwright_core::Result<()> {
        for owner_phase in PhaseId::ALL {
            let fetched: Vec<_> = round
                .sub_round(owner_phase)
                .fetched
                .iter()
                .map(|(n, d)| (n.clone(), d.clone()))
                .collect();

            for (name, dir) in fetched {
                let metadata = self.metadata_source.extract(&dir)?;

                for dep_phase in PhaseId::ALL {
                    let phase_prefs = dep_phase.patch_prefs(prefs);
                    let deps = dep_phase.deps(phase_prefs, &metadata).to_vec();
                    for req in &deps {
                        self.consider_requirement(req, dep_phase, phase_prefs, round, successor, claimed);
                    }
                }

                successor.sub_round_mut(owner_phase).resolved.insert(name, dir);
            }
        }
        Ok(())
    }

    /// The per-requirement six-step decision.
    fn consider_requirement(
        &self,
        req: &wheelwright_core::Requirement,
        phase: PhaseId,
        phase_prefs: ResolutionPrefs,
        round: &Round,
        successor: &mut Round,
        claimed: &mut wheelwright_core::AHashSet<PackageName>,
    ) {
        // 1. A non-null marker means this requirement is never enqueued.
        if !req.is_applicable() {
            return;
        }

        let name = &req.name;

        // 2. Already fetched-and-classified-ignored under this phase this round.
        if round.sub_round(phase).ignored.contains(name) {
            tracing::debug!(name = %name, phase = phase.label(), "ignoring, already classified system this round");
            return;
        }

        // 3. Catalog check: does an existing install already satisfy this?
        if !Self::reinstall_needed(&self.catalog, req, phase_prefs) {
            tracing::debug!(name = %name, "already installed and satisfies requirement, skipping");
            return;
        }

        // 4. Cross-phase migration: Build claims names Runtime has
        // already scheduled for the next round but not yet fetched.
        if phase.moves_claimed_names() {
            let other = phase.other();
            if successor.sub_round_mut(other).to_fetch.remove(name) {
                successor.sub_round_mut(phase).to_fetch.insert(name.clone());
                tracing::debug!(name = %name, from = other.label(), to = phase.label(), "migrating cross-phase claim");
                return;
            }
        }

        // 5. Already claimed anywhere this resolve (this phase's own
        // pipeline, or the other phase, or an earlier round).
        if claimed.contains(name) {
            tracing::debug!(name = %name, phase = phase.label(), "already scheduled elsewhere, skipping");
            return;
        }

        // 6. Schedule for the next round.
        claimed.insert(name.clone());
        successor.sub_round_mut(phase).to_fetch.insert(name.clone());
    }

    fn reinstall_needed(catalog: &C, req: &wheelwright_core::Requirement, prefs: ResolutionPrefs) -> bool {
        let Some(installed) = catalog.installed_version(&req.name) else {
            return true;
        };
        if prefs.upgrade {
            return true;
        }
        if prefs.force_reinstall {
            return true;
        }
        let satisfies = req
            .specifier
            .as_ref()
            .is_none_or(|spec| spec.matches(&installed));
        !satisfies
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FakeFetcher;
    use crate::metadata_source::FakeMetadataSource;
    use std::path::PathBuf;
    use wheelwright_core::{Requirement, Version};
    use wheelwright_install::InMemoryCatalog;
    use wheelwright_metadata::ExtractedMetadata;

    fn engine_with<'a>(
        fetcher: &'a FakeFetcher,
        metadata: &'a FakeMetadataSource,
        catalog: &'a InMemoryCatalog,
    ) -> Engine<'a, FakeFetcher, FakeMetadataSource, InMemoryCatalog> {
        Engine::new(fetcher, metadata, catalog)
    }

    #[test]
    fn leaf_package_is_fetched_and_resolved_with_no_deps() {
        let fetcher = FakeFetcher {
            outcomes: [(PackageName::new("left-pad"), FetchOutcome::Fetched(PathBuf::from("/src/left-pad")))]
                .into_iter()
                .collect(),
        };
        let metadata = FakeMetadataSource {
            table: [(
                PathBuf::from("/src/left-pad"),
                ExtractedMetadata {
                    name: PackageName::new("left-pad"),
                    build_deps: vec![],
                    deps: vec![],
                },
            )]
            .into_iter()
            .collect(),
        };
        let catalog = InMemoryCatalog::new();
        let engine = engine_with(&fetcher, &metadata, &catalog);

        let mut round = Round::default();
        round.runtime.to_fetch.insert(PackageName::new("left-pad"));
        engine.fetch_round(&mut round).unwrap();

        let mut successor = Round::default();
        let mut claimed = wheelwright_core::AHashSet::default();
        engine.resolve_round(ResolutionPrefs::new(), &round, &mut successor, &mut claimed).unwrap();

        assert!(successor.runtime.resolved.contains(&PackageName::new("left-pad")));
        assert!(successor.is_empty());
    }

    #[test]
    fn installed_package_satisfying_specifier_is_skipped() {
        let req = Requirement::new("left-pad").with_specifier(wheelwright_core::VersionSpec::new(">=1.0.0"));
        let mut catalog = InMemoryCatalog::new();
        catalog.insert(PackageName::new("left-pad"), Version::new(1, 2, 0));

        let fetcher = FakeFetcher {
            outcomes: std::collections::HashMap::new(),
        };
        let metadata = FakeMetadataSource {
            table: std::collections::HashMap::new(),
        };
        let engine = engine_with(&fetcher, &metadata, &catalog);

        let round = Round::default();
        let mut successor = Round::default();
        let mut claimed = wheelwright_core::AHashSet::default();
        engine.consider_requirement(&req, PhaseId::Runtime, ResolutionPrefs::new(), &round, &mut successor, &mut claimed);

        assert!(successor.runtime.to_fetch.is_empty());
    }

    #[test]
    fn upgrade_true_reschedules_even_when_installed_version_satisfies() {
        let req = Requirement::new("pkg").with_specifier(wheelwright_core::VersionSpec::new(">=1.0.0"));
        let mut catalog = InMemoryCatalog::new();
        catalog.insert(PackageName::new("pkg"), Version::new(1, 0, 0));

        let fetcher = FakeFetcher {
            outcomes: std::collections::HashMap::new(),
        };
        let metadata = FakeMetadataSource {
            table: std::collections::HashMap::new(),
        };
        let engine = engine_with(&fetcher, &metadata, &catalog);

        let round = Round::default();
        let mut successor = Round::default();
        let mut claimed = wheelwright_core::AHashSet::default();

        let mut prefs = ResolutionPrefs::new();
        prefs.upgrade = true;
        engine.consider_requirement(&req, PhaseId::Runtime, prefs, &round, &mut successor, &mut claimed);

        assert!(successor.runtime.to_fetch.contains(&PackageName::new("pkg")));
    }

    #[test]
    fn build_phase_migrates_a_name_already_scheduled_by_runtime() {
        let fetcher = FakeFetcher {
            outcomes: std::collections::HashMap::new(),
        };
        let metadata = FakeMetadataSource {
            table: std::collections::HashMap::new(),
        };
        let catalog = InMemoryCatalog::new();
        let engine = engine_with(&fetcher, &metadata, &catalog);

        let round = Round::default();
        let mut successor = Round::default();
        let mut claimed = wheelwright_core::AHashSet::default();

        // Runtime discovers `shared` first.
        let runtime_req = Requirement::new("shared");
        engine.consider_requirement(&runtime_req, PhaseId::Runtime, ResolutionPrefs::new(), &round, &mut successor, &mut claimed);
        assert!(successor.runtime.to_fetch.contains(&PackageName::new("shared")));

        // Build then discovers the same name as one of its own deps.
        let build_req = Requirement::new("shared");
        let build_prefs = PhaseId::Build.patch_prefs(ResolutionPrefs::new());
        engine.consider_requirement(&build_req, PhaseId::Build, build_prefs, &round, &mut successor, &mut claimed);

        assert!(successor.build.to_fetch.contains(&PackageName::new("shared")));
        assert!(!successor.runtime.to_fetch.contains(&PackageName::new("shared")));
    }

    #[test]
    fn runtime_does_not_reclaim_a_name_build_already_holds() {
        let fetcher = FakeFetcher {
            outcomes: std::collections::HashMap::new(),
        };
        let metadata = FakeMetadataSource {
            table: std::collections::HashMap::new(),
        };
        let catalog = InMemoryCatalog::new();
        let engine = engine_with(&fetcher, &metadata, &catalog);

        let round = Round::default();
        let mut successor = Round::default();
        let mut claimed = wheelwright_core::AHashSet::default();

        let build_req = Requirement::new("shared");
        let build_prefs = PhaseId::Build.patch_prefs(ResolutionPrefs::new());
        engine.consider_requirement(&build_req, PhaseId::Build, build_prefs, &round, &mut successor, &mut claimed);

        let runtime_req = Requirement::new("shared");
        engine.consider_requirement(&runtime_req, PhaseId::Runtime, ResolutionPrefs::new(), &round, &mut successor, &mut claimed);

        assert!(successor.build.to_fetch.contains(&PackageName::new("shared")));
        assert!(!successor.runtime.to_fetch.contains(&PackageName::new("shared")));
    }

    #[test]
    fn marker_skip_prevents_scheduling() {
        let fetcher = FakeFetcher {
            outcomes: std::collections::HashMap::new(),
        };
        let metadata = FakeMetadataSource {
            table: std::collections::HashMap::new(),
        };
        let catalog = InMemoryCatalog::new();
        let engine = engine_with(&fetcher, &metadata, &catalog);

        let other_platform = if wheelwright_core::host_sys_platform() == "win32" { "linux" } else { "win32" };
        let req = Requirement::new("pywin32").with_marker(wheelwright_core::EnvMarker::sys_platform(other_platform));

        let round = Round::default();
        let mut successor = Round::default();
        let mut claimed = wheelwright_core::AHashSet::default();
        engine.consider_requirement(&req, PhaseId::Runtime, ResolutionPrefs::new(), &round, &mut successor, &mut claimed);

        assert!(successor.runtime.to_fetch.is_empty());
    }

    #[test]
    fn marker_matching_the_host_is_still_skipped() {
        // A marker whose predicate would evaluate true on this host
        // (e.g. sys_platform == the host's own platform) is still a
        // non-null marker, and any non-null marker is skipped.
        let fetcher = FakeFetcher {
            outcomes: std::collections::HashMap::new(),
        };
        let metadata = FakeMetadataSource {
            table: std::collections::HashMap::new(),
        };
        let catalog = InMemoryCatalog::new();
        let engine = engine_with(&fetcher, &metadata, &catalog);

        let req = Requirement::new("typing-extensions")
            .with_marker(wheelwright_core::EnvMarker::sys_platform(wheelwright_core::host_sys_platform()));

        let round = Round::default();
        let mut successor = Round::default();
        let mut claimed = wheelwright_core::AHashSet::default();
        engine.consider_requirement(&req, PhaseId::Runtime, ResolutionPrefs::new(), &round, &mut successor, &mut claimed);

        assert!(successor.runtime.to_fetch.is_empty());
    }

    #[test]
    fn system_dependency_is_ignored_and_never_scheduled() {
        let fetcher = FakeFetcher {
            outcomes: [(PackageName::new("libxml"), FetchOutcome::Ignored)].into_iter().collect(),
        };
        let metadata = FakeMetadataSource {
            table: std::collections::HashMap::new(),
        };
        let catalog = InMemoryCatalog::new();
        let engine = engine_with(&fetcher, &metadata, &catalog);

        let mut round = Round::default();
        round.runtime.to_fetch.insert(PackageName::new("libxml"));
        engine.fetch_round(&mut round).unwrap();
        assert!(round.runtime.ignored.contains(&PackageName::new("libxml")));

        let req = Requirement::new("libxml");
        let mut successor = Round::default();
        let mut claimed = wheelwright_core::AHashSet::default();
        engine.consider_requirement(&req, PhaseId::Runtime, ResolutionPrefs::new(), &round, &mut successor, &mut claimed);

        assert!(successor.runtime.to_fetch.is_empty());
        assert!(successor.runtime.resolved.is_empty());
    }
}
