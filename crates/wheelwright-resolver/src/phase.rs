//! The two dependency phases a round processes: build tools needed
//! only to produce a wheel, and runtime packages the built wheel
//! depends on.

use wheelwright_core::{Requirement, ResolutionPrefs};
use wheelwright_metadata::ExtractedMetadata;

/// Which half of a round a requirement belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaseId {
    /// Build-time-only dependencies (`[build-system] requires`).
    Build,
    /// Run-time dependencies.
    Runtime,
}

impl PhaseId {
    /// Both phases, in processing order.
    pub const ALL: [Self; 2] = [Self::Build, Self::Runtime];

    /// The other phase.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Build => Self::Runtime,
            Self::Runtime => Self::Build,
        }
    }

    /// Whether this phase claims a name the other phase has already
    /// scheduled, rather than leaving it where it was first discovered.
    ///
    /// Only the Build phase claims: a package needed to build another
    /// package must be ready before that package's own build step
    /// runs, so if it was first discovered as somebody's runtime
    /// dependency it still has to move into Build's queue.
    #[must_use]
    pub const fn moves_claimed_names(self) -> bool {
        matches!(self, Self::Build)
    }

    /// Apply this phase's patch to a set of resolution preferences.
    #[must_use]
    pub const fn patch_prefs(self, prefs: ResolutionPrefs) -> ResolutionPrefs {
        match self {
            Self::Build => prefs.for_build_phase(),
            Self::Runtime => prefs,
        }
    }

    /// The dependency list this phase pulls off a package's metadata.
    #[must_use]
    pub fn deps<'a>(self, prefs: ResolutionPrefs, metadata: &'a ExtractedMetadata) -> &'a [Requirement] {
        match self {
            Self::Build => &metadata.build_deps,
            Self::Runtime => {
                if prefs.resolve_deps {
                    &metadata.deps
                } else {
                    &[]
                }
            }
        }
    }

    /// A short label for logging.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Build => "build",
            Self::Runtime => "runtime",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_build_moves_claimed_names() {
        assert!(PhaseId::Build.moves_claimed_names());
        assert!(!PhaseId::Runtime.moves_claimed_names());
    }

    #[test]
    fn other_is_an_involution() {
        assert_eq!(PhaseId::Build.other(), PhaseId::Runtime);
        assert_eq!(PhaseId::Runtime.other(), PhaseId::Build);
    }

    #[test]
    fn build_phase_prefs_never_force_reinstall() {
        let prefs = ResolutionPrefs {
            upgrade: false,
            resolve_deps: true,
            force_reinstall: true,
        };
        assert!(!PhaseId::Build.patch_prefs(prefs).force_reinstall);
        assert!(PhaseId::Runtime.patch_prefs(prefs).force_reinstall);
    }
}
