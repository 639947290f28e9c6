//! Resolution preferences shared across the pipeline's phases.

/// Preferences governing one resolution run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ResolutionPrefs {
    /// Re-resolve packages already installed, rather than leaving them alone.
    pub upgrade: bool,
    /// Recurse into a fetched package's own declared dependencies.
    pub resolve_deps: bool,
    /// Reinstall even if an existing install already satisfies the requirement.
    pub force_reinstall: bool,
}

impl ResolutionPrefs {
    /// Default preferences: resolve dependencies, do not upgrade or force.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            upgrade: false,
            resolve_deps: true,
            force_reinstall: false,
        }
    }

    /// Preferences for the Build phase of a round.
    ///
    /// The Build phase always forces `force_reinstall` off: build-time
    /// dependencies are installed once per round and never need
    /// reinstalling just because the runtime phase asked for it.
    #[must_use]
    pub const fn for_build_phase(self) -> Self {
        Self {
            force_reinstall: false,
            ..self
        }
    }
}

impl Default for ResolutionPrefs {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_phase_never_forces_reinstall() {
        let prefs = ResolutionPrefs {
            upgrade: true,
            resolve_deps: true,
            force_reinstall: true,
        };
        assert!(!prefs.for_build_phase().force_reinstall);
    }

    #[test]
    fn default_resolves_deps_without_upgrade() {
        let prefs = ResolutionPrefs::default();
        assert!(prefs.resolve_deps);
        assert!(!prefs.upgrade);
        assert!(!prefs.force_reinstall);
    }
}
