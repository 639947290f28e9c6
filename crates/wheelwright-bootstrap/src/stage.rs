//! The fixed sequence of stages `wheelwright bootstrap` drives, each
//! run as a fresh child process of the same binary.
//!
//! There is no interpreter-level module-reload primitive in a
//! compiled binary, so a stage can never observe what an earlier
//! stage just installed by simply re-importing it in the same
//! process — the earlier stage's packages were installed by code that
//! was, at the time it ran, compiled against a world where they did
//! not exist yet. Running each stage as its own child process
//! sidesteps this entirely: a freshly spawned process always sees the
//! installation tree as it stands at the moment it starts.

use serde::{Deserialize, Serialize};

use crate::schedule;
use crate::tier::BootstrapTier;

/// One stage of the bootstrap sequence, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    /// Clone the essential packages' sources; install nothing yet.
    CloneEssentials,
    /// Install the foundational pair (`setuptools`, `wheel`) via the
    /// legacy imperative path.
    FoundationalPair,
    /// Install the rest of the packaging ecosystem from its schedule.
    PackagingEcosystem,
    /// Install the optional `hatchling` build-backend bundle.
    HatchlingBundle,
    /// Re-resolve with `upgrade = true` and install wheelwright's own
    /// package into the runtime.
    InstallSelf,
}

impl Stage {
    /// The sequence `wheelwright bootstrap packaging` runs: everything
    /// needed to build arbitrary source packages, stopping short of
    /// installing wheelwright itself.
    pub const PACKAGING_SEQUENCE: [Self; 4] =
        [Self::CloneEssentials, Self::FoundationalPair, Self::PackagingEcosystem, Self::HatchlingBundle];

    /// The sequence `wheelwright bootstrap self` runs: the packaging
    /// sequence followed by installing wheelwright's own package.
    pub const SELF_SEQUENCE: [Self; 5] = [
        Self::CloneEssentials,
        Self::FoundationalPair,
        Self::PackagingEcosystem,
        Self::HatchlingBundle,
        Self::InstallSelf,
    ];

    /// The capability tier this stage requires of the process running it.
    #[must_use]
    pub const fn requires(self) -> BootstrapTier {
        match self {
            Self::CloneEssentials => BootstrapTier::Bootstrap,
            Self::FoundationalPair => BootstrapTier::Bare,
            Self::PackagingEcosystem | Self::HatchlingBundle | Self::InstallSelf => BootstrapTier::Full,
        }
    }

    /// The names this stage's successful completion adds to
    /// `alreadyInstalled`, for every stage but `InstallSelf` (whose
    /// installed name isn't schedule data — it's whatever package the
    /// caller is bootstrapping).
    #[must_use]
    pub fn installs(self) -> Vec<wheelwright_core::PackageName> {
        match self {
            Self::CloneEssentials | Self::InstallSelf => Vec::new(),
            Self::FoundationalPair => schedule::foundational_pair().into_iter().map(|e| e.name).collect(),
            Self::PackagingEcosystem => {
                schedule::packaging_ecosystem_schedule().into_iter().map(|e| e.name).collect()
            }
            Self::HatchlingBundle => schedule::hatchling_bundle_schedule().into_iter().map(|e| e.name).collect(),
        }
    }

    /// The stage-selector argument this stage is invoked with on the
    /// child's command line.
    #[must_use]
    pub const fn as_arg(self) -> &'static str {
        match self {
            Self::CloneEssentials => "clone-essentials",
            Self::FoundationalPair => "foundational-pair",
            Self::PackagingEcosystem => "packaging-ecosystem",
            Self::HatchlingBundle => "hatchling-bundle",
            Self::InstallSelf => "install-self",
        }
    }

    /// Parse a stage-selector argument back into a [`Stage`].
    #[must_use]
    pub fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "clone-essentials" => Some(Self::CloneEssentials),
            "foundational-pair" => Some(Self::FoundationalPair),
            "packaging-ecosystem" => Some(Self::PackagingEcosystem),
            "hatchling-bundle" => Some(Self::HatchlingBundle),
            "install-self" => Some(Self::InstallSelf),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_arg_round_trips() {
        for stage in Stage::SELF_SEQUENCE {
            assert_eq!(Stage::from_arg(stage.as_arg()), Some(stage));
        }
    }

    #[test]
    fn packaging_sequence_is_a_prefix_of_self_sequence() {
        assert_eq!(&Stage::SELF_SEQUENCE[..4], &Stage::PACKAGING_SEQUENCE);
    }

    #[test]
    fn foundational_pair_installs_setuptools_and_wheel() {
        let names: Vec<_> = Stage::FoundationalPair.installs().iter().map(|n| n.as_str().to_string()).collect();
        assert_eq!(names, vec!["setuptools", "wheel"]);
    }
}
