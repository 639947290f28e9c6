//! What a single stage's child process actually does once it has
//! parsed its [`StageRequest`] off stdin.
//!
//! `CloneEssentials` and `InstallSelf` are deliberately no-ops here:
//! cloning belongs to the orchestrator (it has to happen before the
//! first install stage even starts), and installing wheelwright's own
//! package re-enters the ordinary resolver/installer path rather than
//! this schedule mechanism — see [`crate::orchestrator::Orchestrator`].

use std::path::{Path, PathBuf};

use wheelwright_core::{AHashMap, AHashSet, Error, PackageName, Result};
use wheelwright_install::{Installer, InstallationScheme, WheelInstaller};

use crate::request::StageRequest;
use crate::schedule::{self, ScheduleEntry};
use crate::setup_cfg_fixup;
use crate::stage::Stage;

/// Run `request.stage`'s schedule, building and installing each entry
/// not already in `request.already_installed`, in schedule order.
///
/// `source_roots` must already hold every name the stage (and the
/// stages after it) might reference on an extra import path — this
/// function never fetches anything itself.
///
/// # Errors
/// `Error::bootstrap_precondition` if a schedule entry's source is
/// missing from `source_roots`; otherwise propagates the first build
/// or install failure.
pub fn run_stage(
    request: &StageRequest,
    source_roots: &AHashMap<PackageName, PathBuf>,
    out_dir: &Path,
    scheme: &InstallationScheme,
) -> Result<()> {
    let already_installed: AHashSet<PackageName> = request.already_installed.iter().cloned().collect();
    let installer = WheelInstaller::new();

    match request.stage {
        Stage::CloneEssentials | Stage::InstallSelf => Ok(()),
        Stage::FoundationalPair => run_foundational_pair(&already_installed, source_roots, out_dir, &installer, scheme),
        Stage::PackagingEcosystem => run_schedule(
            schedule::packaging_ecosystem_schedule(),
            request.stage,
            &already_installed,
            source_roots,
            out_dir,
            &installer,
            scheme,
        ),
        Stage::HatchlingBundle => run_schedule(
            schedule::hatchling_bundle_schedule(),
            request.stage,
            &already_installed,
            source_roots,
            out_dir,
            &installer,
            scheme,
        ),
    }
}

/// Build and install every not-yet-installed entry of `schedule` via
/// the ordinary hook-protocol build path.
fn run_schedule(
    schedule: Vec<ScheduleEntry>,
    stage: Stage,
    already_installed: &AHashSet<PackageName>,
    source_roots: &AHashMap<PackageName, PathBuf>,
    out_dir: &Path,
    installer: &WheelInstaller,
    scheme: &InstallationScheme,
) -> Result<()> {
    for entry in schedule {
        if already_installed.contains(&entry.name) {
            tracing::debug!(name = %entry.name, "already installed, skipping");
            continue;
        }

        let source_dir = source_roots
            .get(&entry.name)
            .ok_or_else(|| Error::bootstrap_precondition(vec![entry.name.as_str().to_string()]))?;

        let extra_import_path: Vec<PathBuf> = entry
            .extra_import_path_names
            .iter()
            .filter(|dep| !already_installed.contains(dep))
            .filter_map(|dep| source_roots.get(dep).cloned())
            .collect();

        tracing::info!(name = %entry.name, stage = ?stage, "bootstrapping package");
        let wheel = wheelwright_build::build_wheel(source_dir, out_dir, &extra_import_path)?;
        installer.install(&[wheel.as_path()], scheme)?;
    }

    Ok(())
}

/// `setuptools` and `wheel` via the legacy `bdist_wheel` path: neither
/// one's own `pyproject.toml` can be trusted yet, since the hook
/// protocol needs `setuptools` importable to run it at all.
///
/// `wheel`'s `setup.cfg` has its `install_requires` elided first —
/// nothing has installed those requirements yet and no resolver is
/// running here to fetch them.
fn run_foundational_pair(
    already_installed: &AHashSet<PackageName>,
    source_roots: &AHashMap<PackageName, PathBuf>,
    out_dir: &Path,
    installer: &WheelInstaller,
    scheme: &InstallationScheme,
) -> Result<()> {
    for entry in schedule::foundational_pair() {
        if already_installed.contains(&entry.name) {
            tracing::debug!(name = %entry.name, "already installed, skipping");
            continue;
        }

        let source_dir = source_roots
            .get(&entry.name)
            .ok_or_else(|| Error::bootstrap_precondition(vec![entry.name.as_str().to_string()]))?;

        if entry.name.as_str() == "wheel" {
            setup_cfg_fixup::elide_install_requires(source_dir)?;
        }

        tracing::info!(name = %entry.name, "bootstrapping foundational package via legacy build path");
        let wheel = wheelwright_build::legacy::build_wheel_legacy(source_dir, out_dir, &[])?;
        installer.install(&[wheel.as_path()], scheme)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_source_root_is_a_bootstrap_precondition() {
        let request =
            StageRequest { stage: Stage::FoundationalPair, already_installed: vec![], source_roots: vec![] };
        let root = tempfile::tempdir().unwrap();
        let scheme = InstallationScheme::rooted_at(root.path());
        let err = run_stage(&request, &AHashMap::default(), root.path(), &scheme).unwrap_err();
        assert!(matches!(err, Error::BootstrapPrecondition { .. }));
    }

    #[test]
    fn clone_essentials_and_install_self_are_no_ops() {
        let root = tempfile::tempdir().unwrap();
        let scheme = InstallationScheme::rooted_at(root.path());
        for stage in [Stage::CloneEssentials, Stage::InstallSelf] {
            let request = StageRequest { stage, already_installed: vec![], source_roots: vec![] };
            run_stage(&request, &AHashMap::default(), root.path(), &scheme).unwrap();
        }
    }

    #[test]
    fn foundational_pair_elides_wheels_install_requires_before_building() {
        let wheel_dir = tempfile::tempdir().unwrap();
        std::fs::write(
            wheel_dir.path().join("setup.cfg"),
            "[metadata]\nname = wheel\n\n[options]\ninstall_requires =\n    packaging\n",
        )
        .unwrap();

        let mut source_roots = AHashMap::default();
        source_roots.insert(PackageName::new("wheel"), wheel_dir.path().to_path_buf());

        let request = StageRequest {
            stage: Stage::FoundationalPair,
            already_installed: vec![PackageName::new("setuptools")],
            source_roots: vec![],
        };
        let root = tempfile::tempdir().unwrap();
        let scheme = InstallationScheme::rooted_at(root.path());

        // No setup.py present, so the legacy build itself fails — the
        // elision runs before that call regardless of its outcome.
        let _ = run_stage(&request, &source_roots, root.path(), &scheme);

        let rewritten = std::fs::read_to_string(wheel_dir.path().join("setup.cfg")).unwrap();
        assert!(!rewritten.contains("install_requires"));
    }

    #[test]
    fn already_installed_entries_are_skipped() {
        let request = StageRequest {
            stage: Stage::FoundationalPair,
            already_installed: vec![PackageName::new("setuptools"), PackageName::new("wheel")],
            source_roots: vec![],
        };
        let root = tempfile::tempdir().unwrap();
        let scheme = InstallationScheme::rooted_at(root.path());
        run_stage(&request, &AHashMap::default(), root.path(), &scheme).unwrap();
    }
}
