//! The parent-side driver: spawn each stage as a fresh child process of
//! the same binary, in order, threading `alreadyInstalled` forward and
//! aborting on the first one that fails.
//!
//! The orchestrator never calls back into freshly-installed code
//! in-process — it only starts children and waits for their exit
//! status. What a stage's child actually does lives in
//! [`crate::runner::run_stage`], reached via whatever hidden
//! subcommand the caller wires up to read a [`StageRequest`] off stdin
//! and dispatch to it.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use wheelwright_core::{Error, PackageName, Result};

use crate::request::StageRequest;
use crate::stage::Stage;

/// Drives a fixed sequence of stages, each as a fresh child process of
/// `current_exe` invoked as `current_exe <stage_subcommand> <stage-arg>`
/// with a [`StageRequest`] JSON-encoded on its stdin.
#[derive(Debug, Clone)]
pub struct Orchestrator {
    current_exe: PathBuf,
    stage_subcommand: Vec<String>,
}

impl Orchestrator {
    /// A new orchestrator re-invoking `current_exe` with
    /// `stage_subcommand` before the stage-selector argument — e.g.
    /// `["__bootstrap-stage"]` for a CLI that registers that as a
    /// hidden subcommand.
    #[must_use]
    pub fn new(current_exe: PathBuf, stage_subcommand: Vec<String>) -> Self {
        Self { current_exe, stage_subcommand }
    }

    /// Run every stage in `sequence`, in order, threading the
    /// `alreadyInstalled` set forward from each stage's declared
    /// [`Stage::installs`]. `source_roots` is forwarded verbatim to
    /// every stage.
    ///
    /// # Errors
    /// `Error::bootstrap_precondition` naming the failing stage if a
    /// child cannot be spawned or exits non-zero.
    pub fn run(&self, sequence: &[Stage], source_roots: &[(PackageName, PathBuf)]) -> Result<Vec<PackageName>> {
        let mut already_installed: Vec<PackageName> = Vec::new();
        for &stage in sequence {
            let request = StageRequest {
                stage,
                already_installed: already_installed.clone(),
                source_roots: source_roots.to_vec(),
            };
            self.run_stage(&request)?;
            already_installed.extend(stage.installs());
        }
        Ok(already_installed)
    }

    fn run_stage(&self, request: &StageRequest) -> Result<()> {
        let payload = wheelwright_core::to_json(request)?;

        let mut child = Command::new(&self.current_exe)
            .args(&self.stage_subcommand)
            .arg(request.stage.as_arg())
            .stdin(Stdio::piped())
            .spawn()
            .map_err(|e| {
                Error::bootstrap_precondition(vec![format!(
                    "failed to spawn stage {:?}: {e}",
                    request.stage
                )])
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(payload.as_bytes()).map_err(|e| Error::io(&self.current_exe, e))?;
        }

        let status = child.wait().map_err(|e| Error::io(&self.current_exe, e))?;
        if !status.success() {
            return Err(Error::bootstrap_precondition(vec![format!(
                "stage {:?} exited with {status}",
                request.stage
            )]));
        }
        tracing::info!(stage = ?request.stage, "bootstrap stage completed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_binary_surfaces_as_bootstrap_precondition() {
        let orchestrator =
            Orchestrator::new(PathBuf::from("/nonexistent/wheelwright-binary"), vec!["__bootstrap-stage".into()]);
        let err = orchestrator.run(&Stage::PACKAGING_SEQUENCE, &[]).unwrap_err();
        assert!(matches!(err, Error::BootstrapPrecondition { .. }));
    }

    #[test]
    fn a_failing_stage_aborts_the_sequence() {
        // `false` exits 1 immediately, ignoring its stdin and args.
        let orchestrator = Orchestrator::new(PathBuf::from("false"), vec![]);
        let err = orchestrator.run(&Stage::SELF_SEQUENCE, &[]).unwrap_err();
        assert!(matches!(err, Error::BootstrapPrecondition { .. }));
    }

    #[test]
    fn a_succeeding_stage_accumulates_its_installs() {
        // `true` exits 0 immediately for every stage.
        let orchestrator = Orchestrator::new(PathBuf::from("true"), vec![]);
        let installed = orchestrator.run(&Stage::PACKAGING_SEQUENCE, &[]).unwrap();
        assert!(installed.iter().any(|n| n.as_str() == "setuptools"));
        assert!(installed.iter().any(|n| n.as_str() == "hatchling"));
    }
}
