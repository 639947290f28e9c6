//! The stage child process's stdin protocol.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use wheelwright_core::PackageName;

use crate::stage::Stage;

/// What a stage's child process receives on stdin: which stage to
/// run, the names already installed by earlier stages, and where each
/// schedule entry's source was already cloned to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageRequest {
    /// Which stage this invocation should run.
    pub stage: Stage,
    /// Names installed by stages that ran (successfully) before this one.
    pub already_installed: Vec<PackageName>,
    /// Name to already-cloned-source-directory mapping, covering every
    /// entry this and later stages might need on their import path.
    pub source_roots: Vec<(PackageName, PathBuf)>,
}
