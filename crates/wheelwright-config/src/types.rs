//! Configuration types: the on-disk `wheelwright.json` shape and the
//! fully merged configuration the rest of the workspace consumes.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use wheelwright_core::ResolutionPrefs;

/// The optional `wheelwright.json` document, read from the platform
/// config directory. Every field is optional: an absent field simply
/// leaves the lower-priority layer (environment, then defaults) in
/// place.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FileConfig {
    /// Extra TSV registry files or directories, searched ahead of the
    /// built-in registry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry_paths: Option<Vec<PathBuf>>,

    /// Default for `ResolutionPrefs::upgrade`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upgrade: Option<bool>,

    /// Default for `ResolutionPrefs::resolve_deps`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolve_deps: Option<bool>,

    /// Default for `ResolutionPrefs::force_reinstall`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force_reinstall: Option<bool>,

    /// Default `tracing` filter directive (e.g. `"info"`, `"debug"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log: Option<String>,

    /// Cache directory override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,
}

/// Fully resolved configuration: defaults, `wheelwright.json`,
/// environment variables, and CLI flags all merged, highest priority
/// last applied.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Directory the command is operating in.
    pub project_dir: PathBuf,
    /// Platform config directory (`directories::ProjectDirs::config_dir`).
    pub home_dir: PathBuf,
    /// Directory holding fetched VCS checkouts and built wheels.
    pub cache_dir: PathBuf,
    /// Extra registry search paths, in priority order (first wins).
    pub registry_paths: Vec<PathBuf>,
    /// Resolver defaults.
    pub prefs: ResolutionPrefs,
    /// `tracing` filter directive.
    pub log_level: String,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        let dirs = directories::ProjectDirs::from("pm", "wheelwright", "wheelwright");
        let (home_dir, cache_dir) = dirs.as_ref().map_or_else(
            || (PathBuf::from(".wheelwright"), PathBuf::from(".wheelwright/cache")),
            |d| (d.config_dir().to_path_buf(), d.cache_dir().to_path_buf()),
        );

        Self {
            project_dir: PathBuf::from("."),
            home_dir,
            cache_dir,
            registry_paths: Vec::new(),
            prefs: ResolutionPrefs::new(),
            log_level: "info".to_string(),
        }
    }
}
