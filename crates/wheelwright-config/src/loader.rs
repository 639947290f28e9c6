//! Configuration loader with hierarchical merging.
//!
//! Priority, lowest to highest: built-in defaults, `wheelwright.json`
//! in the platform config directory, `WHEELWRIGHT_*` environment
//! variables, CLI flags.

use crate::env::EnvConfig;
use crate::error::Result;
use crate::types::{FileConfig, ResolvedConfig};
use std::path::{Path, PathBuf};

/// Configuration loader.
#[derive(Debug)]
pub struct ConfigLoader {
    project_dir: PathBuf,
    env_config: EnvConfig,
}

impl ConfigLoader {
    /// Create a new configuration loader rooted at `project_dir`.
    #[must_use]
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
            env_config: EnvConfig::from_env(),
        }
    }

    /// Path to the global `wheelwright.json`, honoring `WHEELWRIGHT_HOME`.
    #[must_use]
    pub fn global_config_path(&self) -> PathBuf {
        let home = self.env_config.home.clone().unwrap_or_else(|| {
            ResolvedConfig::default().home_dir
        });
        home.join("wheelwright.json")
    }

    fn load_file_config(&self) -> Option<FileConfig> {
        let path = self.global_config_path();
        let content = std::fs::read_to_string(&path).ok()?;
        match sonic_rs::from_str(&content) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring malformed wheelwright.json");
                None
            }
        }
    }

    /// Build the resolved configuration by merging all sources.
    ///
    /// # Errors
    /// Returns `ConfigError::Io` if the file config exists but cannot
    /// be parsed as a readable path (a malformed file is logged and
    /// skipped rather than treated as fatal).
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        let mut resolved = ResolvedConfig {
            project_dir: self.project_dir.clone(),
            ..ResolvedConfig::default()
        };

        if let Some(file) = self.load_file_config() {
            self.apply_file(&mut resolved, &file);
        }

        self.apply_env(&mut resolved);

        Ok(resolved)
    }

    fn apply_file(&self, resolved: &mut ResolvedConfig, file: &FileConfig) {
        if let Some(ref paths) = file.registry_paths {
            resolved.registry_paths = paths.iter().map(|p| self.resolve_path(p)).collect();
        }
        if let Some(upgrade) = file.upgrade {
            resolved.prefs.upgrade = upgrade;
        }
        if let Some(resolve_deps) = file.resolve_deps {
            resolved.prefs.resolve_deps = resolve_deps;
        }
        if let Some(force_reinstall) = file.force_reinstall {
            resolved.prefs.force_reinstall = force_reinstall;
        }
        if let Some(ref log) = file.log {
            resolved.log_level = log.clone();
        }
        if let Some(ref cache_dir) = file.cache_dir {
            resolved.cache_dir = self.resolve_path(cache_dir);
        }
    }

    fn apply_env(&self, resolved: &mut ResolvedConfig) {
        if let Some(ref home) = self.env_config.home {
            resolved.home_dir = home.clone();
        }
        if let Some(ref cache) = self.env_config.cache_dir {
            resolved.cache_dir = cache.clone();
        }
        if !self.env_config.registry_paths.is_empty() {
            let mut merged = self.env_config.registry_paths.clone();
            merged.extend(resolved.registry_paths.drain(..));
            resolved.registry_paths = merged;
        }
        if let Some(ref log) = self.env_config.log {
            resolved.log_level = log.clone();
        }
    }

    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_dir.join(path)
        }
    }

    /// The project directory this loader is rooted at.
    #[must_use]
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }
}

/// CLI-supplied overrides, applied last (highest priority).
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// `--registry <path>` values, in the order given on the command line.
    pub registry_paths: Vec<PathBuf>,
    /// `-v`/`--verbose` repetition count.
    pub verbosity: u8,
    /// `--upgrade` flag.
    pub upgrade: bool,
    /// `--no-deps` flag (negates `resolve_deps`).
    pub no_deps: bool,
    /// `--force-reinstall` flag.
    pub force_reinstall: bool,
}

impl CliOverrides {
    /// Apply CLI overrides to resolved config.
    pub fn apply_to(&self, resolved: &mut ResolvedConfig) {
        if !self.registry_paths.is_empty() {
            let mut merged = self.registry_paths.clone();
            merged.extend(resolved.registry_paths.drain(..));
            resolved.registry_paths = merged;
        }
        if self.upgrade {
            resolved.prefs.upgrade = true;
        }
        if self.no_deps {
            resolved.prefs.resolve_deps = false;
        }
        if self.force_reinstall {
            resolved.prefs.force_reinstall = true;
        }
        if self.verbosity > 0 {
            resolved.log_level = verbosity_to_filter(self.verbosity);
        }
    }
}

fn verbosity_to_filter(verbosity: u8) -> String {
    match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_loader_global_path_ends_in_json() {
        let loader = ConfigLoader::new("/tmp/test-project");
        assert!(loader.global_config_path().ends_with("wheelwright.json"));
    }

    #[test]
    fn resolved_config_defaults() {
        let config = ResolvedConfig::default();
        assert_eq!(config.log_level, "info");
        assert!(config.registry_paths.is_empty());
    }

    #[test]
    fn cli_overrides_apply() {
        let mut config = ResolvedConfig::default();
        let overrides = CliOverrides {
            upgrade: true,
            verbosity: 2,
            ..Default::default()
        };
        overrides.apply_to(&mut config);
        assert!(config.prefs.upgrade);
        assert_eq!(config.log_level, "trace");
    }

    #[test]
    fn cli_registry_paths_take_priority_over_file_and_env() {
        let mut config = ResolvedConfig {
            registry_paths: vec![PathBuf::from("from-file-or-env")],
            ..ResolvedConfig::default()
        };
        let overrides = CliOverrides {
            registry_paths: vec![PathBuf::from("from-cli")],
            ..Default::default()
        };
        overrides.apply_to(&mut config);
        assert_eq!(config.registry_paths[0], PathBuf::from("from-cli"));
    }
}
