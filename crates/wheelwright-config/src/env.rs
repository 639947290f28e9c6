//! Environment variable configuration support.

use std::path::PathBuf;

/// Well-known `WHEELWRIGHT_*` environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WheelwrightEnvVar {
    /// `WHEELWRIGHT_REGISTRY_PATH` - extra registry TSV file or directory.
    RegistryPath,
    /// `WHEELWRIGHT_LOG` - `tracing` filter directive.
    Log,
    /// `WHEELWRIGHT_CACHE_DIR` - cache directory override.
    CacheDir,
    /// `WHEELWRIGHT_HOME` - config/state directory override.
    Home,
}

impl WheelwrightEnvVar {
    /// Get the environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RegistryPath => "WHEELWRIGHT_REGISTRY_PATH",
            Self::Log => "WHEELWRIGHT_LOG",
            Self::CacheDir => "WHEELWRIGHT_CACHE_DIR",
            Self::Home => "WHEELWRIGHT_HOME",
        }
    }

    /// Get the value from environment.
    #[must_use]
    pub fn get(self) -> Option<String> {
        std::env::var(self.as_str()).ok()
    }

    /// Get as path.
    #[must_use]
    pub fn as_path(self) -> Option<PathBuf> {
        self.get().map(PathBuf::from)
    }
}

/// Environment configuration reader.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    /// `WHEELWRIGHT_REGISTRY_PATH` - may name a single path; colon-separated
    /// lists are split into multiple search paths.
    pub registry_paths: Vec<PathBuf>,
    /// `WHEELWRIGHT_LOG` filter directive.
    pub log: Option<String>,
    /// `WHEELWRIGHT_CACHE_DIR` override.
    pub cache_dir: Option<PathBuf>,
    /// `WHEELWRIGHT_HOME` override.
    pub home: Option<PathBuf>,
}

impl EnvConfig {
    /// Read configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let registry_paths = WheelwrightEnvVar::RegistryPath
            .get()
            .map(|v| std::env::split_paths(&v).collect())
            .unwrap_or_default();

        Self {
            registry_paths,
            log: WheelwrightEnvVar::Log.get(),
            cache_dir: WheelwrightEnvVar::CacheDir.as_path(),
            home: WheelwrightEnvVar::Home.as_path(),
        }
    }
}
