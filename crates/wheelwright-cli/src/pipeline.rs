//! Shared wiring for commands that run the resolve/fetch/build/install
//! pipeline: where sources get cloned to, which registries are
//! searched, and which installation scheme is the install target.

use std::path::PathBuf;

use wheelwright_config::ResolvedConfig;
use wheelwright_core::Result;
use wheelwright_install::{FilesystemCatalog, InstallationScheme};
use wheelwright_registry::{CompoundRegistry, FlatRegistry, Registry};

/// Everything a resolve or install run needs, built once from resolved config.
pub struct Pipeline {
    /// Registry chain, outermost (highest priority) first.
    pub registry: CompoundRegistry,
    /// Directory fetched VCS checkouts land under.
    pub fetch_dest_root: PathBuf,
    /// Directory built wheels land under.
    pub build_out_dir: PathBuf,
    /// Where built wheels get installed.
    pub scheme: InstallationScheme,
}

impl Pipeline {
    /// Build a pipeline from resolved configuration.
    ///
    /// # Errors
    /// Propagates an `Error::Io`/`Error::MetadataMalformed` from
    /// loading one of `config.registry_paths`.
    pub fn from_config(config: &ResolvedConfig) -> Result<Self> {
        let mut children: Vec<Box<dyn Registry + Send + Sync>> = Vec::new();
        for path in &config.registry_paths {
            if path.is_dir() {
                children.push(Box::new(CompoundRegistry::from_dir(path.to_string_lossy().into_owned(), path)?));
            } else {
                children.push(Box::new(FlatRegistry::from_file(path)?));
            }
        }
        let registry = CompoundRegistry::new("wheelwright", children);

        let venv_root =
            std::env::var_os("VIRTUAL_ENV").map(PathBuf::from).unwrap_or_else(|| config.project_dir.join(".venv"));

        Ok(Self {
            registry,
            fetch_dest_root: config.cache_dir.join("src"),
            build_out_dir: config.cache_dir.join("wheels"),
            scheme: InstallationScheme::rooted_at(&venv_root),
        })
    }

    /// A catalog over this pipeline's installation scheme.
    #[must_use]
    pub fn catalog(&self) -> FilesystemCatalog {
        FilesystemCatalog::new(&self.scheme)
    }
}
