//! `wheelwright repo {list,add,update,remove}` — manage the extra
//! registry paths recorded in the global `wheelwright.json`.

use std::path::PathBuf;

use clap::Subcommand;

use wheelwright_config::{ConfigLoader, FileConfig};
use wheelwright_registry::{CompoundRegistry, Registry};

/// `repo` subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum RepoArgs {
    /// List the registry paths currently configured.
    List,
    /// Add a registry path, searched ahead of any already configured.
    Add {
        /// A TSV registry file or a directory of them.
        path: PathBuf,
    },
    /// Re-validate every configured registry path, dropping any that no
    /// longer resolve.
    Update,
    /// Remove a registry path.
    Remove {
        /// The path to remove, matched exactly as configured.
        path: PathBuf,
    },
}

fn read_file_config(loader: &ConfigLoader) -> anyhow::Result<FileConfig> {
    let path = loader.global_config_path();
    match std::fs::read_to_string(&path) {
        Ok(content) => Ok(wheelwright_core::from_json(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
        Err(e) => Err(wheelwright_core::Error::io(&path, e).into()),
    }
}

fn write_file_config(loader: &ConfigLoader, config: &FileConfig) -> anyhow::Result<()> {
    let path = loader.global_config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| wheelwright_core::Error::io(parent, e))?;
    }
    let payload = wheelwright_core::to_json_pretty(config)?;
    std::fs::write(&path, payload).map_err(|e| wheelwright_core::Error::io(&path, e))?;
    Ok(())
}

/// Run `repo`.
///
/// # Errors
/// Propagates any I/O or JSON error reading or writing the global
/// `wheelwright.json`.
pub fn run(args: &RepoArgs, project_dir: &std::path::Path) -> anyhow::Result<()> {
    let loader = ConfigLoader::new(project_dir);

    match args {
        RepoArgs::List => {
            let config = read_file_config(&loader)?;
            let paths = config.registry_paths.unwrap_or_default();
            if paths.is_empty() {
                println!("no registry paths configured");
            }
            for path in &paths {
                println!("{}", path.display());
            }
        }
        RepoArgs::Add { path } => {
            let mut config = read_file_config(&loader)?;
            let mut paths = config.registry_paths.take().unwrap_or_default();
            if !paths.contains(path) {
                paths.insert(0, path.clone());
            }
            config.registry_paths = Some(paths);
            write_file_config(&loader, &config)?;
            println!("added {}", path.display());
        }
        RepoArgs::Update => {
            let config = read_file_config(&loader)?;
            let paths = config.registry_paths.unwrap_or_default();
            let mut still_valid = Vec::new();
            for path in paths {
                let label = path.to_string_lossy().into_owned();
                let loaded = if path.is_dir() {
                    CompoundRegistry::from_dir(label, &path).map(|_| ())
                } else {
                    wheelwright_registry::FlatRegistry::from_file(&path).map(|_| ())
                };
                match loaded {
                    Ok(()) => still_valid.push(path),
                    Err(e) => println!("dropping {}: {e}", path.display()),
                }
            }
            let mut updated = read_file_config(&loader)?;
            updated.registry_paths = Some(still_valid);
            write_file_config(&loader, &updated)?;
            println!("registry paths re-validated");
        }
        RepoArgs::Remove { path } => {
            let mut config = read_file_config(&loader)?;
            let mut paths = config.registry_paths.take().unwrap_or_default();
            paths.retain(|p| p != path);
            config.registry_paths = Some(paths);
            write_file_config(&loader, &config)?;
            println!("removed {}", path.display());
        }
    }

    Ok(())
}

#[allow(dead_code)]
fn unused(_: &dyn Registry) {}
