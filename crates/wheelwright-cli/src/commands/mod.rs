//! The command surface: top-level flags and the subcommand dispatch table.

pub mod bootstrap;
pub mod install;
pub mod repo;
pub mod resolve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use wheelwright_config::CliOverrides;

/// A source-first package installer for Python.
#[derive(Parser, Debug)]
#[command(name = "wheelwright", version, about)]
pub struct Cli {
    /// Extra registry path, searched ahead of any already configured.
    /// May be repeated.
    #[arg(long = "registry", global = true)]
    pub registry: Vec<PathBuf>,

    /// Increase log verbosity. May be repeated (`-vv` for trace).
    #[arg(short = 'v', long = "verbose", global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve, build, and install packages.
    Install(install::InstallArgs),
    /// Bootstrap a bare interpreter with no packaging tools installed yet.
    Bootstrap(bootstrap::BootstrapArgs),
    /// Resolve packages without building or installing them.
    Resolve(resolve::ResolveArgs),
    /// Manage configured registry paths.
    Repo {
        #[command(subcommand)]
        action: repo::RepoArgs,
    },
    /// Run a single bootstrap stage in this process, reading a
    /// `StageRequest` from stdin. Re-invoked by `bootstrap` as a child
    /// process of this same binary; not meant to be run by hand.
    #[command(name = "__bootstrap-stage", hide = true)]
    BootstrapStage(bootstrap::BootstrapStageArgs),
}

impl Cli {
    /// The `CliOverrides` these top-level flags translate to.
    #[must_use]
    pub fn overrides(&self) -> CliOverrides {
        let (upgrade, no_deps, force_reinstall) = match &self.command {
            Commands::Install(args) => (args.upgrade, false, args.force_reinstall),
            _ => (false, false, false),
        };
        CliOverrides {
            registry_paths: self.registry.clone(),
            verbosity: self.verbose,
            upgrade,
            no_deps,
            force_reinstall,
        }
    }
}
