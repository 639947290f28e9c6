//! `wheelwright bootstrap {self,packaging}` — drive the self-bootstrap
//! sequence, and `__bootstrap-stage`, the hidden subcommand a staged
//! child process re-invokes itself with.

use std::io::Read;

use clap::{Args, Subcommand};

use wheelwright_bootstrap::{runner, Orchestrator, Stage, StageRequest};
use wheelwright_config::ResolvedConfig;
use wheelwright_core::{AHashMap, PackageName};
use wheelwright_install::{FilesystemCatalog, InstallationScheme};
use wheelwright_registry::{CompoundRegistry, FlatRegistry, Registry};
use wheelwright_resolver::{Fetcher, FetchOutcome, FilesystemMetadataSource, RegistryFetcher, Resolver};

use crate::pipeline::Pipeline;

/// Which bootstrap sequence to run.
#[derive(Subcommand, Debug, Clone)]
pub enum BootstrapTarget {
    /// Everything needed to build arbitrary packages from source:
    /// `setuptools`/`wheel`, the rest of the packaging ecosystem, and
    /// the optional `hatchling` bundle.
    Packaging,
    /// The packaging sequence, followed by re-resolving with
    /// `upgrade = true` to install wheelwright's own package.
    #[command(name = "self")]
    SelfBootstrap,
}

/// Arguments to `bootstrap`.
#[derive(Args, Debug, Clone)]
pub struct BootstrapArgs {
    #[command(subcommand)]
    pub target: BootstrapTarget,
}

/// Hidden arguments to `__bootstrap-stage`: just the stage selector,
/// the `StageRequest` itself arrives on stdin.
#[derive(Args, Debug, Clone)]
pub struct BootstrapStageArgs {
    /// Which stage to run (see [`Stage::as_arg`]).
    pub stage: String,
}

/// Run `bootstrap {self,packaging}`.
///
/// # Errors
/// Propagates `Error::BootstrapPrecondition` if a stage's child
/// process fails, or a registry/fetch error while cloning the
/// essential packages ahead of the first install stage.
pub fn run(args: &BootstrapArgs, config: &ResolvedConfig) -> anyhow::Result<()> {
    let pipeline = Pipeline::from_config(config)?;
    let sequence: &[Stage] = match args.target {
        BootstrapTarget::Packaging => &Stage::PACKAGING_SEQUENCE,
        BootstrapTarget::SelfBootstrap => &Stage::SELF_SEQUENCE,
    };

    let fetcher = RegistryFetcher::new(&pipeline.registry, &pipeline.fetch_dest_root);
    let mut source_roots: Vec<(PackageName, std::path::PathBuf)> = Vec::new();
    for name in wheelwright_bootstrap::essential_package_names() {
        match fetcher.fetch(&name)? {
            FetchOutcome::Fetched(dir) => source_roots.push((name, dir)),
            FetchOutcome::Ignored => {}
        }
    }

    let current_exe = std::env::current_exe()?;
    let orchestrator = Orchestrator::new(current_exe, vec!["__bootstrap-stage".to_string()]);
    let installed = orchestrator.run(sequence, &source_roots)?;
    println!("bootstrapped {} package(s)", installed.len());

    if matches!(args.target, BootstrapTarget::SelfBootstrap) {
        println!("re-resolving with upgrade=true to install wheelwright's own package");
        let metadata_source = FilesystemMetadataSource;
        let catalog = pipeline.catalog();
        let resolver = Resolver::new(&fetcher, &metadata_source, &catalog);
        let mut prefs = config.prefs;
        prefs.upgrade = true;
        let _ = resolver.resolve(prefs, &[PackageName::new("wheelwright")]);
    }

    Ok(())
}

/// Run `__bootstrap-stage`: read a [`StageRequest`] off stdin and
/// execute it in-process.
///
/// # Errors
/// Propagates any build or install failure the stage's schedule hits.
pub fn run_stage(args: &BootstrapStageArgs, config: &ResolvedConfig) -> anyhow::Result<()> {
    let mut payload = String::new();
    std::io::stdin().read_to_string(&mut payload)?;
    let request: StageRequest = wheelwright_core::from_json(&payload)?;

    if Stage::from_arg(&args.stage) != Some(request.stage) {
        anyhow::bail!("stage argument '{}' does not match stdin request", args.stage);
    }

    let source_roots: AHashMap<PackageName, std::path::PathBuf> = request.source_roots.iter().cloned().collect();

    let venv_root =
        std::env::var_os("VIRTUAL_ENV").map(std::path::PathBuf::from).unwrap_or_else(|| config.project_dir.join(".venv"));
    let scheme = InstallationScheme::rooted_at(&venv_root);
    let out_dir = config.cache_dir.join("wheels");
    std::fs::create_dir_all(&out_dir)?;

    runner::run_stage(&request, &source_roots, &out_dir, &scheme)?;
    Ok(())
}

#[allow(dead_code)]
fn unused_registry_imports(_: &CompoundRegistry, _: &FlatRegistry) {}
