//! `wheelwright install <names…> [--upgrade] [--force-reinstall]`

use clap::Args;

use wheelwright_config::ResolvedConfig;
use wheelwright_core::PackageName;
use wheelwright_install::{FilesystemUninstaller, ReInstaller, WheelInstaller};
use wheelwright_resolver::{FilesystemMetadataSource, RegistryFetcher, Resolver};

use crate::pipeline::Pipeline;

/// Resolve, build, and install the given package names.
#[derive(Args, Debug, Clone)]
pub struct InstallArgs {
    /// Package names to install.
    #[arg(required = true)]
    pub names: Vec<String>,

    /// Re-resolve packages already installed rather than leaving them alone.
    #[arg(long)]
    pub upgrade: bool,

    /// Reinstall even if an existing install already satisfies the requirement.
    #[arg(long)]
    pub force_reinstall: bool,
}

/// Run `install`.
///
/// # Errors
/// Propagates any registry, fetch, build, or install failure; aborts
/// on the first one rather than skipping the offending package.
pub fn run(args: &InstallArgs, config: &ResolvedConfig) -> anyhow::Result<()> {
    let pipeline = Pipeline::from_config(config)?;
    let names: Vec<PackageName> = args.names.iter().map(|n| PackageName::new(n)).collect();

    let fetcher = RegistryFetcher::new(&pipeline.registry, &pipeline.fetch_dest_root);
    let metadata_source = FilesystemMetadataSource;
    let catalog = pipeline.catalog();
    let resolver = Resolver::new(&fetcher, &metadata_source, &catalog);

    let outcome = resolver.resolve(config.prefs, &names)?;
    let install_order = outcome.install_order();
    tracing::info!(count = install_order.len(), "resolved install plan");

    std::fs::create_dir_all(&pipeline.build_out_dir)
        .map_err(|e| wheelwright_core::Error::io(&pipeline.build_out_dir, e))?;

    let mut wheels = Vec::with_capacity(install_order.len());
    for (name, source_dir) in &install_order {
        tracing::info!(name = %name, source_dir = %source_dir.display(), "building wheel");
        wheels.push(wheelwright_build::build_wheel(source_dir, &pipeline.build_out_dir, &[])?);
    }

    let reinstaller = ReInstaller::new(WheelInstaller::new(), FilesystemUninstaller::new(), pipeline.catalog());
    let wheel_refs: Vec<&std::path::Path> = wheels.iter().map(std::path::PathBuf::as_path).collect();
    reinstaller.reinstall(&wheel_refs, &pipeline.scheme)?;

    println!("installed {} package(s)", install_order.len());
    Ok(())
}
