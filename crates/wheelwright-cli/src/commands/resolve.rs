//! `wheelwright resolve <names…>` — print the install plan without
//! building or installing anything.

use clap::Args;

use wheelwright_config::ResolvedConfig;
use wheelwright_core::PackageName;
use wheelwright_resolver::{FilesystemMetadataSource, RegistryFetcher, Resolver};

use crate::pipeline::Pipeline;

/// Resolve the given package names without installing anything.
#[derive(Args, Debug, Clone)]
pub struct ResolveArgs {
    /// Package names to resolve.
    #[arg(required = true)]
    pub names: Vec<String>,
}

/// Run `resolve`.
///
/// # Errors
/// Propagates any registry, fetch, or metadata-extraction error.
pub fn run(args: &ResolveArgs, config: &ResolvedConfig) -> anyhow::Result<()> {
    let pipeline = Pipeline::from_config(config)?;
    let names: Vec<PackageName> = args.names.iter().map(|n| PackageName::new(n)).collect();

    let fetcher = RegistryFetcher::new(&pipeline.registry, &pipeline.fetch_dest_root);
    let metadata_source = FilesystemMetadataSource;
    let catalog = pipeline.catalog();
    let resolver = Resolver::new(&fetcher, &metadata_source, &catalog);

    let outcome = resolver.resolve(config.prefs, &names)?;

    println!("build phase ({} package(s)):", outcome.build.len());
    for (name, dir) in &outcome.build {
        println!("  {name}  {}", dir.display());
    }
    println!("runtime phase ({} package(s)):", outcome.runtime.len());
    for (name, dir) in &outcome.runtime {
        println!("  {name}  {}", dir.display());
    }
    println!("install order:");
    for (name, _) in outcome.install_order() {
        println!("  {name}");
    }

    Ok(())
}
