//! Command-line interface for wheelwright, a source-first package
//! installer for Python.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

mod commands;
mod pipeline;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use commands::{Cli, Commands};
use wheelwright_config::ConfigLoader;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let project_dir = std::env::current_dir().unwrap_or_else(|_| ".".into());
    let loader = ConfigLoader::new(&project_dir);
    let mut config = match loader.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    cli.overrides().apply_to(&mut config);

    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).without_time().init();

    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("failed to create runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(async { run(&cli, &config) }) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            display_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, config: &wheelwright_config::ResolvedConfig) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Install(args) => commands::install::run(args, config),
        Commands::Bootstrap(args) => commands::bootstrap::run(args, config),
        Commands::Resolve(args) => commands::resolve::run(args, config),
        Commands::Repo { action } => commands::repo::run(action, &config.project_dir),
        Commands::BootstrapStage(args) => commands::bootstrap::run_stage(args, config),
    }
}

fn display_error(err: &anyhow::Error) {
    if let Some(domain_err) = err.downcast_ref::<wheelwright_core::Error>() {
        eprintln!("{}", domain_err.display_with_suggestions());
    } else {
        eprintln!("error: {err:#}");
    }
}
