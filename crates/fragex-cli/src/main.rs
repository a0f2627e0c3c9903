mod cli;
mod commands;
mod config;
mod elements;
mod error;
mod logging;
mod output;
mod system;
mod utils;

use crate::cli::{Cli, Commands};
use crate::error::Result;
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;

    info!("🚀 fragex CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    if let Some(num_threads) = cli.threads {
        configure_thread_pool(num_threads)?;
    }

    let command_result = match cli.command {
        Commands::Expand(args) => {
            info!("Dispatching to 'expand' command.");
            commands::expand::run(args)
        }
        Commands::Intersections(args) => {
            info!("Dispatching to 'intersections' command.");
            commands::intersections::run(args)
        }
        Commands::Weights(args) => {
            info!("Dispatching to 'weights' command.");
            commands::weights::run(args)
        }
    };

    match &command_result {
        Ok(_) => {
            info!("✅ Command completed successfully.");
            println!("✅ Command completed successfully.");
        }
        Err(e) => error!("❌ Command failed: {}", e),
    }

    command_result
}

#[cfg(feature = "parallel")]
fn configure_thread_pool(num_threads: usize) -> Result<()> {
    info!(
        "Setting Rayon global thread pool to {} threads.",
        num_threads
    );
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
        .map_err(|e| {
            error::CliError::Other(anyhow::anyhow!(
                "Failed to build global thread pool: {}",
                e
            ))
        })
}

#[cfg(not(feature = "parallel"))]
fn configure_thread_pool(num_threads: usize) -> Result<()> {
    tracing::warn!(
        num_threads,
        "Built without the `parallel` feature; --threads has no effect."
    );
    Ok(())
}
