//! Boxbuild CLI - drives the busybox build for initrd assembly

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

use boxbuild::{GlobalContext, Make, Recipe};
use cli::Cli;

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("boxbuild=debug")
    } else {
        EnvFilter::new("boxbuild=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    // Resolve the recipe before touching anything else so an unknown
    // architecture fails without side effects.
    let recipe = Recipe::find(&cli.arch)?;

    let ctx = GlobalContext::new()?;
    let make = Make::locate(ctx.log_path())?;

    recipe.run(&make, &ctx, cli.jobs)?;

    Ok(())
}
