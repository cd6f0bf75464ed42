//! Folio CLI - navigation resolver for documentation portals.
//!
//! Provides commands for:
//! - `check`: Validate sidebars against the content of each docs instance
//! - `tree`: Print the flattened navigation tree
//! - `adjacency`: Print previous/next links of a sidebar as JSON
//! - `build`: Write render-ready navigation manifests

mod commands;
mod error;
mod output;
mod project;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{AdjacencyArgs, BuildArgs, CheckArgs, TreeArgs};
use output::Output;

/// Folio - navigation resolver for documentation portals.
#[derive(Parser)]
#[command(name = "folio", version, about)]
struct Cli {
    /// Enable info-level logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate sidebars against content.
    Check(CheckArgs),
    /// Print the navigation tree.
    Tree(TreeArgs),
    /// Print previous/next links as JSON.
    Adjacency(AdjacencyArgs),
    /// Write navigation manifests.
    Build(BuildArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check(args) => args.execute(),
        Commands::Tree(args) => args.execute(),
        Commands::Adjacency(args) => args.execute(),
        Commands::Build(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
