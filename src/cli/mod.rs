//! Command-line interface for code-excerpt
//!
//! Provides `export` and `info` subcommands.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod export;
mod info;
mod utils;

/// Turn a source tree into a bounded, comment-free code excerpt
#[derive(Parser)]
#[command(name = "code-excerpt")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the excerpt and allocation report for a source tree
    Export(Box<export::ExportArgs>),

    /// Show how a source tree would be scanned and ordered, without writing
    Info(info::InfoArgs),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls
    // back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::Export(args) => export::run(*args),
        Commands::Info(args) => info::run(args),
    }
}
