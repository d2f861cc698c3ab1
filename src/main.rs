//! Docframe - generic document/view lifecycle manager
//!
//! A line-oriented shell over a single managed document slot.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use docframe::app::DocShell;

/// Manage a document's new/open/save lifecycle from a command shell
#[derive(Parser)]
#[command(name = "docframe", version)]
struct Cli {
    /// File to open on startup
    file: Option<String>,

    /// Increase log verbosity
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose {
        tracing_subscriber::filter::LevelFilter::DEBUG
    } else {
        tracing_subscriber::filter::LevelFilter::INFO
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(level)
        .init();

    tracing::info!("Starting Docframe...");

    let mut shell = DocShell::new();
    if let Some(file) = cli.file {
        for line in shell.execute(&format!("open {}", file)) {
            println!("{}", line);
        }
    }

    shell.run()
}
