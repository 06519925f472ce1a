//! adscope CLI
//!
//! Command-line entry point for archive searches

use adscope::cli::{Cli, Runner};
use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Progress goes to stdout via the runner; tracing carries the
    // engine's diagnostics.
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    if let Err(e) = Runner::new(cli).run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
