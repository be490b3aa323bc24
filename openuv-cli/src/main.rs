//! Binary crate for the `openuv` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration
//! - Printing reports fetched through `openuv-core`

use clap::Parser;

mod cli;
mod config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();

    // Reports go to stdout, so logs stay on stderr.
    tracing_subscriber::fmt()
        .with_max_level(cmd.log_level)
        .with_writer(std::io::stderr)
        .init();

    cmd.run().await
}
