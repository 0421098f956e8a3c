//! credgraph - where do the kube-controller-manager's credentials come from?
//!
//! Prints the operator's credential provenance graph for review, and offers
//! a few helpers for inspecting the cluster the graph describes.

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::Command;

/// Document the provenance of kube-controller-manager configuration and credentials
#[derive(Parser, Debug)]
#[command(name = "credgraph")]
#[command(about = "Document where kube-controller-manager configuration and credentials come from", long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(long, short = 'd')]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_file = cli::init_logging(args.debug)?;
    // Print log file location to stderr so stdout stays machine-readable
    if let Some(ref log_path) = log_file {
        eprintln!(
            "Debug logging enabled. Logs written to: {}",
            log_path.display()
        );
    }

    tracing::debug!("Running {:?}", args.command);
    cli::handle_command(args.command).await
}
