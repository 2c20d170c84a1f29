//! Shelfmap command-line entry point

use clap::Parser;
use shelfmap_cli::{Cli, output};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = shelfmap_cli::run(cli).await {
        output::error(format!("{:#}", e));
        std::process::exit(1);
    }
}
