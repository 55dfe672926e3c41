use std::path::Path;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    freg_sdk::load_dotenv(Path::new(".env"));

    commands::run_command(cli).await
}
