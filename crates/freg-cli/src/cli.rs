use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "freg",
    about = "File registry: store files in IPFS and record their CIDs on-chain",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// TOML file with `[registry]` and `[server]` tables. Environment
    /// variables (including those from `./.env`) override values from the
    /// file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API
    Serve(ServeArgs),
    /// Upload a local file and record it under a registry path
    Upload(UploadArgs),
    /// Show the CID recorded for a registry path
    Resolve(ResolveArgs),
    /// Print the effective configuration (private key redacted)
    Config,
}

#[derive(Args, Default)]
pub struct ServeArgs {
    /// Overrides `PORT` and the config file.
    #[arg(long)]
    pub port: Option<u16>,
    /// Per-request deadline in seconds. Overrides `REQUEST_TIMEOUT_SECS`.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,
}

#[derive(Args)]
pub struct UploadArgs {
    /// Registry path, e.g. /docs/readme.txt
    pub path: String,
    /// Local file to upload
    pub file: PathBuf,
}

#[derive(Args)]
pub struct ResolveArgs {
    pub path: String,
}
