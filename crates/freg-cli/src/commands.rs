use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use figment::providers::Serialized;
use freg_protocol::{ResolveResponse, UploadResponse};
use freg_sdk::{Registry, RegistryConfig, RegistrySettings};
use freg_server::{FregServer, ServerConfig};

use crate::cli::*;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config_file = cli.config.as_deref();
    match cli.command {
        Command::Serve(args) => cmd_serve(config_file, args).await,
        Command::Upload(args) => cmd_upload(config_file, args, &cli.format).await,
        Command::Resolve(args) => cmd_resolve(config_file, args, &cli.format).await,
        Command::Config => cmd_config(config_file, &cli.format),
    }
}

fn registry_config(file: Option<&Path>) -> anyhow::Result<RegistryConfig> {
    Ok(RegistrySettings::load(file)?.validate()?)
}

/// Server settings with `serve` flags layered over file and environment.
fn server_config(file: Option<&Path>, args: &ServeArgs) -> anyhow::Result<ServerConfig> {
    let mut figment = ServerConfig::figment(file)?;
    if let Some(port) = args.port {
        figment = figment.merge(Serialized::default("server.port", port));
    }
    if let Some(secs) = args.timeout {
        figment = figment.merge(Serialized::default("server.request_timeout_secs", secs));
    }
    Ok(ServerConfig::from_figment(&figment)?)
}

async fn cmd_serve(file: Option<&Path>, args: ServeArgs) -> anyhow::Result<()> {
    let registry = registry_config(file)?;
    let server = server_config(file, &args)?;

    FregServer::connect(server, &registry)
        .context("failed to start file registry server")?
        .serve()
        .await?;
    Ok(())
}

async fn cmd_upload(file: Option<&Path>, args: UploadArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let config = registry_config(file)?;
    let content = tokio::fs::read(&args.file)
        .await
        .with_context(|| format!("failed to read {}", args.file.display()))?;

    let registry = Registry::connect(&config)?;
    let receipt = registry.upload(&args.path, &content).await?;

    match format {
        OutputFormat::Json => {
            let body = UploadResponse { cid: receipt.cid, tx_hash: receipt.tx };
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        OutputFormat::Text => {
            println!("{} Uploaded {} ({} bytes)", "✓".green().bold(), args.path.bold(), content.len());
            println!("  CID: {}", receipt.cid.as_str().cyan());
            println!("  Tx:  {}", receipt.tx.as_str().yellow());
        }
    }
    Ok(())
}

async fn cmd_resolve(file: Option<&Path>, args: ResolveArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let config = registry_config(file)?;
    let registry = Registry::connect(&config)?;
    let cid = registry.resolve(&args.path).await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&ResolveResponse { cid })?),
        OutputFormat::Text if cid.is_unset() => {
            println!("{} has no recorded CID", args.path.bold());
        }
        OutputFormat::Text => println!("{}", cid.as_str().cyan()),
    }
    Ok(())
}

fn cmd_config(file: Option<&Path>, format: &OutputFormat) -> anyhow::Result<()> {
    let registry = registry_config(file)?;
    let server = server_config(file, &ServeArgs::default())?;
    let abi = registry
        .abi_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(bundled)".into());

    match format {
        OutputFormat::Json => {
            let body = serde_json::json!({
                "registry": {
                    "contractAddress": registry.contract_address.to_string(),
                    "ethRpcUrl": registry.eth_rpc_url.as_str(),
                    "ipfsUrl": registry.ipfs_url.as_str(),
                    "chainId": registry.chain_id,
                    "privateKey": "<redacted>",
                    "abiPath": abi,
                },
                "server": server,
            });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        OutputFormat::Text => {
            println!("{}", "[registry]".bold());
            println!("  contract:    {}", registry.contract_address.to_string().yellow());
            println!("  eth rpc:     {}", registry.eth_rpc_url.as_str().blue());
            println!("  ipfs:        {}", registry.ipfs_url.as_str().blue());
            println!("  chain id:    {}", registry.chain_id);
            println!("  private key: {}", "<redacted>".dimmed());
            println!("  abi:         {abi}");
            println!("{}", "[server]".bold());
            println!("  bind:        {}", server.bind_addr().to_string().bold());
            println!("  body limit:  {} bytes", server.max_body_bytes);
            match server.request_timeout_secs {
                Some(secs) => println!("  timeout:     {secs}s"),
                None => println!("  timeout:     {}", "none".dimmed()),
            }
        }
    }
    Ok(())
}
