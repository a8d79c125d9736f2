//! restctl
//!
//! Command-line REST client: one GET or POST request per invocation,
//! result written as JSON or CSV, or printed to stdout.

use anyhow::Result;
use clap::Parser;
use restctl::cli::{handle_request, Cli};
use restctl::client::ApiClient;
use restctl::config::CliConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Build configuration using priority chain: defaults → file → env → CLI args
    let mut builder = CliConfig::builder();

    if let Some(ref server) = cli.server {
        builder = builder.with_base_url(server)?;
    }
    if let Some(timeout) = cli.timeout {
        builder = builder.with_timeout(timeout)?;
    }
    if let Some(verbose) = cli.verbose {
        builder = builder.with_verbose(verbose);
    }

    // Apply environment variable overrides
    builder = builder.with_env_overrides();

    // Load config file (unless --no-config is specified)
    builder = builder.with_config_file(!cli.no_config)?;

    // Build final configuration with validation
    let config = match builder.build() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if config.verbose {
        eprintln!("Verbose mode enabled");
        eprintln!("Base URL: {}", config.base_url);
        eprintln!("Timeout: {}s", config.timeout);
    }

    let client = ApiClient::with_config(config.base_url.clone(), config.timeout)?;

    let result = handle_request(
        &client,
        cli.method,
        &cli.endpoint,
        cli.output.as_deref(),
        config.verbose,
    )
    .await;

    // Every failure is reported exactly once at this boundary.
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        if config.verbose {
            eprintln!("Error details: {:?}", e);
        }
        std::process::exit(1);
    }

    Ok(())
}
