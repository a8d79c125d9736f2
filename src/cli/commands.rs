//! CLI argument definitions

use clap::Parser;
use std::path::PathBuf;

use crate::client::Method;

/// Command-line REST client for JSON APIs
#[derive(Parser, Debug)]
#[command(name = "restctl")]
#[command(version, about = "Command-line REST client for JSON APIs", long_about = None)]
pub struct Cli {
    /// HTTP method to use
    #[arg(value_enum)]
    pub method: Method,

    /// URI fragment appended to the base URL (e.g. /posts/1)
    pub endpoint: String,

    /// Output file; format chosen by extension (.json or .csv).
    /// Prints indented JSON to stdout when omitted.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Base URL (overrides config file)
    #[arg(short, long)]
    pub server: Option<String>,

    /// Request timeout in seconds (overrides config file)
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Enable verbose logging (overrides config file)
    #[arg(short, long)]
    pub verbose: Option<bool>,

    /// Don't load config file
    #[arg(long)]
    pub no_config: bool,
}
