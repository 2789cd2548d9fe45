//! Command-line arguments

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "meterlink", version, about = "Report metered usage to the billing API")]
pub struct Cli {
    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Report the usage items in a JSON file
    Report(ReportArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ReportArgs {
    /// JSON file holding one usage item or an array of them
    #[arg(long, short)]
    pub file: PathBuf,

    /// Include the usage in billing
    #[arg(long)]
    pub billable: bool,

    /// Reuse a key from an earlier attempt; generated when omitted
    #[arg(long)]
    pub idempotency_key: Option<String>,

    #[arg(long)]
    pub source_type: Option<String>,

    /// Tenant secret key (OAuth consumer key)
    #[arg(long, env = "METERLINK_SECRET_KEY")]
    pub secret_key: String,

    /// Consumer secret; looked up from config or environment when omitted
    #[arg(long, env = "METERLINK_SECRET", hide_env_values = true)]
    pub secret: Option<String>,

    /// Overrides the configured base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Config file (JSON or TOML); probed when omitted
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Raise failed outcomes as errors (duplicate submissions exit with 3)
    #[arg(long)]
    pub retryable: bool,
}
