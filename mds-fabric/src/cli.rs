use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "mds-fabric")]
#[command(about = "Reconcile device-alias, VSAN and zoning state on Cisco MDS switches")]
pub struct Cli {
    /// Log filter (tracing directive syntax, e.g. `info` or `mds_fabric=debug`).
    #[arg(long, global = true, env = "MDS_FABRIC_LOG", default_value = "warn")]
    pub log_level: String,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Plan a request against a switch snapshot and apply it.
    Apply(ApplyArgs),
    /// Validate a request document without contacting a switch.
    Validate(ValidateArgs),
    /// Show the device-alias and zone state read from a snapshot.
    Facts(FactsArgs),
}

#[derive(Parser, Debug)]
pub struct ApplyArgs {
    /// Request document (.toml or .json).
    pub request: PathBuf,
    /// Directory of captured `show` output.
    #[arg(long)]
    pub snapshot: PathBuf,
    /// Report planned commands without applying them.
    #[arg(long)]
    pub check: bool,
    /// Append applied command blocks to this file.
    #[arg(long)]
    pub script: Option<PathBuf>,
    /// Re-read lock state right before each family is applied.
    #[arg(long)]
    pub recheck_lock: bool,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Request document (.toml or .json).
    pub request: PathBuf,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Parser, Debug)]
pub struct FactsArgs {
    /// Directory of captured `show` output.
    #[arg(long)]
    pub snapshot: PathBuf,
    /// VSANs whose zone status should be read.
    #[arg(long = "vsan")]
    pub vsans: Vec<u16>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}
