use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod apply_cmd;
mod cli;
mod facts_cmd;
mod path_guard;
mod validate_cmd;

use cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match cli.command {
        Command::Apply(args) => apply_cmd::run_apply(args),
        Command::Validate(args) => validate_cmd::run_validate(args),
        Command::Facts(args) => facts_cmd::run_facts(args),
    }
}

fn init_logging(directive: &str) {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
