use anyhow::{bail, Context, Result};
use mds_fabric::request::load_request;
use mds_fabric::validate::{render_validation_text, validate_request};

use crate::cli::{OutputFormat, ValidateArgs};

pub fn run_validate(args: ValidateArgs) -> Result<()> {
    let request = load_request(&args.request)
        .with_context(|| format!("failed to load {}", args.request.display()))?;
    let issues = validate_request(&request);

    match args.format {
        OutputFormat::Text => println!("{}", render_validation_text(&issues)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&issues)?),
    }

    if !issues.is_empty() {
        bail!("validate failed: {} issues", issues.len());
    }
    Ok(())
}
