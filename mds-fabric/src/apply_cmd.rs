use anyhow::{bail, Context, Result};
use mds_fabric::device::SnapshotDevice;
use mds_fabric::error::ReconcileError;
use mds_fabric::report::render_outcome;
use mds_fabric::request::load_request;
use mds_fabric::run::{run_request, Outcome, RunOptions};
use mds_fabric::validate::render_validation_text;
use tracing::info;

use crate::cli::{ApplyArgs, OutputFormat};
use crate::path_guard::ensure_script_target;

pub fn run_apply(args: ApplyArgs) -> Result<()> {
    let request = load_request(&args.request)
        .with_context(|| format!("failed to load {}", args.request.display()))?;
    if !args.snapshot.is_dir() {
        bail!("snapshot directory {} does not exist", args.snapshot.display());
    }

    let mut device = SnapshotDevice::from_dir(&args.snapshot);
    if let Some(script) = &args.script {
        ensure_script_target(script, &args.request, &args.snapshot)?;
        device = device.with_script(script);
    }
    if request.is_empty() {
        info!("request is empty; nothing to reconcile");
    }

    let options = RunOptions {
        check_mode: args.check,
        recheck_lock: args.recheck_lock,
    };
    let outcome = match run_request(&mut device, &request, options) {
        Ok(outcome) => outcome,
        Err(aborted) => {
            if let ReconcileError::Validation(issues) = &aborted.error {
                println!("{}", render_validation_text(issues));
                bail!("apply failed: {} validation issues", issues.len());
            }
            if !aborted.partial.families.is_empty() {
                print_outcome(&aborted.partial, args.format)?;
            }
            bail!("apply failed: {}", aborted.error);
        }
    };

    print_outcome(&outcome, args.format)
}

fn print_outcome(outcome: &Outcome, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => println!("{}", render_outcome(outcome)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(outcome)?),
    }
    Ok(())
}
