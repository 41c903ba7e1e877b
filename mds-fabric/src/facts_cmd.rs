use anyhow::{bail, Result};
use mds_fabric::device::SnapshotDevice;
use mds_fabric::facts::gather_facts;
use mds_fabric::report::render_facts;

use crate::cli::{FactsArgs, OutputFormat};

pub fn run_facts(args: FactsArgs) -> Result<()> {
    if !args.snapshot.is_dir() {
        bail!("snapshot directory {} does not exist", args.snapshot.display());
    }
    let mut device = SnapshotDevice::from_dir(&args.snapshot);
    let facts = gather_facts(&mut device, &args.vsans)?;

    match args.format {
        OutputFormat::Text => println!("{}", render_facts(&facts)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&facts)?),
    }
    Ok(())
}
