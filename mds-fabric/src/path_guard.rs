use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

/// Refuse a `--script` target that would clobber the request document or
/// land inside the snapshot directory, where it would be read back as
/// `show` output.
pub fn ensure_script_target(script: &Path, request: &Path, snapshot_dir: &Path) -> Result<()> {
    let script_norm = normalize_for_compare(script)
        .with_context(|| format!("failed to normalize script path {}", script.display()))?;
    let request_norm = normalize_for_compare(request)
        .with_context(|| format!("failed to normalize request path {}", request.display()))?;
    if script_norm == request_norm {
        bail!(
            "refusing to overwrite request file: script {} matches request {}",
            script.display(),
            request.display()
        );
    }

    let snapshot_norm = normalize_for_compare(snapshot_dir)
        .with_context(|| format!("failed to normalize snapshot dir {}", snapshot_dir.display()))?;
    if script_norm.starts_with(&snapshot_norm) {
        bail!(
            "refusing to write script {} inside snapshot directory {}",
            script.display(),
            snapshot_dir.display()
        );
    }
    Ok(())
}

fn normalize_for_compare(path: &Path) -> Result<PathBuf> {
    if path.exists() {
        return path
            .canonicalize()
            .with_context(|| format!("canonicalize {}", path.display()));
    }

    // Not yet on disk: canonicalize the parent when possible so a relative
    // script path still compares equal to a canonical snapshot dir.
    let base = if path.is_absolute() {
        PathBuf::new()
    } else {
        std::env::current_dir().context("current_dir")?
    };
    let joined = base.join(path);
    match (joined.parent(), joined.file_name()) {
        (Some(parent), Some(name)) if parent.exists() => Ok(parent
            .canonicalize()
            .with_context(|| format!("canonicalize {}", parent.display()))?
            .join(name)),
        _ => Ok(joined),
    }
}
