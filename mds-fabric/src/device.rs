//! The seam between reconciliation and a switch session.
//!
//! Reconciliation only needs two things from a switch: the raw text of a
//! `show` command and a way to push an ordered block of configuration
//! commands. [`SnapshotDevice`] serves captured output from disk and records
//! what would have been pushed.

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

pub const SHOW_DEVICE_ALIAS_STATUS: &str = "show device-alias status";
pub const SHOW_DEVICE_ALIAS_DATABASE: &str = "show device-alias database";

pub fn show_zone_status(vsan: u16) -> String {
    format!("show zone status vsan {vsan}")
}

#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("no output available for '{command}'")]
    NoOutput { command: String },
    #[error("failed to access {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("switch rejected configuration: {message}")]
    Rejected { message: String },
}

/// A session to one switch.
pub trait Device {
    /// Run a `show` command and return its unparsed text output.
    fn execute_show(&mut self, command: &str) -> Result<String, DeviceError>;

    /// Apply `commands` in order as one configuration block.
    fn apply(&mut self, commands: &[String]) -> Result<(), DeviceError>;
}

/// A switch stand-in backed by captured `show` output.
///
/// Output is looked up in the in-memory table first and then, if a snapshot
/// directory is set, in `<dir>/<file>` where the file name is the command
/// without its `show ` prefix, words joined by `-`, plus `.txt`.
#[derive(Debug, Default)]
pub struct SnapshotDevice {
    dir: Option<PathBuf>,
    outputs: BTreeMap<String, String>,
    script: Option<PathBuf>,
    applied: Vec<Vec<String>>,
}

impl SnapshotDevice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
            ..Self::default()
        }
    }

    /// Serve `output` for `command`.
    pub fn with_output(mut self, command: impl Into<String>, output: impl Into<String>) -> Self {
        self.outputs.insert(command.into(), output.into());
        self
    }

    /// Append every applied block to `path`.
    pub fn with_script(mut self, path: impl Into<PathBuf>) -> Self {
        self.script = Some(path.into());
        self
    }

    /// Command blocks applied so far, in order.
    pub fn applied(&self) -> &[Vec<String>] {
        &self.applied
    }

    fn read_snapshot(&self, command: &str) -> Result<String, DeviceError> {
        let Some(dir) = &self.dir else {
            return Err(DeviceError::NoOutput {
                command: command.to_string(),
            });
        };
        let path = dir.join(snapshot_file_name(command));
        if !path.exists() {
            return Err(DeviceError::NoOutput {
                command: command.to_string(),
            });
        }
        fs::read_to_string(&path).map_err(|source| io_error(&path, source))
    }

    fn append_script(path: &Path, commands: &[String]) -> Result<(), DeviceError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|source| io_error(path, source))?;
        for command in commands {
            writeln!(file, "{command}").map_err(|source| io_error(path, source))?;
        }
        Ok(())
    }
}

impl Device for SnapshotDevice {
    fn execute_show(&mut self, command: &str) -> Result<String, DeviceError> {
        debug!(command, "reading show output");
        if let Some(output) = self.outputs.get(command) {
            return Ok(output.clone());
        }
        self.read_snapshot(command)
    }

    fn apply(&mut self, commands: &[String]) -> Result<(), DeviceError> {
        if let Some(path) = &self.script {
            Self::append_script(path, commands)?;
        }
        self.applied.push(commands.to_vec());
        Ok(())
    }
}

/// File name a snapshot directory uses for `command`.
pub fn snapshot_file_name(command: &str) -> String {
    let trimmed = command.trim();
    let body = trimmed.strip_prefix("show ").unwrap_or(trimmed);
    format!("{}.txt", body.split_whitespace().collect::<Vec<_>>().join("-"))
}

fn io_error(path: &Path, source: std::io::Error) -> DeviceError {
    DeviceError::Io {
        path: path.display().to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::{show_zone_status, snapshot_file_name, Device, DeviceError, SnapshotDevice};

    #[test]
    fn snapshot_names_follow_command_words() {
        assert_eq!(
            snapshot_file_name("show device-alias status"),
            "device-alias-status.txt"
        );
        assert_eq!(
            snapshot_file_name(&show_zone_status(10)),
            "zone-status-vsan-10.txt"
        );
    }

    #[test]
    fn in_memory_output_wins_over_directory() {
        let dir = tempdir().expect("tempdir");
        std::fs::write(dir.path().join("device-alias-status.txt"), "from disk").expect("write");
        let mut device =
            SnapshotDevice::from_dir(dir.path()).with_output("show device-alias status", "memory");

        assert_eq!(
            device.execute_show("show device-alias status").expect("show"),
            "memory"
        );
    }

    #[test]
    fn missing_output_is_an_error() {
        let mut device = SnapshotDevice::new();
        let err = device
            .execute_show("show device-alias database")
            .expect_err("no output");
        assert!(matches!(err, DeviceError::NoOutput { .. }));
    }

    #[test]
    fn applied_blocks_are_recorded_and_scripted() {
        let dir = tempdir().expect("tempdir");
        let script = dir.path().join("out.cfg");
        let mut device = SnapshotDevice::new().with_script(&script);

        device
            .apply(&["vsan database".to_string(), "vsan 10".to_string()])
            .expect("apply");
        device
            .apply(&["terminal dont-ask".to_string()])
            .expect("apply");

        assert_eq!(device.applied().len(), 2);
        let written = std::fs::read_to_string(&script).expect("read script");
        assert_eq!(written, "vsan database\nvsan 10\nterminal dont-ask\n");
    }
}
