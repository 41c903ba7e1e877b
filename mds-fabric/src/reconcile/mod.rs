//! Per-family reconcilers.
//!
//! Each reconciler compares desired state with immutable facts and returns a
//! [`Plan`]: the ordered commands to push plus a message for every decision.
//! Reconcilers never talk to the switch themselves.

pub mod device_alias;
pub mod vsan;
pub mod zone;

use serde::Serialize;

pub const TERMINAL_DONT_ASK: &str = "terminal dont-ask";
pub const NO_TERMINAL_DONT_ASK: &str = "no terminal dont-ask";

/// Resource family a plan belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Family {
    DeviceAlias,
    Vsan,
    #[serde(rename = "zone-zoneset")]
    Zoning,
}

impl Family {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DeviceAlias => "device-alias",
            Self::Vsan => "vsan",
            Self::Zoning => "zone-zoneset",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Plan {
    pub commands: Vec<String>,
    pub messages: Vec<String>,
    pub warnings: Vec<String>,
}

impl Plan {
    pub fn command(&mut self, command: impl Into<String>) {
        self.commands.push(command.into());
    }

    pub fn message(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    pub fn warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Append `other` after everything already planned.
    pub fn extend(&mut self, other: Plan) {
        self.commands.extend(other.commands);
        self.messages.extend(other.messages);
        self.warnings.extend(other.warnings);
    }

    pub fn is_noop(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Prefix `command` with `no` when `negate` is set.
pub(crate) fn negate_if(negate: bool, command: String) -> String {
    if negate {
        format!("no {command}")
    } else {
        command
    }
}
