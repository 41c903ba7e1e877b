use std::fmt::{self, Display, Formatter};

use fabric_facts::FactsError;
use thiserror::Error;

use crate::device::DeviceError;
use crate::validate::ValidationIssue;

/// Which switch lock blocked a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockScope {
    DeviceAlias,
    Zone { vsan: u16 },
}

impl Display for LockScope {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeviceAlias => write!(f, "device-alias"),
            Self::Zone { vsan } => write!(f, "zone for vsan {vsan}"),
        }
    }
}

/// Reasons a reconciliation run stops. Every variant is terminal: nothing
/// from the failing resource family is applied.
#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("request validation failed: {}", summarize(.0))]
    Validation(Vec<ValidationIssue>),
    #[error("{0} has acquired lock on the switch. Hence cannot proceed.")]
    DeviceLocked(LockScope),
    #[error("{source}. Hence cannot proceed.")]
    FactsUnavailable {
        #[from]
        source: FactsError,
    },
    #[error("device alias name {0} is present in switch device-alias database. hence cant be added")]
    AliasAlreadyExists(String),
    #[error("device alias name {0} is not in switch device-alias database. hence cant be removed")]
    AliasNotFound(String),
    #[error("device alias pwwn {0} is present in switch device-alias database. hence cant be added")]
    PwwnAlreadyExists(String),
    #[error(transparent)]
    Device(#[from] DeviceError),
}

fn summarize(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|issue| issue.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
