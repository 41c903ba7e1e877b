//! Orchestration of one reconciliation run.
//!
//! ## Run Pipeline
//!
//! 1. **Validate** — the whole request is checked before the switch is read
//! 2. **Device-alias** — read status and database once, plan, apply
//! 3. **VSAN** — plan from the request alone, apply
//! 4. **Zone/zoneset** — read zone status per VSAN while planning, apply
//!
//! Each family is read, planned and applied before the next one starts, so
//! zoning can target a VSAN created earlier in the same run. A family whose
//! plan has no commands is never sent to the switch. In check mode the same
//! reads and plans happen and nothing is applied.

use fabric_facts::{parse_device_alias_status, parse_zone_status, AliasDatabase, ObservedZoneStatus};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::device::{show_zone_status, Device, SHOW_DEVICE_ALIAS_DATABASE, SHOW_DEVICE_ALIAS_STATUS};
use crate::error::{LockScope, ReconcileError};
use crate::reconcile::device_alias::plan_device_alias;
use crate::reconcile::vsan::plan_vsans;
use crate::reconcile::zone::plan_zoning;
use crate::reconcile::{Family, Plan};
use crate::request::{DeviceAliasRequest, FabricDomainRequest, FabricRequest};
use crate::validate::validate_request;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Plan and report without applying anything.
    pub check_mode: bool,
    /// Re-read each family's lock flag right before applying it.
    pub recheck_lock: bool,
}

/// What a run decided and did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Outcome {
    /// `true` once at least one command block was applied; never set in
    /// check mode.
    pub changed: bool,
    pub check_mode: bool,
    /// Families that produced commands, in run order.
    pub families: Vec<Family>,
    pub messages: Vec<String>,
    /// Applied commands, or the would-be commands in check mode.
    pub commands: Vec<String>,
    pub warnings: Vec<String>,
}

impl Outcome {
    fn record(&mut self, family: Family, plan: Plan) {
        if !plan.commands.is_empty() {
            self.families.push(family);
        }
        self.commands.extend(plan.commands);
        self.messages.extend(plan.messages);
        self.warnings.extend(plan.warnings);
    }
}

/// A run that stopped early.
///
/// `partial` holds everything decided before `error` was raised. Outside
/// check mode the families it lists are already on the switch.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct RunAborted {
    pub error: ReconcileError,
    pub partial: Outcome,
}

/// Converge `device` toward `request`.
///
/// Errors are terminal for the run. Families completed before the failing
/// one stay applied and are reported in [`RunAborted::partial`]; the switch
/// offers no rollback.
pub fn run_request<D: Device>(
    device: &mut D,
    request: &FabricRequest,
    options: RunOptions,
) -> Result<Outcome, RunAborted> {
    let mut outcome = Outcome {
        check_mode: options.check_mode,
        ..Outcome::default()
    };

    match run_families(device, request, options, &mut outcome) {
        Ok(()) => Ok(outcome),
        Err(error) => {
            if outcome.changed {
                warn!(
                    applied = ?outcome.families,
                    error = %error,
                    "run aborted after earlier families were applied"
                );
            }
            Err(RunAborted {
                error,
                partial: outcome,
            })
        }
    }
}

fn run_families<D: Device>(
    device: &mut D,
    request: &FabricRequest,
    options: RunOptions,
    outcome: &mut Outcome,
) -> Result<(), ReconcileError> {
    let issues = validate_request(request);
    if !issues.is_empty() {
        return Err(ReconcileError::Validation(issues));
    }

    if let Some(desired) = &request.device_alias {
        let plan = plan_device_alias_family(device, desired)?;
        if options.recheck_lock && !plan.is_noop() {
            recheck_device_alias_lock(device)?;
        }
        apply_family(device, Family::DeviceAlias, plan, options, outcome)?;
    }

    apply_family(device, Family::Vsan, plan_vsans(&request.vsans), options, outcome)?;

    let plan = plan_zoning(&request.domains, |vsan| observe_zone(device, vsan))?;
    if options.recheck_lock && !plan.is_noop() {
        recheck_zone_locks(device, &request.domains)?;
    }
    apply_family(device, Family::Zoning, plan, options, outcome)
}

fn plan_device_alias_family<D: Device>(
    device: &mut D,
    desired: &DeviceAliasRequest,
) -> Result<Plan, ReconcileError> {
    let status = parse_device_alias_status(&device.execute_show(SHOW_DEVICE_ALIAS_STATUS)?);
    debug!(?status, "device-alias status");
    if status.locked {
        return Err(ReconcileError::DeviceLocked(LockScope::DeviceAlias));
    }
    let database = if desired.aliases.is_empty() {
        AliasDatabase::default()
    } else {
        AliasDatabase::parse(&device.execute_show(SHOW_DEVICE_ALIAS_DATABASE)?)
    };
    plan_device_alias(desired, &status, &database)
}

fn observe_zone<D: Device>(device: &mut D, vsan: u16) -> Result<ObservedZoneStatus, ReconcileError> {
    let text = device.execute_show(&show_zone_status(vsan))?;
    let status = parse_zone_status(&text, vsan)?;
    debug!(?status, "zone status");
    Ok(status)
}

fn recheck_device_alias_lock<D: Device>(device: &mut D) -> Result<(), ReconcileError> {
    let status = parse_device_alias_status(&device.execute_show(SHOW_DEVICE_ALIAS_STATUS)?);
    if status.locked {
        return Err(ReconcileError::DeviceLocked(LockScope::DeviceAlias));
    }
    Ok(())
}

fn recheck_zone_locks<D: Device>(
    device: &mut D,
    domains: &[FabricDomainRequest],
) -> Result<(), ReconcileError> {
    for domain in domains {
        if observe_zone(device, domain.vsan)?.locked {
            return Err(ReconcileError::DeviceLocked(LockScope::Zone { vsan: domain.vsan }));
        }
    }
    Ok(())
}

fn apply_family<D: Device>(
    device: &mut D,
    family: Family,
    plan: Plan,
    options: RunOptions,
    outcome: &mut Outcome,
) -> Result<(), ReconcileError> {
    if plan.is_noop() {
        debug!(family = family.as_str(), "nothing to apply");
    } else if options.check_mode {
        info!(family = family.as_str(), commands = plan.commands.len(), "check mode; not applying");
    } else {
        info!(family = family.as_str(), commands = plan.commands.len(), "applying");
        device.apply(&plan.commands)?;
        outcome.changed = true;
    }
    outcome.record(family, plan);
    Ok(())
}
