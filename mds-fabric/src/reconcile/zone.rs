//! Zone and zoneset reconciliation, one VSAN at a time.

use fabric_facts::{DatabaseMode, DefaultZone, ObservedZoneStatus, Toggle};

use super::{negate_if, Plan, NO_TERMINAL_DONT_ASK, TERMINAL_DONT_ASK};
use crate::error::{LockScope, ReconcileError};
use crate::request::{DesiredZone, DesiredZoneset, FabricDomainRequest, ZonesetAction};

/// Plan the zoning family.
///
/// `observe` is called once per domain, in request order, right before that
/// domain is planned; the first failure (unreadable facts or a held zone
/// lock) stops the whole family. Zoning settings are diffed against the
/// observed status; zone and zoneset contents are asserted as requested.
pub fn plan_zoning<F>(domains: &[FabricDomainRequest], mut observe: F) -> Result<Plan, ReconcileError>
where
    F: FnMut(u16) -> Result<ObservedZoneStatus, ReconcileError>,
{
    let mut plan = Plan::default();
    if domains.is_empty() {
        return Ok(plan);
    }

    for domain in domains {
        let status = observe(domain.vsan)?;
        plan_domain(domain, &status, &mut plan)?;
    }
    plan.command(NO_TERMINAL_DONT_ASK);
    Ok(plan)
}

fn plan_domain(
    domain: &FabricDomainRequest,
    status: &ObservedZoneStatus,
    plan: &mut Plan,
) -> Result<(), ReconcileError> {
    let vsan = domain.vsan;
    if status.locked {
        return Err(ReconcileError::DeviceLocked(LockScope::Zone { vsan }));
    }

    plan.message(format!(
        "default zone status on switch for vsan {vsan} is {}",
        status.default_zone
    ));
    plan.message(format!("zone mode on switch for vsan {vsan} is {}", status.mode));
    plan.message(format!(
        "smart-zoning status on switch for vsan {vsan} is {}",
        status.smart_zoning
    ));

    plan.command(TERMINAL_DONT_ASK);
    default_zone_diff(vsan, domain.default_zone, status.default_zone, plan);
    mode_diff(vsan, domain.mode, status.mode, plan);
    smart_zoning_diff(
        vsan,
        Toggle::from_bool(domain.smart_zoning),
        status.smart_zoning,
        plan,
    );

    for zone in &domain.zones {
        plan_zone(vsan, zone, domain.smart_zoning, plan);
    }
    for zoneset in &domain.zonesets {
        plan_zoneset(vsan, zoneset, plan);
    }

    if domain.mode == DatabaseMode::Enhanced {
        plan.command(format!("zone commit vsan {vsan}"));
    }
    Ok(())
}

fn default_zone_diff(vsan: u16, want: DefaultZone, have: DefaultZone, plan: &mut Plan) {
    if want == have {
        plan.message(format!(
            "no change in default zone configuration for vsan {vsan}"
        ));
        return;
    }
    plan.command(negate_if(
        want == DefaultZone::Deny,
        format!("zone default-zone permit vsan {vsan}"),
    ));
    plan.message(format!(
        "default zone configuration changed from {have} to {want} for vsan {vsan}"
    ));
}

fn mode_diff(vsan: u16, want: DatabaseMode, have: DatabaseMode, plan: &mut Plan) {
    if want == have {
        plan.message(format!("no change in zone mode configuration for vsan {vsan}"));
        return;
    }
    plan.command(negate_if(
        want == DatabaseMode::Basic,
        format!("zone mode enhanced vsan {vsan}"),
    ));
    plan.message(format!(
        "zone mode configuration changed from {have} to {want} for vsan {vsan}"
    ));
}

fn smart_zoning_diff(vsan: u16, want: Toggle, have: Toggle, plan: &mut Plan) {
    if want == have {
        plan.message(format!(
            "no change in smart-zoning configuration for vsan {vsan}"
        ));
        return;
    }
    plan.command(negate_if(
        !want.is_enabled(),
        format!("zone smart-zoning enable vsan {vsan}"),
    ));
    plan.message(format!("smart-zoning {want} for vsan {vsan}"));
}

fn plan_zone(vsan: u16, zone: &DesiredZone, smart_zoning: bool, plan: &mut Plan) {
    let name = &zone.name;
    if zone.remove {
        plan.command(format!("no zone name {name} vsan {vsan}"));
        plan.message(format!("zone '{name}' is removed from vsan {vsan}"));
        return;
    }

    plan.command(format!("zone name {name} vsan {vsan}"));
    for member in &zone.members {
        let locator = &member.locator;
        let mut command = format!("member {} {}", locator.keyword(), locator.value());
        if smart_zoning {
            if let Some(devtype) = member.devtype {
                command = format!("{command} {}", devtype.as_str());
            }
        }
        plan.command(negate_if(member.remove, command));
        if member.remove {
            plan.message(format!(
                "removing zone member '{}' from zone '{name}' in vsan {vsan}",
                locator.value()
            ));
        } else {
            plan.message(format!(
                "adding zone member '{}' to zone '{name}' in vsan {vsan}",
                locator.value()
            ));
        }
    }
}

/// Removal and (de)activation are separate steps: a removed zoneset still
/// gets its activation command.
fn plan_zoneset(vsan: u16, zoneset: &DesiredZoneset, plan: &mut Plan) {
    let name = &zoneset.name;
    if zoneset.remove {
        plan.command(format!("no zoneset name {name} vsan {vsan}"));
        plan.message(format!("zoneset '{name}' is removed from vsan {vsan}"));
    } else {
        plan.command(format!("zoneset name {name} vsan {vsan}"));
        for member in &zoneset.members {
            let zone = &member.name;
            plan.command(negate_if(member.remove, format!("member {zone}")));
            if member.remove {
                plan.message(format!(
                    "removing zoneset member '{zone}' from zoneset '{name}' in vsan {vsan}"
                ));
            } else {
                plan.message(format!(
                    "adding zoneset member '{zone}' to zoneset '{name}' in vsan {vsan}"
                ));
            }
        }
    }

    match zoneset.action {
        ZonesetAction::Activate => {
            plan.command(format!("zoneset activate name {name} vsan {vsan}"));
            plan.message(format!("activating zoneset '{name}' in vsan {vsan}"));
        }
        ZonesetAction::Deactivate => {
            plan.command(format!("no zoneset activate name {name} vsan {vsan}"));
            plan.message(format!("deactivating zoneset '{name}' in vsan {vsan}"));
        }
    }
}
