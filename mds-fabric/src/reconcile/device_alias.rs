//! Device-alias distribution, mode and database reconciliation.

use fabric_facts::{normalize_pwwn, AliasDatabase, DatabaseMode, ObservedDeviceAliasState, Toggle};
use tracing::debug;

use super::{negate_if, Plan};
use crate::error::{LockScope, ReconcileError};
use crate::request::{DesiredAliasEntry, DeviceAliasRequest};
use crate::validate::ValidationIssue;

pub const COMMIT: &str = "device-alias commit";
const DATABASE: &str = "device-alias database";

/// Plan the device-alias family against one snapshot of the switch.
///
/// The three phases (distribution, mode, database) all diff against the same
/// snapshot. A held device-alias lock fails the whole family before any
/// command is planned.
pub fn plan_device_alias(
    desired: &DeviceAliasRequest,
    status: &ObservedDeviceAliasState,
    database: &AliasDatabase,
) -> Result<Plan, ReconcileError> {
    if status.locked {
        return Err(ReconcileError::DeviceLocked(LockScope::DeviceAlias));
    }

    let mut plan = distribution_phase(Toggle::from_bool(desired.distribute), status.distribute);
    plan.extend(mode_phase(desired.mode, status.mode));
    plan.extend(database_phase(&desired.aliases, database)?);
    Ok(plan)
}

fn distribution_phase(want: Toggle, have: Option<Toggle>) -> Plan {
    let mut plan = Plan::default();
    match have {
        None => plan.warning(
            "could not read device-alias distribution state from the switch; leaving it unchanged",
        ),
        Some(have) if have == want => plan.message(format!(
            "device-alias distribute remains unchanged. current distribution mode is {have}"
        )),
        Some(have) => {
            plan.command(negate_if(
                !want.is_enabled(),
                "device-alias distribute".to_string(),
            ));
            plan.command(COMMIT);
            plan.message(format!(
                "device-alias distribute changed from {have} to {want}"
            ));
        }
    }
    plan
}

fn mode_phase(want: DatabaseMode, have: Option<DatabaseMode>) -> Plan {
    let mut plan = Plan::default();
    match have {
        None => plan.warning("could not read device-alias mode from the switch; leaving it unchanged"),
        Some(have) if have == want => plan.message(format!(
            "device-alias mode remains unchanged. current mode is {have}"
        )),
        Some(have) => {
            plan.command(negate_if(
                want == DatabaseMode::Basic,
                "device-alias mode enhanced".to_string(),
            ));
            plan.command(COMMIT);
            plan.message(format!("device-alias mode changed from {have} to {want}"));
        }
    }
    plan
}

fn database_phase(
    entries: &[DesiredAliasEntry],
    database: &AliasDatabase,
) -> Result<Plan, ReconcileError> {
    let mut plan = Plan::default();
    let mut body = Vec::new();
    let mut removed = Vec::new();
    let mut added = Vec::new();

    for entry in entries {
        let name = entry.name.as_str();
        if entry.remove {
            if !database.contains_name(name) {
                return Err(ReconcileError::AliasNotFound(name.to_string()));
            }
            body.push(format!("no device-alias name {name}"));
            removed.push(name);
            continue;
        }

        let Some(pwwn) = entry.pwwn.as_deref() else {
            return Err(ReconcileError::Validation(vec![ValidationIssue {
                code: "missing_pwwn".to_string(),
                message: format!("device alias name {name} which needs to be added, doesn't have pwwn specified"),
            }]));
        };
        if let Some(bound) = database.pwwn_of(name) {
            if bound == normalize_pwwn(pwwn) {
                debug!(name, pwwn, "device-alias already in place");
                plan.message(format!(
                    "device-alias {name} already present with pwwn {bound}"
                ));
                continue;
            }
            return Err(ReconcileError::AliasAlreadyExists(name.to_string()));
        }
        if database.contains_pwwn(pwwn) {
            return Err(ReconcileError::PwwnAlreadyExists(pwwn.to_string()));
        }
        body.push(format!("device-alias name {name} pwwn {pwwn}"));
        added.push(name);
    }

    if body.is_empty() {
        return Ok(plan);
    }

    plan.command(DATABASE);
    plan.commands.extend(body);
    plan.command(COMMIT);
    if !removed.is_empty() {
        plan.message(format!(
            "the required device-alias were removed. {}",
            removed.join(",")
        ));
    }
    if !added.is_empty() {
        plan.message(format!(
            "the required device-alias were added. {}",
            added.join(",")
        ));
    }
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use fabric_facts::{parse_device_alias_status, AliasDatabase, DatabaseMode, Toggle};
    use pretty_assertions::assert_eq;

    use super::plan_device_alias;
    use crate::error::{LockScope, ReconcileError};
    use crate::request::{DesiredAliasEntry, DeviceAliasRequest};
    use fabric_facts::ObservedDeviceAliasState;

    const DATABASE: &str = "device-alias name host1 pwwn 21:00:00:24:ff:4c:b3:d0\n\
                            device-alias name array1 pwwn 50:06:01:60:3e:a0:12:34\n\n\
                            Total number of entries = 2\n";

    fn observed(distribute: Toggle, mode: DatabaseMode) -> ObservedDeviceAliasState {
        ObservedDeviceAliasState {
            distribute: Some(distribute),
            mode: Some(mode),
            locked: false,
        }
    }

    fn add(name: &str, pwwn: &str) -> DesiredAliasEntry {
        DesiredAliasEntry {
            name: name.to_string(),
            pwwn: Some(pwwn.to_string()),
            remove: false,
        }
    }

    fn remove(name: &str) -> DesiredAliasEntry {
        DesiredAliasEntry {
            name: name.to_string(),
            pwwn: None,
            remove: true,
        }
    }

    #[test]
    fn enables_distribution_and_leaves_matching_mode() {
        let desired = DeviceAliasRequest {
            distribute: true,
            mode: DatabaseMode::Basic,
            aliases: Vec::new(),
        };
        let plan = plan_device_alias(
            &desired,
            &observed(Toggle::Disabled, DatabaseMode::Basic),
            &AliasDatabase::parse(DATABASE),
        )
        .expect("plan");

        assert_eq!(plan.commands, vec!["device-alias distribute", "device-alias commit"]);
        assert_eq!(
            plan.messages,
            vec![
                "device-alias distribute changed from disabled to enabled",
                "device-alias mode remains unchanged. current mode is basic",
            ]
        );
    }

    #[test]
    fn switching_to_basic_negates_enhanced_mode() {
        let desired = DeviceAliasRequest::default();
        let plan = plan_device_alias(
            &desired,
            &observed(Toggle::Disabled, DatabaseMode::Enhanced),
            &AliasDatabase::default(),
        )
        .expect("plan");

        assert_eq!(plan.commands, vec!["no device-alias mode enhanced", "device-alias commit"]);
        assert_eq!(plan.messages[1], "device-alias mode changed from enhanced to basic");
    }

    #[test]
    fn database_phase_wraps_adds_and_removes() {
        let desired = DeviceAliasRequest {
            distribute: false,
            mode: DatabaseMode::Basic,
            aliases: vec![add("host9", "21:0:0:24:ff:4c:b3:d9"), remove("array1")],
        };
        let plan = plan_device_alias(
            &desired,
            &observed(Toggle::Disabled, DatabaseMode::Basic),
            &AliasDatabase::parse(DATABASE),
        )
        .expect("plan");

        assert_eq!(
            plan.commands,
            vec![
                "device-alias database",
                "device-alias name host9 pwwn 21:0:0:24:ff:4c:b3:d9",
                "no device-alias name array1",
                "device-alias commit",
            ]
        );
        assert_eq!(
            &plan.messages[2..],
            &[
                "the required device-alias were removed. array1".to_string(),
                "the required device-alias were added. host9".to_string(),
            ]
        );
    }

    #[test]
    fn second_run_is_a_noop() {
        let desired = DeviceAliasRequest {
            distribute: true,
            mode: DatabaseMode::Enhanced,
            aliases: vec![add("host9", "21:0:0:24:ff:4c:b3:d9")],
        };
        let after_first_run = AliasDatabase::parse(&format!(
            "{DATABASE}device-alias name host9 pwwn 21:00:00:24:ff:4c:b3:d9\n"
        ));
        let plan = plan_device_alias(
            &desired,
            &observed(Toggle::Enabled, DatabaseMode::Enhanced),
            &after_first_run,
        )
        .expect("plan");

        assert!(plan.is_noop());
        assert_eq!(
            plan.messages[2],
            "device-alias host9 already present with pwwn 21:00:00:24:ff:4c:b3:d9"
        );
    }

    #[test]
    fn locked_switch_plans_nothing() {
        let status = parse_device_alias_status(
            "Fabric Distribution: Enabled\nLocked By:- User \"admin\"\n",
        );
        let err = plan_device_alias(&DeviceAliasRequest::default(), &status, &AliasDatabase::default())
            .expect_err("locked");
        assert!(matches!(err, ReconcileError::DeviceLocked(LockScope::DeviceAlias)));
    }

    #[test]
    fn conflicts_with_existing_database_fail() {
        let db = AliasDatabase::parse(DATABASE);
        let status = observed(Toggle::Disabled, DatabaseMode::Basic);
        let with = |entry: DesiredAliasEntry| DeviceAliasRequest {
            aliases: vec![entry],
            ..DeviceAliasRequest::default()
        };

        let err = plan_device_alias(&with(remove("ghost")), &status, &db).expect_err("absent");
        assert!(matches!(err, ReconcileError::AliasNotFound(name) if name == "ghost"));

        let err = plan_device_alias(&with(add("host1", "1:2:3:4:5:6:7:8")), &status, &db)
            .expect_err("name taken");
        assert!(matches!(err, ReconcileError::AliasAlreadyExists(name) if name == "host1"));

        let err = plan_device_alias(&with(add("array2", "50:6:1:60:3e:a0:12:34")), &status, &db)
            .expect_err("pwwn taken");
        assert!(matches!(err, ReconcileError::PwwnAlreadyExists(pwwn) if pwwn == "50:6:1:60:3e:a0:12:34"));
    }

    #[test]
    fn unknown_status_fields_warn_instead_of_guessing() {
        let plan = plan_device_alias(
            &DeviceAliasRequest::default(),
            &ObservedDeviceAliasState::default(),
            &AliasDatabase::default(),
        )
        .expect("plan");
        assert!(plan.is_noop());
        assert_eq!(plan.warnings.len(), 2);
    }
}
