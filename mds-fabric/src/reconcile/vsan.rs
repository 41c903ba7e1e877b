//! VSAN database reconciliation.
//!
//! VSAN attributes are asserted on every run rather than diffed: the switch
//! treats re-creating a VSAN or re-stating its suspend flag as a no-op.

use super::{Plan, NO_TERMINAL_DONT_ASK, TERMINAL_DONT_ASK};
use crate::request::DesiredVsan;

const VSAN_DATABASE: &str = "vsan database";

/// Plan the VSAN family. An empty request plans nothing; otherwise the
/// commands are bracketed by `terminal dont-ask` so deletions do not prompt.
pub fn plan_vsans(vsans: &[DesiredVsan]) -> Plan {
    let mut plan = Plan::default();
    if vsans.is_empty() {
        return plan;
    }

    plan.command(TERMINAL_DONT_ASK);
    for vsan in vsans {
        plan_vsan(vsan, &mut plan);
    }
    plan.command(NO_TERMINAL_DONT_ASK);
    plan
}

fn plan_vsan(vsan: &DesiredVsan, plan: &mut Plan) {
    let id = vsan.id;
    plan.command(VSAN_DATABASE);

    if vsan.remove {
        plan.command(format!("no vsan {id}"));
        plan.message(format!("deleting the vsan {id}"));
        return;
    }

    plan.command(format!("vsan {id}"));
    plan.message(format!("creating vsan {id}"));

    if let Some(name) = &vsan.name {
        plan.command(format!("vsan {id} name {name}"));
        plan.message(format!("setting vsan name to {name} for vsan {id}"));
    }

    if vsan.suspend {
        plan.command(format!("vsan {id} suspend"));
        plan.message(format!("suspending the vsan {id}"));
    } else {
        plan.command(format!("no vsan {id} suspend"));
        plan.message(format!("no suspending the vsan {id}"));
    }

    if !vsan.interfaces.is_empty() {
        plan.command(VSAN_DATABASE);
    }
    for interface in &vsan.interfaces {
        plan.command(format!("vsan {id} interface {interface}"));
        plan.message(format!("adding interface {interface} to vsan {id}"));
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::plan_vsans;
    use crate::request::DesiredVsan;

    fn vsan(id: u16) -> DesiredVsan {
        DesiredVsan {
            id,
            name: None,
            suspend: false,
            remove: false,
            interfaces: Vec::new(),
        }
    }

    #[test]
    fn empty_request_plans_nothing() {
        assert!(plan_vsans(&[]).is_noop());
    }

    #[test]
    fn unsuspend_is_always_asserted() {
        let plan = plan_vsans(&[vsan(922)]);
        assert_eq!(
            plan.commands,
            vec![
                "terminal dont-ask",
                "vsan database",
                "vsan 922",
                "no vsan 922 suspend",
                "no terminal dont-ask",
            ]
        );
        assert_eq!(plan.messages, vec!["creating vsan 922", "no suspending the vsan 922"]);
    }

    #[test]
    fn full_entry_in_order() {
        let plan = plan_vsans(&[DesiredVsan {
            name: Some("fabric-a".to_string()),
            suspend: true,
            interfaces: vec!["fc1/1".to_string(), "port-channel 55".to_string()],
            ..vsan(10)
        }]);
        assert_eq!(
            plan.commands,
            vec![
                "terminal dont-ask",
                "vsan database",
                "vsan 10",
                "vsan 10 name fabric-a",
                "vsan 10 suspend",
                "vsan database",
                "vsan 10 interface fc1/1",
                "vsan 10 interface port-channel 55",
                "no terminal dont-ask",
            ]
        );
    }

    #[test]
    fn remove_skips_every_other_field() {
        let plan = plan_vsans(&[
            DesiredVsan {
                remove: true,
                name: Some("ignored".to_string()),
                suspend: true,
                interfaces: vec!["fc1/2".to_string()],
                ..vsan(30)
            },
            vsan(31),
        ]);
        assert_eq!(
            plan.commands,
            vec![
                "terminal dont-ask",
                "vsan database",
                "no vsan 30",
                "vsan database",
                "vsan 31",
                "no vsan 31 suspend",
                "no terminal dont-ask",
            ]
        );
        assert_eq!(plan.messages[0], "deleting the vsan 30");
    }
}
