//! Batch validation of a request before the switch is contacted.

use std::collections::BTreeSet;

use fabric_facts::{validate_alias_name, validate_pwwn};
use serde::Serialize;

use crate::request::{
    DesiredAliasEntry, DesiredVsan, FabricDomainRequest, FabricRequest, MemberLocator,
};

/// Highest VSAN id an MDS switch accepts.
pub const MAX_VSAN_ID: u16 = 4094;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub code: String,
    pub message: String,
}

/// Collect every problem in `request`. An empty result means the request is
/// safe to reconcile.
pub fn validate_request(request: &FabricRequest) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    if let Some(da) = &request.device_alias {
        issues.extend(alias_issues(&da.aliases));
    }
    issues.extend(vsan_issues(&request.vsans));
    issues.extend(domain_issues(&request.domains));
    issues
}

pub fn render_validation_text(issues: &[ValidationIssue]) -> String {
    let mut out = vec![format!("result issues={}", issues.len())];
    out.push("issues".to_string());
    if issues.is_empty() {
        out.push("- none".to_string());
    }
    for issue in issues {
        out.push(format!("- [error] {}: {}", issue.code, issue.message));
    }
    out.join("\n")
}

fn alias_issues(entries: &[DesiredAliasEntry]) -> Vec<ValidationIssue> {
    let mut out = Vec::new();
    let mut seen = BTreeSet::new();
    for entry in entries {
        out.extend(name_issue("device alias name", &entry.name, true));
        if !seen.insert((entry.name.as_str(), entry.remove)) {
            out.push(issue(
                "duplicate_device_alias",
                format!("device alias name {} is listed more than once", entry.name),
            ));
        }
        if entry.remove {
            continue;
        }
        if !validate_alias_name(&entry.name) {
            out.push(issue(
                "invalid_device_alias_name",
                format!(
                    "device alias name is invalid : {}. Note that name cannot be more than 64 chars and it should start with a letter",
                    entry.name
                ),
            ));
        }
        match entry.pwwn.as_deref() {
            None => out.push(issue(
                "missing_pwwn",
                format!(
                    "device alias name {} which needs to be added, doesn't have pwwn specified",
                    entry.name
                ),
            )),
            Some(pwwn) if !validate_pwwn(pwwn) => out.push(issue(
                "invalid_pwwn",
                format!("pwwn is invalid : {pwwn} (device alias {})", entry.name),
            )),
            Some(_) => {}
        }
    }
    out
}

fn vsan_issues(vsans: &[DesiredVsan]) -> Vec<ValidationIssue> {
    let mut out = Vec::new();
    for vsan in vsans {
        if !vsan_id_in_range(vsan.id) {
            out.push(issue(
                "invalid_vsan_id",
                format!("vsan id {} is outside 1-{MAX_VSAN_ID}", vsan.id),
            ));
        }
        if let Some(name) = &vsan.name {
            out.extend(name_issue("vsan name", name, false));
        }
        for interface in &vsan.interfaces {
            out.extend(name_issue("vsan interface", interface, false));
        }
    }
    out
}

fn domain_issues(domains: &[FabricDomainRequest]) -> Vec<ValidationIssue> {
    let mut out = Vec::new();
    let mut seen = BTreeSet::new();
    for domain in domains {
        if !vsan_id_in_range(domain.vsan) {
            out.push(issue(
                "invalid_vsan_id",
                format!("zoning vsan id {} is outside 1-{MAX_VSAN_ID}", domain.vsan),
            ));
        }
        if !seen.insert(domain.vsan) {
            out.push(issue(
                "duplicate_zoning_vsan",
                format!("vsan {} has more than one zoning entry", domain.vsan),
            ));
        }
        for zone in &domain.zones {
            out.extend(name_issue("zone name", &zone.name, true));
        }
        for zoneset in &domain.zonesets {
            out.extend(name_issue("zoneset name", &zoneset.name, true));
            for member in &zoneset.members {
                out.extend(name_issue("zoneset member", &member.name, true));
            }
        }
        for zone in domain.zones.iter().filter(|zone| !zone.remove) {
            for member in &zone.members {
                let valid = match &member.locator {
                    MemberLocator::Pwwn(pwwn) => validate_pwwn(pwwn),
                    MemberLocator::DeviceAlias(name) => {
                        validate_alias_name(name) && is_single_token(name)
                    }
                };
                if !valid {
                    out.push(issue(
                        "invalid_zone_member",
                        format!(
                            "zone '{}' in vsan {} has an invalid {} member '{}'",
                            zone.name,
                            domain.vsan,
                            member.locator.keyword(),
                            member.locator.value()
                        ),
                    ));
                }
            }
        }
    }
    out
}

/// Every name ends up inside a one-line switch command: control characters
/// would split it, and whitespace in a single-token field shifts the words
/// that follow.
fn name_issue(what: &str, value: &str, single_token: bool) -> Option<ValidationIssue> {
    let has_control = value.chars().any(char::is_control);
    let bad = value.trim().is_empty() || has_control || (single_token && !is_single_token(value));
    if !bad {
        return None;
    }
    let rule = if single_token {
        "must be a single word without control characters"
    } else {
        "must be non-empty and without control characters"
    };
    Some(issue("invalid_name", format!("{what} {value:?} {rule}")))
}

fn is_single_token(value: &str) -> bool {
    !value.is_empty() && !value.chars().any(|c| c.is_whitespace() || c.is_control())
}

fn vsan_id_in_range(id: u16) -> bool {
    (1..=MAX_VSAN_ID).contains(&id)
}

fn issue(code: &str, message: String) -> ValidationIssue {
    ValidationIssue {
        code: code.to_string(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::validate_request;
    use crate::request::{
        DesiredAliasEntry, DesiredVsan, DesiredZone, DesiredZoneset, DeviceAliasRequest,
        FabricDomainRequest, FabricRequest, MemberLocator, ZoneMember, ZonesetAction,
        ZonesetMember,
    };

    fn alias(name: &str, pwwn: Option<&str>, remove: bool) -> DesiredAliasEntry {
        DesiredAliasEntry {
            name: name.to_string(),
            pwwn: pwwn.map(ToOwned::to_owned),
            remove,
        }
    }

    fn codes(request: &FabricRequest) -> Vec<String> {
        validate_request(request)
            .into_iter()
            .map(|issue| issue.code)
            .collect()
    }

    #[test]
    fn removals_need_no_pwwn() {
        let request = FabricRequest {
            device_alias: Some(DeviceAliasRequest {
                aliases: vec![alias("9old", None, true)],
                ..DeviceAliasRequest::default()
            }),
            ..FabricRequest::default()
        };
        assert!(codes(&request).is_empty());
    }

    #[test]
    fn collects_every_alias_problem() {
        let request = FabricRequest {
            device_alias: Some(DeviceAliasRequest {
                aliases: vec![
                    alias("9bc", Some("1:2:3:4:5:6:7:8"), false),
                    alias("host1", None, false),
                    alias("host2", Some("1:2:3:4:5:6:7"), false),
                    alias("host2", Some("1:2:3:4:5:6:7:9"), false),
                ],
                ..DeviceAliasRequest::default()
            }),
            ..FabricRequest::default()
        };
        assert_eq!(
            codes(&request),
            vec![
                "invalid_device_alias_name",
                "missing_pwwn",
                "invalid_pwwn",
                "duplicate_device_alias",
            ]
        );
    }

    #[test]
    fn names_that_would_split_commands_are_rejected() {
        let request = FabricRequest {
            device_alias: Some(DeviceAliasRequest {
                aliases: vec![alias("a\nno vsan 10", Some("1:2:3:4:5:6:7:8"), false)],
                ..DeviceAliasRequest::default()
            }),
            vsans: vec![DesiredVsan {
                id: 20,
                name: Some("a\nno vsan 30".to_string()),
                suspend: false,
                remove: false,
                interfaces: vec!["port-channel 55".to_string(), "fc1/1\r".to_string()],
            }],
            domains: vec![FabricDomainRequest {
                vsan: 10,
                mode: Default::default(),
                default_zone: Default::default(),
                smart_zoning: false,
                zones: vec![DesiredZone {
                    name: "z1 vsan 10\nno vsan 10\nzone name z1".to_string(),
                    remove: true,
                    members: Vec::new(),
                }],
                zonesets: vec![DesiredZoneset {
                    name: "zs 1".to_string(),
                    remove: false,
                    action: ZonesetAction::Activate,
                    members: vec![ZonesetMember {
                        name: "".to_string(),
                        remove: false,
                    }],
                }],
            }],
        };
        let issues = validate_request(&request);
        let invalid_names = issues.iter().filter(|i| i.code == "invalid_name").count();
        assert_eq!(invalid_names, 6);
        assert!(issues[0].message.contains("device alias name"));
    }

    #[test]
    fn spaced_vsan_names_and_interfaces_are_allowed() {
        let request = FabricRequest {
            vsans: vec![DesiredVsan {
                id: 20,
                name: Some("fabric a".to_string()),
                suspend: false,
                remove: false,
                interfaces: vec!["port-channel 55".to_string()],
            }],
            ..FabricRequest::default()
        };
        assert!(codes(&request).is_empty());
    }

    #[test]
    fn vsan_ids_and_zone_members_are_checked() {
        let request = FabricRequest {
            vsans: vec![DesiredVsan {
                id: 0,
                name: None,
                suspend: false,
                remove: false,
                interfaces: Vec::new(),
            }],
            domains: vec![FabricDomainRequest {
                vsan: 10,
                mode: Default::default(),
                default_zone: Default::default(),
                smart_zoning: false,
                zones: vec![DesiredZone {
                    name: "z1".to_string(),
                    remove: false,
                    members: vec![ZoneMember {
                        locator: MemberLocator::Pwwn("zz:11".to_string()),
                        devtype: None,
                        remove: false,
                    }],
                }],
                zonesets: Vec::new(),
            }],
            ..FabricRequest::default()
        };
        assert_eq!(codes(&request), vec!["invalid_vsan_id", "invalid_zone_member"]);
    }
}
