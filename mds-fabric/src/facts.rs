//! Read-only collection of what the switch currently reports.

use fabric_facts::{
    parse_device_alias_status, parse_zone_status, AliasDatabase, AliasEntry,
    ObservedDeviceAliasState, ObservedZoneStatus,
};
use serde::Serialize;

use crate::device::{show_zone_status, Device, SHOW_DEVICE_ALIAS_DATABASE, SHOW_DEVICE_ALIAS_STATUS};
use crate::error::ReconcileError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FabricFacts {
    pub device_alias: ObservedDeviceAliasState,
    pub aliases: Vec<AliasEntry>,
    pub zones: Vec<ObservedZoneStatus>,
}

/// Read device-alias status and database plus the zone status of every VSAN
/// in `vsans`.
pub fn gather_facts<D: Device>(device: &mut D, vsans: &[u16]) -> Result<FabricFacts, ReconcileError> {
    let device_alias = parse_device_alias_status(&device.execute_show(SHOW_DEVICE_ALIAS_STATUS)?);
    let database = AliasDatabase::parse(&device.execute_show(SHOW_DEVICE_ALIAS_DATABASE)?);
    let mut zones = Vec::with_capacity(vsans.len());
    for &vsan in vsans {
        let text = device.execute_show(&show_zone_status(vsan))?;
        zones.push(parse_zone_status(&text, vsan)?);
    }
    Ok(FabricFacts {
        device_alias,
        aliases: database.entries().to_vec(),
        zones,
    })
}

#[cfg(test)]
mod tests {
    use fabric_facts::{DatabaseMode, Toggle};
    use pretty_assertions::assert_eq;

    use super::gather_facts;
    use crate::device::{SnapshotDevice, SHOW_DEVICE_ALIAS_DATABASE, SHOW_DEVICE_ALIAS_STATUS};
    use crate::error::ReconcileError;

    fn device() -> SnapshotDevice {
        SnapshotDevice::new()
            .with_output(
                SHOW_DEVICE_ALIAS_STATUS,
                "Fabric Distribution: Enabled\nDatabase:- Device Aliases 1 Mode: Enhanced\n",
            )
            .with_output(
                SHOW_DEVICE_ALIAS_DATABASE,
                "device-alias name h1 pwwn 21:00:00:24:ff:4c:b3:d0\n",
            )
    }

    #[test]
    fn collects_alias_state_without_zones() {
        let facts = gather_facts(&mut device(), &[]).expect("facts");
        assert_eq!(facts.device_alias.distribute, Some(Toggle::Enabled));
        assert_eq!(facts.device_alias.mode, Some(DatabaseMode::Enhanced));
        assert_eq!(facts.aliases.len(), 1);
        assert!(facts.zones.is_empty());
    }

    #[test]
    fn missing_zone_output_is_a_device_error() {
        let err = gather_facts(&mut device(), &[10]).expect_err("no output");
        assert!(matches!(err, ReconcileError::Device(_)));
    }
}
