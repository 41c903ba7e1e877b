//! Typed facts scraped from Cisco MDS `show` output.
//!
//! The switch only reports device-alias and zoning state as operator-facing
//! text. This crate is the single place that text is interpreted:
//!
//! - [`device_alias`] — `show device-alias status` and `show device-alias database`
//! - [`zone_status`] — `show zone status vsan <id>`
//! - [`syntax`] — well-formedness checks for alias names and pwwns
//!
//! Callers get immutable fact records or a [`FactsError`]; they never see the
//! raw text.

pub mod device_alias;
pub mod facts;
pub mod syntax;
pub mod zone_status;

pub use device_alias::{parse_device_alias_status, AliasDatabase, AliasEntry, ObservedDeviceAliasState};
pub use facts::{DatabaseMode, DefaultZone, Toggle, UnknownValue};
pub use syntax::{normalize_pwwn, validate_alias_name, validate_pwwn, MAX_ALIAS_NAME_LEN};
pub use zone_status::{parse_zone_status, FactsError, ObservedZoneStatus};
