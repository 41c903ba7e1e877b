//! Desired-state request documents.
//!
//! A request carries up to three independent resource families. Field
//! defaults follow the switch defaults an operator would otherwise get.

use std::fs;
use std::path::Path;

use fabric_facts::{DatabaseMode, DefaultZone};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level desired state for one switch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FabricRequest {
    #[serde(default)]
    pub device_alias: Option<DeviceAliasRequest>,
    #[serde(default, rename = "vsan")]
    pub vsans: Vec<DesiredVsan>,
    #[serde(default, rename = "zone_zoneset", alias = "zone_zoneset_details")]
    pub domains: Vec<FabricDomainRequest>,
}

impl FabricRequest {
    pub fn is_empty(&self) -> bool {
        self.device_alias.is_none() && self.vsans.is_empty() && self.domains.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeviceAliasRequest {
    #[serde(default)]
    pub distribute: bool,
    #[serde(default)]
    pub mode: DatabaseMode,
    #[serde(default, alias = "da")]
    pub aliases: Vec<DesiredAliasEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DesiredAliasEntry {
    pub name: String,
    #[serde(default)]
    pub pwwn: Option<String>,
    #[serde(default)]
    pub remove: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DesiredVsan {
    pub id: u16,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub suspend: bool,
    #[serde(default)]
    pub remove: bool,
    #[serde(default, alias = "interface")]
    pub interfaces: Vec<String>,
}

/// Zoning settings, zones and zonesets for one VSAN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FabricDomainRequest {
    pub vsan: u16,
    #[serde(default)]
    pub mode: DatabaseMode,
    #[serde(default)]
    pub default_zone: DefaultZone,
    #[serde(default)]
    pub smart_zoning: bool,
    #[serde(default, alias = "zone")]
    pub zones: Vec<DesiredZone>,
    #[serde(default, alias = "zoneset")]
    pub zonesets: Vec<DesiredZoneset>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DesiredZone {
    pub name: String,
    #[serde(default)]
    pub remove: bool,
    #[serde(default)]
    pub members: Vec<ZoneMember>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DevType {
    Initiator,
    Target,
    Both,
}

impl DevType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Initiator => "initiator",
            Self::Target => "target",
            Self::Both => "both",
        }
    }
}

/// How a zone member is identified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberLocator {
    Pwwn(String),
    DeviceAlias(String),
}

impl MemberLocator {
    /// Keyword used after `member` in zone configuration mode.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Pwwn(_) => "pwwn",
            Self::DeviceAlias(_) => "device-alias",
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Self::Pwwn(value) | Self::DeviceAlias(value) => value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawZoneMember")]
pub struct ZoneMember {
    pub locator: MemberLocator,
    pub devtype: Option<DevType>,
    pub remove: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawZoneMember {
    #[serde(default)]
    pwwn: Option<String>,
    #[serde(default, alias = "device-alias")]
    device_alias: Option<String>,
    #[serde(default)]
    devtype: Option<DevType>,
    #[serde(default)]
    remove: bool,
}

#[derive(Debug, Error)]
#[error("zone member must set exactly one of 'pwwn' or 'device_alias'")]
pub struct AmbiguousMemberError;

impl TryFrom<RawZoneMember> for ZoneMember {
    type Error = AmbiguousMemberError;

    fn try_from(raw: RawZoneMember) -> Result<Self, Self::Error> {
        let locator = match (raw.pwwn, raw.device_alias) {
            (Some(pwwn), None) => MemberLocator::Pwwn(pwwn),
            (None, Some(alias)) => MemberLocator::DeviceAlias(alias),
            _ => return Err(AmbiguousMemberError),
        };
        Ok(Self {
            locator,
            devtype: raw.devtype,
            remove: raw.remove,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZonesetAction {
    Activate,
    #[default]
    Deactivate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DesiredZoneset {
    pub name: String,
    #[serde(default)]
    pub remove: bool,
    #[serde(default)]
    pub action: ZonesetAction,
    #[serde(default)]
    pub members: Vec<ZonesetMember>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ZonesetMember {
    pub name: String,
    #[serde(default)]
    pub remove: bool,
}

/// Errors returned when loading request documents.
#[derive(Debug, Error)]
pub enum RequestLoadError {
    #[error("failed to read request file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse request file {path}: {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("failed to parse request file {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
    #[error("unsupported request format for {path}; expected .toml or .json")]
    UnsupportedFormat { path: String },
}

/// Load a request document, picking the format from the file extension.
pub fn load_request(path: &Path) -> Result<FabricRequest, RequestLoadError> {
    let display = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|source| RequestLoadError::Io {
        path: display.clone(),
        source,
    })?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => parse_toml_request(&raw, display),
        Some("json") => serde_json::from_str(&raw)
            .map_err(|source| RequestLoadError::Json { path: display, source }),
        _ => Err(RequestLoadError::UnsupportedFormat { path: display }),
    }
}

fn parse_toml_request(raw: &str, path: String) -> Result<FabricRequest, RequestLoadError> {
    toml::from_str(raw).map_err(|source| RequestLoadError::Toml { path, source })
}
