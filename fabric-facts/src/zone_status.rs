//! Facts scraped from `show zone status vsan <id>`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::facts::{DatabaseMode, DefaultZone, Toggle};

/// Session value the switch reports when nobody holds the zone lock.
pub const IDLE_SESSION: &str = "none";

static DEFAULT_ZONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^VSAN:\s+(\d+)\s+default-zone:\s+(\S+)").expect("default-zone pattern")
});
static MODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"mode:\s+(\S+)").expect("mode pattern"));
static SESSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"session:\s+(\S+)").expect("session pattern"));
static SMART_ZONING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"smart-zoning:\s+(\S+)").expect("smart-zoning pattern"));

/// Zone settings for one VSAN as reported by the switch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObservedZoneStatus {
    pub vsan: u16,
    pub default_zone: DefaultZone,
    pub mode: DatabaseMode,
    pub smart_zoning: Toggle,
    /// Raw session token; empty when the report has no session line.
    pub session: String,
    pub locked: bool,
}

/// The zone status report could not be turned into facts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FactsError {
    #[error("could not get {field} from the switch for vsan {vsan}")]
    Missing { vsan: u16, field: &'static str },
    #[error("switch reported unrecognized {field} '{value}' for vsan {vsan}")]
    Unrecognized {
        vsan: u16,
        field: &'static str,
        value: String,
    },
}

impl FactsError {
    pub fn vsan(&self) -> u16 {
        match self {
            Self::Missing { vsan, .. } | Self::Unrecognized { vsan, .. } => *vsan,
        }
    }
}

#[derive(Default)]
struct RawZoneStatus<'a> {
    default_zone: Option<&'a str>,
    mode: Option<&'a str>,
    session: Option<&'a str>,
    smart_zoning: Option<&'a str>,
}

/// Scrape `show zone status vsan <vsan>` output.
///
/// The default-zone line must name `vsan`; the other markers may appear
/// anywhere. Later matches overwrite earlier ones. A missing or unknown
/// default-zone, mode or smart-zoning value is an error because diffing
/// against it would be guesswork.
pub fn parse_zone_status(text: &str, vsan: u16) -> Result<ObservedZoneStatus, FactsError> {
    let mut raw = RawZoneStatus::default();

    for line in text.lines().map(str::trim) {
        if let Some(caps) = DEFAULT_ZONE_RE.captures(line) {
            if caps[1].parse::<u16>().ok() == Some(vsan) {
                raw.default_zone = caps.get(2).map(|m| m.as_str());
            }
        }
        if let Some(value) = capture(&MODE_RE, line) {
            raw.mode = Some(value);
        }
        if let Some(value) = capture(&SESSION_RE, line) {
            raw.session = Some(value);
        }
        if let Some(value) = capture(&SMART_ZONING_RE, line) {
            raw.smart_zoning = Some(value);
        }
    }

    let default_zone = required(raw.default_zone, vsan, "default zone status")?;
    let mode = required(raw.mode, vsan, "zone mode")?;
    let smart_zoning = required(raw.smart_zoning, vsan, "smart-zoning status")?;
    let session = raw.session.unwrap_or_default().to_string();
    if raw.session.is_none() {
        debug!(vsan, "zone status carries no session line");
    }
    let locked = !session.is_empty() && session != IDLE_SESSION;

    Ok(ObservedZoneStatus {
        vsan,
        default_zone,
        mode,
        smart_zoning,
        session,
        locked,
    })
}

fn capture<'a>(re: &Regex, line: &'a str) -> Option<&'a str> {
    re.captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn required<T: std::str::FromStr>(
    value: Option<&str>,
    vsan: u16,
    field: &'static str,
) -> Result<T, FactsError> {
    let value = value.ok_or(FactsError::Missing { vsan, field })?;
    value.parse().map_err(|_| FactsError::Unrecognized {
        vsan,
        field,
        value: value.to_string(),
    })
}
