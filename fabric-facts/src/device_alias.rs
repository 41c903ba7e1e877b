//! Facts scraped from `show device-alias status` and `show device-alias database`.

use serde::Serialize;
use tracing::debug;

use crate::facts::{DatabaseMode, Toggle};
use crate::syntax::normalize_pwwn;

const DISTRIBUTION_MARKER: &str = "Fabric Distribution";
const MODE_MARKER: &str = "Mode:";
const LOCK_MARKER: &str = "Locked";

/// Device-alias settings as reported by the switch.
///
/// `None` means the report never carried a recognizable value for the field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ObservedDeviceAliasState {
    pub distribute: Option<Toggle>,
    pub mode: Option<DatabaseMode>,
    pub locked: bool,
}

/// Scrape `show device-alias status` output.
///
/// Each marker is matched independently on every line; when several lines
/// carry the same marker the last one wins.
pub fn parse_device_alias_status(text: &str) -> ObservedDeviceAliasState {
    let mut state = ObservedDeviceAliasState::default();

    for line in text.lines() {
        if line.contains(DISTRIBUTION_MARKER) {
            state.distribute = line
                .split(':')
                .nth(1)
                .and_then(|value| parse_or_log(value, "distribution"));
        }
        if let Some(value) = line.split(MODE_MARKER).nth(1) {
            state.mode = parse_or_log(value, "mode");
        }
        if line.contains(LOCK_MARKER) {
            state.locked = true;
        }
    }

    state
}

fn parse_or_log<T: std::str::FromStr>(value: &str, field: &str) -> Option<T> {
    let value = value.trim();
    match value.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            debug!(field, value, "unrecognized device-alias status value");
            None
        }
    }
}

/// One `device-alias name <name> pwwn <pwwn>` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AliasEntry {
    pub name: String,
    /// Normalized to two lowercase hex digits per group.
    pub pwwn: String,
}

/// Membership view over `show device-alias database`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AliasDatabase {
    entries: Vec<AliasEntry>,
}

impl AliasDatabase {
    /// Parse the database listing. Lines that are not alias rows (totals,
    /// blank lines, headers) are skipped.
    pub fn parse(text: &str) -> Self {
        let entries = text.lines().filter_map(parse_entry).collect();
        Self { entries }
    }

    /// Whether `name` is bound to any pwwn.
    pub fn contains_name(&self, name: &str) -> bool {
        self.entries.iter().any(|entry| entry.name == name)
    }

    /// Whether `pwwn` is bound to any name. Single-digit groups in `pwwn`
    /// match their zero-padded form.
    pub fn contains_pwwn(&self, pwwn: &str) -> bool {
        let wanted = normalize_pwwn(pwwn);
        self.entries.iter().any(|entry| entry.pwwn == wanted)
    }

    /// The normalized pwwn bound to `name`.
    pub fn pwwn_of(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.pwwn.as_str())
    }

    pub fn entries(&self) -> &[AliasEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_entry(line: &str) -> Option<AliasEntry> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let name = token_after(&tokens, "name")?;
    let pwwn = token_after(&tokens, "pwwn")?;
    Some(AliasEntry {
        name: name.to_string(),
        pwwn: normalize_pwwn(pwwn),
    })
}

fn token_after<'a>(tokens: &[&'a str], keyword: &str) -> Option<&'a str> {
    let idx = tokens.iter().position(|token| *token == keyword)?;
    tokens.get(idx + 1).copied()
}
