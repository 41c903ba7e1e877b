use colored::Colorize;

use crate::facts::FabricFacts;
use crate::run::Outcome;

/// Render a run outcome for terminal output. Negating commands are red,
/// the rest green.
pub fn render_outcome(outcome: &Outcome) -> String {
    let mut out = vec![format!(
        "result changed={} check_mode={} commands={} warnings={}",
        outcome.changed,
        outcome.check_mode,
        outcome.commands.len(),
        outcome.warnings.len()
    )
    .cyan()
    .to_string()];

    if !outcome.families.is_empty() {
        let names: Vec<&str> = outcome.families.iter().map(|f| f.as_str()).collect();
        out.push(format!("families {}", names.join(",")));
    }

    out.push("commands".to_string());
    if outcome.commands.is_empty() {
        out.push("- none".to_string());
    }
    for command in &outcome.commands {
        let line = format!("  {command}");
        if command.starts_with("no ") {
            out.push(line.red().to_string());
        } else {
            out.push(line.green().to_string());
        }
    }

    out.push("messages".to_string());
    for message in &outcome.messages {
        out.push(format!("- {message}"));
    }

    if !outcome.warnings.is_empty() {
        out.push("warnings".to_string());
        for warning in &outcome.warnings {
            out.push(format!("- [warning] {warning}").yellow().to_string());
        }
    }
    out.join("\n")
}

/// Render gathered facts as an indented summary.
pub fn render_facts(facts: &FabricFacts) -> String {
    let state = &facts.device_alias;
    let mut out = vec!["device-alias".to_string()];
    out.push(format!("  distribute: {}", display_or_unknown(state.distribute)));
    out.push(format!("  mode: {}", display_or_unknown(state.mode)));
    out.push(format!("  locked: {}", state.locked));
    out.push(format!("  entries: {}", facts.aliases.len()));
    for entry in &facts.aliases {
        out.push(format!("  - {} {}", entry.name, entry.pwwn));
    }

    for zone in &facts.zones {
        out.push(format!("zone vsan {}", zone.vsan));
        out.push(format!("  default-zone: {}", zone.default_zone));
        out.push(format!("  mode: {}", zone.mode));
        out.push(format!("  smart-zoning: {}", zone.smart_zoning));
        let session = if zone.locked {
            zone.session.magenta().to_string()
        } else {
            zone.session.clone()
        };
        out.push(format!("  session: {session}"));
    }
    out.join("\n")
}

fn display_or_unknown<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "unknown".to_string(), |v| v.to_string())
}
