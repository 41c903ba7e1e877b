//! Syntax checks for operator-supplied names and port world-wide names.

/// Longest device-alias name the switch accepts.
pub const MAX_ALIAS_NAME_LEN: usize = 64;

const PWWN_GROUPS: usize = 8;

/// Return `true` when `pwwn` is eight colon-separated groups of one or two
/// hexadecimal digits.
pub fn validate_pwwn(pwwn: &str) -> bool {
    let groups: Vec<&str> = pwwn.split(':').collect();
    if groups.len() != PWWN_GROUPS {
        return false;
    }
    groups.iter().all(|group| {
        (1..=2).contains(&group.len()) && group.chars().all(|c| c.is_ascii_hexdigit())
    })
}

/// Return `true` when `name` starts with a letter and fits the switch limit.
///
/// An empty name is invalid.
pub fn validate_alias_name(name: &str) -> bool {
    let Some(first) = name.chars().next() else {
        return false;
    };
    first.is_alphabetic() && name.chars().count() <= MAX_ALIAS_NAME_LEN
}

/// Rewrite a pwwn the way the switch prints it: every group two lowercase
/// hex digits, single-digit groups zero-padded.
///
/// The input is not validated; groups longer than two characters are kept
/// as they are.
pub fn normalize_pwwn(pwwn: &str) -> String {
    pwwn.trim()
        .split(':')
        .map(|group| {
            let group = group.to_ascii_lowercase();
            if group.len() == 1 {
                format!("0{group}")
            } else {
                group
            }
        })
        .collect::<Vec<_>>()
        .join(":")
}
