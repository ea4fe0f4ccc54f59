use std::{path::PathBuf, time::Duration};

/// Parse a boolean value from a raw string, accepting common env-style forms.
///
/// Accepted truthy values (case-insensitive): `"1"`, `"true"`, `"yes"`, `"on"`.
/// Accepted falsy values: `"0"`, `"false"`, `"no"`, `"off"`.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

pub fn parse_bool_var(name: &str) -> Option<bool> {
    std::env::var(name).ok().and_then(|raw| parse_bool(&raw))
}

pub fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub fn path_var(name: &str) -> Option<PathBuf> {
    non_empty_var(name).map(PathBuf::from)
}

/// Parse a fault target selector. `0`, `none` and `off` disable fault
/// injection; any other positive integer is a 1-based request index.
pub fn parse_fault_target(raw: &str) -> Option<Option<usize>> {
    let trimmed = raw.trim().to_ascii_lowercase();
    match trimmed.as_str() {
        "" | "none" | "off" => Some(None),
        other => other
            .parse::<usize>()
            .ok()
            .map(|index| (index > 0).then_some(index)),
    }
}

pub fn parse_duration(raw: &str) -> Result<Duration, humantime::DurationError> {
    humantime::parse_duration(raw.trim())
}
