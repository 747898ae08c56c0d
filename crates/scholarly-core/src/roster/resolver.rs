use super::RosterEntry;
use crate::{Error, Result};

/// Look up the profile identifier for `name`
///
/// Names are compared trimmed and case-insensitively. The first matching
/// row wins; if its identifier is empty the lookup yields `None` even when a
/// later row carries the same name.
pub fn resolve<'a>(name: &str, roster: &'a [RosterEntry]) -> Option<&'a str> {
    let wanted = normalize(name);

    let entry = roster.iter().find(|entry| normalize(&entry.name) == wanted)?;

    let identifier = entry.identifier.trim();
    if identifier.is_empty() {
        tracing::debug!("Roster entry for '{}' has no identifier", entry.name);
        return None;
    }

    Some(identifier)
}

/// Like [`resolve`], but reports a missing identifier as [`Error::NotFound`]
pub fn require_identifier(name: &str, roster: &[RosterEntry]) -> Result<String> {
    resolve(name, roster)
        .map(str::to_string)
        .ok_or_else(|| Error::NotFound {
            name: name.trim().to_string(),
        })
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}
