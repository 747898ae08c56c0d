use crate::OutputFormat;
use anyhow::{Context, Result};
use scholarly_core::{RosterReader, require_identifier};
use std::path::Path;

/// Read the roster and look up `name`'s profile identifier
pub fn lookup(roster: &Path, name: &str) -> Result<String> {
    let entries = RosterReader::from_file(roster)
        .with_context(|| format!("Failed to read roster {}", roster.display()))?;

    require_identifier(name, &entries)
        .with_context(|| format!("No profile identifier in {}", roster.display()))
}

pub fn execute(roster: &Path, name: &str, format: OutputFormat) -> Result<()> {
    tracing::debug!("Resolving '{}' against {}", name, roster.display());

    let identifier = lookup(roster, name)?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "name": name.trim(),
                "identifier": identifier,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Pretty => println!("{}", identifier),
    }

    Ok(())
}
