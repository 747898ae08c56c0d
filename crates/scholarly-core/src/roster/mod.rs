mod reader;
mod resolver;

pub use reader::RosterReader;
pub use resolver::{require_identifier, resolve};

/// One row of a roster workbook: `Name, Identifier, ...`
///
/// Trailing columns are ignored when the workbook is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub name: String,
    pub identifier: String,
}

impl RosterEntry {
    pub fn new(name: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            identifier: identifier.into(),
        }
    }
}
