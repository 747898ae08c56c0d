use super::RosterEntry;
use crate::{Error, Result};
use calamine::{Data, Range, Reader, open_workbook_auto};
use std::path::Path;

/// Zero-based index of the first data row; row 0 holds the header.
const FIRST_DATA_ROW: u32 = 1;
const NAME_COLUMN: u32 = 0;
const IDENTIFIER_COLUMN: u32 = 1;

pub struct RosterReader;

impl RosterReader {
    /// Read roster entries from the first worksheet of a workbook
    pub fn from_file(path: &Path) -> Result<Vec<RosterEntry>> {
        tracing::debug!("Reading roster from: {}", path.display());

        let mut workbook = open_workbook_auto(path)?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or(Error::EmptyWorkbook)??;

        let entries = Self::from_range(&range);

        tracing::info!("Read {} roster entries from {}", entries.len(), path.display());

        Ok(entries)
    }

    /// Collect entries from an already loaded worksheet range
    ///
    /// Positions are absolute sheet coordinates, so leading blank rows or
    /// columns do not shift the `Name`/`Identifier` columns.
    pub fn from_range(range: &Range<Data>) -> Vec<RosterEntry> {
        let (Some((start_row, _)), Some((end_row, _))) = (range.start(), range.end()) else {
            return Vec::new();
        };

        (start_row.max(FIRST_DATA_ROW)..=end_row)
            .filter_map(|row| {
                let name = cell_text(range.get_value((row, NAME_COLUMN)));
                if name.is_empty() {
                    return None;
                }
                let identifier = cell_text(range.get_value((row, IDENTIFIER_COLUMN)));
                Some(RosterEntry { name, identifier })
            })
            .collect()
    }
}

fn cell_text(cell: Option<&Data>) -> String {
    match cell {
        None | Some(Data::Empty) => String::new(),
        Some(Data::String(s)) => s.trim().to_string(),
        Some(other) => other.to_string().trim().to_string(),
    }
}
