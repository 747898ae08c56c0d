use super::types::{PublicationRecord, SHEET_HEADERS};
use crate::Result;
use rust_xlsxwriter::{Format, Workbook};
use std::io::Write;
use std::path::PathBuf;

const SHEET_NAME: &str = "Publications";
const COLUMN_WIDTHS: [(u16, f64); 5] = [(0, 60.0), (1, 50.0), (2, 16.0), (3, 14.0), (4, 40.0)];

/// Destination for an ordered batch of scraped records
pub trait RecordSink {
    fn persist(&mut self, records: &[PublicationRecord]) -> Result<()>;
}

/// Writes records to a single-sheet `.xlsx` workbook
pub struct XlsxSink {
    path: PathBuf,
}

impl XlsxSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Render the workbook in memory instead of to disk
    pub fn to_buffer(records: &[PublicationRecord]) -> Result<Vec<u8>> {
        let mut workbook = Self::build(records)?;
        Ok(workbook.save_to_buffer()?)
    }

    fn build(records: &[PublicationRecord]) -> Result<Workbook> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME)?;

        let header = Format::new().set_bold();
        for (col, title) in SHEET_HEADERS.iter().enumerate() {
            sheet.write_string_with_format(0, col as u16, *title, &header)?;
        }

        for (idx, record) in records.iter().enumerate() {
            let row = idx as u32 + 1;
            for (col, value) in record.cells().iter().enumerate() {
                sheet.write_string(row, col as u16, *value)?;
            }
        }

        for (col, width) in COLUMN_WIDTHS {
            sheet.set_column_width(col, width)?;
        }

        Ok(workbook)
    }
}

impl RecordSink for XlsxSink {
    fn persist(&mut self, records: &[PublicationRecord]) -> Result<()> {
        tracing::debug!("Writing publications sheet to: {}", self.path.display());

        let mut workbook = Self::build(records)?;
        workbook.save(&self.path)?;

        tracing::info!(
            "Wrote {} publications to {}",
            records.len(),
            self.path.display()
        );

        Ok(())
    }
}

/// Writes records as a pretty-printed JSON array
pub struct JsonSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RecordSink for JsonSink<W> {
    fn persist(&mut self, records: &[PublicationRecord]) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, records)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}
