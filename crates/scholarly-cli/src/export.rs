use anyhow::{Context, Result};
use scholarly_core::{PublicationRecord, RecordSink, XlsxSink};
use std::path::{Path, PathBuf};

/// Download name offered for a researcher's export
pub fn export_file_name(name: &str) -> String {
    let safe: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '\0' => '_',
            c => c,
        })
        .collect();

    format!("{}_publications.xlsx", safe)
}

/// Write the export next to its final name, then move it into place
///
/// Nothing appears under `{name}_publications.xlsx` unless the whole
/// workbook was written.
pub fn deliver(records: &[PublicationRecord], dir: &Path, name: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Could not create output directory {}", dir.display()))?;

    let target = dir.join(export_file_name(name));
    let staging = tempfile::Builder::new()
        .prefix(".scholarly-")
        .suffix(".xlsx")
        .tempfile_in(dir)?;

    XlsxSink::new(staging.path()).persist(records)?;

    staging
        .persist(&target)
        .with_context(|| format!("Could not save {}", target.display()))?;

    tracing::debug!("Export delivered to {}", target.display());
    Ok(target)
}
