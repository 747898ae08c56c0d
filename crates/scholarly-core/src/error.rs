use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to access file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read roster workbook: {0}")]
    Roster(#[from] calamine::Error),

    #[error("Roster workbook contains no worksheet")]
    EmptyWorkbook,

    #[error("Failed to write spreadsheet: {0}")]
    Sheet(#[from] rust_xlsxwriter::XlsxError),

    #[error("Failed to serialize records: {0}")]
    Json(#[from] serde_json::Error),

    #[error("'{name}' not found in roster")]
    NotFound { name: String },
}

pub type Result<T> = std::result::Result<T, Error>;
