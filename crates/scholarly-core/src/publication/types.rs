use serde::{Deserialize, Serialize};

/// Value written to the `Document Type` column; the profile page does not
/// expose a real type.
pub const DOCUMENT_TYPE_PLACEHOLDER: &str = "Other";

/// Column headers of the exported sheet, in record field order
pub const SHEET_HEADERS: [&str; 5] = [
    "Title",
    "Authors",
    "Publication Date",
    "Document Type",
    "Link",
];

/// One publication row scraped from a profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicationRecord {
    pub title: String,
    /// Free-text "authors, venue" line
    pub authors: String,
    /// Year as shown on the page, unparsed
    pub publication_date: String,
    pub document_type: String,
    pub link: String,
}

impl PublicationRecord {
    /// Build a record with the placeholder document type
    pub fn new(
        title: impl Into<String>,
        authors: impl Into<String>,
        publication_date: impl Into<String>,
        link: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            authors: authors.into(),
            publication_date: publication_date.into(),
            document_type: DOCUMENT_TYPE_PLACEHOLDER.to_string(),
            link: link.into(),
        }
    }

    /// Cell values in `SHEET_HEADERS` order
    pub fn cells(&self) -> [&str; 5] {
        [
            &self.title,
            &self.authors,
            &self.publication_date,
            &self.document_type,
            &self.link,
        ]
    }
}
