use scholarly_core::PublicationRecord;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// Markup captured from one publication row, before validation
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawRow {
    pub title: Option<RawTitle>,
    pub authors: Option<String>,
    pub year: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawTitle {
    pub text: String,
    pub href: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RowError {
    #[error("title link element not found")]
    MissingTitle,

    #[error("publication year element not found")]
    MissingDate,
}

/// Turn one captured row into a record
///
/// The title link and the year are required; a missing author line becomes
/// an empty string.
pub fn extract_row(row: &RawRow, base: &Url) -> Result<PublicationRecord, RowError> {
    let title = row.title.as_ref().ok_or(RowError::MissingTitle)?;
    let year = row.year.as_deref().ok_or(RowError::MissingDate)?;
    let authors = row.authors.as_deref().unwrap_or_default();

    Ok(PublicationRecord::new(
        title.text.trim(),
        authors.trim(),
        year.trim(),
        resolve_link(title.href.as_deref(), base),
    ))
}

/// Extract every row in page order, dropping rows that fail
pub fn extract_all(rows: &[RawRow], base: &Url) -> Vec<PublicationRecord> {
    let records: Vec<PublicationRecord> = rows
        .iter()
        .enumerate()
        .filter_map(|(idx, row)| match extract_row(row, base) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::error!("Error scraping publication {}: {}", idx + 1, e);
                None
            }
        })
        .collect();

    if records.len() < rows.len() {
        tracing::warn!(
            "Dropped {} of {} publication rows",
            rows.len() - records.len(),
            rows.len()
        );
    }

    records
}

fn resolve_link(href: Option<&str>, base: &Url) -> String {
    let Some(href) = href.map(str::trim) else {
        return String::new();
    };

    match base.join(href) {
        Ok(url) => url.to_string(),
        Err(e) => {
            tracing::debug!("Keeping unresolvable link '{}': {}", href, e);
            href.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://scholar.google.com/citations?hl=en&user=ABC123").unwrap()
    }

    fn row(title: &str, authors: Option<&str>, year: &str) -> RawRow {
        RawRow {
            title: Some(RawTitle {
                text: title.to_string(),
                href: Some(format!(
                    "/citations?view_op=view_citation&citation_for_view=ABC123:{}",
                    title.len()
                )),
            }),
            authors: authors.map(str::to_string),
            year: Some(year.to_string()),
        }
    }

    #[test]
    fn test_extract_complete_row() {
        let raw = row("  Deep things \n", Some(" J Doe, A Smith "), " 2023 ");

        let record = extract_row(&raw, &base()).unwrap();

        assert_eq!(record.title, "Deep things");
        assert_eq!(record.authors, "J Doe, A Smith");
        assert_eq!(record.publication_date, "2023");
        assert_eq!(record.document_type, "Other");
        assert_eq!(
            record.link,
            "https://scholar.google.com/citations?view_op=view_citation&citation_for_view=ABC123:15"
        );
    }

    #[test]
    fn test_missing_authors_is_empty() {
        let record = extract_row(&row("Solo work", None, "2020"), &base()).unwrap();

        assert_eq!(record.authors, "");
        assert_eq!(record.title, "Solo work");
        assert_eq!(record.publication_date, "2020");
        assert!(!record.link.is_empty());
    }

    #[test]
    fn test_missing_title_fails_row() {
        let raw = RawRow {
            title: None,
            ..row("x", Some("A"), "2020")
        };

        assert_eq!(extract_row(&raw, &base()), Err(RowError::MissingTitle));
    }

    #[test]
    fn test_missing_year_fails_row() {
        let raw = RawRow {
            year: None,
            ..row("x", Some("A"), "2020")
        };

        assert_eq!(extract_row(&raw, &base()), Err(RowError::MissingDate));
    }

    #[test]
    fn test_empty_year_text_is_kept() {
        // The span exists but the page shows no year
        let record = extract_row(&row("Undated", None, ""), &base()).unwrap();
        assert_eq!(record.publication_date, "");
    }

    #[test]
    fn test_anchor_without_href_has_empty_link() {
        let mut raw = row("No link", None, "2021");
        raw.title.as_mut().unwrap().href = None;

        let record = extract_row(&raw, &base()).unwrap();
        assert_eq!(record.link, "");
    }

    #[test]
    fn test_absolute_href_is_kept() {
        let mut raw = row("Elsewhere", None, "2021");
        raw.title.as_mut().unwrap().href = Some("https://example.org/paper".to_string());

        let record = extract_row(&raw, &base()).unwrap();
        assert_eq!(record.link, "https://example.org/paper");
    }

    #[test]
    fn test_row_without_title_drops_exactly_one_record() {
        let complete = vec![
            row("First", Some("A"), "2024"),
            row("Second", Some("B"), "2023"),
            row("Third", Some("C"), "2022"),
        ];
        let mut broken = complete.clone();
        broken[1].title = None;

        let baseline = extract_all(&complete, &base());
        let records = extract_all(&broken, &base());

        assert_eq!(records.len(), baseline.len() - 1);
        assert!(records.iter().all(|r| !r.title.is_empty()));
        assert_eq!(records[0].title, "First");
        assert_eq!(records[1].title, "Third");
    }

    #[test]
    fn test_extract_all_preserves_order() {
        let rows: Vec<RawRow> = (0..8)
            .map(|i| row(&format!("Paper {}", i), None, &format!("{}", 2024 - i)))
            .collect();

        let titles: Vec<String> = extract_all(&rows, &base())
            .into_iter()
            .map(|r| r.title)
            .collect();

        let expected: Vec<String> = (0..8).map(|i| format!("Paper {}", i)).collect();
        assert_eq!(titles, expected);
    }

    #[test]
    fn test_raw_rows_deserialize_from_snapshot_json() {
        let json = r#"[
            {"title": {"text": "A", "href": "/citations?x=1"}, "authors": "Doe", "year": "2020"},
            {"title": null, "authors": null, "year": "2019"}
        ]"#;

        let rows: Vec<RawRow> = serde_json::from_str(json).unwrap();

        assert_eq!(rows.len(), 2);
        assert!(rows[1].title.is_none());
        assert_eq!(extract_all(&rows, &base()).len(), 1);
    }
}
