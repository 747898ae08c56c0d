use crate::config::ScraperConfig;
use crate::extract::extract_all;
use crate::pagination::{PaginationSummary, exhaust_pagination};
use crate::session::BrowserSession;
use crate::{Error, Result};
use scholarly_core::PublicationRecord;
use url::Url;

/// Everything one scrape produced
#[derive(Debug, Clone)]
pub struct ScrapeReport {
    pub url: String,
    pub records: Vec<PublicationRecord>,
    pub pagination: PaginationSummary,
    /// Rows that failed extraction and were left out
    pub dropped_rows: usize,
}

/// Scrapes the full publication list of one profile per call
pub struct Scraper {
    config: ScraperConfig,
}

impl Scraper {
    pub fn new(config: ScraperConfig) -> Self {
        Self { config }
    }

    /// Scrape `identifier` and return its records in page order
    pub async fn run(&self, identifier: &str) -> Result<Vec<PublicationRecord>> {
        Ok(self.run_report(identifier).await?.records)
    }

    /// Like [`Scraper::run`], with pagination details
    ///
    /// A new browser session is opened for the call and closed before it
    /// returns, whether the scrape succeeded or not.
    pub async fn run_report(&self, identifier: &str) -> Result<ScrapeReport> {
        let mut session = BrowserSession::open(&self.config).await?;
        let result = self.scrape(&session, identifier).await;
        session.close().await;
        result
    }

    async fn scrape(&self, session: &BrowserSession, identifier: &str) -> Result<ScrapeReport> {
        let url = self.config.profile_url(identifier);
        let page = session.navigate(&url, self.config.wait).await?;

        let pagination = exhaust_pagination(&page, self.config.max_rounds).await?;

        let rows = page.snapshot_rows().await?;
        let base = page_base(page.url().await?.as_deref(), &url)?;
        let records = extract_all(&rows, &base);

        tracing::info!("Extracted {} publications for {}", records.len(), identifier);

        Ok(ScrapeReport {
            dropped_rows: rows.len() - records.len(),
            url,
            records,
            pagination,
        })
    }
}

/// URL that relative row links resolve against
fn page_base(current: Option<&str>, requested: &str) -> Result<Url> {
    if let Some(url) = current
        .and_then(|u| Url::parse(u).ok())
        .filter(|u| !u.cannot_be_a_base())
    {
        return Ok(url);
    }

    Url::parse(requested).map_err(|e| Error::Navigation {
        url: requested.to_string(),
        message: e.to_string(),
    })
}
