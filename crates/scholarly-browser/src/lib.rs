//! Headless scraping of a profile's public publication list

pub mod config;
mod error;
pub mod extract;
mod locator;
pub mod page;
pub mod pagination;
mod profile;
mod scraper;
mod session;
pub mod wait;

pub use config::ScraperConfig;
pub use error::{Error, Result};
pub use extract::{RawRow, RawTitle, RowError, extract_all, extract_row};
pub use locator::{BrowserLocator, CHROME_PATH_ENV};
pub use page::ProfilePage;
pub use pagination::{ListingPage, PaginationSummary, StopReason, exhaust_pagination};
pub use profile::ProfileDir;
pub use scraper::{ScrapeReport, Scraper};
pub use session::BrowserSession;
pub use wait::WaitPolicy;
