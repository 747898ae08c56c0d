use crate::wait::WaitPolicy;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://scholar.google.com";

/// Pagination rounds allowed before giving up on a page that keeps offering
/// more rows
pub const DEFAULT_MAX_ROUNDS: usize = 500;

pub const DEFAULT_LAUNCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for one [`Scraper`](crate::Scraper)
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Browser binary; located automatically when `None`
    pub chrome_path: Option<PathBuf>,
    /// Bounded wait for element queries
    pub wait: WaitPolicy,
    /// Upper bound on browser start-up; exceeding it fails the run
    pub launch_timeout: Duration,
    /// `None` leaves pagination bounded only by the stall guard
    pub max_rounds: Option<usize>,
    pub base_url: String,
    pub window_size: (u32, u32),
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            chrome_path: None,
            wait: WaitPolicy::default(),
            launch_timeout: DEFAULT_LAUNCH_TIMEOUT,
            max_rounds: Some(DEFAULT_MAX_ROUNDS),
            base_url: DEFAULT_BASE_URL.to_string(),
            window_size: (1920, 1080),
        }
    }
}

impl ScraperConfig {
    /// Publication-list URL for a profile identifier, newest first
    ///
    /// The identifier is interpolated as-is.
    pub fn profile_url(&self, identifier: &str) -> String {
        format!(
            "{}/citations?hl=en&user={}&view_op=list_works&sortby=pubdate",
            self.base_url.trim_end_matches('/'),
            identifier
        )
    }
}
