use crate::config::ScraperConfig;
use crate::locator::BrowserLocator;
use crate::page::ProfilePage;
use crate::profile::ProfileDir;
use crate::wait::WaitPolicy;
use crate::{Error, Result};
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;

/// Time allowed for a single CDP request, page loads included
const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// One headless browser process, owned by a single scrape
///
/// Call [`BrowserSession::close`] on every path. Dropping an open session
/// still kills the process, but skips the orderly shutdown.
pub struct BrowserSession {
    browser: Option<Browser>,
    handler: Option<JoinHandle<()>>,
    page: Option<Page>,
    profile: ProfileDir,
}

impl BrowserSession {
    /// Launch headless Chrome with a fresh profile
    pub async fn open(config: &ScraperConfig) -> Result<Self> {
        let chrome = BrowserLocator::new(config.chrome_path.clone()).find()?;
        let profile = ProfileDir::create()?;
        let profile_path = profile
            .path()
            .ok_or_else(|| Error::Launch("profile directory missing".to_string()))?
            .to_path_buf();

        let (width, height) = config.window_size;
        let browser_config = BrowserConfig::builder()
            .chrome_executable(&chrome)
            .user_data_dir(profile_path)
            .no_sandbox()
            .arg("--disable-dev-shm-usage")
            .window_size(width, height)
            .request_timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(Error::Launch)?;

        tracing::info!("Launching headless browser: {}", chrome.display());

        // Exceeding the launch wait is fatal; the profile is removed on drop
        let launch = WaitPolicy::new(config.launch_timeout);
        let outcome = launch.bounded(Browser::launch(browser_config)).await;
        let (browser, mut handler) = launch
            .required(outcome, "browser launch")?
            .map_err(|e| Error::Launch(e.to_string()))?;

        // The handler must be polled for any CDP command to complete
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("CDP handler event error (continuing): {}", e);
                }
            }
        });

        let mut session = Self {
            browser: Some(browser),
            handler: Some(handler),
            page: None,
            profile,
        };

        match session.new_page().await {
            Ok(page) => {
                session.page = Some(page);
                tracing::debug!("Browser session open");
                Ok(session)
            }
            Err(e) => {
                session.close().await;
                Err(e)
            }
        }
    }

    async fn new_page(&self) -> Result<Page> {
        let browser = self
            .browser
            .as_ref()
            .ok_or_else(|| Error::Browser("browser session is closed".to_string()))?;

        browser
            .new_page("about:blank")
            .await
            .map_err(|e| Error::Launch(format!("could not open a tab: {}", e)))
    }

    /// Load `url` and wait for the first publication row
    pub async fn navigate(&self, url: &str, wait: WaitPolicy) -> Result<ProfilePage> {
        let page = self
            .page
            .as_ref()
            .ok_or_else(|| Error::Browser("browser session is closed".to_string()))?;

        tracing::info!("Loading {}", url);
        page.goto(url).await.map_err(|e| Error::Navigation {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let profile_page = ProfilePage::new(page.clone(), wait);
        if !profile_page.await_rows().await {
            tracing::warn!("No publication rows rendered at {}", url);
        }

        Ok(profile_page)
    }

    /// Shut the browser down and delete its profile
    ///
    /// Never fails; problems are logged. Calling it again is a no-op.
    pub async fn close(&mut self) {
        self.page = None;

        if let Some(mut browser) = self.browser.take() {
            if let Err(e) = browser.close().await {
                tracing::warn!("Browser did not close cleanly: {}", e);
            }
            if let Err(e) = browser.wait().await {
                tracing::warn!("Failed waiting for browser exit: {}", e);
            }
            tracing::debug!("Browser session closed");
        }

        if let Some(handler) = self.handler.take() {
            handler.abort();
        }

        self.profile.remove();
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        if let Some(handler) = self.handler.take() {
            handler.abort();
        }
        if self.browser.is_some() {
            // Browser's own Drop kills the child process
            tracing::warn!("Browser session dropped without close()");
        }
    }
}
