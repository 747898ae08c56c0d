use crate::extract::RawRow;
use crate::pagination::ListingPage;
use crate::wait::WaitPolicy;
use crate::{Error, Result};
use async_trait::async_trait;
use chromiumoxide::cdp::js_protocol::runtime::EvaluateParams;
use chromiumoxide::element::Element;
use chromiumoxide::page::Page;

pub const ROW_SELECTOR: &str = "tr.gsc_a_tr";
pub const LOAD_MORE_SELECTOR: &str = "#gsc_bpf_more";

const SCROLL_TO_BOTTOM: &str = "window.scrollTo(0, document.body.scrollHeight);";

/// Visible, enabled and not covered by `pointer-events: none`
const IS_CLICKABLE: &str = r#"function() {
    const style = window.getComputedStyle(this);
    return !this.disabled
        && this.getClientRects().length > 0
        && style.visibility !== 'hidden'
        && style.pointerEvents !== 'none';
}"#;

const IS_DETACHED: &str = "function() { return !this.isConnected; }";

/// Captures each row's title anchor, first grey line and year span.
/// Field names match [`RawRow`].
const SNAPSHOT_ROWS: &str = r#"Array.from(document.querySelectorAll('tr.gsc_a_tr')).map(row => {
    const anchor = row.querySelector('td.gsc_a_t a');
    const gray = row.querySelector('td.gsc_a_t div.gs_gray');
    const year = row.querySelector('td.gsc_a_y span');
    return {
        title: anchor ? { text: anchor.innerText, href: anchor.getAttribute('href') } : null,
        authors: gray ? gray.innerText : null,
        year: year ? year.innerText : null,
    };
})"#;

/// A loaded publication-list view
pub struct ProfilePage {
    page: Page,
    wait: WaitPolicy,
}

impl ProfilePage {
    pub(crate) fn new(page: Page, wait: WaitPolicy) -> Self {
        Self { page, wait }
    }

    /// Wait for the first row to render; an empty list is not an error
    pub(crate) async fn await_rows(&self) -> bool {
        self.wait
            .until(|| async { self.page.find_element(ROW_SELECTOR).await.ok() })
            .await
            .is_some()
    }

    pub async fn url(&self) -> Result<Option<String>> {
        Ok(self.page.url().await?)
    }

    /// Capture every rendered row in document order
    pub async fn snapshot_rows(&self) -> Result<Vec<RawRow>> {
        let params = EvaluateParams::builder()
            .expression(SNAPSHOT_ROWS)
            .return_by_value(true)
            .build()
            .map_err(Error::Cdp)?;

        let rows: Vec<RawRow> = self
            .page
            .evaluate_expression(params)
            .await?
            .into_value()
            .map_err(|e| Error::Cdp(format!("Unexpected row snapshot: {}", e)))?;

        tracing::debug!("Captured {} publication rows", rows.len());
        Ok(rows)
    }

    async fn clickable_control(&self) -> Option<Element> {
        let control = self.page.find_element(LOAD_MORE_SELECTOR).await.ok()?;
        let clickable = control
            .call_js_fn(IS_CLICKABLE, false)
            .await
            .ok()?
            .result
            .value
            .and_then(|v| v.as_bool())
            .unwrap_or(false);

        clickable.then_some(control)
    }
}

/// `Some` once the element is detached or can no longer be resolved
async fn stale(element: &Element) -> Option<()> {
    match element.call_js_fn(IS_DETACHED, false).await {
        Ok(ret) => ret
            .result
            .value
            .and_then(|v| v.as_bool())
            .filter(|detached| *detached)
            .map(|_| ()),
        Err(_) => Some(()),
    }
}

#[async_trait]
impl ListingPage for ProfilePage {
    async fn scroll_to_bottom(&self) -> Result<()> {
        self.page.evaluate(SCROLL_TO_BOTTOM).await?;
        Ok(())
    }

    async fn load_more(&self) -> Result<bool> {
        let Some(control) = self.wait.until(|| self.clickable_control()).await else {
            tracing::debug!("Load-more control not clickable, no more pages");
            return Ok(false);
        };

        if let Err(e) = control.click().await {
            tracing::debug!("Load-more click failed, no more pages: {}", e);
            return Ok(false);
        }

        if self.wait.until(|| stale(&control)).await.is_none() {
            tracing::debug!("Load-more control never went stale, no more pages");
            return Ok(false);
        }

        Ok(true)
    }

    async fn row_count(&self) -> Result<usize> {
        Ok(self.page.find_elements(ROW_SELECTOR).await?.len())
    }
}
