use crate::Result;
use async_trait::async_trait;

/// The operations the pagination loop needs from a rendered listing
#[async_trait]
pub trait ListingPage: Send + Sync {
    async fn scroll_to_bottom(&self) -> Result<()>;

    /// Click the "show more" control and wait for it to be replaced
    ///
    /// `Ok(false)` means the control could not be found, clicked, or did not
    /// go stale within the wait: there are no more pages.
    async fn load_more(&self) -> Result<bool>;

    async fn row_count(&self) -> Result<usize>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The control was gone, disabled, or never went stale
    ControlMissing,
    /// A click produced no new rows
    Stalled,
    /// `max_rounds` was reached
    RoundLimit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationSummary {
    pub rounds: usize,
    pub clicks: usize,
    /// Rows rendered once the loop stopped
    pub rows: usize,
    pub stop: StopReason,
}

/// Keep loading rows until the page runs out or stops growing
pub async fn exhaust_pagination<P>(page: &P, max_rounds: Option<usize>) -> Result<PaginationSummary>
where
    P: ListingPage + ?Sized,
{
    let mut count = 0;
    let mut rounds = 0;
    let mut clicks = 0;

    let stop = loop {
        if max_rounds.is_some_and(|max| rounds >= max) {
            tracing::warn!(
                "Pagination stopped after {} rounds with more rows still offered",
                rounds
            );
            break StopReason::RoundLimit;
        }
        rounds += 1;

        page.scroll_to_bottom().await?;

        if !page.load_more().await? {
            break StopReason::ControlMissing;
        }
        clicks += 1;

        let new_count = page.row_count().await?;
        tracing::debug!("Round {}: {} rows rendered", rounds, new_count);

        if new_count == count {
            break StopReason::Stalled;
        }
        count = new_count;
    };

    let rows = page.row_count().await?;

    tracing::info!(
        "Pagination finished after {} rounds ({} clicks, {} rows, {:?})",
        rounds,
        clicks,
        rows,
        stop
    );

    Ok(PaginationSummary {
        rounds,
        clicks,
        rows,
        stop,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Listing whose control adds `batches` rows, one batch per click, and
    /// disappears once the batches run out (unless `endless`).
    struct FakeListing {
        state: Mutex<FakeState>,
        endless: Option<usize>,
    }

    struct FakeState {
        rows: usize,
        batches: VecDeque<usize>,
        scrolls: usize,
        fail_count: bool,
    }

    impl FakeListing {
        fn new(rows: usize, batches: &[usize]) -> Self {
            Self {
                state: Mutex::new(FakeState {
                    rows,
                    batches: batches.iter().copied().collect(),
                    scrolls: 0,
                    fail_count: false,
                }),
                endless: None,
            }
        }

        fn endless(rows: usize, per_click: usize) -> Self {
            Self {
                endless: Some(per_click),
                ..Self::new(rows, &[])
            }
        }

        fn scrolls(&self) -> usize {
            self.state.lock().unwrap().scrolls
        }
    }

    #[async_trait]
    impl ListingPage for FakeListing {
        async fn scroll_to_bottom(&self) -> Result<()> {
            self.state.lock().unwrap().scrolls += 1;
            Ok(())
        }

        async fn load_more(&self) -> Result<bool> {
            let mut state = self.state.lock().unwrap();
            if let Some(per_click) = self.endless {
                state.rows += per_click;
                return Ok(true);
            }
            match state.batches.pop_front() {
                Some(added) => {
                    state.rows += added;
                    Ok(true)
                }
                None => Ok(false),
            }
        }

        async fn row_count(&self) -> Result<usize> {
            let state = self.state.lock().unwrap();
            if state.fail_count {
                return Err(Error::Cdp("connection closed".to_string()));
            }
            Ok(state.rows)
        }
    }

    #[tokio::test]
    async fn test_one_extra_page_then_control_disappears() {
        let page = FakeListing::new(3, &[2]);

        let summary = exhaust_pagination(&page, None).await.unwrap();

        assert_eq!(
            summary,
            PaginationSummary {
                rounds: 2,
                clicks: 1,
                rows: 5,
                stop: StopReason::ControlMissing,
            }
        );
        assert_eq!(page.scrolls(), 2);
    }

    #[tokio::test]
    async fn test_missing_control_on_first_round() {
        let page = FakeListing::new(20, &[]);

        let summary = exhaust_pagination(&page, None).await.unwrap();

        assert_eq!(summary.rounds, 1);
        assert_eq!(summary.clicks, 0);
        assert_eq!(summary.rows, 20);
        assert_eq!(summary.stop, StopReason::ControlMissing);
    }

    #[tokio::test]
    async fn test_stalled_control_terminates() {
        // Control stays clickable forever but never adds rows
        let page = FakeListing::endless(3, 0);

        let summary = exhaust_pagination(&page, None).await.unwrap();

        assert_eq!(summary.stop, StopReason::Stalled);
        assert_eq!(summary.rounds, 2);
        assert_eq!(summary.rows, 3);
    }

    #[tokio::test]
    async fn test_stall_after_several_pages() {
        let page = FakeListing::new(100, &[100, 100, 0, 100]);

        let summary = exhaust_pagination(&page, None).await.unwrap();

        assert_eq!(summary.stop, StopReason::Stalled);
        assert_eq!(summary.clicks, 3);
        assert_eq!(summary.rows, 300);
    }

    #[tokio::test]
    async fn test_round_limit_caps_growing_page() {
        let page = FakeListing::endless(1, 1);

        let summary = exhaust_pagination(&page, Some(4)).await.unwrap();

        assert_eq!(summary.stop, StopReason::RoundLimit);
        assert_eq!(summary.rounds, 4);
        assert_eq!(summary.clicks, 4);
        assert_eq!(summary.rows, 5);
    }

    #[tokio::test]
    async fn test_terminates_within_growth_rounds() {
        for pages in 0..10 {
            let batches = vec![10; pages];
            let page = FakeListing::new(10, &batches);

            let summary = exhaust_pagination(&page, None).await.unwrap();

            assert_eq!(summary.rounds, pages + 1);
            assert_eq!(summary.rows, 10 * (pages + 1));
        }
    }

    #[tokio::test]
    async fn test_row_count_failure_propagates() {
        let page = FakeListing::new(3, &[2]);
        page.state.lock().unwrap().fail_count = true;

        let result = exhaust_pagination(&page, None).await;

        assert!(matches!(result, Err(Error::Cdp(_))));
    }
}
