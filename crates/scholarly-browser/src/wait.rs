//! Bounded waits
//!
//! Both primitives report a timeout as `None`. Whether that is the normal
//! end of a loop or a failure is decided at the call site; fatal sites go
//! through [`WaitPolicy::required`].

use crate::{Error, Result};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    pub timeout: Duration,
    pub interval: Duration,
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl WaitPolicy {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            interval: DEFAULT_INTERVAL,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Poll `probe` until it yields a value or the timeout elapses
    ///
    /// The probe always runs at least once, even with a zero timeout. A
    /// timeout too large to represent as a deadline never elapses.
    pub async fn until<T, F, Fut>(&self, mut probe: F) -> Option<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Option<T>>,
    {
        let deadline = Instant::now().checked_add(self.timeout);

        loop {
            if let Some(value) = probe().await {
                return Some(value);
            }

            let pause = match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return None;
                    }
                    self.interval.min(deadline - now)
                }
                None => self.interval,
            };

            tokio::time::sleep(pause).await;
        }
    }

    /// Run a single future, giving up after the timeout
    pub async fn bounded<F: Future>(&self, fut: F) -> Option<F::Output> {
        tokio::time::timeout(self.timeout, fut).await.ok()
    }

    /// Turn a timed-out wait into [`Error::Timeout`]
    pub fn required<T>(&self, outcome: Option<T>, what: &str) -> Result<T> {
        outcome.ok_or_else(|| {
            Error::Timeout(format!(
                "{} not ready after {:.1}s",
                what,
                self.timeout.as_secs_f64()
            ))
        })
    }
}
