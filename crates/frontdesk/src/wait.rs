//! Wait Mechanisms
//!
//! Condition-based synchronization for asynchronously rendered UI state.
//! A wait polls a predicate at a flat interval until it is true or the
//! timeout elapses. There is no backoff and no background task: the caller's
//! task sleeps between evaluations.

use crate::result::{FrontdeskError, FrontdeskResult};
use std::future::Future;
use std::time::{Duration, Instant};

// =============================================================================
// CONSTANTS
// =============================================================================

/// Default timeout for wait operations (5 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 5_000;

/// Default polling interval (100ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

// =============================================================================
// WAIT OPTIONS
// =============================================================================

/// Options for wait operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitOptions {
    /// Create new wait options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set polling interval in milliseconds
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Get timeout as Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get poll interval as Duration
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

// =============================================================================
// WAIT RESULT
// =============================================================================

/// Result of a successful wait
#[derive(Debug, Clone)]
pub struct WaitResult {
    /// Time spent waiting
    pub elapsed: Duration,
    /// Number of predicate evaluations
    pub polls: u32,
    /// Description of what was waited for
    pub waited_for: String,
}

// =============================================================================
// WAITER IMPLEMENTATION
// =============================================================================

/// Flat-interval poller
#[derive(Debug, Clone, Copy)]
pub struct Waiter {
    poll_interval: Duration,
}

impl Default for Waiter {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_POLL_INTERVAL_MS))
    }
}

impl Waiter {
    /// Create a waiter polling at `poll_interval`
    #[must_use]
    pub const fn new(poll_interval: Duration) -> Self {
        Self { poll_interval }
    }

    /// Create from wait options (the timeout is supplied per call)
    #[must_use]
    pub const fn from_options(options: &WaitOptions) -> Self {
        Self::new(options.poll_interval())
    }

    /// Interval between predicate evaluations
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Poll `predicate` until it returns `true` or `timeout` elapses.
    ///
    /// The predicate is evaluated at least once, even with a zero timeout.
    /// Errors for which [`FrontdeskError::is_not_ready`] holds count as
    /// `false`; any other error aborts the wait. The total time spent never
    /// exceeds `timeout` plus one poll interval: an evaluation still running
    /// at that deadline is abandoned and the wait times out.
    pub async fn until<F, Fut>(
        &self,
        description: &str,
        timeout: Duration,
        mut predicate: F,
    ) -> FrontdeskResult<WaitResult>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = FrontdeskResult<bool>>,
    {
        let start = Instant::now();
        let mut polls = 0u32;

        loop {
            polls += 1;
            let budget = timeout.saturating_sub(start.elapsed()) + self.poll_interval;
            let Ok(outcome) = tokio::time::timeout(budget, predicate()).await else {
                tracing::debug!(waited_for = description, polls, "evaluation overran the wait");
                return Err(Self::timed_out(description, start, timeout));
            };
            match outcome {
                Ok(true) => {
                    let elapsed = start.elapsed();
                    tracing::debug!(
                        waited_for = description,
                        elapsed_ms = elapsed.as_millis() as u64,
                        polls,
                        "wait satisfied"
                    );
                    return Ok(WaitResult {
                        elapsed,
                        polls,
                        waited_for: description.to_string(),
                    });
                }
                Ok(false) => {}
                Err(e) if e.is_not_ready() => {
                    tracing::trace!(waited_for = description, error = %e, "not ready yet");
                }
                Err(e) => return Err(e),
            }

            let elapsed = start.elapsed();
            if elapsed >= timeout {
                return Err(Self::timed_out(description, start, timeout));
            }
            tokio::time::sleep(self.poll_interval.min(timeout - elapsed)).await;
        }
    }

    fn timed_out(description: &str, start: Instant, timeout: Duration) -> FrontdeskError {
        FrontdeskError::WaitTimeout {
            description: description.to_string(),
            elapsed_ms: start.elapsed().as_millis() as u64,
            timeout_ms: timeout.as_millis() as u64,
        }
    }

    /// Poll with a full set of wait options
    pub async fn wait_for<F, Fut>(
        description: &str,
        options: &WaitOptions,
        predicate: F,
    ) -> FrontdeskResult<WaitResult>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = FrontdeskResult<bool>>,
    {
        Self::from_options(options)
            .until(description, options.timeout(), predicate)
            .await
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    mod wait_options_tests {
        use super::*;

        #[test]
        fn test_wait_options_default() {
            let opts = WaitOptions::default();
            assert_eq!(opts.timeout_ms, DEFAULT_WAIT_TIMEOUT_MS);
            assert_eq!(opts.poll_interval_ms, DEFAULT_POLL_INTERVAL_MS);
        }

        #[test]
        fn test_wait_options_builder() {
            let opts = WaitOptions::new().with_timeout(250).with_poll_interval(10);
            assert_eq!(opts.timeout(), Duration::from_millis(250));
            assert_eq!(opts.poll_interval(), Duration::from_millis(10));
        }
    }

    mod waiter_tests {
        use super::*;

        #[tokio::test]
        async fn test_returns_immediately_when_true() {
            let waiter = Waiter::new(Duration::from_millis(200));
            let start = Instant::now();
            let result = waiter
                .until("always", Duration::from_secs(5), || async { Ok(true) })
                .await
                .unwrap();
            assert_eq!(result.polls, 1);
            assert!(start.elapsed() < Duration::from_millis(150));
            assert_eq!(result.waited_for, "always");
        }

        #[tokio::test]
        async fn test_succeeds_after_some_polls() {
            let waiter = Waiter::new(Duration::from_millis(5));
            let calls = AtomicU32::new(0);
            let result = waiter
                .until("third time", Duration::from_secs(2), || {
                    let n = calls.fetch_add(1, Ordering::SeqCst);
                    async move { Ok(n >= 2) }
                })
                .await
                .unwrap();
            assert_eq!(result.polls, 3);
        }

        #[tokio::test]
        async fn test_timeout_is_bounded() {
            let poll = Duration::from_millis(20);
            let timeout = Duration::from_millis(120);
            let waiter = Waiter::new(poll);
            let start = Instant::now();
            let err = waiter
                .until("never", timeout, || async { Ok(false) })
                .await
                .unwrap_err();
            let spent = start.elapsed();

            assert!(spent >= timeout);
            assert!(spent < timeout + poll + Duration::from_millis(100));
            match err {
                FrontdeskError::WaitTimeout {
                    description,
                    elapsed_ms,
                    timeout_ms,
                } => {
                    assert_eq!(description, "never");
                    assert_eq!(timeout_ms, 120);
                    assert!(elapsed_ms >= 120);
                }
                other => panic!("unexpected error: {other}"),
            }
        }

        #[tokio::test]
        async fn test_zero_timeout_evaluates_once() {
            let waiter = Waiter::default();
            let calls = AtomicU32::new(0);
            let err = waiter
                .until("once", Duration::ZERO, || {
                    calls.fetch_add(1, Ordering::SeqCst);
                    async { Ok(false) }
                })
                .await
                .unwrap_err();
            assert_eq!(calls.load(Ordering::SeqCst), 1);
            assert_eq!(err.kind(), "WaitTimeout");
        }

        #[tokio::test]
        async fn test_missing_element_counts_as_not_ready() {
            let waiter = Waiter::new(Duration::from_millis(5));
            let calls = AtomicU32::new(0);
            let result = waiter
                .until("rendered", Duration::from_secs(1), || {
                    let n = calls.fetch_add(1, Ordering::SeqCst);
                    async move {
                        if n < 2 {
                            Err(FrontdeskError::ElementNotFound {
                                locator: "later button".to_string(),
                            })
                        } else {
                            Ok(true)
                        }
                    }
                })
                .await
                .unwrap();
            assert_eq!(result.polls, 3);
        }

        #[tokio::test]
        async fn test_other_errors_abort() {
            let waiter = Waiter::new(Duration::from_millis(5));
            let err = waiter
                .until("session", Duration::from_secs(1), || async {
                    Err(FrontdeskError::SessionNotActive)
                })
                .await
                .unwrap_err();
            assert!(matches!(err, FrontdeskError::SessionNotActive));
        }

        #[tokio::test]
        async fn test_slow_evaluation_cut_at_deadline() {
            let poll = Duration::from_millis(20);
            let timeout = Duration::from_millis(100);
            let waiter = Waiter::new(poll);
            let start = Instant::now();
            let err = waiter
                .until("slow lookup", timeout, || async {
                    tokio::time::sleep(Duration::from_secs(2)).await;
                    Ok(true)
                })
                .await
                .unwrap_err();
            let spent = start.elapsed();

            assert_eq!(err.kind(), "WaitTimeout");
            assert!(spent < timeout + poll + Duration::from_millis(60), "spent {spent:?}");
        }

        #[tokio::test]
        async fn test_wait_for_with_options() {
            let opts = WaitOptions::new().with_timeout(50).with_poll_interval(5);
            let err = Waiter::wait_for("never", &opts, || async { Ok(false) })
                .await
                .unwrap_err();
            assert!(matches!(err, FrontdeskError::WaitTimeout { timeout_ms: 50, .. }));
        }
    }
}
