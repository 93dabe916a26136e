//! Browser session lifecycle.
//!
//! A [`Session`] owns the one live driver of a scenario. It is passed by
//! reference to every page, action and scenario; nothing in the crate keeps a
//! global browser handle.

use crate::driver::{ElementHandle, FrontdeskDriver, WindowHandle};
use crate::locator::Locator;
use crate::result::{FrontdeskError, FrontdeskResult};
use crate::wait::{WaitResult, Waiter, DEFAULT_POLL_INTERVAL_MS};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Default bound for the first window handle to appear (3 seconds)
pub const DEFAULT_WINDOW_TIMEOUT_MS: u64 = 3_000;

/// Default delay before the driver is released on quit (2 seconds)
pub const DEFAULT_QUIT_GRACE_MS: u64 = 2_000;

/// Session settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Bound for the first window handle after opening
    pub window_timeout: Duration,
    /// Delay before releasing the driver on quit
    pub quit_grace: Duration,
    /// Initial implicit wait for element lookups
    pub implicit_wait: Duration,
    /// Interval between readiness polls
    pub poll_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            window_timeout: Duration::from_millis(DEFAULT_WINDOW_TIMEOUT_MS),
            quit_grace: Duration::from_millis(DEFAULT_QUIT_GRACE_MS),
            implicit_wait: Duration::ZERO,
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
        }
    }
}

impl SessionConfig {
    /// Create a config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the window timeout
    #[must_use]
    pub const fn with_window_timeout(mut self, timeout: Duration) -> Self {
        self.window_timeout = timeout;
        self
    }

    /// Set the quit grace delay
    #[must_use]
    pub const fn with_quit_grace(mut self, grace: Duration) -> Self {
        self.quit_grace = grace;
        self
    }

    /// Set the initial implicit wait
    #[must_use]
    pub const fn with_implicit_wait(mut self, wait: Duration) -> Self {
        self.implicit_wait = wait;
        self
    }

    /// Set the poll interval
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}

/// The single live browser connection of a scenario
pub struct Session {
    driver: Option<Box<dyn FrontdeskDriver>>,
    config: SessionConfig,
    waiter: Waiter,
    implicit_wait_ms: AtomicU64,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("active", &self.is_active())
            .field("config", &self.config)
            .field("implicit_wait", &self.implicit_wait())
            .finish()
    }
}

impl Session {
    /// Open a session on `driver`.
    ///
    /// Maximizes the viewport, then waits (bounded by
    /// [`SessionConfig::window_timeout`]) for at least one window handle.
    /// When no window appears the driver is quit before
    /// [`FrontdeskError::SessionStartTimeout`] is returned.
    pub async fn open(
        driver: Box<dyn FrontdeskDriver>,
        config: SessionConfig,
    ) -> FrontdeskResult<Self> {
        let waiter = Waiter::new(config.poll_interval);

        if let Err(e) = driver.maximize().await {
            release(driver.as_ref()).await;
            return Err(e);
        }

        let handle = driver.as_ref();
        let ready = waiter
            .until("a browser window", config.window_timeout, || async move {
                Ok(!handle.window_handles().await?.is_empty())
            })
            .await;

        match ready {
            Ok(_) => {}
            Err(FrontdeskError::WaitTimeout { .. }) => {
                release(driver.as_ref()).await;
                return Err(FrontdeskError::SessionStartTimeout {
                    timeout_ms: config.window_timeout.as_millis() as u64,
                });
            }
            Err(e) => {
                release(driver.as_ref()).await;
                return Err(e);
            }
        }

        tracing::info!("browser session opened");
        Ok(Self {
            driver: Some(driver),
            config,
            waiter,
            implicit_wait_ms: AtomicU64::new(config.implicit_wait.as_millis() as u64),
        })
    }

    /// Release the session after the configured grace delay.
    ///
    /// Quitting a session that is already closed does nothing.
    pub async fn quit(&mut self) -> FrontdeskResult<()> {
        let Some(driver) = self.driver.take() else {
            tracing::debug!("quit on inactive session ignored");
            return Ok(());
        };
        if !self.config.quit_grace.is_zero() {
            tokio::time::sleep(self.config.quit_grace).await;
        }
        driver.quit().await?;
        tracing::info!("browser session closed");
        Ok(())
    }

    /// Whether the session still owns a driver
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.driver.is_some()
    }

    /// Session settings
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    fn driver(&self) -> FrontdeskResult<&dyn FrontdeskDriver> {
        self.driver.as_deref().ok_or(FrontdeskError::SessionNotActive)
    }

    /// Navigate the focused window
    pub async fn navigate(&self, url: &str) -> FrontdeskResult<()> {
        tracing::info!(url, "navigate");
        self.driver()?.navigate(url).await
    }

    // =========================================================================
    // Windows
    // =========================================================================

    /// Number of open windows
    pub async fn window_count(&self) -> FrontdeskResult<usize> {
        Ok(self.driver()?.window_handles().await?.len())
    }

    /// Focus the window at `index` in the current handle order
    pub async fn switch_to_window(&self, index: usize) -> FrontdeskResult<()> {
        let driver = self.driver()?;
        let handle = window_at(&driver.window_handles().await?, index)?;
        tracing::debug!(index, window = %handle, "switch window");
        driver.switch_to_window(&handle).await
    }

    /// Close the window at `index` and focus the one before it.
    ///
    /// Index 0 has no predecessor to focus and is rejected before anything is
    /// closed.
    pub async fn close_window(&self, index: usize) -> FrontdeskResult<()> {
        let driver = self.driver()?;
        let handles = driver.window_handles().await?;
        let handle = window_at(&handles, index)?;
        if index == 0 {
            return Err(FrontdeskError::WindowIndexOutOfRange {
                index,
                count: handles.len(),
            });
        }

        driver.switch_to_window(&handle).await?;
        driver.close_window().await?;
        tracing::debug!(index, window = %handle, "closed window");

        let remaining = driver.window_handles().await?;
        let previous = window_at(&remaining, index - 1)?;
        driver.switch_to_window(&previous).await
    }

    // =========================================================================
    // Waits
    // =========================================================================

    /// Poll `predicate` until it holds or `timeout` elapses
    pub async fn wait_until<F, Fut>(
        &self,
        description: &str,
        timeout: Duration,
        predicate: F,
    ) -> FrontdeskResult<WaitResult>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = FrontdeskResult<bool>>,
    {
        let _ = self.driver()?;
        self.waiter.until(description, timeout, predicate).await
    }

    /// Set how long element lookups poll for a first match
    pub fn set_implicit_wait(&self, wait: Duration) {
        tracing::debug!(wait_ms = wait.as_millis() as u64, "implicit wait set");
        self.implicit_wait_ms
            .store(wait.as_millis() as u64, Ordering::Relaxed);
    }

    /// Current implicit wait
    #[must_use]
    pub fn implicit_wait(&self) -> Duration {
        Duration::from_millis(self.implicit_wait_ms.load(Ordering::Relaxed))
    }

    // =========================================================================
    // Element resolution
    // =========================================================================

    /// Resolve `locator` to exactly one element.
    ///
    /// Polls up to the implicit wait for the locator's match to exist. The
    /// match is the first one in document order unless the locator selects a
    /// position with [`Locator::nth`].
    pub async fn find(&self, locator: &Locator) -> FrontdeskResult<ElementHandle> {
        let driver = self.driver()?;
        let position = locator.index().unwrap_or(0);
        let implicit_wait = self.implicit_wait();
        let start = Instant::now();

        loop {
            if let Some(handle) = driver
                .find_all(locator.selector())
                .await?
                .into_iter()
                .nth(position)
            {
                tracing::trace!(locator = %locator, "resolved");
                return Ok(handle);
            }

            let elapsed = start.elapsed();
            if elapsed >= implicit_wait {
                tracing::debug!(locator = %locator, "no match");
                return Err(FrontdeskError::ElementNotFound {
                    locator: locator.to_string(),
                });
            }
            tokio::time::sleep(self.waiter.poll_interval().min(implicit_wait - elapsed)).await;
        }
    }

    /// Resolve every element matching `locator`, in document order.
    ///
    /// Polls up to the implicit wait for at least one match; an empty list is
    /// a valid result.
    pub async fn find_all(&self, locator: &Locator) -> FrontdeskResult<Vec<ElementHandle>> {
        let driver = self.driver()?;
        let implicit_wait = self.implicit_wait();
        let start = Instant::now();

        loop {
            let found = driver.find_all(locator.selector()).await?;
            let elapsed = start.elapsed();
            if !found.is_empty() || elapsed >= implicit_wait {
                tracing::trace!(locator = %locator, count = found.len(), "resolved all");
                return Ok(found);
            }
            tokio::time::sleep(self.waiter.poll_interval().min(implicit_wait - elapsed)).await;
        }
    }

    /// Click element
    pub async fn click(&self, element: &ElementHandle) -> FrontdeskResult<()> {
        self.driver()?.click(element).await
    }

    /// Type into element
    pub async fn send_keys(&self, element: &ElementHandle, text: &str) -> FrontdeskResult<()> {
        self.driver()?.send_keys(element, text).await
    }

    /// Visible text of element
    pub async fn text(&self, element: &ElementHandle) -> FrontdeskResult<String> {
        self.driver()?.text(element).await
    }

    /// Whether element is displayed
    pub async fn is_displayed(&self, element: &ElementHandle) -> FrontdeskResult<bool> {
        self.driver()?.is_displayed(element).await
    }

    /// Hover element
    pub async fn hover(&self, element: &ElementHandle) -> FrontdeskResult<()> {
        self.driver()?.hover(element).await
    }
}

fn window_at(handles: &[WindowHandle], index: usize) -> FrontdeskResult<WindowHandle> {
    handles
        .get(index)
        .cloned()
        .ok_or(FrontdeskError::WindowIndexOutOfRange {
            index,
            count: handles.len(),
        })
}

async fn release(driver: &dyn FrontdeskDriver) {
    if let Err(e) = driver.quit().await {
        tracing::warn!(error = %e, "failed to release driver");
    }
}
