//! Chromium driver over the Chrome `DevTools` Protocol.
//!
//! [`BrowserConfig`] is always available so configuration can be validated
//! and printed without a browser. The driver itself is compiled with the
//! `browser` feature and uses chromiumoxide.

use crate::config::BrowserOptions;
use std::path::PathBuf;

/// Browser configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<PathBuf>,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        (&BrowserOptions::default()).into()
    }
}

impl From<&BrowserOptions> for BrowserConfig {
    fn from(options: &BrowserOptions) -> Self {
        Self {
            headless: options.headless,
            viewport_width: options.viewport_width,
            viewport_height: options.viewport_height,
            chromium_path: options.executable.clone(),
            sandbox: options.sandbox,
        }
    }
}

impl BrowserConfig {
    /// Set viewport dimensions
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set chromium path
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Disable sandbox (for containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }
}

#[cfg(feature = "browser")]
pub use cdp::{ChromiumDriver, ChromiumLauncher};

#[cfg(feature = "browser")]
mod cdp {
    use super::BrowserConfig;
    use crate::driver::{keys, ElementHandle, FrontdeskDriver, WindowHandle};
    use crate::harness::DriverLauncher;
    use crate::locator::Selector;
    use crate::result::{FrontdeskError, FrontdeskResult};
    use async_trait::async_trait;
    use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
    use chromiumoxide::cdp::browser_protocol::browser::{
        Bounds, GetWindowForTargetParams, SetWindowBoundsParams, WindowState,
    };
    use chromiumoxide::element::Element;
    use chromiumoxide::error::CdpError;
    use chromiumoxide::page::Page as CdpPage;
    use futures::StreamExt;
    use tokio::sync::Mutex;
    use tokio::task::JoinHandle;

    const IS_DISPLAYED_JS: &str = "function() {
        const rect = this.getBoundingClientRect();
        const style = window.getComputedStyle(this);
        return rect.width > 0 && rect.height > 0
            && style.visibility !== 'hidden' && style.display !== 'none';
    }";

    struct Windows {
        browser: CdpBrowser,
        /// Open pages in the order they were first seen
        pages: Vec<CdpPage>,
        current: Option<usize>,
    }

    impl Windows {
        fn id(page: &CdpPage) -> WindowHandle {
            WindowHandle::new(page.target_id().inner().clone())
        }

        /// Pick up windows opened by the application and drop closed ones
        async fn refresh(&mut self) -> FrontdeskResult<()> {
            let live = self
                .browser
                .pages()
                .await
                .map_err(|e| FrontdeskError::driver("window_handles", e))?;
            let focused = self
                .current
                .and_then(|i| self.pages.get(i))
                .map(Self::id);

            self.pages
                .retain(|p| live.iter().any(|l| l.target_id() == p.target_id()));
            for page in live {
                if !self.pages.iter().any(|p| p.target_id() == page.target_id()) {
                    self.pages.push(page);
                }
            }
            self.current =
                focused.and_then(|f| self.pages.iter().position(|p| Self::id(p) == f));
            Ok(())
        }

        fn focused(&self, operation: &str) -> FrontdeskResult<CdpPage> {
            self.current
                .and_then(|i| self.pages.get(i))
                .cloned()
                .ok_or_else(|| FrontdeskError::driver(operation, "no focused window"))
        }
    }

    /// [`FrontdeskDriver`] backed by a local Chromium
    pub struct ChromiumDriver {
        config: BrowserConfig,
        windows: Mutex<Windows>,
        handler: JoinHandle<()>,
    }

    impl std::fmt::Debug for ChromiumDriver {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("ChromiumDriver")
                .field("config", &self.config)
                .finish_non_exhaustive()
        }
    }

    impl ChromiumDriver {
        /// Launch Chromium and open a blank window
        pub async fn launch(config: BrowserConfig) -> FrontdeskResult<Self> {
            let mut builder = CdpConfig::builder()
                .window_size(config.viewport_width, config.viewport_height)
                .arg("--start-maximized");

            if !config.headless {
                builder = builder.with_head();
            }

            if !config.sandbox {
                builder = builder.no_sandbox();
            }

            if let Some(ref path) = config.chromium_path {
                builder = builder.chrome_executable(path);
            }

            let cdp_config = builder
                .build()
                .map_err(|message| FrontdeskError::BrowserLaunch { message })?;

            let (browser, mut handler) = CdpBrowser::launch(cdp_config).await.map_err(|e| {
                FrontdeskError::BrowserLaunch {
                    message: e.to_string(),
                }
            })?;

            let handler = tokio::spawn(async move {
                while let Some(event) = handler.next().await {
                    if event.is_err() {
                        break;
                    }
                }
            });

            let page = browser
                .new_page("about:blank")
                .await
                .map_err(|e| FrontdeskError::BrowserLaunch {
                    message: e.to_string(),
                })?;
            tracing::info!(headless = config.headless, "chromium launched");

            Ok(Self {
                config,
                windows: Mutex::new(Windows {
                    browser,
                    pages: vec![page],
                    current: Some(0),
                }),
                handler,
            })
        }

        /// Get the browser configuration
        #[must_use]
        pub const fn config(&self) -> &BrowserConfig {
            &self.config
        }

        async fn page(&self, operation: &str) -> FrontdeskResult<CdpPage> {
            self.windows.lock().await.focused(operation)
        }

        async fn query(page: &CdpPage, selector: &Selector) -> FrontdeskResult<Vec<Element>> {
            let found = match selector {
                Selector::XPath(expr) => page.find_xpaths(expr.as_str()).await,
                other => {
                    let css = other.to_css().unwrap_or_else(|| other.value().to_string());
                    page.find_elements(css).await
                }
            };
            match found {
                Ok(elements) => Ok(elements),
                Err(e) if is_no_match(&e) => {
                    tracing::trace!(selector = %selector, error = %e, "no match");
                    Ok(Vec::new())
                }
                Err(e) => Err(FrontdeskError::driver("find_all", e)),
            }
        }

        async fn element(&self, operation: &str, handle: &ElementHandle) -> FrontdeskResult<Element> {
            let page = self.page(operation).await?;
            Self::query(&page, &handle.selector)
                .await?
                .into_iter()
                .nth(handle.index)
                .ok_or_else(|| FrontdeskError::ElementNotFound {
                    locator: handle.to_string(),
                })
        }
    }

    /// Browser replies that mean "nothing matched right now": an empty xpath
    /// search or a document node replaced mid-navigation. Transport failures
    /// (closed target, dropped websocket, dead process) are not.
    pub(super) const fn is_no_match(error: &CdpError) -> bool {
        matches!(error, CdpError::NotFound | CdpError::Chrome(_))
    }

    impl Drop for ChromiumDriver {
        fn drop(&mut self) {
            self.handler.abort();
        }
    }

    #[async_trait]
    impl FrontdeskDriver for ChromiumDriver {
        async fn navigate(&self, url: &str) -> FrontdeskResult<()> {
            let page = self.page("navigate").await?;
            page.goto(url)
                .await
                .map_err(|e| FrontdeskError::driver("navigate", e))?;
            Ok(())
        }

        async fn find_all(&self, selector: &Selector) -> FrontdeskResult<Vec<ElementHandle>> {
            let page = self.page("find_all").await?;
            let count = Self::query(&page, selector).await?.len();
            Ok((0..count)
                .map(|index| ElementHandle::new(selector.clone(), index))
                .collect())
        }

        async fn click(&self, element: &ElementHandle) -> FrontdeskResult<()> {
            self.element("click", element)
                .await?
                .click()
                .await
                .map_err(|e| FrontdeskError::driver("click", e))?;
            Ok(())
        }

        async fn send_keys(&self, element: &ElementHandle, text: &str) -> FrontdeskResult<()> {
            let target = self.element("send_keys", element).await?;
            let mut segments = text.split(keys::ENTER).peekable();
            while let Some(segment) = segments.next() {
                if !segment.is_empty() {
                    target
                        .type_str(segment)
                        .await
                        .map_err(|e| FrontdeskError::driver("send_keys", e))?;
                }
                if segments.peek().is_some() {
                    target
                        .press_key("Enter")
                        .await
                        .map_err(|e| FrontdeskError::driver("send_keys", e))?;
                }
            }
            Ok(())
        }

        async fn text(&self, element: &ElementHandle) -> FrontdeskResult<String> {
            let text = self
                .element("text", element)
                .await?
                .inner_text()
                .await
                .map_err(|e| FrontdeskError::driver("text", e))?;
            Ok(text.unwrap_or_default())
        }

        async fn is_displayed(&self, element: &ElementHandle) -> FrontdeskResult<bool> {
            let returns = self
                .element("is_displayed", element)
                .await?
                .call_js_fn(IS_DISPLAYED_JS, false)
                .await
                .map_err(|e| FrontdeskError::driver("is_displayed", e))?;
            Ok(returns
                .result
                .value
                .and_then(|v| v.as_bool())
                .unwrap_or(false))
        }

        async fn hover(&self, element: &ElementHandle) -> FrontdeskResult<()> {
            self.element("hover", element)
                .await?
                .hover()
                .await
                .map_err(|e| FrontdeskError::driver("hover", e))?;
            Ok(())
        }

        async fn window_handles(&self) -> FrontdeskResult<Vec<WindowHandle>> {
            let mut windows = self.windows.lock().await;
            windows.refresh().await?;
            Ok(windows.pages.iter().map(Windows::id).collect())
        }

        async fn switch_to_window(&self, handle: &WindowHandle) -> FrontdeskResult<()> {
            let mut windows = self.windows.lock().await;
            windows.refresh().await?;
            let index = windows
                .pages
                .iter()
                .position(|p| Windows::id(p) == *handle)
                .ok_or_else(|| {
                    FrontdeskError::driver("switch_to_window", format!("no window {handle}"))
                })?;
            windows.pages[index]
                .bring_to_front()
                .await
                .map_err(|e| FrontdeskError::driver("switch_to_window", e))?;
            windows.current = Some(index);
            Ok(())
        }

        async fn close_window(&self) -> FrontdeskResult<()> {
            let mut windows = self.windows.lock().await;
            let page = windows.focused("close_window")?;
            if let Some(index) = windows.current.take() {
                let _ = windows.pages.remove(index);
            }
            page.close()
                .await
                .map_err(|e| FrontdeskError::driver("close_window", e))
        }

        async fn maximize(&self) -> FrontdeskResult<()> {
            if self.config.headless {
                tracing::debug!("headless window keeps its configured size");
                return Ok(());
            }
            let page = self.page("maximize").await?;
            let window = page
                .execute(GetWindowForTargetParams {
                    target_id: Some(page.target_id().clone()),
                })
                .await
                .map_err(|e| FrontdeskError::driver("maximize", e))?;
            let bounds = Bounds {
                window_state: Some(WindowState::Maximized),
                ..Bounds::default()
            };
            page.execute(SetWindowBoundsParams::new(window.result.window_id, bounds))
                .await
                .map_err(|e| FrontdeskError::driver("maximize", e))?;
            Ok(())
        }

        async fn quit(&self) -> FrontdeskResult<()> {
            let mut windows = self.windows.lock().await;
            windows.pages.clear();
            windows.current = None;
            windows
                .browser
                .close()
                .await
                .map_err(|e| FrontdeskError::driver("quit", e))?;
            if let Err(e) = windows.browser.wait().await {
                tracing::warn!(error = %e, "failed to reap chromium process");
            }
            Ok(())
        }
    }

    /// Launches a fresh [`ChromiumDriver`] per session
    #[derive(Debug, Clone, Default)]
    pub struct ChromiumLauncher {
        config: BrowserConfig,
    }

    impl ChromiumLauncher {
        /// Create with the default locators
        #[must_use]
        pub const fn new(config: BrowserConfig) -> Self {
            Self { config }
        }
    }

    #[async_trait]
    impl DriverLauncher for ChromiumLauncher {
        async fn launch(&self) -> FrontdeskResult<Box<dyn FrontdeskDriver>> {
            Ok(Box::new(ChromiumDriver::launch(self.config.clone()).await?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_options() {
        let config = BrowserConfig::default();
        assert!(config.headless);
        assert!(config.sandbox);
        assert_eq!((config.viewport_width, config.viewport_height), (1920, 1080));
        assert!(config.chromium_path.is_none());
    }

    #[test]
    fn test_builder() {
        let config = BrowserConfig::default()
            .with_headless(false)
            .with_viewport(1280, 720)
            .with_no_sandbox()
            .with_chromium_path("/usr/bin/chromium");
        assert!(!config.headless);
        assert!(!config.sandbox);
        assert_eq!(config.viewport_width, 1280);
        assert_eq!(config.chromium_path, Some(PathBuf::from("/usr/bin/chromium")));
    }

    #[test]
    fn test_from_options() {
        let options = BrowserOptions {
            headless: false,
            sandbox: false,
            ..BrowserOptions::default()
        };
        let config = BrowserConfig::from(&options);
        assert!(!config.headless);
        assert!(!config.sandbox);
    }

    #[cfg(feature = "browser")]
    mod lookup_error_tests {
        use crate::browser::cdp::is_no_match;
        use chromiumoxide::error::CdpError;

        #[test]
        fn test_not_found_is_empty_match() {
            assert!(is_no_match(&CdpError::NotFound));
        }

        #[test]
        fn test_transport_failures_propagate() {
            assert!(!is_no_match(&CdpError::NoResponse));
            assert!(!is_no_match(&CdpError::Io(std::io::Error::from(
                std::io::ErrorKind::BrokenPipe
            ))));
        }
    }
}
