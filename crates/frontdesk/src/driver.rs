//! FrontdeskDriver - Abstract Browser Automation Trait
//!
//! The test suite consumes the browser through a deliberately narrow
//! capability set: navigate, find elements, click, type, read text, check
//! visibility, hover, and manage windows. Anything that can provide those
//! (Chromium over CDP, the in-memory [`MockDriver`](crate::MockDriver)) can
//! run every page, action and scenario unchanged.

use crate::locator::Selector;
use crate::result::FrontdeskResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Key codes that can be embedded in text passed to
/// [`FrontdeskDriver::send_keys`].
pub mod keys {
    /// The Enter key (WebDriver key code point)
    pub const ENTER: char = '\u{E007}';
}

/// Reference to an element resolved from a selector.
///
/// The handle records which selector produced it and the element's position
/// in document order at resolution time. It is meant to be used immediately
/// by the action that resolved it, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementHandle {
    /// Selector the element was resolved from
    pub selector: Selector,
    /// Position among the selector's matches
    pub index: usize,
}

impl ElementHandle {
    /// Create a new element handle
    #[must_use]
    pub const fn new(selector: Selector, index: usize) -> Self {
        Self { selector, index }
    }
}

impl fmt::Display for ElementHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.selector, self.index)
    }
}

/// Opaque identifier of a browser window (tab)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowHandle(pub String);

impl WindowHandle {
    /// Create a window handle
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier as a string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Abstract driver trait for browser automation
///
/// # Implementations
///
/// - `ChromiumDriver` - uses chromiumoxide (feature `browser`)
/// - `MockDriver` - scriptable in-memory page for unit and scenario tests
#[async_trait]
pub trait FrontdeskDriver: Send + Sync {
    /// Navigate the focused window to URL
    async fn navigate(&self, url: &str) -> FrontdeskResult<()>;

    /// All elements currently matching `selector`, in document order
    async fn find_all(&self, selector: &Selector) -> FrontdeskResult<Vec<ElementHandle>>;

    /// Click element
    async fn click(&self, element: &ElementHandle) -> FrontdeskResult<()>;

    /// Type text into element; [`keys::ENTER`] presses Enter
    async fn send_keys(&self, element: &ElementHandle, text: &str) -> FrontdeskResult<()>;

    /// Visible text of element
    async fn text(&self, element: &ElementHandle) -> FrontdeskResult<String>;

    /// Whether element is rendered and visible
    async fn is_displayed(&self, element: &ElementHandle) -> FrontdeskResult<bool>;

    /// Move the pointer over element
    async fn hover(&self, element: &ElementHandle) -> FrontdeskResult<()>;

    /// Handles of all open windows, in driver order
    async fn window_handles(&self) -> FrontdeskResult<Vec<WindowHandle>>;

    /// Focus the given window
    async fn switch_to_window(&self, handle: &WindowHandle) -> FrontdeskResult<()>;

    /// Close the focused window
    async fn close_window(&self) -> FrontdeskResult<()>;

    /// Maximize the focused window
    async fn maximize(&self) -> FrontdeskResult<()>;

    /// End the browser session
    async fn quit(&self) -> FrontdeskResult<()>;
}
