//! Scriptable in-memory driver.
//!
//! [`MockDriver`] keeps a tiny "DOM": for every selector, the ordered list of
//! elements that currently match it. Tests script the application under test
//! by registering reactions that mutate that DOM when an element is clicked,
//! hovered or typed into. Clones share the same state, so a test can keep one
//! clone for inspection after handing another to a [`Session`](crate::Session).

use crate::driver::{keys, ElementHandle, FrontdeskDriver, WindowHandle};
use crate::locator::Selector;
use crate::result::{FrontdeskError, FrontdeskResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// One element in the mock page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockElement {
    /// Visible text
    pub text: String,
    /// Whether the element is displayed
    pub displayed: bool,
    /// Text typed into the element so far
    pub value: String,
}

impl MockElement {
    /// A visible element with the given text
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            displayed: true,
            value: String::new(),
        }
    }

    /// A visible element without text
    #[must_use]
    pub fn visible() -> Self {
        Self::new("")
    }

    /// Mark the element as not displayed
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.displayed = false;
        self
    }
}

/// Mutable page content of a [`MockDriver`]
#[derive(Debug, Default)]
pub struct MockDom {
    elements: HashMap<Selector, Vec<MockElement>>,
    notes: Vec<String>,
}

impl MockDom {
    /// Replace everything matching `selector`
    pub fn set(&mut self, selector: Selector, elements: Vec<MockElement>) {
        let _ = self.elements.insert(selector, elements);
    }

    /// Append one element matching `selector`
    pub fn push(&mut self, selector: Selector, element: MockElement) {
        self.elements.entry(selector).or_default().push(element);
    }

    /// Remove every element matching `selector`
    pub fn remove(&mut self, selector: &Selector) {
        let _ = self.elements.remove(selector);
    }

    /// Elements matching `selector`
    #[must_use]
    pub fn get(&self, selector: &Selector) -> &[MockElement] {
        self.elements.get(selector).map_or(&[], Vec::as_slice)
    }

    /// Mutable access to one element
    pub fn get_mut(&mut self, selector: &Selector, index: usize) -> Option<&mut MockElement> {
        self.elements.get_mut(selector)?.get_mut(index)
    }

    /// Text of one element
    #[must_use]
    pub fn text_of(&self, selector: &Selector, index: usize) -> Option<&str> {
        self.get(selector).get(index).map(|e| e.text.as_str())
    }

    /// Replace the text of one element
    pub fn set_text(&mut self, selector: &Selector, index: usize, text: impl Into<String>) {
        if let Some(element) = self.get_mut(selector, index) {
            element.text = text.into();
        }
    }

    /// Show or hide every element matching `selector`
    pub fn set_displayed(&mut self, selector: &Selector, displayed: bool) {
        if let Some(elements) = self.elements.get_mut(selector) {
            for element in elements {
                element.displayed = displayed;
            }
        }
    }

    /// Record a free-form note (scripted applications use this to expose
    /// what the user "did", e.g. which date was picked)
    pub fn note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }

    /// Notes recorded so far
    #[must_use]
    pub fn notes(&self) -> &[String] {
        &self.notes
    }
}

/// Interaction that can trigger a scripted reaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockEvent {
    /// Element clicked
    Click,
    /// Pointer moved over element
    Hover,
    /// Text typed into element
    Type,
    /// Enter pressed while typing into element
    Enter,
}

type Reaction = Arc<dyn Fn(&mut MockDom, usize) + Send + Sync>;

struct MockState {
    dom: MockDom,
    reactions: HashMap<(MockEvent, Selector), Reaction>,
    history: Vec<String>,
    url: String,
    windows: Vec<WindowHandle>,
    current_window: Option<usize>,
    maximized: bool,
    quit: bool,
}

/// Mock driver for unit and scenario testing
#[derive(Clone)]
pub struct MockDriver {
    state: Arc<Mutex<MockState>>,
}

impl fmt::Debug for MockDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state();
        f.debug_struct("MockDriver")
            .field("url", &state.url)
            .field("windows", &state.windows)
            .field("calls", &state.history.len())
            .finish_non_exhaustive()
    }
}

impl Default for MockDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDriver {
    /// Create a mock with one open window
    #[must_use]
    pub fn new() -> Self {
        let driver = Self::without_windows();
        driver.open_window("window-0");
        driver
    }

    /// Create a mock that reports no window at all
    #[must_use]
    pub fn without_windows() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                dom: MockDom::default(),
                reactions: HashMap::new(),
                history: Vec::new(),
                url: String::new(),
                windows: Vec::new(),
                current_window: None,
                maximized: false,
                quit: false,
            })),
        }
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append one element matching `selector`
    pub fn add_element(&self, selector: Selector, element: MockElement) {
        self.state().dom.push(selector, element);
    }

    /// Replace everything matching `selector`
    pub fn set_elements(&self, selector: Selector, elements: Vec<MockElement>) {
        self.state().dom.set(selector, elements);
    }

    /// Register the reaction to `event` on any element matching `selector`.
    ///
    /// The reaction receives the page and the index of the element acted on.
    /// Registering again for the same pair replaces the previous reaction.
    pub fn on<F>(&self, event: MockEvent, selector: Selector, reaction: F)
    where
        F: Fn(&mut MockDom, usize) + Send + Sync + 'static,
    {
        let _ = self
            .state()
            .reactions
            .insert((event, selector), Arc::new(reaction));
    }

    /// Run `f` against the page content
    pub fn with_dom<R>(&self, f: impl FnOnce(&mut MockDom) -> R) -> R {
        f(&mut self.state().dom)
    }

    /// Open an additional window (does not change focus unless none is focused)
    pub fn open_window(&self, id: impl Into<String>) {
        let mut state = self.state();
        state.windows.push(WindowHandle::new(id));
        if state.current_window.is_none() {
            state.current_window = Some(state.windows.len() - 1);
        }
    }

    /// Focused window, if any
    #[must_use]
    pub fn current_window(&self) -> Option<WindowHandle> {
        let state = self.state();
        state
            .current_window
            .and_then(|i| state.windows.get(i))
            .cloned()
    }

    /// Last navigated URL
    #[must_use]
    pub fn current_url(&self) -> String {
        self.state().url.clone()
    }

    /// Whether `maximize` was called
    #[must_use]
    pub fn is_maximized(&self) -> bool {
        self.state().maximized
    }

    /// Whether `quit` was called
    #[must_use]
    pub fn is_quit(&self) -> bool {
        self.state().quit
    }

    /// Get call history
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.state().history.clone()
    }

    /// Check if a call starting with `prefix` was made
    #[must_use]
    pub fn was_called(&self, prefix: &str) -> bool {
        self.state().history.iter().any(|c| c.starts_with(prefix))
    }

    /// Number of calls starting with `prefix`
    #[must_use]
    pub fn count_calls(&self, prefix: &str) -> usize {
        self.state()
            .history
            .iter()
            .filter(|c| c.starts_with(prefix))
            .count()
    }

    /// Notes recorded by scripted reactions
    #[must_use]
    pub fn notes(&self) -> Vec<String> {
        self.state().dom.notes().to_vec()
    }

    fn fire(state: &mut MockState, event: MockEvent, element: &ElementHandle) {
        let reaction = state
            .reactions
            .get(&(event, element.selector.clone()))
            .cloned();
        if let Some(reaction) = reaction {
            reaction(&mut state.dom, element.index);
        }
    }

    fn ensure_exists(state: &MockState, element: &ElementHandle) -> FrontdeskResult<()> {
        if element.index < state.dom.get(&element.selector).len() {
            Ok(())
        } else {
            Err(FrontdeskError::ElementNotFound {
                locator: element.to_string(),
            })
        }
    }
}

#[async_trait]
impl FrontdeskDriver for MockDriver {
    async fn navigate(&self, url: &str) -> FrontdeskResult<()> {
        let mut state = self.state();
        state.history.push(format!("navigate:{url}"));
        state.url = url.to_string();
        Ok(())
    }

    async fn find_all(&self, selector: &Selector) -> FrontdeskResult<Vec<ElementHandle>> {
        let state = self.state();
        let count = state.dom.get(selector).len();
        Ok((0..count)
            .map(|index| ElementHandle::new(selector.clone(), index))
            .collect())
    }

    async fn click(&self, element: &ElementHandle) -> FrontdeskResult<()> {
        let mut state = self.state();
        Self::ensure_exists(&state, element)?;
        state.history.push(format!("click:{element}"));
        Self::fire(&mut state, MockEvent::Click, element);
        Ok(())
    }

    async fn send_keys(&self, element: &ElementHandle, text: &str) -> FrontdeskResult<()> {
        let mut state = self.state();
        Self::ensure_exists(&state, element)?;
        state.history.push(format!("type:{element}:{text}"));
        let typed: String = text.chars().filter(|c| *c != keys::ENTER).collect();
        if let Some(target) = state.dom.get_mut(&element.selector, element.index) {
            target.value.push_str(&typed);
        }
        Self::fire(&mut state, MockEvent::Type, element);
        if text.contains(keys::ENTER) {
            Self::fire(&mut state, MockEvent::Enter, element);
        }
        Ok(())
    }

    async fn text(&self, element: &ElementHandle) -> FrontdeskResult<String> {
        let state = self.state();
        state
            .dom
            .text_of(&element.selector, element.index)
            .map(str::to_string)
            .ok_or_else(|| FrontdeskError::ElementNotFound {
                locator: element.to_string(),
            })
    }

    async fn is_displayed(&self, element: &ElementHandle) -> FrontdeskResult<bool> {
        let state = self.state();
        state
            .dom
            .get(&element.selector)
            .get(element.index)
            .map(|e| e.displayed)
            .ok_or_else(|| FrontdeskError::ElementNotFound {
                locator: element.to_string(),
            })
    }

    async fn hover(&self, element: &ElementHandle) -> FrontdeskResult<()> {
        let mut state = self.state();
        Self::ensure_exists(&state, element)?;
        state.history.push(format!("hover:{element}"));
        Self::fire(&mut state, MockEvent::Hover, element);
        Ok(())
    }

    async fn window_handles(&self) -> FrontdeskResult<Vec<WindowHandle>> {
        Ok(self.state().windows.clone())
    }

    async fn switch_to_window(&self, handle: &WindowHandle) -> FrontdeskResult<()> {
        let mut state = self.state();
        let position = state
            .windows
            .iter()
            .position(|w| w == handle)
            .ok_or_else(|| FrontdeskError::driver("switch_to_window", format!("no window {handle}")))?;
        state.history.push(format!("switch:{handle}"));
        state.current_window = Some(position);
        Ok(())
    }

    async fn close_window(&self) -> FrontdeskResult<()> {
        let mut state = self.state();
        let current = state
            .current_window
            .take()
            .ok_or_else(|| FrontdeskError::driver("close_window", "no focused window"))?;
        let closed = state.windows.remove(current);
        state.history.push(format!("close:{closed}"));
        Ok(())
    }

    async fn maximize(&self) -> FrontdeskResult<()> {
        let mut state = self.state();
        state.history.push("maximize".to_string());
        state.maximized = true;
        Ok(())
    }

    async fn quit(&self) -> FrontdeskResult<()> {
        let mut state = self.state();
        state.history.push("quit".to_string());
        state.quit = true;
        state.windows.clear();
        state.current_window = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod dom_tests {
        use super::*;

        #[test]
        fn test_push_and_get() {
            let mut dom = MockDom::default();
            let sel = Selector::css("li");
            dom.push(sel.clone(), MockElement::new("one"));
            dom.push(sel.clone(), MockElement::new("two"));
            assert_eq!(dom.get(&sel).len(), 2);
            assert_eq!(dom.text_of(&sel, 1), Some("two"));
        }

        #[test]
        fn test_missing_selector_is_empty() {
            let dom = MockDom::default();
            assert!(dom.get(&Selector::css("nothing")).is_empty());
        }

        #[test]
        fn test_set_displayed() {
            let mut dom = MockDom::default();
            let sel = Selector::id("dialog");
            dom.push(sel.clone(), MockElement::visible());
            dom.set_displayed(&sel, false);
            assert!(!dom.get(&sel)[0].displayed);
        }
    }

    mod driver_tests {
        use super::*;

        #[tokio::test]
        async fn test_navigate_records_url() {
            let driver = MockDriver::new();
            driver.navigate("https://hotel.test/login").await.unwrap();
            assert_eq!(driver.current_url(), "https://hotel.test/login");
            assert!(driver.was_called("navigate:"));
        }

        #[tokio::test]
        async fn test_click_fires_reaction() {
            let driver = MockDriver::new();
            let button = Selector::css("button");
            let panel = Selector::css(".panel");
            driver.add_element(button.clone(), MockElement::new("Open"));
            let panel_in_reaction = panel.clone();
            driver.on(MockEvent::Click, button.clone(), move |dom, _| {
                dom.push(panel_in_reaction.clone(), MockElement::new("Hello"));
            });

            assert!(driver.find_all(&panel).await.unwrap().is_empty());
            driver
                .click(&ElementHandle::new(button, 0))
                .await
                .unwrap();
            assert_eq!(driver.find_all(&panel).await.unwrap().len(), 1);
        }

        #[tokio::test]
        async fn test_click_missing_element_is_not_found() {
            let driver = MockDriver::new();
            let err = driver
                .click(&ElementHandle::new(Selector::css("gone"), 0))
                .await
                .unwrap_err();
            assert!(matches!(err, FrontdeskError::ElementNotFound { .. }));
        }

        #[tokio::test]
        async fn test_send_keys_with_enter() {
            let driver = MockDriver::new();
            let input = Selector::css("input");
            driver.add_element(input.clone(), MockElement::visible());
            driver.on(MockEvent::Enter, input.clone(), |dom, _| dom.note("submitted"));

            let text = format!("Cash{}", keys::ENTER);
            driver
                .send_keys(&ElementHandle::new(input.clone(), 0), &text)
                .await
                .unwrap();

            assert_eq!(driver.with_dom(|dom| dom.get(&input)[0].value.clone()), "Cash");
            assert_eq!(driver.notes(), vec!["submitted".to_string()]);
        }

        #[tokio::test]
        async fn test_windows() {
            let driver = MockDriver::new();
            driver.open_window("window-1");
            let handles = driver.window_handles().await.unwrap();
            assert_eq!(handles.len(), 2);

            driver.switch_to_window(&handles[1]).await.unwrap();
            assert_eq!(driver.current_window(), Some(handles[1].clone()));

            driver.close_window().await.unwrap();
            assert_eq!(driver.window_handles().await.unwrap().len(), 1);
            assert!(driver.current_window().is_none());
        }

        #[tokio::test]
        async fn test_quit_clears_windows() {
            let driver = MockDriver::new();
            driver.quit().await.unwrap();
            assert!(driver.is_quit());
            assert!(driver.window_handles().await.unwrap().is_empty());
        }

        #[tokio::test]
        async fn test_clones_share_state() {
            let driver = MockDriver::new();
            let observer = driver.clone();
            driver.maximize().await.unwrap();
            assert!(observer.is_maximized());
        }
    }
}
