//! Locator abstraction for element selection.
//!
//! A [`Locator`] is only the rule for finding an element. It never holds the
//! element itself: every access goes back to the live page through the
//! session, because the application re-renders freely and any previously
//! resolved reference may already be stale.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Selector strategy for locating elements
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selector {
    /// CSS selector (e.g., "button.primary")
    Css(String),
    /// XPath selector
    XPath(String),
    /// Element id attribute
    Id(String),
    /// Single class name
    ClassName(String),
}

impl Selector {
    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Create an XPath selector
    #[must_use]
    pub fn xpath(expr: impl Into<String>) -> Self {
        Self::XPath(expr.into())
    }

    /// Create an id selector
    #[must_use]
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    /// Create a class name selector
    #[must_use]
    pub fn class_name(class: impl Into<String>) -> Self {
        Self::ClassName(class.into())
    }

    /// Strategy name as used in reports
    #[must_use]
    pub const fn strategy(&self) -> &'static str {
        match self {
            Self::Css(_) => "css",
            Self::XPath(_) => "xpath",
            Self::Id(_) => "id",
            Self::ClassName(_) => "class",
        }
    }

    /// Raw selector value
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Css(s) | Self::XPath(s) | Self::Id(s) | Self::ClassName(s) => s,
        }
    }

    /// Equivalent CSS selector, if the strategy has one
    #[must_use]
    pub fn to_css(&self) -> Option<String> {
        match self {
            Self::Css(s) => Some(s.clone()),
            Self::Id(id) => Some(format!("[id={id:?}]")),
            Self::ClassName(class) => Some(format!(".{class}")),
            Self::XPath(_) => None,
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} `{}`", self.strategy(), self.value())
    }
}

/// A named locator for one semantic element of a screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    name: &'static str,
    selector: Selector,
    nth: Option<usize>,
}

impl Locator {
    /// Create a locator with a CSS selector
    #[must_use]
    pub fn new(name: &'static str, selector: impl Into<String>) -> Self {
        Self::from_selector(name, Selector::Css(selector.into()))
    }

    /// Create a locator from a selector
    #[must_use]
    pub const fn from_selector(name: &'static str, selector: Selector) -> Self {
        Self {
            name,
            selector,
            nth: None,
        }
    }

    /// Restrict the locator to the match at `index` in document order
    #[must_use]
    pub const fn nth(mut self, index: usize) -> Self {
        self.nth = Some(index);
        self
    }

    /// Semantic name of the element
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Get the selector
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Position within the matches, if restricted
    #[must_use]
    pub const fn index(&self) -> Option<usize> {
        self.nth
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.nth {
            Some(n) => write!(f, "{} ({}, match #{n})", self.name, self.selector),
            None => write!(f, "{} ({})", self.name, self.selector),
        }
    }
}
