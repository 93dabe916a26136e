//! Page Object Model support
//!
//! Every screen of the application under test is a struct of named
//! [`Locator`]s implementing [`PageObject`]. Screens never hold elements:
//! their accessors resolve through the [`Session`](crate::Session) each time
//! they are called.

use crate::locator::Locator;

/// A screen (or component) of the application under test
pub trait PageObject {
    /// Human-readable screen name
    fn page_name(&self) -> &'static str;

    /// URL pattern that matches this screen (e.g. "/login", "/reservations")
    fn url_pattern(&self) -> &str;

    /// Every locator the screen declares, in declaration order
    fn locators(&self) -> Vec<&Locator>;

    /// Look up a locator by its semantic name
    fn locator(&self, name: &str) -> Option<&Locator> {
        self.locators().into_iter().find(|l| l.name() == name)
    }
}

/// One row of a screen's locator table
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct LocatorEntry {
    /// Screen name
    pub page: &'static str,
    /// Semantic element name
    pub name: &'static str,
    /// Selector strategy
    pub strategy: &'static str,
    /// Selector value
    pub selector: String,
    /// Match position, if restricted
    pub nth: Option<usize>,
}

/// Flatten a screen's locators into table rows
pub fn locator_table(page: &dyn PageObject) -> Vec<LocatorEntry> {
    page.locators()
        .into_iter()
        .map(|l| LocatorEntry {
            page: page.page_name(),
            name: l.name(),
            strategy: l.selector().strategy(),
            selector: l.selector().value().to_string(),
            nth: l.index(),
        })
        .collect()
}
