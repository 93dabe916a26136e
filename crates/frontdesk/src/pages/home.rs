use crate::driver::ElementHandle;
use crate::locator::{Locator, Selector};
use crate::page_object::PageObject;
use crate::result::FrontdeskResult;
use crate::session::Session;

/// Dashboard shown after picking a property
#[derive(Debug, Clone)]
pub struct HomePage {
    /// "Later" button of the account verification popup
    pub later_button: Locator,
    /// Reservations entry of the side menu
    pub reservations_tab: Locator,
}

impl Default for HomePage {
    fn default() -> Self {
        Self::new()
    }
}

impl HomePage {
    /// Create with the default locators
    #[must_use]
    pub fn new() -> Self {
        Self {
            later_button: Locator::from_selector(
                "later button",
                Selector::class_name("n-button--primary-border"),
            ),
            reservations_tab: Locator::new("reservations tab", "a[href='/reservations']"),
        }
    }

    /// Resolve the later button
    pub async fn later_button(&self, session: &Session) -> FrontdeskResult<ElementHandle> {
        session.find(&self.later_button).await
    }

    /// Resolve the reservations tab
    pub async fn reservations_tab(&self, session: &Session) -> FrontdeskResult<ElementHandle> {
        session.find(&self.reservations_tab).await
    }
}

impl PageObject for HomePage {
    fn page_name(&self) -> &'static str {
        "home"
    }

    fn url_pattern(&self) -> &str {
        "/"
    }

    fn locators(&self) -> Vec<&Locator> {
        vec![&self.later_button, &self.reservations_tab]
    }
}
