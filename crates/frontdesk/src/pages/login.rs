use crate::driver::ElementHandle;
use crate::locator::{Locator, Selector};
use crate::page_object::PageObject;
use crate::result::FrontdeskResult;
use crate::session::Session;

/// Login screen of the staging deployment
pub const DEFAULT_ENTRY_URL: &str = "https://staging.nazeel.net:9002/login";

/// Login screen: credentials form and the property picker shown after it
#[derive(Debug, Clone)]
pub struct LoginPage {
    /// Login user name
    pub username: Locator,
    /// Login password
    pub password: Locator,
    /// Property access code
    pub access_code: Locator,
    /// Login button
    pub login_button: Locator,
    /// First property listed after a successful login
    pub property_row: Locator,
}

impl Default for LoginPage {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginPage {
    /// Create with the default locators
    #[must_use]
    pub fn new() -> Self {
        Self {
            username: Locator::from_selector("username", Selector::id("usern")),
            password: Locator::from_selector("password", Selector::id("pass")),
            access_code: Locator::from_selector("access code", Selector::id("acc")),
            login_button: Locator::new(
                "login button",
                "button[class='n-button n-button--primary n-button--full-width u-mb-24 ng-star-inserted']",
            ),
            property_row: Locator::new(
                "property row",
                "tbody[role='presentation']>tr:nth-child(2)",
            ),
        }
    }

    /// Resolve the username input
    pub async fn username_input(&self, session: &Session) -> FrontdeskResult<ElementHandle> {
        session.find(&self.username).await
    }

    /// Resolve the password input
    pub async fn password_input(&self, session: &Session) -> FrontdeskResult<ElementHandle> {
        session.find(&self.password).await
    }

    /// Resolve the access code input
    pub async fn access_code_input(&self, session: &Session) -> FrontdeskResult<ElementHandle> {
        session.find(&self.access_code).await
    }

    /// Resolve the login button
    pub async fn login_button(&self, session: &Session) -> FrontdeskResult<ElementHandle> {
        session.find(&self.login_button).await
    }

    /// Resolve the property row
    pub async fn property_row(&self, session: &Session) -> FrontdeskResult<ElementHandle> {
        session.find(&self.property_row).await
    }
}

impl PageObject for LoginPage {
    fn page_name(&self) -> &'static str {
        "login"
    }

    fn url_pattern(&self) -> &str {
        "/login"
    }

    fn locators(&self) -> Vec<&Locator> {
        vec![
            &self.username,
            &self.password,
            &self.access_code,
            &self.login_button,
            &self.property_row,
        ]
    }
}
