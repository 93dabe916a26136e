use crate::pages::HomePage;
use crate::result::FrontdeskResult;
use crate::session::Session;

/// Operations on the dashboard
#[derive(Debug)]
pub struct HomeActions<'s> {
    session: &'s Session,
    page: HomePage,
}

impl<'s> HomeActions<'s> {
    /// Bind to the session
    #[must_use]
    pub fn new(session: &'s Session) -> Self {
        Self {
            session,
            page: HomePage::new(),
        }
    }

    /// Locators of this screen
    #[must_use]
    pub const fn page(&self) -> &HomePage {
        &self.page
    }

    /// Whether the later button is displayed
    pub async fn is_later_button_displayed(&self) -> FrontdeskResult<bool> {
        let button = self.page.later_button(self.session).await?;
        self.session.is_displayed(&button).await
    }

    /// Dismiss the verification popup
    pub async fn click_later(&self) -> FrontdeskResult<&Self> {
        let button = self.page.later_button(self.session).await?;
        self.session.click(&button).await?;
        Ok(self)
    }

    /// Open the reservations screen from the side menu
    pub async fn select_reservations_tab(&self) -> FrontdeskResult<&Self> {
        let tab = self.page.reservations_tab(self.session).await?;
        self.session.click(&tab).await?;
        Ok(self)
    }
}
