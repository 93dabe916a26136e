use crate::config::Credentials;
use crate::pages::LoginPage;
use crate::result::FrontdeskResult;
use crate::session::Session;

/// Operations on the login screen
#[derive(Debug)]
pub struct LoginActions<'s> {
    session: &'s Session,
    page: LoginPage,
}

impl<'s> LoginActions<'s> {
    /// Bind to the session
    #[must_use]
    pub fn new(session: &'s Session) -> Self {
        Self {
            session,
            page: LoginPage::new(),
        }
    }

    /// Locators of this screen
    #[must_use]
    pub const fn page(&self) -> &LoginPage {
        &self.page
    }

    /// Navigate to the login screen
    pub async fn open(&self, url: &str) -> FrontdeskResult<&Self> {
        self.session.navigate(url).await?;
        Ok(self)
    }

    /// Type the username
    pub async fn enter_username(&self, username: &str) -> FrontdeskResult<&Self> {
        let input = self.page.username_input(self.session).await?;
        self.session.send_keys(&input, username).await?;
        Ok(self)
    }

    /// Type the password
    pub async fn enter_password(&self, password: &str) -> FrontdeskResult<&Self> {
        let input = self.page.password_input(self.session).await?;
        self.session.send_keys(&input, password).await?;
        Ok(self)
    }

    /// Type the access code
    pub async fn enter_access_code(&self, access_code: &str) -> FrontdeskResult<&Self> {
        let input = self.page.access_code_input(self.session).await?;
        self.session.send_keys(&input, access_code).await?;
        Ok(self)
    }

    /// Click the login
    pub async fn click_login(&self) -> FrontdeskResult<&Self> {
        let button = self.page.login_button(self.session).await?;
        self.session.click(&button).await?;
        Ok(self)
    }

    /// Fill the whole form and submit it
    pub async fn login(&self, credentials: &Credentials) -> FrontdeskResult<&Self> {
        tracing::info!(username = %credentials.username, "logging in");
        self.enter_username(&credentials.username)
            .await?
            .enter_password(&credentials.password)
            .await?
            .enter_access_code(&credentials.access_code)
            .await?
            .click_login()
            .await
    }

    /// Whether the property row is displayed
    pub async fn is_property_row_displayed(&self) -> FrontdeskResult<bool> {
        let row = self.page.property_row(self.session).await?;
        self.session.is_displayed(&row).await
    }

    /// Click the property row
    pub async fn click_property_row(&self) -> FrontdeskResult<&Self> {
        let row = self.page.property_row(self.session).await?;
        self.session.click(&row).await?;
        Ok(self)
    }
}
