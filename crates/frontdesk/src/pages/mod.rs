//! Screens of the hotel application.
//!
//! Each screen declares its locators once and exposes one accessor per
//! semantic element. Accessors return freshly resolved handles.

mod home;
mod login;
mod reservation;

pub use home::HomePage;
pub use login::{LoginPage, DEFAULT_ENTRY_URL};
pub use reservation::ReservationPage;

use crate::page_object::PageObject;

/// Every screen, in workflow order
pub fn all_pages() -> Vec<Box<dyn PageObject>> {
    vec![
        Box::new(LoginPage::new()),
        Box::new(HomePage::new()),
        Box::new(ReservationPage::new()),
    ]
}
