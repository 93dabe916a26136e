//! Frontdesk: end-to-end UI tests for hotel reservation workflows
//!
//! Frontdesk drives the hotel-management web application through a browser
//! and checks business outcomes, layered the Page-Object-Model way.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                   FRONTDESK Architecture                         │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌──────────┐   ┌──────────┐   ┌──────────┐   ┌──────────┐      │
//! │  │ Scenario │──►│ Actions  │──►│ Pages    │──►│ Session  │──►   │
//! │  │ + Runner │   │ (intent) │   │(locators)│   │ (driver) │ CDP  │
//! │  └──────────┘   └──────────┘   └──────────┘   └──────────┘      │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Elements are resolved again on every access; readiness is always an
//! explicit, bounded poll.

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

pub mod actions;
mod browser;
pub mod calendar;
pub mod config;
mod driver;
mod harness;
mod locator;
pub mod mock;
mod page_object;
pub mod pages;
mod result;
pub mod scenario;
mod session;
pub mod wait;

pub use actions::{HomeActions, LoginActions, RandomChooser, ReservationActions};
pub use browser::BrowserConfig;
#[cfg(feature = "browser")]
pub use browser::{ChromiumDriver, ChromiumLauncher};
pub use calendar::{CalendarOptions, DayMatchPolicy, MonthYear};
pub use config::{Credentials, ReservationData, SuiteConfig};
pub use driver::{keys, ElementHandle, FrontdeskDriver, WindowHandle};
pub use harness::{
    DriverLauncher, Scenario, SessionScope, SuiteResults, SuiteRunner, TestResult, TestSuite,
};
pub use locator::{Locator, Selector};
pub use mock::{MockDom, MockDriver, MockElement, MockEvent};
pub use page_object::{locator_table, LocatorEntry, PageObject};
pub use pages::{HomePage, LoginPage, ReservationPage};
pub use result::{FrontdeskError, FrontdeskResult};
pub use scenario::{reservation_suite, ReservationScenario, RESERVATION_SCENARIO};
pub use session::{Session, SessionConfig};
pub use wait::{WaitOptions, WaitResult, Waiter};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::actions::*;
    pub use super::calendar::*;
    pub use super::config::*;
    pub use super::driver::*;
    pub use super::harness::*;
    pub use super::locator::*;
    pub use super::mock::*;
    pub use super::page_object::*;
    pub use super::pages::*;
    pub use super::result::*;
    pub use super::scenario::*;
    pub use super::session::*;
    pub use super::wait::*;
}
