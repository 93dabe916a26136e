//! Reservation check-in/check-out scenario.
//!
//! Logs in, opens a random unit, books a stay around today, checks the guest
//! in and out, pays, and expects the success toast. Every step waits for its
//! precondition explicitly; there are no fixed sleeps.

use crate::actions::{HomeActions, LoginActions, RandomChooser, ReservationActions};
use crate::calendar::CalendarOptions;
use crate::config::{Credentials, ReservationData, ScenarioTimeouts, SuiteConfig};
use crate::harness::{Scenario, TestSuite};
use crate::result::{FrontdeskError, FrontdeskResult};
use crate::session::Session;
use async_trait::async_trait;
use chrono::{Local, NaiveDate};

/// Report name of the reservation scenario
pub const RESERVATION_SCENARIO: &str = "TC01 :: Reservation checked out successfully";

/// The reservation check-in/check-out business flow
#[derive(Debug)]
pub struct ReservationScenario {
    entry_url: String,
    credentials: Credentials,
    data: ReservationData,
    timeouts: ScenarioTimeouts,
    calendar: CalendarOptions,
    chooser: RandomChooser,
    today: Option<NaiveDate>,
}

impl ReservationScenario {
    /// Scenario with default data and timeouts
    #[must_use]
    pub fn new(entry_url: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            entry_url: entry_url.into(),
            credentials,
            data: ReservationData::default(),
            timeouts: ScenarioTimeouts::default(),
            calendar: CalendarOptions::default(),
            chooser: RandomChooser::default(),
            today: None,
        }
    }

    /// Scenario as described by a suite configuration
    #[must_use]
    pub fn from_config(config: &SuiteConfig) -> Self {
        Self::new(config.entry_url.clone(), config.credentials.clone())
            .with_data(config.reservation.clone())
            .with_timeouts(config.timeouts)
            .with_calendar(config.calendar_options())
            .with_chooser(RandomChooser::new(config.seed))
    }

    /// Replace the data
    #[must_use]
    pub fn with_data(mut self, data: ReservationData) -> Self {
        self.data = data;
        self
    }

    /// Replace the timeouts
    #[must_use]
    pub fn with_timeouts(mut self, timeouts: ScenarioTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Replace the calendar
    #[must_use]
    pub fn with_calendar(mut self, calendar: CalendarOptions) -> Self {
        self.calendar = calendar;
        self
    }

    /// Replace the chooser
    #[must_use]
    pub fn with_chooser(mut self, chooser: RandomChooser) -> Self {
        self.chooser = chooser;
        self
    }

    /// Compute dates from `today` instead of the local clock
    #[must_use]
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Check-in and check-out dates of this run
    pub fn stay(&self) -> FrontdeskResult<(NaiveDate, NaiveDate)> {
        let today = self.today.unwrap_or_else(|| Local::now().date_naive());
        self.data.stay(today)
    }
}

#[async_trait]
impl Scenario for ReservationScenario {
    fn name(&self) -> &str {
        RESERVATION_SCENARIO
    }

    async fn setup(&self, session: &Session) -> FrontdeskResult<()> {
        let _ = self.stay()?;
        LoginActions::new(session).open(&self.entry_url).await?;
        Ok(())
    }

    async fn run(&self, session: &Session) -> FrontdeskResult<()> {
        let (check_in, check_out) = self.stay()?;
        let short = self.timeouts.short();
        let long = self.timeouts.long();

        let login = LoginActions::new(session);
        let home = HomeActions::new(session);
        let reservation =
            ReservationActions::new(session, &self.chooser).with_calendar(self.calendar);

        login.login(&self.credentials).await?;

        session
            .wait_until("property row displayed", short, || {
                login.is_property_row_displayed()
            })
            .await?;
        login.click_property_row().await?;

        session
            .wait_until("later button displayed", long, || {
                home.is_later_button_displayed()
            })
            .await?;
        session.set_implicit_wait(self.timeouts.stabilize());
        home.click_later().await?.select_reservations_tab().await?;

        session
            .wait_until("unit cards displayed", long, || {
                reservation.is_units_cards_displayed()
            })
            .await?;
        let card = reservation.hover_random_card().await?;
        session
            .wait_until("add reservation button displayed", short, || {
                reservation.is_add_reservation_button_displayed(card)
            })
            .await?;
        reservation.click_add_reservation_button(card).await?;

        tracing::info!(%check_in, %check_out, "booking stay");
        session
            .wait_until("new reservation title displayed", short, || {
                reservation.is_new_reservation_title_displayed()
            })
            .await?;
        reservation.enter_check_in_date(check_in).await?;
        session
            .wait_until("check-out date button displayed", short, || {
                reservation.is_check_out_date_displayed()
            })
            .await?;
        reservation
            .enter_check_out_date(check_out)
            .await?
            .click_visit_purpose_dropdown()
            .await?;

        session
            .wait_until("visit purpose options displayed", short, || {
                reservation.is_visit_purpose_options_displayed()
            })
            .await?;
        reservation
            .select_random_visit_purpose()
            .await?
            .click_reservation_source_dropdown()
            .await?;
        session
            .wait_until("reservation source options displayed", short, || {
                reservation.is_reservation_source_options_displayed()
            })
            .await?;
        reservation
            .select_random_reservation_source()
            .await?
            .click_select_guest()
            .await?;

        session
            .wait_until("guest dialog displayed", short, || {
                reservation.is_guest_dialog_displayed()
            })
            .await?;
        reservation
            .enter_guest_id(&self.data.guest_id)
            .await?
            .click_search_guest()
            .await?
            .select_found_guest()
            .await?
            .click_confirm_guest()
            .await?
            .click_check_in()
            .await?;

        session
            .wait_until("confirm check-in displayed", short, || {
                reservation.is_confirm_check_in_displayed()
            })
            .await?;
        reservation.click_confirm_check_in().await?;
        tracing::info!("checked in");

        session
            .wait_until("check-out button displayed", short, || {
                reservation.is_check_out_displayed()
            })
            .await?;
        reservation.click_check_out().await?;
        session
            .wait_until("confirm check-out displayed", short, || {
                reservation.is_confirm_check_out_displayed()
            })
            .await?;
        reservation
            .click_confirm_check_out()
            .await?
            .click_receipt_voucher()
            .await?
            .enter_payment_method(&self.data.payment_method)
            .await?;

        session
            .wait_until("save and continue displayed", short, || {
                reservation.is_save_and_continue_displayed()
            })
            .await?;
        reservation.click_save_and_continue().await?;

        session
            .wait_until("success message displayed", short, || {
                reservation.is_success_message_displayed()
            })
            .await?;
        let message = reservation.success_message_text().await?;
        let expected = &self.data.expected_success_text;
        if !message.to_lowercase().contains(&expected.to_lowercase()) {
            return Err(FrontdeskError::AssertionFailed {
                message: format!("success message {message:?} does not contain {expected:?}"),
            });
        }
        tracing::info!(%message, "reservation checked out");
        Ok(())
    }
}

/// The full reservation suite for `config`
#[must_use]
pub fn reservation_suite(config: &SuiteConfig) -> TestSuite {
    TestSuite::new("Reservation").with_scenario(ReservationScenario::from_config(config))
}
