use super::RandomChooser;
use crate::calendar::{self, CalendarOptions, DayMatchPolicy, Direction, MonthYear};
use crate::driver::{keys, ElementHandle};
use crate::pages::ReservationPage;
use crate::result::{FrontdeskError, FrontdeskResult};
use crate::session::Session;
use chrono::{Datelike, NaiveDate};

/// Operations on the reservations board and the new-reservation form
#[derive(Debug)]
pub struct ReservationActions<'s> {
    session: &'s Session,
    chooser: &'s RandomChooser,
    page: ReservationPage,
    calendar: CalendarOptions,
}

impl<'s> ReservationActions<'s> {
    /// Bind to the session
    #[must_use]
    pub fn new(session: &'s Session, chooser: &'s RandomChooser) -> Self {
        Self {
            session,
            chooser,
            page: ReservationPage::new(),
            calendar: CalendarOptions::default(),
        }
    }

    /// Use custom date picker timing and policy
    #[must_use]
    pub fn with_calendar(mut self, options: CalendarOptions) -> Self {
        self.calendar = options;
        self
    }

    /// Locators of this screen
    #[must_use]
    pub const fn page(&self) -> &ReservationPage {
        &self.page
    }

    async fn press(&self, element: ElementHandle) -> FrontdeskResult<&Self> {
        self.session.click(&element).await?;
        Ok(self)
    }

    async fn shown(&self, element: ElementHandle) -> FrontdeskResult<bool> {
        self.session.is_displayed(&element).await
    }

    async fn first_shown(&self, elements: Vec<ElementHandle>) -> FrontdeskResult<bool> {
        match elements.first() {
            Some(first) => self.session.is_displayed(first).await,
            None => Ok(false),
        }
    }

    // =========================================================================
    // Unit cards
    // =========================================================================

    /// Whether the first unit card is displayed; `false` with no cards at all
    pub async fn is_units_cards_displayed(&self) -> FrontdeskResult<bool> {
        self.first_shown(self.page.unit_cards(self.session).await?)
            .await
    }

    /// Hover a uniformly chosen unit card and return its index
    pub async fn hover_random_card(&self) -> FrontdeskResult<usize> {
        let cards = self.page.unit_cards(self.session).await?;
        let index = self.chooser.pick_index(cards.len(), "unit cards")?;
        self.session.hover(&cards[index]).await?;
        tracing::info!(card = index, of = cards.len(), "hovered unit card");
        Ok(index)
    }

    /// Whether the add reservation button is displayed
    pub async fn is_add_reservation_button_displayed(&self, card: usize) -> FrontdeskResult<bool> {
        self.shown(self.page.add_reservation_button(self.session, card).await?)
            .await
    }

    /// Click the add reservation button
    pub async fn click_add_reservation_button(&self, card: usize) -> FrontdeskResult<&Self> {
        self.press(self.page.add_reservation_button(self.session, card).await?)
            .await
    }

    /// Whether the new reservation title is displayed
    pub async fn is_new_reservation_title_displayed(&self) -> FrontdeskResult<bool> {
        self.shown(self.page.new_reservation_title(self.session).await?)
            .await
    }

    // =========================================================================
    // Date picker
    // =========================================================================

    /// Whether the calendar dialog is displayed
    pub async fn is_calendar_dialog_displayed(&self) -> FrontdeskResult<bool> {
        self.shown(self.page.calendar_dialog(self.session).await?)
            .await
    }

    /// Click the next month
    pub async fn click_next_month(&self) -> FrontdeskResult<&Self> {
        self.press(self.page.next_month_button(self.session).await?)
            .await
    }

    /// Click the prev month
    pub async fn click_prev_month(&self) -> FrontdeskResult<&Self> {
        self.press(self.page.prev_month_button(self.session).await?)
            .await
    }

    /// Month currently shown by the date picker
    pub async fn displayed_month(&self) -> FrontdeskResult<MonthYear> {
        let month = self
            .session
            .text(&self.page.month_title(self.session).await?)
            .await?;
        let year = self
            .session
            .text(&self.page.year_title(self.session).await?)
            .await?;
        MonthYear::from_labels(&month, &year)
    }

    /// Walk the open date picker to `date`'s month and click its day.
    ///
    /// The number of clicks is bounded by the first observed distance to the
    /// target; after each click the month label must change within the step
    /// timeout.
    pub async fn select_date_from_calendar(&self, date: NaiveDate) -> FrontdeskResult<&Self> {
        let options = self.calendar;
        self.session
            .wait_until("calendar dialog displayed", options.open_timeout, || {
                self.is_calendar_dialog_displayed()
            })
            .await?;

        let target = MonthYear::of(date);
        let mut displayed = self.displayed_month().await?;
        let budget = calendar::step_budget(displayed.distance(target), options.max_steps);
        let mut steps = 0u32;
        tracing::debug!(from = %displayed, to = %target, budget, "navigating calendar");

        while let Some(direction) = calendar::direction(displayed, target) {
            if steps >= budget {
                return Err(FrontdeskError::CalendarNavigationTimeout {
                    target: target.to_string(),
                    steps,
                    reason: format!("step budget of {budget} exhausted at {displayed}"),
                });
            }

            match direction {
                Direction::Next => self.click_next_month().await?,
                Direction::Previous => self.click_prev_month().await?,
            };
            steps += 1;

            let before = displayed;
            let changed = self
                .session
                .wait_until("calendar month label change", options.step_timeout, || async move {
                    Ok(self.displayed_month().await? != before)
                })
                .await;
            match changed {
                Ok(_) => {}
                Err(FrontdeskError::WaitTimeout { .. }) => {
                    return Err(FrontdeskError::CalendarNavigationTimeout {
                        target: target.to_string(),
                        steps,
                        reason: format!("month label stuck at {before}"),
                    });
                }
                Err(e) => return Err(e),
            }
            displayed = self.displayed_month().await?;
        }

        tracing::debug!(month = %target, steps, "calendar month reached");
        self.select_day(date.day()).await
    }

    /// Click the day cell of the displayed month whose text is `day`
    pub async fn select_day(&self, day: u32) -> FrontdeskResult<&Self> {
        for cell in self.page.day_cells(self.session).await? {
            let text = self.session.text(&cell).await?;
            if calendar::day_matches(&text, day) {
                return self.press(cell).await;
            }
        }
        match self.calendar.day_policy {
            DayMatchPolicy::Strict => Err(FrontdeskError::DayNotFound { day }),
            DayMatchPolicy::Lenient => {
                tracing::warn!(day, "no matching day cell, nothing selected");
                Ok(self)
            }
        }
    }

    /// Whether the check in date is displayed
    pub async fn is_check_in_date_displayed(&self) -> FrontdeskResult<bool> {
        self.shown(self.page.check_in_date_button(self.session).await?)
            .await
    }

    /// Open the check-in date picker once its button is displayed and pick `date`
    pub async fn enter_check_in_date(&self, date: NaiveDate) -> FrontdeskResult<&Self> {
        self.session
            .wait_until(
                "check-in date button displayed",
                self.calendar.open_timeout,
                || self.is_check_in_date_displayed(),
            )
            .await?;
        tracing::info!(%date, "entering check-in date");
        self.press(self.page.check_in_date_button(self.session).await?)
            .await?
            .select_date_from_calendar(date)
            .await
    }

    /// Whether the check out date is displayed
    pub async fn is_check_out_date_displayed(&self) -> FrontdeskResult<bool> {
        self.shown(self.page.check_out_date_button(self.session).await?)
            .await
    }

    /// Type the check out date
    pub async fn enter_check_out_date(&self, date: NaiveDate) -> FrontdeskResult<&Self> {
        tracing::info!(%date, "entering check-out date");
        self.press(self.page.check_out_date_button(self.session).await?)
            .await?
            .select_date_from_calendar(date)
            .await
    }

    // =========================================================================
    // Dropdowns
    // =========================================================================

    /// Click the visit purpose dropdown
    pub async fn click_visit_purpose_dropdown(&self) -> FrontdeskResult<&Self> {
        self.press(self.page.visit_purpose_dropdown(self.session).await?)
            .await
    }

    /// Click the reservation source dropdown
    pub async fn click_reservation_source_dropdown(&self) -> FrontdeskResult<&Self> {
        self.press(self.page.reservation_source_dropdown(self.session).await?)
            .await
    }

    /// Whether the visit purpose options is displayed
    pub async fn is_visit_purpose_options_displayed(&self) -> FrontdeskResult<bool> {
        self.first_shown(self.page.visit_purpose_options(self.session).await?)
            .await
    }

    /// Whether the reservation source options is displayed
    pub async fn is_reservation_source_options_displayed(&self) -> FrontdeskResult<bool> {
        self.first_shown(self.page.reservation_source_options(self.session).await?)
            .await
    }

    /// Pick a random visit purpose
    pub async fn select_random_visit_purpose(&self) -> FrontdeskResult<&Self> {
        let options = self.page.visit_purpose_options(self.session).await?;
        let index = self.chooser.pick_index(options.len(), "visit purpose options")?;
        tracing::debug!(option = index, "visit purpose picked");
        self.session.click(&options[index]).await?;
        Ok(self)
    }

    /// Pick a random reservation source
    pub async fn select_random_reservation_source(&self) -> FrontdeskResult<&Self> {
        let options = self.page.reservation_source_options(self.session).await?;
        let index = self
            .chooser
            .pick_index(options.len(), "reservation source options")?;
        tracing::debug!(option = index, "reservation source picked");
        self.session.click(&options[index]).await?;
        Ok(self)
    }

    // =========================================================================
    // Guest
    // =========================================================================

    /// Click the select guest
    pub async fn click_select_guest(&self) -> FrontdeskResult<&Self> {
        self.press(self.page.select_guest_button(self.session).await?)
            .await
    }

    /// Whether the guest dialog is displayed
    pub async fn is_guest_dialog_displayed(&self) -> FrontdeskResult<bool> {
        self.shown(self.page.guest_dialog(self.session).await?)
            .await
    }

    /// Type the guest id
    pub async fn enter_guest_id(&self, id: &str) -> FrontdeskResult<&Self> {
        let input = self.page.guest_id_input(self.session).await?;
        self.session.send_keys(&input, id).await?;
        Ok(self)
    }

    /// Click the search guest
    pub async fn click_search_guest(&self) -> FrontdeskResult<&Self> {
        self.press(self.page.guest_search_button(self.session).await?)
            .await
    }

    /// Hover the search result row, then click it
    pub async fn select_found_guest(&self) -> FrontdeskResult<&Self> {
        let row = self.page.found_guest_row(self.session).await?;
        self.session.hover(&row).await?;
        self.press(row).await
    }

    /// Click the confirm guest
    pub async fn click_confirm_guest(&self) -> FrontdeskResult<&Self> {
        self.press(self.page.confirm_guest_button(self.session).await?)
            .await
    }

    // =========================================================================
    // Check-in / check-out
    // =========================================================================

    /// Click the check in
    pub async fn click_check_in(&self) -> FrontdeskResult<&Self> {
        self.press(self.page.check_in_button(self.session).await?)
            .await
    }

    /// Whether the confirm check in is displayed
    pub async fn is_confirm_check_in_displayed(&self) -> FrontdeskResult<bool> {
        self.shown(self.page.confirm_check_in_button(self.session).await?)
            .await
    }

    /// Click the confirm check in
    pub async fn click_confirm_check_in(&self) -> FrontdeskResult<&Self> {
        self.press(self.page.confirm_check_in_button(self.session).await?)
            .await
    }

    /// Whether the check out is displayed
    pub async fn is_check_out_displayed(&self) -> FrontdeskResult<bool> {
        self.shown(self.page.check_out_button(self.session).await?)
            .await
    }

    /// Click the check out
    pub async fn click_check_out(&self) -> FrontdeskResult<&Self> {
        self.press(self.page.check_out_button(self.session).await?)
            .await
    }

    /// Whether the confirm check out is displayed
    pub async fn is_confirm_check_out_displayed(&self) -> FrontdeskResult<bool> {
        self.shown(self.page.confirm_check_out_button(self.session).await?)
            .await
    }

    /// Click the confirm check out
    pub async fn click_confirm_check_out(&self) -> FrontdeskResult<&Self> {
        self.press(self.page.confirm_check_out_button(self.session).await?)
            .await
    }

    // =========================================================================
    // Payment
    // =========================================================================

    /// Click the receipt voucher
    pub async fn click_receipt_voucher(&self) -> FrontdeskResult<&Self> {
        self.press(self.page.receipt_voucher_button(self.session).await?)
            .await
    }

    /// Type the payment method and press Enter to accept the suggestion
    pub async fn enter_payment_method(&self, method: &str) -> FrontdeskResult<&Self> {
        let input = self.page.payment_method_input(self.session).await?;
        self.session
            .send_keys(&input, &format!("{method}{}", keys::ENTER))
            .await?;
        Ok(self)
    }

    /// Whether the save and continue is displayed
    pub async fn is_save_and_continue_displayed(&self) -> FrontdeskResult<bool> {
        self.shown(self.page.save_and_continue_button(self.session).await?)
            .await
    }

    /// Click the save and continue
    pub async fn click_save_and_continue(&self) -> FrontdeskResult<&Self> {
        self.press(self.page.save_and_continue_button(self.session).await?)
            .await
    }

    /// Whether the success message is displayed
    pub async fn is_success_message_displayed(&self) -> FrontdeskResult<bool> {
        self.shown(self.page.success_message(self.session).await?)
            .await
    }

    /// Text of the success toast
    pub async fn success_message_text(&self) -> FrontdeskResult<String> {
        self.session
            .text(&self.page.success_message(self.session).await?)
            .await
    }
}
