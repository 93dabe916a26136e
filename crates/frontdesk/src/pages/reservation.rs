use crate::driver::ElementHandle;
use crate::locator::Locator;
use crate::page_object::PageObject;
use crate::result::FrontdeskResult;
use crate::session::Session;

/// Reservations board and the new-reservation form.
///
/// The form embeds a date picker dialog, kendo dropdowns, a guest search
/// dialog and the payment voucher panel; they are all declared here because
/// they live on the same route.
#[derive(Debug, Clone)]
pub struct ReservationPage {
    /// Unit cards on the reservations board
    pub unit_cards: Locator,
    /// One per unit card, revealed on hover
    pub add_reservation_buttons: Locator,
    /// Opens the picker for the check-in date
    pub check_in_date_button: Locator,
    /// Opens the picker for the check-out date
    pub check_out_date_button: Locator,
    /// Visit purpose dropdown
    pub visit_purpose_dropdown: Locator,
    /// Reservation source dropdown
    pub reservation_source_dropdown: Locator,
    /// Open visit-purpose dropdown entries
    pub visit_purpose_options: Locator,
    /// Open reservation-source dropdown entries
    pub reservation_source_options: Locator,
    /// Heading of the new reservation form
    pub new_reservation_title: Locator,
    /// Date picker dialog
    pub calendar_dialog: Locator,
    /// Next month button
    pub next_month_button: Locator,
    /// Previous month arrow
    pub prev_month_button: Locator,
    /// Month name label
    pub month_title: Locator,
    /// Year label
    pub year_title: Locator,
    /// Day cells of the displayed month only
    pub day_cells: Locator,
    /// Select guest button
    pub select_guest_button: Locator,
    /// Guest id search field
    pub guest_id_input: Locator,
    /// Guest search button
    pub guest_search_button: Locator,
    /// Guest search dialog
    pub guest_dialog: Locator,
    /// First row of the guest search results
    pub found_guest_row: Locator,
    /// Confirm guest button
    pub confirm_guest_button: Locator,
    /// Check in button
    pub check_in_button: Locator,
    /// Confirm check in button
    pub confirm_check_in_button: Locator,
    /// Check out button
    pub check_out_button: Locator,
    /// Confirm check out button
    pub confirm_check_out_button: Locator,
    /// Adds a receipt voucher
    pub receipt_voucher_button: Locator,
    /// Payment method field
    pub payment_method_input: Locator,
    /// Save and continue button
    pub save_and_continue_button: Locator,
    /// Toast shown after a successful save
    pub success_message: Locator,
}

impl Default for ReservationPage {
    fn default() -> Self {
        Self::new()
    }
}

impl ReservationPage {
    /// Create with the default locators
    #[must_use]
    pub fn new() -> Self {
        let calendar_buttons = "div[class='input-group-append']";
        let calendar_title = ".p-datepicker-title>span";
        let dialog = "div[role='dialog']";

        Self {
            unit_cards: Locator::new("unit cards", "div[class='col-lg-12 pdr-0']>div"),
            add_reservation_buttons: Locator::new(
                "add reservation buttons",
                "div[class = 'unit-card__action--primary us-add ng-star-inserted']",
            ),
            check_in_date_button: Locator::new("check-in date button", calendar_buttons).nth(0),
            check_out_date_button: Locator::new("check-out date button", calendar_buttons).nth(1),
            visit_purpose_dropdown: Locator::new(
                "visit purpose dropdown",
                ".col-md-12>kendo-dropdownlist>span[class='k-dropdown-wrap k-state-default']",
            ),
            reservation_source_dropdown: Locator::new(
                "reservation source dropdown",
                ".col-md-5>kendo-dropdownlist>span[class='k-dropdown-wrap k-state-default']",
            ),
            visit_purpose_options: Locator::new(
                "visit purpose options",
                "div[class='k-list-scroller']>ul>li",
            ),
            reservation_source_options: Locator::new(
                "reservation source options",
                "div[class='k-list-scroller']>ul>li[role='option']",
            ),
            new_reservation_title: Locator::new(
                "new reservation title",
                "h2[class = 'page-header__title ng-star-inserted']",
            ),
            calendar_dialog: Locator::new("calendar dialog", dialog),
            next_month_button: Locator::new("next month button", ".p-datepicker-next"),
            prev_month_button: Locator::new("previous month button", ".p-datepicker-prev"),
            month_title: Locator::new("month title", calendar_title).nth(0),
            year_title: Locator::new("year title", calendar_title).nth(1),
            day_cells: Locator::new(
                "day cells",
                "table.p-datepicker-calendar td:not(.p-datepicker-other-month) span",
            ),
            select_guest_button: Locator::new(
                "select guest button",
                "button[class='n-button n-button--primary u-m-end-15']",
            ),
            guest_id_input: Locator::new("guest id input", "input[placeholder='ID Number']"),
            guest_search_button: Locator::new(
                "guest search button",
                "button[class='button button--primary']",
            ),
            guest_dialog: Locator::new("guest dialog", dialog),
            found_guest_row: Locator::new(
                "found guest row",
                "#guestFormDialogContainer>kendo-grid>div>kendo-grid-list>div>div>table>tbody[role='presentation']>tr[role='row']",
            ),
            confirm_guest_button: Locator::new(
                "confirm guest button",
                "button[class='n-button n-button--primary ng-star-inserted']",
            ),
            check_in_button: Locator::new(
                "check-in button",
                ".u-d-flex.u-mb-15>button.button--green-border",
            ),
            confirm_check_in_button: Locator::new(
                "confirm check-in button",
                ".m-3.ng-star-inserted>button",
            ),
            check_out_button: Locator::new(
                "check-out button",
                ".u-d-flex.u-mb-15>button.button--danger-border",
            ),
            confirm_check_out_button: Locator::new(
                "confirm check-out button",
                "button[class='n-button n-button--primary']",
            ),
            receipt_voucher_button: Locator::new(
                "receipt voucher button",
                "button[class = 'k-button k-state-active k-group-start']",
            ),
            payment_method_input: Locator::new(
                "payment method input",
                "input[placeholder='Select Payment Method']",
            ),
            save_and_continue_button: Locator::new(
                "save and continue button",
                "div.ng-star-inserted>button.button.button--primary.ng-star-inserted",
            ),
            success_message: Locator::new(
                "success message",
                "div.toast-success[style='display: block;']>div.toast-message",
            ),
        }
    }

    // Collections

    /// All unit cards in document order
    pub async fn unit_cards(&self, session: &Session) -> FrontdeskResult<Vec<ElementHandle>> {
        session.find_all(&self.unit_cards).await
    }

    /// All add reservation buttons in document order
    pub async fn add_reservation_buttons(
        &self,
        session: &Session,
    ) -> FrontdeskResult<Vec<ElementHandle>> {
        session.find_all(&self.add_reservation_buttons).await
    }

    /// Add-reservation button belonging to the unit card at `index`
    pub async fn add_reservation_button(
        &self,
        session: &Session,
        index: usize,
    ) -> FrontdeskResult<ElementHandle> {
        session
            .find(&self.add_reservation_buttons.clone().nth(index))
            .await
    }

    /// All visit purpose options in document order
    pub async fn visit_purpose_options(
        &self,
        session: &Session,
    ) -> FrontdeskResult<Vec<ElementHandle>> {
        session.find_all(&self.visit_purpose_options).await
    }

    /// All reservation source options in document order
    pub async fn reservation_source_options(
        &self,
        session: &Session,
    ) -> FrontdeskResult<Vec<ElementHandle>> {
        session.find_all(&self.reservation_source_options).await
    }

    /// All day cells in document order
    pub async fn day_cells(&self, session: &Session) -> FrontdeskResult<Vec<ElementHandle>> {
        session.find_all(&self.day_cells).await
    }

    // Single elements

    /// Resolve the check in date button
    pub async fn check_in_date_button(&self, session: &Session) -> FrontdeskResult<ElementHandle> {
        session.find(&self.check_in_date_button).await
    }

    /// Resolve the check out date button
    pub async fn check_out_date_button(
        &self,
        session: &Session,
    ) -> FrontdeskResult<ElementHandle> {
        session.find(&self.check_out_date_button).await
    }

    /// Resolve the visit purpose dropdown
    pub async fn visit_purpose_dropdown(
        &self,
        session: &Session,
    ) -> FrontdeskResult<ElementHandle> {
        session.find(&self.visit_purpose_dropdown).await
    }

    /// Resolve the reservation source dropdown
    pub async fn reservation_source_dropdown(
        &self,
        session: &Session,
    ) -> FrontdeskResult<ElementHandle> {
        session.find(&self.reservation_source_dropdown).await
    }

    /// Resolve the new reservation title
    pub async fn new_reservation_title(
        &self,
        session: &Session,
    ) -> FrontdeskResult<ElementHandle> {
        session.find(&self.new_reservation_title).await
    }

    /// Resolve the calendar dialog
    pub async fn calendar_dialog(&self, session: &Session) -> FrontdeskResult<ElementHandle> {
        session.find(&self.calendar_dialog).await
    }

    /// Resolve the next month button
    pub async fn next_month_button(&self, session: &Session) -> FrontdeskResult<ElementHandle> {
        session.find(&self.next_month_button).await
    }

    /// Resolve the prev month button
    pub async fn prev_month_button(&self, session: &Session) -> FrontdeskResult<ElementHandle> {
        session.find(&self.prev_month_button).await
    }

    /// Resolve the month title
    pub async fn month_title(&self, session: &Session) -> FrontdeskResult<ElementHandle> {
        session.find(&self.month_title).await
    }

    /// Resolve the year title
    pub async fn year_title(&self, session: &Session) -> FrontdeskResult<ElementHandle> {
        session.find(&self.year_title).await
    }

    /// Resolve the select guest button
    pub async fn select_guest_button(&self, session: &Session) -> FrontdeskResult<ElementHandle> {
        session.find(&self.select_guest_button).await
    }

    /// Resolve the guest id input
    pub async fn guest_id_input(&self, session: &Session) -> FrontdeskResult<ElementHandle> {
        session.find(&self.guest_id_input).await
    }

    /// Resolve the guest search button
    pub async fn guest_search_button(&self, session: &Session) -> FrontdeskResult<ElementHandle> {
        session.find(&self.guest_search_button).await
    }

    /// Resolve the guest dialog
    pub async fn guest_dialog(&self, session: &Session) -> FrontdeskResult<ElementHandle> {
        session.find(&self.guest_dialog).await
    }

    /// Resolve the found guest row
    pub async fn found_guest_row(&self, session: &Session) -> FrontdeskResult<ElementHandle> {
        session.find(&self.found_guest_row).await
    }

    /// Resolve the confirm guest button
    pub async fn confirm_guest_button(
        &self,
        session: &Session,
    ) -> FrontdeskResult<ElementHandle> {
        session.find(&self.confirm_guest_button).await
    }

    /// Resolve the check in button
    pub async fn check_in_button(&self, session: &Session) -> FrontdeskResult<ElementHandle> {
        session.find(&self.check_in_button).await
    }

    /// Resolve the confirm check in button
    pub async fn confirm_check_in_button(
        &self,
        session: &Session,
    ) -> FrontdeskResult<ElementHandle> {
        session.find(&self.confirm_check_in_button).await
    }

    /// Resolve the check out button
    pub async fn check_out_button(&self, session: &Session) -> FrontdeskResult<ElementHandle> {
        session.find(&self.check_out_button).await
    }

    /// Resolve the confirm check out button
    pub async fn confirm_check_out_button(
        &self,
        session: &Session,
    ) -> FrontdeskResult<ElementHandle> {
        session.find(&self.confirm_check_out_button).await
    }

    /// Resolve the receipt voucher button
    pub async fn receipt_voucher_button(
        &self,
        session: &Session,
    ) -> FrontdeskResult<ElementHandle> {
        session.find(&self.receipt_voucher_button).await
    }

    /// Resolve the payment method input
    pub async fn payment_method_input(
        &self,
        session: &Session,
    ) -> FrontdeskResult<ElementHandle> {
        session.find(&self.payment_method_input).await
    }

    /// Resolve the save and continue button
    pub async fn save_and_continue_button(
        &self,
        session: &Session,
    ) -> FrontdeskResult<ElementHandle> {
        session.find(&self.save_and_continue_button).await
    }

    /// Resolve the success message
    pub async fn success_message(&self, session: &Session) -> FrontdeskResult<ElementHandle> {
        session.find(&self.success_message).await
    }
}

impl PageObject for ReservationPage {
    fn page_name(&self) -> &'static str {
        "reservation"
    }

    fn url_pattern(&self) -> &str {
        "/reservations"
    }

    fn locators(&self) -> Vec<&Locator> {
        vec![
            &self.unit_cards,
            &self.add_reservation_buttons,
            &self.check_in_date_button,
            &self.check_out_date_button,
            &self.visit_purpose_dropdown,
            &self.reservation_source_dropdown,
            &self.visit_purpose_options,
            &self.reservation_source_options,
            &self.new_reservation_title,
            &self.calendar_dialog,
            &self.next_month_button,
            &self.prev_month_button,
            &self.month_title,
            &self.year_title,
            &self.day_cells,
            &self.select_guest_button,
            &self.guest_id_input,
            &self.guest_search_button,
            &self.guest_dialog,
            &self.found_guest_row,
            &self.confirm_guest_button,
            &self.check_in_button,
            &self.confirm_check_in_button,
            &self.check_out_button,
            &self.confirm_check_out_button,
            &self.receipt_voucher_button,
            &self.payment_method_input,
            &self.save_and_continue_button,
            &self.success_message,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calendar_buttons_share_selector() {
        let page = ReservationPage::new();
        assert_eq!(
            page.check_in_date_button.selector(),
            page.check_out_date_button.selector()
        );
        assert_eq!(page.check_in_date_button.index(), Some(0));
        assert_eq!(page.check_out_date_button.index(), Some(1));
    }

    #[test]
    fn test_day_cells_skip_adjacent_months() {
        let page = ReservationPage::new();
        assert!(page
            .day_cells
            .selector()
            .value()
            .contains(":not(.p-datepicker-other-month)"));
    }

    #[test]
    fn test_declares_every_element() {
        assert_eq!(ReservationPage::new().locators().len(), 29);
    }
}
