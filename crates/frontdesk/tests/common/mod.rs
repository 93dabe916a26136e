//! Scripted in-memory hotel application.
//!
//! Reproduces the screens and transitions of the reservation workflow on top
//! of `MockDriver`: every click reveals the next part of the UI the way the
//! real application does.

#![allow(dead_code)]

use chrono::{Datelike, NaiveDate};
use frontdesk::calendar::{MonthYear, MONTH_NAMES};
use frontdesk::config::{ReservationData, ScenarioTimeouts};
use frontdesk::{
    CalendarOptions, Credentials, HomePage, LoginPage, MockDom, MockDriver, MockElement,
    MockEvent, RandomChooser, ReservationPage, ReservationScenario, Selector, Session,
    SessionConfig,
};
use std::time::Duration;

pub const ENTRY_URL: &str = "https://hotel.test/login";
pub const SUCCESS_TEXT: &str = "Reservation Checked Out Successfully";

/// Knobs for the scripted application
#[derive(Debug, Clone)]
pub struct AppOptions {
    pub units: usize,
    /// Month the date picker opens on
    pub calendar_start: MonthYear,
    /// Next/previous buttons do nothing
    pub stuck_calendar: bool,
    /// Month label text replacing the real month name
    pub month_label_override: Option<String>,
    /// Day numbers missing from the picker
    pub missing_days: Vec<u32>,
    pub success_text: String,
    pub visit_purposes: usize,
    pub sources: usize,
}

impl AppOptions {
    pub fn opening_on(today: NaiveDate) -> Self {
        Self {
            units: 3,
            calendar_start: MonthYear::of(today),
            stuck_calendar: false,
            month_label_override: None,
            missing_days: Vec::new(),
            success_text: SUCCESS_TEXT.to_string(),
            visit_purposes: 4,
            sources: 3,
        }
    }
}

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
}

fn sel(locator: &frontdesk::Locator) -> Selector {
    locator.selector().clone()
}

fn month_name(month: u32) -> String {
    let name = MONTH_NAMES[month as usize - 1];
    let mut chars = name.chars();
    chars
        .next()
        .map(|c| c.to_uppercase().collect::<String>() + chars.as_str())
        .unwrap_or_default()
}

fn days_in(month: MonthYear) -> u32 {
    let next = month.next();
    let first_next = NaiveDate::from_ymd_opt(next.year, next.month, 1).unwrap();
    first_next.pred_opt().unwrap().day()
}

/// Month currently shown by the scripted picker
pub fn shown_month(dom: &MockDom, page: &ReservationPage) -> Option<MonthYear> {
    let title = sel(&page.month_title);
    let month = dom.text_of(&title, 0)?;
    let year = dom.text_of(&title, 1)?;
    MonthYear::from_labels(month, year).ok()
}

fn render_month(dom: &mut MockDom, page: &ReservationPage, month: MonthYear, options: &AppOptions) {
    let label = options
        .month_label_override
        .clone()
        .unwrap_or_else(|| month_name(month.month));
    dom.set(
        sel(&page.month_title),
        vec![MockElement::new(label), MockElement::new(month.year.to_string())],
    );
    let cells = (1..=days_in(month))
        .filter(|d| !options.missing_days.contains(d))
        .map(|d| MockElement::new(d.to_string()))
        .collect();
    dom.set(sel(&page.day_cells), cells);
}

fn close_calendar(dom: &mut MockDom, page: &ReservationPage) {
    dom.remove(&sel(&page.calendar_dialog));
    dom.remove(&sel(&page.month_title));
    dom.remove(&sel(&page.day_cells));
}

/// Build the scripted application
pub fn hotel_app(options: AppOptions) -> MockDriver {
    let driver = MockDriver::new();
    let login = LoginPage::new();
    let home = HomePage::new();
    let page = ReservationPage::new();

    for locator in [&login.username, &login.password, &login.access_code, &login.login_button] {
        driver.add_element(sel(locator), MockElement::visible());
    }

    // Login and dashboard
    {
        let row = sel(&login.property_row);
        driver.on(MockEvent::Click, sel(&login.login_button), move |dom, _| {
            dom.set(row.clone(), vec![MockElement::new("Test One")]);
        });
        let later = sel(&home.later_button);
        let tab = sel(&home.reservations_tab);
        driver.on(MockEvent::Click, sel(&login.property_row), move |dom, _| {
            dom.set(later.clone(), vec![MockElement::new("Later")]);
            dom.set(tab.clone(), vec![MockElement::new("Reservations")]);
        });
        let later = sel(&home.later_button);
        driver.on(MockEvent::Click, sel(&home.later_button), move |dom, _| {
            dom.remove(&later);
        });
    }

    // Unit board
    {
        let cards = sel(&page.unit_cards);
        let adds = sel(&page.add_reservation_buttons);
        let units = options.units;
        driver.on(MockEvent::Click, sel(&home.reservations_tab), move |dom, _| {
            dom.set(cards.clone(), vec![MockElement::new("Unit"); units]);
            dom.set(adds.clone(), vec![MockElement::new("+").hidden(); units]);
        });

        let adds = sel(&page.add_reservation_buttons);
        driver.on(MockEvent::Hover, sel(&page.unit_cards), move |dom, index| {
            dom.set_displayed(&adds, false);
            if let Some(add) = dom.get_mut(&adds, index) {
                add.displayed = true;
            }
            dom.note(format!("hover:{index}"));
        });

        let title = sel(&page.new_reservation_title);
        let date_buttons = sel(&page.check_in_date_button);
        driver.on(MockEvent::Click, sel(&page.add_reservation_buttons), move |dom, index| {
            dom.note(format!("add:{index}"));
            dom.set(title.clone(), vec![MockElement::new("New Reservation")]);
            dom.set(
                date_buttons.clone(),
                vec![MockElement::visible(), MockElement::visible()],
            );
        });
    }

    // Date picker
    {
        let (p, o) = (page.clone(), options.clone());
        driver.on(MockEvent::Click, sel(&page.check_in_date_button), move |dom, index| {
            let field = if index == 0 { "check-in" } else { "check-out" };
            dom.note(format!("open:{field}"));
            dom.set(sel(&p.calendar_dialog), vec![MockElement::visible()]);
            render_month(dom, &p, o.calendar_start, &o);
        });

        for (button, forward) in [(&page.next_month_button, true), (&page.prev_month_button, false)] {
            driver.add_element(sel(button), MockElement::visible());
            let (p, o) = (page.clone(), options.clone());
            driver.on(MockEvent::Click, sel(button), move |dom, _| {
                dom.note(if forward { "next" } else { "prev" });
                if o.stuck_calendar {
                    return;
                }
                if let Some(shown) = shown_month(dom, &p) {
                    let target = if forward { shown.next() } else { shown.previous() };
                    render_month(dom, &p, target, &o);
                }
            });
        }

        let p = page.clone();
        driver.on(MockEvent::Click, sel(&page.day_cells), move |dom, index| {
            let day = dom.text_of(&sel(&p.day_cells), index).unwrap_or_default().to_string();
            if let Some(shown) = shown_month(dom, &p) {
                dom.note(format!("picked:{:0>2}/{:02}/{}", day, shown.month, shown.year));
            }
            close_calendar(dom, &p);
        });
    }

    // Dropdowns
    {
        let purposes = sel(&page.visit_purpose_options);
        let count = options.visit_purposes;
        driver.add_element(sel(&page.visit_purpose_dropdown), MockElement::visible());
        driver.on(MockEvent::Click, sel(&page.visit_purpose_dropdown), move |dom, _| {
            dom.set(purposes.clone(), vec![MockElement::new("Purpose"); count]);
        });
        let purposes = sel(&page.visit_purpose_options);
        driver.on(MockEvent::Click, sel(&page.visit_purpose_options), move |dom, index| {
            dom.note(format!("purpose:{index}"));
            dom.remove(&purposes);
        });

        let sources = sel(&page.reservation_source_options);
        let count = options.sources;
        driver.add_element(sel(&page.reservation_source_dropdown), MockElement::visible());
        driver.on(MockEvent::Click, sel(&page.reservation_source_dropdown), move |dom, _| {
            dom.set(sources.clone(), vec![MockElement::new("Source"); count]);
        });
        let sources = sel(&page.reservation_source_options);
        driver.on(MockEvent::Click, sel(&page.reservation_source_options), move |dom, index| {
            dom.note(format!("source:{index}"));
            dom.remove(&sources);
        });
    }

    // Guest
    {
        driver.add_element(sel(&page.select_guest_button), MockElement::visible());
        let (dialog, input, search) = (
            sel(&page.guest_dialog),
            sel(&page.guest_id_input),
            sel(&page.guest_search_button),
        );
        driver.on(MockEvent::Click, sel(&page.select_guest_button), move |dom, _| {
            dom.set(dialog.clone(), vec![MockElement::visible()]);
            dom.set(input.clone(), vec![MockElement::visible()]);
            dom.set(search.clone(), vec![MockElement::new("Search")]);
        });
        let (input, row, confirm) = (
            sel(&page.guest_id_input),
            sel(&page.found_guest_row),
            sel(&page.confirm_guest_button),
        );
        driver.on(MockEvent::Click, sel(&page.guest_search_button), move |dom, _| {
            let id = dom.get(&input).first().map(|e| e.value.clone()).unwrap_or_default();
            dom.note(format!("guest:{id}"));
            dom.set(row.clone(), vec![MockElement::new(id)]);
            dom.set(confirm.clone(), vec![MockElement::new("Confirm")]);
        });
        let (dialog, check_in) = (sel(&page.guest_dialog), sel(&page.check_in_button));
        driver.on(MockEvent::Click, sel(&page.confirm_guest_button), move |dom, _| {
            dom.remove(&dialog);
            dom.set(check_in.clone(), vec![MockElement::new("Check In")]);
        });
    }

    // Check-in, check-out, payment
    {
        let chain = [
            (sel(&page.check_in_button), sel(&page.confirm_check_in_button), "check-in"),
            (sel(&page.confirm_check_in_button), sel(&page.check_out_button), "confirm check-in"),
            (sel(&page.check_out_button), sel(&page.confirm_check_out_button), "check-out"),
            (sel(&page.confirm_check_out_button), sel(&page.receipt_voucher_button), "confirm check-out"),
            (sel(&page.receipt_voucher_button), sel(&page.payment_method_input), "voucher"),
        ];
        for (clicked, revealed, label) in chain {
            driver.on(MockEvent::Click, clicked, move |dom, _| {
                dom.note(label);
                dom.set(revealed.clone(), vec![MockElement::visible()]);
            });
        }

        let (input, save) = (sel(&page.payment_method_input), sel(&page.save_and_continue_button));
        driver.on(MockEvent::Enter, sel(&page.payment_method_input), move |dom, _| {
            let method = dom.get(&input).first().map(|e| e.value.clone()).unwrap_or_default();
            dom.note(format!("payment:{method}"));
            if method == "Cash" {
                dom.set(save.clone(), vec![MockElement::new("Save and Continue")]);
            }
        });

        let toast = sel(&page.success_message);
        let text = options.success_text.clone();
        driver.on(MockEvent::Click, sel(&page.save_and_continue_button), move |dom, _| {
            dom.note("saved");
            dom.set(toast.clone(), vec![MockElement::new(text.clone())]);
        });
    }

    driver
}

pub fn session_config() -> SessionConfig {
    SessionConfig::new()
        .with_window_timeout(Duration::from_millis(200))
        .with_quit_grace(Duration::ZERO)
        .with_poll_interval(Duration::from_millis(2))
}

pub fn calendar_options() -> CalendarOptions {
    CalendarOptions::default()
        .with_open_timeout(Duration::from_millis(200))
        .with_step_timeout(Duration::from_millis(50))
}

pub fn timeouts() -> ScenarioTimeouts {
    ScenarioTimeouts {
        short_wait_ms: 300,
        long_wait_ms: 300,
        stabilize_implicit_wait_ms: 0,
        scenario_timeout_ms: Some(10_000),
    }
}

pub fn credentials() -> Credentials {
    Credentials::new("frontdesk", "secret", "01234")
}

pub fn scenario(seed: u64) -> ReservationScenario {
    ReservationScenario::new(ENTRY_URL, credentials())
        .with_data(ReservationData::default())
        .with_timeouts(timeouts())
        .with_calendar(calendar_options())
        .with_chooser(RandomChooser::seeded(seed))
        .with_today(today())
}

pub async fn open(driver: &MockDriver) -> Session {
    Session::open(Box::new(driver.clone()), session_config())
        .await
        .unwrap()
}

/// Open the date picker the way the form does
pub async fn open_calendar(session: &Session, page: &ReservationPage) {
    let button = page.check_in_date_button(session).await.unwrap();
    session.click(&button).await.unwrap();
}

/// Skip the board: reveal the reservation form directly
pub fn show_form(driver: &MockDriver) {
    let page = ReservationPage::new();
    driver.set_elements(
        sel(&page.check_in_date_button),
        vec![MockElement::visible(), MockElement::visible()],
    );
    driver.set_elements(sel(&page.new_reservation_title), vec![MockElement::new("New Reservation")]);
}
