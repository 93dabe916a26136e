//! Date picker navigation against the scripted hotel application.

mod common;

use chrono::NaiveDate;
use common::{calendar_options, hotel_app, open, open_calendar, show_form, today, AppOptions};
use frontdesk::{
    CalendarOptions, DayMatchPolicy, FrontdeskError, MockDriver, MonthYear, RandomChooser,
    ReservationActions, ReservationPage,
};
use proptest::prelude::*;

async fn pick(driver: &MockDriver, options: CalendarOptions, date: NaiveDate) -> Result<(), FrontdeskError> {
    show_form(driver);
    let session = open(driver).await;
    let chooser = RandomChooser::seeded(0);
    let page = ReservationPage::new();
    open_calendar(&session, &page).await;
    ReservationActions::new(&session, &chooser)
        .with_calendar(options)
        .select_date_from_calendar(date)
        .await
        .map(|_| ())
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[tokio::test]
async fn test_same_month_needs_no_clicks() {
    let app = hotel_app(AppOptions::opening_on(today()));
    pick(&app, calendar_options(), date(2026, 3, 14)).await.unwrap();

    assert_eq!(app.count_calls("click:css `.p-datepicker-next`"), 0);
    assert!(app.notes().contains(&"picked:14/03/2026".to_string()));
    assert!(!app.notes().contains(&"next".to_string()));
}

#[tokio::test]
async fn test_navigates_forward_across_year() {
    let app = hotel_app(AppOptions::opening_on(today()));
    pick(&app, calendar_options(), date(2027, 1, 5)).await.unwrap();

    let notes = app.notes();
    assert_eq!(notes.iter().filter(|n| *n == "next").count(), 10);
    assert!(notes.contains(&"picked:05/01/2027".to_string()));
}

#[tokio::test]
async fn test_navigates_backward() {
    let app = hotel_app(AppOptions::opening_on(today()));
    pick(&app, calendar_options(), date(2025, 11, 30)).await.unwrap();

    let notes = app.notes();
    assert_eq!(notes.iter().filter(|n| *n == "prev").count(), 4);
    assert!(!notes.contains(&"next".to_string()));
    assert!(notes.contains(&"picked:30/11/2025".to_string()));
}

#[tokio::test]
async fn test_stuck_calendar_times_out() {
    let mut options = AppOptions::opening_on(today());
    options.stuck_calendar = true;
    let app = hotel_app(options);

    let err = pick(&app, calendar_options(), date(2026, 6, 1)).await.unwrap_err();
    match err {
        FrontdeskError::CalendarNavigationTimeout { target, steps, reason } => {
            assert_eq!(target, "06/2026");
            assert_eq!(steps, 1);
            assert!(reason.contains("03/2026"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!app.notes().iter().any(|n| n.starts_with("picked:")));
}

#[tokio::test]
async fn test_unknown_month_label() {
    let mut options = AppOptions::opening_on(today());
    options.month_label_override = Some("Thermidor".to_string());
    let app = hotel_app(options);

    let err = pick(&app, calendar_options(), date(2026, 4, 1)).await.unwrap_err();
    assert!(matches!(err, FrontdeskError::InvalidMonthName { ref name } if name == "Thermidor"));
    assert!(!app.notes().contains(&"next".to_string()));
}

#[tokio::test]
async fn test_month_label_case_is_ignored() {
    let mut options = AppOptions::opening_on(today());
    options.month_label_override = Some("MARCH".to_string());
    let app = hotel_app(options);

    pick(&app, calendar_options(), date(2026, 3, 9)).await.unwrap();
    assert!(app.notes().contains(&"picked:09/03/2026".to_string()));
}

#[tokio::test]
async fn test_missing_day_strict() {
    let mut options = AppOptions::opening_on(today());
    options.missing_days = vec![15];
    let app = hotel_app(options);

    let err = pick(&app, calendar_options(), date(2026, 3, 15)).await.unwrap_err();
    assert!(matches!(err, FrontdeskError::DayNotFound { day: 15 }));
}

#[tokio::test]
async fn test_missing_day_lenient_selects_nothing() {
    let mut options = AppOptions::opening_on(today());
    options.missing_days = vec![15];
    let app = hotel_app(options);

    let lenient = calendar_options().with_day_policy(DayMatchPolicy::Lenient);
    pick(&app, lenient, date(2026, 3, 15)).await.unwrap();
    assert!(!app.notes().iter().any(|n| n.starts_with("picked:")));
}

#[tokio::test]
async fn test_closed_calendar_times_out_waiting_for_dialog() {
    let app = hotel_app(AppOptions::opening_on(today()));
    show_form(&app);
    let session = open(&app).await;
    let chooser = RandomChooser::seeded(0);

    let err = ReservationActions::new(&session, &chooser)
        .with_calendar(calendar_options())
        .select_date_from_calendar(date(2026, 3, 2))
        .await
        .unwrap_err();
    assert!(matches!(err, FrontdeskError::WaitTimeout { .. } | FrontdeskError::ElementNotFound { .. }));
}

#[tokio::test]
async fn test_step_budget_caps_long_walks() {
    let app = hotel_app(AppOptions::opening_on(today()));
    let capped = calendar_options().with_max_steps(3);

    let err = pick(&app, capped, date(2027, 3, 1)).await.unwrap_err();
    assert!(matches!(err, FrontdeskError::CalendarNavigationTimeout { steps: 3, .. }));
    assert_eq!(app.notes().iter().filter(|n| *n == "next").count(), 3);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_any_target_month_is_reached(offset in -18i32..=18, day in 1u32..=28) {
        let start = MonthYear::of(today());
        let mut target = start;
        for _ in 0..offset.unsigned_abs() {
            target = if offset > 0 { target.next() } else { target.previous() };
        }
        let wanted = date(target.year, target.month, day);

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap();
        let app = hotel_app(AppOptions::opening_on(today()));
        runtime
            .block_on(pick(&app, calendar_options(), wanted))
            .unwrap();

        let notes = app.notes();
        let clicks = notes.iter().filter(|n| *n == "next" || *n == "prev").count();
        prop_assert_eq!(clicks as u32, offset.unsigned_abs());
        let expected = format!("picked:{}", wanted.format("%d/%m/%Y"));
        prop_assert!(notes.contains(&expected));
    }
}
