//! Calendar arithmetic for the date picker.
//!
//! The date picker shows one month at a time with a month-name label, a year
//! label and next/previous buttons. Navigation is a linear walk: compare the
//! displayed month with the target, step one month towards it, repeat. This
//! module holds the side-effect-free half of that walk; the clicking lives in
//! [`ReservationActions`](crate::actions::ReservationActions).

use crate::result::{FrontdeskError, FrontdeskResult};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Month names as the date picker displays them
pub const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Step budget multiplier applied to the first observed month distance
pub const STEP_SAFETY_FACTOR: u64 = 2;

/// Default cap on navigation clicks
pub const DEFAULT_MAX_STEPS: u32 = 120;

/// Date format used in scenario data (`dd/MM/yyyy`)
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Month number (1-12) for a displayed month name, case-insensitively
pub fn month_number(name: &str) -> FrontdeskResult<u32> {
    let wanted = name.trim().to_lowercase();
    MONTH_NAMES
        .iter()
        .position(|m| *m == wanted)
        .map(|i| i as u32 + 1)
        .ok_or_else(|| FrontdeskError::InvalidMonthName {
            name: name.to_string(),
        })
}

/// Parse a `dd/MM/yyyy` date
pub fn parse_date(text: &str) -> FrontdeskResult<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).map_err(|e| {
        FrontdeskError::InvalidScenario {
            message: format!("invalid date {text:?} (expected dd/MM/yyyy): {e}"),
        }
    })
}

/// A calendar month
///
/// Ordering is chronological (year first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthYear {
    /// Year
    pub year: i32,
    /// Month, 1-12
    pub month: u32,
}

impl MonthYear {
    /// Create a month
    #[must_use]
    pub const fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// Month containing `date`
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }

    /// Parse the picker's month-name and year labels
    pub fn from_labels(month_label: &str, year_label: &str) -> FrontdeskResult<Self> {
        let month = month_number(month_label)?;
        let year = year_label
            .trim()
            .parse()
            .map_err(|_| FrontdeskError::InvalidCalendarLabel {
                label: year_label.to_string(),
            })?;
        Ok(Self::new(year, month))
    }

    const fn ordinal(self) -> i64 {
        self.year as i64 * 12 + self.month as i64 - 1
    }

    /// Number of single-month steps between two months
    #[must_use]
    pub const fn distance(self, other: Self) -> u64 {
        self.ordinal().abs_diff(other.ordinal())
    }

    /// The following month
    #[must_use]
    pub const fn next(self) -> Self {
        if self.month == 12 {
            Self::new(self.year + 1, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }

    /// The preceding month
    #[must_use]
    pub const fn previous(self) -> Self {
        if self.month == 1 {
            Self::new(self.year - 1, 12)
        } else {
            Self::new(self.year, self.month - 1)
        }
    }

    /// The month one step in `direction`
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        match direction {
            Direction::Next => self.next(),
            Direction::Previous => self.previous(),
        }
    }
}

impl fmt::Display for MonthYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:04}", self.month, self.year)
    }
}

/// Navigation button to press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// "Next month" button
    Next,
    /// "Previous month" button
    Previous,
}

/// Which button brings `displayed` closer to `target`, or `None` when there
#[must_use]
pub fn direction(displayed: MonthYear, target: MonthYear) -> Option<Direction> {
    match displayed.cmp(&target) {
        std::cmp::Ordering::Less => Some(Direction::Next),
        std::cmp::Ordering::Greater => Some(Direction::Previous),
        std::cmp::Ordering::Equal => None,
    }
}

/// Click budget for a walk that starts `distance` months away
#[must_use]
pub fn step_budget(distance: u64, max_steps: u32) -> u32 {
    let wanted = distance.saturating_mul(STEP_SAFETY_FACTOR).saturating_add(2);
    u32::try_from(wanted).unwrap_or(u32::MAX).min(max_steps)
}

/// Whether a day cell's text names `day`.
///
/// Cells are compared by numeric value after trimming, so zero-padded and
/// unpadded renderings both match.
#[must_use]
pub fn day_matches(cell_text: &str, day: u32) -> bool {
    cell_text.trim().parse::<u32>().is_ok_and(|d| d == day)
}

/// What to do when no day cell matches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayMatchPolicy {
    /// Fail with `DayNotFound`
    #[default]
    Strict,
    /// Select nothing and carry on
    Lenient,
}

/// Date picker timing and policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarOptions {
    /// Bound for the dialog to be displayed after opening
    pub open_timeout: Duration,
    /// Bound for the month label to change after each click
    pub step_timeout: Duration,
    /// Absolute cap on navigation clicks
    pub max_steps: u32,
    /// Unmatched day handling
    pub day_policy: DayMatchPolicy,
}

impl Default for CalendarOptions {
    fn default() -> Self {
        Self {
            open_timeout: Duration::from_secs(2),
            step_timeout: Duration::from_secs(2),
            max_steps: DEFAULT_MAX_STEPS,
            day_policy: DayMatchPolicy::Strict,
        }
    }
}

impl CalendarOptions {
    /// Set the dialog open timeout
    #[must_use]
    pub const fn with_open_timeout(mut self, timeout: Duration) -> Self {
        self.open_timeout = timeout;
        self
    }

    /// Set the per-click timeout
    #[must_use]
    pub const fn with_step_timeout(mut self, timeout: Duration) -> Self {
        self.step_timeout = timeout;
        self
    }

    /// Set the click cap
    #[must_use]
    pub const fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Set the day-match policy
    #[must_use]
    pub const fn with_day_policy(mut self, policy: DayMatchPolicy) -> Self {
        self.day_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    mod month_tests {
        use super::*;

        #[test]
        fn test_month_number_case_insensitive() {
            assert_eq!(month_number("January").unwrap(), 1);
            assert_eq!(month_number("DECEMBER").unwrap(), 12);
            assert_eq!(month_number(" may ").unwrap(), 5);
        }

        #[test]
        fn test_invalid_month_name() {
            let err = month_number("Smarch").unwrap_err();
            assert!(matches!(err, FrontdeskError::InvalidMonthName { name } if name == "Smarch"));
        }

        #[test]
        fn test_from_labels() {
            let my = MonthYear::from_labels("October", "2026").unwrap();
            assert_eq!(my, MonthYear::new(2026, 10));
            assert_eq!(my.to_string(), "10/2026");
        }

        #[test]
        fn test_from_labels_bad_year() {
            let err = MonthYear::from_labels("October", "twenty").unwrap_err();
            assert_eq!(err.kind(), "InvalidCalendarLabel");
        }

        #[test]
        fn test_year_boundaries() {
            assert_eq!(MonthYear::new(2025, 12).next(), MonthYear::new(2026, 1));
            assert_eq!(MonthYear::new(2026, 1).previous(), MonthYear::new(2025, 12));
        }

        #[test]
        fn test_parse_date() {
            let date = parse_date("05/03/2026").unwrap();
            assert_eq!(MonthYear::of(date), MonthYear::new(2026, 3));
            assert_eq!(date.day(), 5);
            assert!(parse_date("2026-03-05").is_err());
        }
    }

    mod navigation_tests {
        use super::*;

        #[test]
        fn test_direction() {
            let now = MonthYear::new(2026, 6);
            assert_eq!(direction(now, MonthYear::new(2026, 7)), Some(Direction::Next));
            assert_eq!(direction(now, MonthYear::new(2027, 1)), Some(Direction::Next));
            assert_eq!(direction(now, MonthYear::new(2026, 5)), Some(Direction::Previous));
            assert_eq!(direction(now, MonthYear::new(2025, 12)), Some(Direction::Previous));
            assert_eq!(direction(now, now), None);
        }

        #[test]
        fn test_step_budget() {
            assert_eq!(step_budget(0, 120), 2);
            assert_eq!(step_budget(3, 120), 8);
            assert_eq!(step_budget(100, 120), 120);
        }

        #[test]
        fn test_day_matches() {
            assert!(day_matches(" 5 ", 5));
            assert!(day_matches("05", 5));
            assert!(!day_matches("15", 5));
            assert!(!day_matches("", 5));
            assert!(!day_matches("5*", 5));
        }

        #[test]
        fn test_day_policy_serde() {
            let policy: DayMatchPolicy = serde_yaml_ng::from_str("lenient").unwrap();
            assert_eq!(policy, DayMatchPolicy::Lenient);
        }
    }

    fn month_year() -> impl Strategy<Value = MonthYear> {
        (1990i32..2100, 1u32..=12).prop_map(|(y, m)| MonthYear::new(y, m))
    }

    proptest! {
        #[test]
        fn prop_walk_reaches_target_within_distance(start in month_year(), target in month_year()) {
            let mut current = start;
            let mut steps = 0u64;
            while let Some(dir) = direction(current, target) {
                current = current.step(dir);
                steps += 1;
                prop_assert!(steps <= start.distance(target));
            }
            prop_assert_eq!(current, target);
            prop_assert_eq!(steps, start.distance(target));
        }

        #[test]
        fn prop_each_step_shrinks_distance(start in month_year(), target in month_year()) {
            if let Some(dir) = direction(start, target) {
                prop_assert_eq!(start.step(dir).distance(target) + 1, start.distance(target));
            }
        }

        #[test]
        fn prop_budget_covers_walk(distance in 0u64..50) {
            prop_assert!(u64::from(step_budget(distance, DEFAULT_MAX_STEPS)) >= distance);
        }

        #[test]
        fn prop_month_names_roundtrip(index in 0usize..12) {
            let name = MONTH_NAMES[index].to_uppercase();
            prop_assert_eq!(month_number(&name).unwrap(), index as u32 + 1);
        }
    }
}
