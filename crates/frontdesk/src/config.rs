//! Suite configuration.
//!
//! Everything environment-specific (entry URL, credentials, reservation data,
//! timeouts, browser options) lives in one YAML document. Every field has a
//! default, so an empty file is a valid (if unusable) configuration; call
//! [`SuiteConfig::validate`] before running.

use crate::calendar::{self, CalendarOptions, DayMatchPolicy, DEFAULT_MAX_STEPS};
use crate::harness::SessionScope;
use crate::pages::DEFAULT_ENTRY_URL;
use crate::result::{FrontdeskError, FrontdeskResult};
use crate::session::{SessionConfig, DEFAULT_QUIT_GRACE_MS, DEFAULT_WINDOW_TIMEOUT_MS};
use crate::wait::DEFAULT_POLL_INTERVAL_MS;
use chrono::{Duration as Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Placeholder shown instead of secrets
pub const REDACTED: &str = "<redacted>";

/// Login credentials
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    /// Login user name
    pub username: String,
    /// Login password
    pub password: String,
    /// Property access code
    pub access_code: String,
}

impl Credentials {
    /// Create credentials
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        access_code: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            access_code: access_code.into(),
        }
    }

    /// Copy with password and access code masked
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mask = |s: &str| {
            if s.is_empty() {
                String::new()
            } else {
                REDACTED.to_string()
            }
        };
        Self {
            username: self.username.clone(),
            password: mask(&self.password),
            access_code: mask(&self.access_code),
        }
    }

    fn missing(&self) -> Vec<&'static str> {
        [
            ("username", &self.username),
            ("password", &self.password),
            ("access_code", &self.access_code),
        ]
        .into_iter()
        .filter(|(_, v)| v.trim().is_empty())
        .map(|(k, _)| k)
        .collect()
    }
}

/// Data entered while creating the reservation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReservationData {
    /// Id number of an existing guest
    pub guest_id: String,
    /// Payment method typed into the voucher
    pub payment_method: String,
    /// Check-in relative to today, in days
    pub check_in_offset_days: i64,
    /// Check-out relative to today, in days
    pub check_out_offset_days: i64,
    /// Fixed check-in date (`dd/MM/yyyy`), overrides the offset
    pub check_in_date: Option<String>,
    /// Fixed check-out date (`dd/MM/yyyy`), overrides the offset
    pub check_out_date: Option<String>,
    /// Substring the success toast must contain (case-insensitive)
    pub expected_success_text: String,
}

impl Default for ReservationData {
    fn default() -> Self {
        Self {
            guest_id: "123456789".to_string(),
            payment_method: "Cash".to_string(),
            check_in_offset_days: -2,
            check_out_offset_days: 1,
            check_in_date: None,
            check_out_date: None,
            expected_success_text: "successfully".to_string(),
        }
    }
}

impl ReservationData {
    /// Check-in and check-out dates for a run on `today`
    pub fn stay(&self, today: NaiveDate) -> FrontdeskResult<(NaiveDate, NaiveDate)> {
        let resolve = |fixed: &Option<String>, offset: i64| match fixed {
            Some(text) => calendar::parse_date(text),
            None => Days::try_days(offset)
                .and_then(|delta| today.checked_add_signed(delta))
                .ok_or_else(|| FrontdeskError::InvalidScenario {
                    message: format!("day offset {offset} out of range"),
                }),
        };
        let check_in = resolve(&self.check_in_date, self.check_in_offset_days)?;
        let check_out = resolve(&self.check_out_date, self.check_out_offset_days)?;
        if check_out <= check_in {
            return Err(FrontdeskError::InvalidScenario {
                message: format!("check-out {check_out} must be after check-in {check_in}"),
            });
        }
        Ok((check_in, check_out))
    }
}

/// Session timing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Bound for the first window handle after opening
    pub window_timeout_ms: u64,
    /// Delay before the browser is released on quit
    pub quit_grace_ms: u64,
    /// Initial implicit wait for element lookups
    pub implicit_wait_ms: u64,
    /// Interval between readiness checks
    pub poll_interval_ms: u64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            window_timeout_ms: DEFAULT_WINDOW_TIMEOUT_MS,
            quit_grace_ms: DEFAULT_QUIT_GRACE_MS,
            implicit_wait_ms: 0,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl From<SessionSettings> for SessionConfig {
    fn from(s: SessionSettings) -> Self {
        Self::new()
            .with_window_timeout(Duration::from_millis(s.window_timeout_ms))
            .with_quit_grace(Duration::from_millis(s.quit_grace_ms))
            .with_implicit_wait(Duration::from_millis(s.implicit_wait_ms))
            .with_poll_interval(Duration::from_millis(s.poll_interval_ms))
    }
}

/// Readiness bounds used by the scenarios
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioTimeouts {
    /// Bound for elements that render right after an interaction
    pub short_wait_ms: u64,
    /// Bound for screens that load from the server
    pub long_wait_ms: u64,
    /// Implicit wait applied once the dashboard is up
    pub stabilize_implicit_wait_ms: u64,
    /// Overall bound per scenario; `None` disables it
    pub scenario_timeout_ms: Option<u64>,
}

impl Default for ScenarioTimeouts {
    fn default() -> Self {
        Self {
            short_wait_ms: 5_000,
            long_wait_ms: 10_000,
            stabilize_implicit_wait_ms: 3_000,
            scenario_timeout_ms: Some(300_000),
        }
    }
}

impl ScenarioTimeouts {
    /// Bound for quick readiness checks
    #[must_use]
    pub const fn short(&self) -> Duration {
        Duration::from_millis(self.short_wait_ms)
    }

    /// Bound for slow readiness checks (saves, dialogs)
    #[must_use]
    pub const fn long(&self) -> Duration {
        Duration::from_millis(self.long_wait_ms)
    }

    /// Implicit wait applied once the home screen is up
    #[must_use]
    pub const fn stabilize(&self) -> Duration {
        Duration::from_millis(self.stabilize_implicit_wait_ms)
    }
}

/// Date picker settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarSettings {
    /// Bound for the picker dialog to appear
    pub open_timeout_ms: u64,
    /// Bound for the month label to change after a click
    pub step_timeout_ms: u64,
    /// Upper limit on month clicks per date
    pub max_steps: u32,
    /// What to do when the target day is not shown
    pub day_policy: DayMatchPolicy,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            open_timeout_ms: 2_000,
            step_timeout_ms: 2_000,
            max_steps: DEFAULT_MAX_STEPS,
            day_policy: DayMatchPolicy::Strict,
        }
    }
}

impl From<CalendarSettings> for CalendarOptions {
    fn from(s: CalendarSettings) -> Self {
        Self::default()
            .with_open_timeout(Duration::from_millis(s.open_timeout_ms))
            .with_step_timeout(Duration::from_millis(s.step_timeout_ms))
            .with_max_steps(s.max_steps)
            .with_day_policy(s.day_policy)
    }
}

/// Browser launch options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserOptions {
    /// Run without a visible window
    pub headless: bool,
    /// Window width in pixels
    pub viewport_width: u32,
    /// Window height in pixels
    pub viewport_height: u32,
    /// Chromium binary; auto-detected when unset
    pub executable: Option<PathBuf>,
    /// Keep the Chromium sandbox enabled
    pub sandbox: bool,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1920,
            viewport_height: 1080,
            executable: None,
            sandbox: true,
        }
    }
}

/// Complete suite configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// Login screen URL every scenario starts from
    pub entry_url: String,
    /// Login credentials
    pub credentials: Credentials,
    /// Data entered into the reservation form
    pub reservation: ReservationData,
    /// Session timing
    pub session: SessionSettings,
    /// Per-step readiness bounds
    pub timeouts: ScenarioTimeouts,
    /// Date picker settings
    pub calendar: CalendarSettings,
    /// How browser sessions are shared between scenarios
    pub scope: SessionScope,
    /// Stop after the first failing scenario
    pub fail_fast: bool,
    /// Seed for random choices; entropy when unset
    pub seed: Option<u64>,
    /// Browser launch options
    pub browser: BrowserOptions,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            entry_url: DEFAULT_ENTRY_URL.to_string(),
            credentials: Credentials::default(),
            reservation: ReservationData::default(),
            session: SessionSettings::default(),
            timeouts: ScenarioTimeouts::default(),
            calendar: CalendarSettings::default(),
            scope: SessionScope::default(),
            fail_fast: false,
            seed: None,
            browser: BrowserOptions::default(),
        }
    }
}

impl SuiteConfig {
    /// Parse a YAML document
    pub fn from_yaml(yaml: &str) -> FrontdeskResult<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Load from a YAML file
    pub fn load(path: &Path) -> FrontdeskResult<Self> {
        let text = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loaded suite config");
        Self::from_yaml(&text)
    }

    /// Serialize as YAML
    pub fn to_yaml(&self) -> FrontdeskResult<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Copy safe to print
    #[must_use]
    pub fn redacted(&self) -> Self {
        Self {
            credentials: self.credentials.redacted(),
            ..self.clone()
        }
    }

    /// Reject configurations that cannot run
    pub fn validate(&self) -> FrontdeskResult<()> {
        if self.entry_url.trim().is_empty() {
            return Err(FrontdeskError::config("entry_url must not be empty"));
        }
        let missing = self.credentials.missing();
        if !missing.is_empty() {
            return Err(FrontdeskError::config(format!(
                "missing credentials: {}",
                missing.join(", ")
            )));
        }
        if self.reservation.check_in_date.is_none()
            && self.reservation.check_out_date.is_none()
            && self.reservation.check_out_offset_days <= self.reservation.check_in_offset_days
        {
            return Err(FrontdeskError::config(
                "check_out_offset_days must be greater than check_in_offset_days",
            ));
        }
        if self.session.poll_interval_ms == 0 {
            return Err(FrontdeskError::config("poll_interval_ms must be positive"));
        }
        if self.calendar.max_steps == 0 {
            return Err(FrontdeskError::config("calendar max_steps must be positive"));
        }
        Ok(())
    }

    /// Session settings as a [`SessionConfig`]
    #[must_use]
    pub fn session_config(&self) -> SessionConfig {
        self.session.into()
    }

    /// Date picker settings as [`CalendarOptions`]
    #[must_use]
    pub fn calendar_options(&self) -> CalendarOptions {
        self.calendar.into()
    }

    /// Per-scenario time limit, if any
    #[must_use]
    pub fn scenario_timeout(&self) -> Option<Duration> {
        self.timeouts.scenario_timeout_ms.map(Duration::from_millis)
    }
}
