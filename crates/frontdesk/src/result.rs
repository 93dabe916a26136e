//! Result and error types for Frontdesk.

use thiserror::Error;

/// Result type for Frontdesk operations
pub type FrontdeskResult<T> = Result<T, FrontdeskError>;

/// Errors that can occur while driving the application under test
#[derive(Debug, Error)]
pub enum FrontdeskError {
    /// No window handle appeared after the browser was opened
    #[error("Browser session did not report a window within {timeout_ms}ms")]
    SessionStartTimeout {
        /// Bound that elapsed
        timeout_ms: u64,
    },

    /// Operation attempted on a session that was never opened or already quit
    #[error("Browser session is not active")]
    SessionNotActive,

    /// Zero elements matched a single-element lookup
    #[error("No element matches {locator}")]
    ElementNotFound {
        /// Locator description
        locator: String,
    },

    /// Window index outside the current set of handles
    #[error("Window index {index} out of range ({count} window(s) open)")]
    WindowIndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of windows at call time
        count: usize,
    },

    /// Explicit wait elapsed before its predicate became true
    #[error("Timed out after {elapsed_ms}ms (limit {timeout_ms}ms) waiting for {description}")]
    WaitTimeout {
        /// What was waited for
        description: String,
        /// Time actually spent polling
        elapsed_ms: u64,
        /// Configured limit
        timeout_ms: u64,
    },

    /// Calendar title shows a month name outside the lookup table
    #[error("Invalid month name: {name}")]
    InvalidMonthName {
        /// Label text as displayed
        name: String,
    },

    /// Calendar year label is not a number
    #[error("Invalid calendar label: {label}")]
    InvalidCalendarLabel {
        /// Label text as displayed
        label: String,
    },

    /// Month navigation did not converge on the target
    #[error("Calendar navigation to {target} gave up after {steps} step(s): {reason}")]
    CalendarNavigationTimeout {
        /// Target month as `MM/YYYY`
        target: String,
        /// Clicks performed
        steps: u32,
        /// Why navigation stopped
        reason: String,
    },

    /// No day cell of the displayed month matches the target day
    #[error("Day {day} not found in the displayed calendar month")]
    DayNotFound {
        /// Target day of month
        day: u32,
    },

    /// A random choice was requested over an empty collection
    #[error("No {what} available to choose from")]
    NoElementsAvailable {
        /// Collection description
        what: String,
    },

    /// Business outcome check failed
    #[error("Assertion failed: {message}")]
    AssertionFailed {
        /// Error message
        message: String,
    },

    /// Scenario input rejected before the browser was touched
    #[error("Invalid scenario: {message}")]
    InvalidScenario {
        /// Error message
        message: String,
    },

    /// Browser backend failure
    #[error("Driver error during {operation}: {message}")]
    Driver {
        /// Driver operation that failed
        operation: String,
        /// Error message
        message: String,
    },

    /// Browser launch error
    #[error("Failed to launch browser: {message}")]
    BrowserLaunch {
        /// Error message
        message: String,
    },

    /// Scenario exceeded its overall time budget
    #[error("Operation timed out after {ms}ms")]
    Timeout {
        /// Timeout in milliseconds
        ms: u64,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FrontdeskError {
    /// Create a driver error
    #[must_use]
    pub fn driver(operation: impl Into<String>, message: impl ToString) -> Self {
        Self::Driver {
            operation: operation.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether a readiness poll should treat this error as "not yet"
    ///
    /// Elements that have not rendered yet are the normal state of a wait,
    /// everything else aborts the wait.
    #[must_use]
    pub const fn is_not_ready(&self) -> bool {
        matches!(
            self,
            Self::ElementNotFound { .. } | Self::NoElementsAvailable { .. }
        )
    }

    /// Short variant label used in scenario reports
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::SessionStartTimeout { .. } => "SessionStartTimeout",
            Self::SessionNotActive => "SessionNotActive",
            Self::ElementNotFound { .. } => "ElementNotFound",
            Self::WindowIndexOutOfRange { .. } => "WindowIndexOutOfRange",
            Self::WaitTimeout { .. } => "WaitTimeout",
            Self::InvalidMonthName { .. } => "InvalidMonthName",
            Self::InvalidCalendarLabel { .. } => "InvalidCalendarLabel",
            Self::CalendarNavigationTimeout { .. } => "CalendarNavigationTimeout",
            Self::DayNotFound { .. } => "DayNotFound",
            Self::NoElementsAvailable { .. } => "NoElementsAvailable",
            Self::AssertionFailed { .. } => "AssertionFailed",
            Self::InvalidScenario { .. } => "InvalidScenario",
            Self::Driver { .. } => "Driver",
            Self::BrowserLaunch { .. } => "BrowserLaunch",
            Self::Timeout { .. } => "Timeout",
            Self::Config { .. } => "Config",
            Self::Io(_) => "Io",
            Self::Yaml(_) => "Yaml",
            Self::Json(_) => "Json",
        }
    }
}
