//! Suite runner.
//!
//! A [`TestSuite`] is an ordered list of named [`Scenario`]s. The
//! [`SuiteRunner`] gives each scenario a [`Session`] (its own, or one shared by
//! the whole suite), runs the per-scenario setup hook and the scenario body,
//! and turns every outcome into a [`TestResult`]. An error fails exactly the
//! scenario that raised it.

use crate::driver::FrontdeskDriver;
use crate::result::{FrontdeskError, FrontdeskResult};
use crate::session::{Session, SessionConfig};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// How long a browser session lives
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionScope {
    /// Every scenario opens and quits its own session
    #[default]
    PerScenario,
    /// One session is opened before the first scenario and quit after the last
    PerSuite,
}

/// Source of fresh drivers
#[async_trait]
pub trait DriverLauncher: Send + Sync {
    /// Start a new browser and return its driver
    async fn launch(&self) -> FrontdeskResult<Box<dyn FrontdeskDriver>>;
}

#[async_trait]
impl<F> DriverLauncher for F
where
    F: Fn() -> FrontdeskResult<Box<dyn FrontdeskDriver>> + Send + Sync,
{
    async fn launch(&self) -> FrontdeskResult<Box<dyn FrontdeskDriver>> {
        self()
    }
}

/// One end-to-end business-outcome test
#[async_trait]
pub trait Scenario: Send + Sync {
    /// Name shown in reports
    fn name(&self) -> &str;

    /// Runs before the scenario body on the same session
    async fn setup(&self, _session: &Session) -> FrontdeskResult<()> {
        Ok(())
    }

    /// Scenario body
    async fn run(&self, session: &Session) -> FrontdeskResult<()>;
}

/// A test suite containing multiple scenarios
pub struct TestSuite {
    /// Suite name
    pub name: String,
    scenarios: Vec<Box<dyn Scenario>>,
}

impl std::fmt::Debug for TestSuite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestSuite")
            .field("name", &self.name)
            .field("scenarios", &self.scenario_names())
            .finish()
    }
}

impl TestSuite {
    /// Create an empty suite
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scenarios: Vec::new(),
        }
    }

    /// Append a scenario
    pub fn add_scenario(&mut self, scenario: impl Scenario + 'static) {
        self.scenarios.push(Box::new(scenario));
    }

    /// Append a scenario (builder form)
    #[must_use]
    pub fn with_scenario(mut self, scenario: impl Scenario + 'static) -> Self {
        self.add_scenario(scenario);
        self
    }

    /// Keep only scenarios whose name contains `filter`
    #[must_use]
    pub fn filtered(mut self, filter: &str) -> Self {
        self.scenarios.retain(|s| s.name().contains(filter));
        self
    }

    /// Get the number of scenarios
    #[must_use]
    pub fn scenario_count(&self) -> usize {
        self.scenarios.len()
    }

    /// Scenario names in run order
    #[must_use]
    pub fn scenario_names(&self) -> Vec<&str> {
        self.scenarios.iter().map(|s| s.name()).collect()
    }
}

/// Result of running a single scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResult {
    /// Scenario name
    pub name: String,
    /// Whether scenario passed
    pub passed: bool,
    /// Error message if failed
    pub error: Option<String>,
    /// Error label (e.g. `WaitTimeout`) if failed
    pub error_kind: Option<String>,
    /// Scenario duration in milliseconds
    pub duration_ms: u64,
}

impl TestResult {
    /// Create a passing test result
    #[must_use]
    pub fn pass(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: true,
            error: None,
            error_kind: None,
            duration_ms: 0,
        }
    }

    /// Create a failing test result
    #[must_use]
    pub fn fail(name: impl Into<String>, error: &FrontdeskError) -> Self {
        Self {
            name: name.into(),
            passed: false,
            error: Some(error.to_string()),
            error_kind: Some(error.kind().to_string()),
            duration_ms: 0,
        }
    }

    /// Set duration
    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration_ms = duration.as_millis() as u64;
        self
    }

    /// Scenario duration
    #[must_use]
    pub const fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

/// Results from running a test suite
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteResults {
    /// Suite name
    pub suite_name: String,
    /// Individual scenario results, in run order
    pub results: Vec<TestResult>,
    /// Total duration in milliseconds
    pub duration_ms: u64,
    /// Seed used for random choices, if any
    pub seed: Option<u64>,
}

impl SuiteResults {
    /// Check if all scenarios passed
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|r| r.passed)
    }

    /// Count passed scenarios
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.results.iter().filter(|r| r.passed).count()
    }

    /// Count failed scenarios
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.results.iter().filter(|r| !r.passed).count()
    }

    /// Get total scenario count
    #[must_use]
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// Get failed scenarios
    #[must_use]
    pub fn failures(&self) -> Vec<&TestResult> {
        self.results.iter().filter(|r| !r.passed).collect()
    }

    /// Pretty-printed JSON report
    pub fn to_json(&self) -> FrontdeskResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Runs suites against browsers from a [`DriverLauncher`]
#[derive(Debug, Clone, Default)]
pub struct SuiteRunner {
    scope: SessionScope,
    fail_fast: bool,
    scenario_timeout: Option<Duration>,
    session: SessionConfig,
    seed: Option<u64>,
}

impl SuiteRunner {
    /// Create a runner with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the session scope
    #[must_use]
    pub const fn with_scope(mut self, scope: SessionScope) -> Self {
        self.scope = scope;
        self
    }

    /// Stop after the first failure
    #[must_use]
    pub const fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Bound each scenario (setup included)
    #[must_use]
    pub const fn with_scenario_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.scenario_timeout = timeout;
        self
    }

    /// Session settings for every opened session
    #[must_use]
    pub const fn with_session_config(mut self, config: SessionConfig) -> Self {
        self.session = config;
        self
    }

    /// Seed recorded in the results
    #[must_use]
    pub const fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    async fn open_session(&self, launcher: &dyn DriverLauncher) -> FrontdeskResult<Session> {
        let driver = launcher.launch().await?;
        Session::open(driver, self.session).await
    }

    async fn close_session(mut session: Session) {
        if let Err(e) = session.quit().await {
            tracing::warn!(error = %e, "failed to close session");
        }
    }

    async fn run_one(&self, scenario: &dyn Scenario, session: &Session) -> TestResult {
        let name = scenario.name();
        let start = Instant::now();
        tracing::info!(scenario = name, "scenario started");

        let body = async {
            scenario.setup(session).await?;
            scenario.run(session).await
        };
        let outcome = match self.scenario_timeout {
            Some(limit) => tokio::time::timeout(limit, body)
                .await
                .unwrap_or_else(|_| {
                    Err(FrontdeskError::Timeout {
                        ms: limit.as_millis() as u64,
                    })
                }),
            None => body.await,
        };

        let result = match outcome {
            Ok(()) => {
                tracing::info!(scenario = name, "scenario passed");
                TestResult::pass(name)
            }
            Err(e) => {
                tracing::error!(scenario = name, kind = e.kind(), error = %e, "scenario failed");
                TestResult::fail(name, &e)
            }
        };
        result.with_duration(start.elapsed())
    }

    /// Run every scenario of `suite` in order
    pub async fn run(&self, suite: &TestSuite, launcher: &dyn DriverLauncher) -> SuiteResults {
        let start = Instant::now();
        let mut results = Vec::with_capacity(suite.scenario_count());
        tracing::info!(
            suite = %suite.name,
            scenarios = suite.scenario_count(),
            scope = ?self.scope,
            "suite started"
        );

        let shared = match self.scope {
            SessionScope::PerSuite => match self.open_session(launcher).await {
                Ok(session) => Some(session),
                Err(e) => {
                    tracing::error!(error = %e, "suite session failed to open");
                    results.extend(
                        suite
                            .scenarios
                            .iter()
                            .map(|s| TestResult::fail(s.name(), &e)),
                    );
                    return self.finish(suite, results, start);
                }
            },
            SessionScope::PerScenario => None,
        };

        for scenario in &suite.scenarios {
            let result = match &shared {
                Some(session) => self.run_one(scenario.as_ref(), session).await,
                None => match self.open_session(launcher).await {
                    Ok(session) => {
                        let result = self.run_one(scenario.as_ref(), &session).await;
                        Self::close_session(session).await;
                        result
                    }
                    Err(e) => {
                        tracing::error!(scenario = scenario.name(), error = %e, "session failed to open");
                        TestResult::fail(scenario.name(), &e)
                    }
                },
            };

            let failed = !result.passed;
            results.push(result);
            if failed && self.fail_fast {
                tracing::warn!("fail-fast: skipping remaining scenarios");
                break;
            }
        }

        if let Some(session) = shared {
            Self::close_session(session).await;
        }
        self.finish(suite, results, start)
    }

    fn finish(&self, suite: &TestSuite, results: Vec<TestResult>, start: Instant) -> SuiteResults {
        let results = SuiteResults {
            suite_name: suite.name.clone(),
            results,
            duration_ms: start.elapsed().as_millis() as u64,
            seed: self.seed,
        };
        tracing::info!(
            suite = %results.suite_name,
            passed = results.passed_count(),
            failed = results.failed_count(),
            "suite finished"
        );
        results
    }
}
