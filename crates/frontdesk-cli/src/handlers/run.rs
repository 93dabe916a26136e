//! Run command handler

use crate::commands::RunArgs;
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::handlers::config::{resolve_config, validated};
use crate::output::Reporter;
use frontdesk::{reservation_suite, DriverLauncher, SessionScope, SuiteConfig, SuiteRunner, TestSuite};

/// Runner configured from the suite file and the run flags
#[must_use]
pub fn build_runner(config: &SuiteConfig, args: &RunArgs) -> SuiteRunner {
    let scope = if args.shared_session {
        SessionScope::PerSuite
    } else {
        config.scope
    };
    SuiteRunner::new()
        .with_scope(scope)
        .with_fail_fast(args.fail_fast || config.fail_fast)
        .with_scenario_timeout(config.scenario_timeout())
        .with_session_config(config.session_config())
        .with_seed(config.seed)
}

/// The reservation suite restricted to `--scenario`, if given
pub fn select_suite(config: &SuiteConfig, args: &RunArgs) -> CliResult<TestSuite> {
    let suite = reservation_suite(config);
    let Some(filter) = args.scenario.as_deref() else {
        return Ok(suite);
    };
    let available = suite
        .scenario_names()
        .iter()
        .map(|n| (*n).to_string())
        .collect::<Vec<_>>();
    let suite = suite.filtered(filter);
    if suite.scenario_count() == 0 {
        return Err(CliError::invalid_argument(format!(
            "no scenario matches {filter:?} (available: {})",
            available.join(", ")
        )));
    }
    Ok(suite)
}

#[cfg(feature = "browser")]
fn launcher(config: &SuiteConfig) -> CliResult<Box<dyn DriverLauncher>> {
    let browser = frontdesk::BrowserConfig::from(&config.browser);
    Ok(Box::new(frontdesk::ChromiumLauncher::new(browser)))
}

#[cfg(not(feature = "browser"))]
fn launcher(_config: &SuiteConfig) -> CliResult<Box<dyn DriverLauncher>> {
    Err(CliError::BrowserUnavailable)
}

/// Execute the run command
pub fn execute_run(cli: &CliConfig, args: &RunArgs) -> CliResult<()> {
    let config = validated(resolve_config(&args.source)?)?;
    let suite = select_suite(&config, args)?;
    let runner = build_runner(&config, args);
    let launcher = launcher(&config)?;

    let reporter = Reporter::new(cli.color.should_color(), cli.verbosity.is_quiet() || args.json);
    reporter.info(&format!(
        "running {} scenario(s) against {}",
        suite.scenario_count(),
        config.entry_url
    ));

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::runtime(format!("failed to start tokio runtime: {e}")))?;
    let results = rt.block_on(runner.run(&suite, launcher.as_ref()));

    if args.json {
        println!("{}", results.to_json()?);
    } else {
        reporter.results(&results);
    }

    if results.all_passed() {
        Ok(())
    } else {
        Err(CliError::ScenariosFailed {
            failed: results.failed_count(),
            total: results.total(),
        })
    }
}
