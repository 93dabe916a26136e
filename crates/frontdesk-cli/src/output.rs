//! Terminal output for suite results

use console::{style, Style, StyledObject, Term};
use frontdesk::{SuiteResults, TestResult};
use std::time::Duration;

/// Writes human-readable suite progress and results
#[derive(Debug)]
pub struct Reporter {
    term: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl Reporter {
    /// Create a reporter writing to stdout
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stdout(),
            use_color,
            quiet,
        }
    }

    fn line(&self, marker: StyledObject<&str>, plain: &str, message: &str) {
        let prefix = if self.use_color {
            marker.bold().to_string()
        } else {
            plain.to_string()
        };
        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    /// Print a passed-scenario line
    pub fn success(&self, message: &str) {
        if !self.quiet {
            self.line(style("✓").green(), "PASS", message);
        }
    }

    /// Print a failed-scenario line (also in quiet mode)
    pub fn failure(&self, message: &str) {
        self.line(style("✗").red(), "FAIL", message);
    }

    /// Print an informational line
    pub fn info(&self, message: &str) {
        if !self.quiet {
            self.line(style("ℹ").blue(), "INFO", message);
        }
    }

    /// Print the suite name as a section header
    pub fn header(&self, title: &str) {
        if self.quiet {
            return;
        }
        let title = if self.use_color {
            style(title).bold().underlined().to_string()
        } else {
            format!("=== {title} ===")
        };
        let _ = self.term.write_line("");
        let _ = self.term.write_line(&title);
    }

    /// Print one scenario outcome
    pub fn result(&self, result: &TestResult) {
        let timing = format!("({} ms)", result.duration_ms);
        if result.passed {
            self.success(&format!("{} {timing}", result.name));
        } else {
            let kind = result.error_kind.as_deref().unwrap_or("Error");
            let error = result.error.as_deref().unwrap_or("unknown error");
            self.failure(&format!("{} {timing}\n    {kind}: {error}", result.name));
        }
    }

    /// Print every outcome followed by the summary line
    pub fn results(&self, results: &SuiteResults) {
        self.header(&results.suite_name);
        for result in &results.results {
            self.result(result);
        }
        if let Some(seed) = results.seed {
            self.info(&format!("random seed: {seed}"));
        }
        self.summary(
            results.passed_count(),
            results.failed_count(),
            Duration::from_millis(results.duration_ms),
        );
    }

    /// Print the suite summary
    pub fn summary(&self, passed: usize, failed: usize, duration: Duration) {
        if self.quiet && failed == 0 {
            return;
        }

        let _ = self.term.write_line("");
        let _ = self.term.write_line(&summary_line(passed, failed, duration, self.use_color));
    }
}

fn summary_line(passed: usize, failed: usize, duration: Duration, use_color: bool) -> String {
    let total = passed + failed;
    let secs = duration.as_secs_f64();
    if use_color {
        let passed_style = Style::new().green().bold();
        let failed_style = Style::new().red().bold();
        let status = if failed > 0 {
            failed_style.apply_to("FAILED")
        } else {
            passed_style.apply_to("PASSED")
        };
        format!(
            "{status} {total} scenario(s) in {secs:.2}s ({} passed, {} failed)",
            passed_style.apply_to(passed),
            if failed > 0 {
                failed_style.apply_to(failed).to_string()
            } else {
                failed.to_string()
            },
        )
    } else {
        let status = if failed > 0 { "FAILED" } else { "PASSED" };
        format!("{status} {total} scenario(s) in {secs:.2}s ({passed} passed, {failed} failed)")
    }
}
