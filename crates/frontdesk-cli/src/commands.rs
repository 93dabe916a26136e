//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Frontdesk: end-to-end reservation suite for the hotel web application
#[derive(Parser, Debug)]
#[command(name = "frontdesk")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (only failures are printed)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Emit logs as JSON lines
    #[arg(long, global = true, env = "FRONTDESK_LOG_JSON")]
    pub log_json: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the reservation suite against a browser
    Run(RunArgs),

    /// Print the effective configuration (credentials redacted)
    Config(ConfigArgs),

    /// Print the locator table of every screen
    Locators(LocatorsArgs),
}

/// Configuration source and overrides shared by `run` and `config`
#[derive(Parser, Debug, Clone, Default)]
pub struct ConfigSource {
    /// Suite configuration file (YAML)
    #[arg(short, long, env = "FRONTDESK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Entry (login) URL
    #[arg(long, env = "FRONTDESK_URL")]
    pub url: Option<String>,

    /// Login username
    #[arg(long, env = "FRONTDESK_USERNAME")]
    pub username: Option<String>,

    /// Login password
    #[arg(long, env = "FRONTDESK_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Property access code
    #[arg(long, env = "FRONTDESK_ACCESS_CODE", hide_env_values = true)]
    pub access_code: Option<String>,

    /// Seed for random choices (unit card, dropdown options)
    #[arg(long, env = "FRONTDESK_SEED")]
    pub seed: Option<u64>,

    /// Run the browser without a window
    #[arg(long, conflicts_with = "headed")]
    pub headless: bool,

    /// Run the browser with a visible window
    #[arg(long)]
    pub headed: bool,

    /// Chromium executable
    #[arg(long, env = "FRONTDESK_CHROMIUM")]
    pub chromium: Option<PathBuf>,
}

impl ConfigSource {
    /// Headless override, if either flag was given
    #[must_use]
    pub const fn headless_override(&self) -> Option<bool> {
        if self.headless {
            Some(true)
        } else if self.headed {
            Some(false)
        } else {
            None
        }
    }
}

/// Arguments for the run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Configuration source and overrides
    #[command(flatten)]
    pub source: ConfigSource,

    /// Only run scenarios whose name contains this text
    #[arg(short, long)]
    pub scenario: Option<String>,

    /// Stop after the first failing scenario
    #[arg(long)]
    pub fail_fast: bool,

    /// Share one browser session across all scenarios
    #[arg(long)]
    pub shared_session: bool,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Configuration source and overrides
    #[command(flatten)]
    pub source: ConfigSource,

    /// Validate instead of printing
    #[arg(long)]
    pub check: bool,
}

/// Arguments for the locators command
#[derive(Parser, Debug)]
pub struct LocatorsArgs {
    /// Only this screen (login, home, reservation)
    #[arg(short, long)]
    pub page: Option<String>,

    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

/// Color argument
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run() {
        let cli = Cli::try_parse_from([
            "frontdesk", "-vv", "run", "--config", "suite.yaml", "--seed", "7", "--headed",
            "--scenario", "TC01", "--json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.source.config, Some(PathBuf::from("suite.yaml")));
        assert_eq!(args.source.seed, Some(7));
        assert_eq!(args.source.headless_override(), Some(false));
        assert_eq!(args.scenario.as_deref(), Some("TC01"));
        assert!(args.json);
    }

    #[test]
    fn test_headless_and_headed_conflict() {
        let parsed = Cli::try_parse_from(["frontdesk", "run", "--headless", "--headed"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_no_headless_flag_keeps_file_value() {
        let cli = Cli::try_parse_from(["frontdesk", "config"]).unwrap();
        let Commands::Config(args) = cli.command else {
            panic!("expected config");
        };
        assert_eq!(args.source.headless_override(), None);
    }

    #[test]
    fn test_parse_locators_page() {
        let cli = Cli::try_parse_from(["frontdesk", "-q", "locators", "--page", "login"]).unwrap();
        assert!(cli.quiet);
        let Commands::Locators(args) = cli.command else {
            panic!("expected locators");
        };
        assert_eq!(args.page.as_deref(), Some("login"));
    }

    #[test]
    fn test_color_conversion() {
        let choice: crate::config::ColorChoice = ColorArg::Never.into();
        assert_eq!(choice, crate::config::ColorChoice::Never);
    }
}
