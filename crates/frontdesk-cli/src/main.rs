//! Frontdesk CLI: runs the hotel reservation suite
//!
//! ## Usage
//!
//! ```bash
//! frontdesk run --config suite.yaml          # Run the suite
//! frontdesk run --scenario TC01 --headed     # One scenario, visible browser
//! frontdesk config --config suite.yaml       # Effective configuration
//! frontdesk locators --page reservation      # Locator table
//! ```

use clap::Parser;
use frontdesk_cli::handlers::{execute_config, execute_locators, execute_run};
use frontdesk_cli::{Cli, CliConfig, CliResult, ColorChoice, Commands, Verbosity};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli);
    init_tracing(&config);

    match cli.command {
        Commands::Run(args) => execute_run(&config, &args),
        Commands::Config(args) => execute_config(&args),
        Commands::Locators(args) => execute_locators(&args),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let color: ColorChoice = cli.color.clone().into();
    console::set_colors_enabled(color.should_color());

    CliConfig::new()
        .with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose))
        .with_color(color)
        .with_log_json(cli.log_json)
}

fn init_tracing(config: &CliConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.verbosity.log_filter()));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = if config.log_json {
        builder.json().try_init()
    } else {
        builder.with_ansi(config.color.should_color()).try_init()
    };
    if let Err(e) = installed {
        eprintln!("warning: logging disabled: {e}");
    }
}
