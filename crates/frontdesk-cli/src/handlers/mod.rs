//! Command handlers, kept out of main.rs for testability

pub mod config;
pub mod locators;
pub mod run;

pub use config::{execute_config, resolve_config, validated};
pub use locators::{execute_locators, render_locators, select_pages};
pub use run::{build_runner, execute_run};
