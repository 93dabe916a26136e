//! Config command handler and configuration resolution

use crate::commands::{ConfigArgs, ConfigSource};
use crate::error::{CliError, CliResult};
use frontdesk::{FrontdeskError, SuiteConfig};

/// Load the configuration file (if any) and apply flag/environment overrides
pub fn resolve_config(source: &ConfigSource) -> CliResult<SuiteConfig> {
    let mut config = match &source.config {
        Some(path) => SuiteConfig::load(path)?,
        None => SuiteConfig::default(),
    };

    if let Some(url) = &source.url {
        config.entry_url.clone_from(url);
    }
    if let Some(username) = &source.username {
        config.credentials.username.clone_from(username);
    }
    if let Some(password) = &source.password {
        config.credentials.password.clone_from(password);
    }
    if let Some(access_code) = &source.access_code {
        config.credentials.access_code.clone_from(access_code);
    }
    if source.seed.is_some() {
        config.seed = source.seed;
    }
    if let Some(headless) = source.headless_override() {
        config.browser.headless = headless;
    }
    if let Some(chromium) = &source.chromium {
        config.browser.executable = Some(chromium.clone());
    }
    Ok(config)
}

/// Validated configuration, with configuration problems reported as such
pub fn validated(config: SuiteConfig) -> CliResult<SuiteConfig> {
    match config.validate() {
        Ok(()) => Ok(config),
        Err(FrontdeskError::Config { message }) => Err(CliError::config(message)),
        Err(e) => Err(e.into()),
    }
}

/// Execute the config command: print the effective configuration, or
/// validate it with `--check`
pub fn execute_config(args: &ConfigArgs) -> CliResult<()> {
    let config = resolve_config(&args.source)?;
    if args.check {
        validated(config)?;
        println!("configuration is valid");
        return Ok(());
    }
    print!("{}", config.redacted().to_yaml()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn source() -> ConfigSource {
        ConfigSource::default()
    }

    #[test]
    fn test_defaults_without_file() {
        let config = resolve_config(&source()).unwrap();
        assert_eq!(config.entry_url, SuiteConfig::default().entry_url);
        assert!(config.browser.headless);
    }

    #[test]
    fn test_flags_override_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "entry_url: https://file.test/login\nseed: 1\ncredentials:\n  username: file-user"
        )
        .unwrap();

        let source = ConfigSource {
            config: Some(file.path().to_path_buf()),
            username: Some("flag-user".to_string()),
            seed: Some(42),
            headed: true,
            ..source()
        };
        let config = resolve_config(&source).unwrap();
        assert_eq!(config.entry_url, "https://file.test/login");
        assert_eq!(config.credentials.username, "flag-user");
        assert_eq!(config.seed, Some(42));
        assert!(!config.browser.headless);
    }

    #[test]
    fn test_missing_file_is_error() {
        let source = ConfigSource {
            config: Some("/nonexistent/frontdesk.yaml".into()),
            ..source()
        };
        assert!(resolve_config(&source).is_err());
    }

    #[test]
    fn test_check_rejects_missing_credentials() {
        let args = ConfigArgs {
            source: source(),
            check: true,
        };
        assert!(execute_config(&args).is_err());
    }
}
