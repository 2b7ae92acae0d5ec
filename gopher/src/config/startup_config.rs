// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::time::Duration;

use crate::{CLIArg, ConfigError, GopherConfigFile, Location, default_config_file_path,
            location_constants::{DEFAULT_HOST, DEFAULT_PORT, DEFAULT_SELECTOR}};

/// Everything the app needs to start, after merging the command line, the config file,
/// and the defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupConfig {
    pub host: String,
    pub port: u16,
    pub selector: String,
    pub maybe_fetch_timeout: Option<Duration>,
    pub dump: bool,
    pub enable_logging: bool,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            selector: DEFAULT_SELECTOR.to_string(),
            maybe_fetch_timeout: None,
            dump: false,
            enable_logging: false,
        }
    }
}

impl StartupConfig {
    /// Load the config file (from `--config` or the default location) and merge it with
    /// the `cli_arg`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the config file exists but can't be read or parsed.
    pub fn try_load(cli_arg: &CLIArg) -> Result<Self, ConfigError> {
        let maybe_path = cli_arg.config.clone().or_else(default_config_file_path);
        let maybe_config_file = match maybe_path {
            Some(path) => GopherConfigFile::try_load(&path)?,
            None => None,
        };
        Ok(Self::resolve(cli_arg, maybe_config_file.unwrap_or_default()))
    }

    /// For each setting: the CLI arg if passed, else the config file value if present,
    /// else the default.
    #[must_use]
    pub fn resolve(cli_arg: &CLIArg, config_file: GopherConfigFile) -> Self {
        let defaults = Self::default();
        Self {
            host: cli_arg
                .maybe_host
                .clone()
                .or(config_file.host)
                .unwrap_or(defaults.host),
            port: cli_arg.port.or(config_file.port).unwrap_or(defaults.port),
            selector: cli_arg
                .selector
                .clone()
                .or(config_file.selector)
                .unwrap_or(defaults.selector),
            maybe_fetch_timeout: cli_arg
                .timeout_secs
                .or(config_file.fetch_timeout_secs)
                .map(Duration::from_secs),
            dump: cli_arg.dump,
            enable_logging: cli_arg.global_options.enable_logging,
        }
    }

    #[must_use]
    pub fn home_location(&self) -> Location {
        Location::home(&self.host, self.port, &self.selector)
    }
}
