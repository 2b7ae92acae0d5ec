// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub mod config_file_constants {
    pub const CONFIG_FOLDER_NAME: &str = "r3bl-gopher";
    pub const CONFIG_FILE_NAME: &str = "config.json";
}

/// The optional JSON config file. Every field is optional, and anything missing falls
/// back to the built in default (unless it is passed on the command line).
///
/// ```json
/// {
///   "host": "gopher.floodgap.com",
///   "port": 70,
///   "selector": "",
///   "fetch_timeout_secs": 10
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GopherConfigFile {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub selector: Option<String>,
    pub fetch_timeout_secs: Option<u64>,
}

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ConfigError {
    #[error("Could not read config file {}", .path.display())]
    #[diagnostic(
        code(r3bl_gopher::config::read),
        help("Check that the file is readable, or pass `--config` to use another file")
    )]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not parse config file {}", .path.display())]
    #[diagnostic(
        code(r3bl_gopher::config::parse),
        help("The file must be a JSON object w/ optional `host`, `port`, `selector`, and `fetch_timeout_secs` fields")
    )]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Where the config file lives when `--config` isn't passed. `None` if the platform has
/// no user config folder.
#[must_use]
pub fn default_config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|it| {
        it.join(config_file_constants::CONFIG_FOLDER_NAME)
            .join(config_file_constants::CONFIG_FILE_NAME)
    })
}

impl GopherConfigFile {
    /// Load the config file at `path`. A file that doesn't exist is not an error, and
    /// returns `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file exists but can't be read, and
    /// [`ConfigError::Parse`] if it isn't valid.
    pub fn try_load(path: &Path) -> Result<Option<Self>, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(it) => it,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(error) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: error,
                });
            }
        };

        let config_file =
            serde_json::from_str(&content).map_err(|error| ConfigError::Parse {
                path: path.to_path_buf(),
                source: error,
            })?;

        // % is Display, ? is Debug.
        tracing::debug!(
            message = "Loaded config file",
            path = %path.display(),
            config_file = ?config_file
        );

        Ok(Some(config_file))
    }
}
