// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Startup configuration comes from three places, in order of precedence: command line
//! args ([`CLIArg`]), the optional JSON config file ([`GopherConfigFile`]), and the
//! built in defaults in [`crate::location_constants`]. [`StartupConfig::resolve`] merges
//! them.

// Attach.
pub mod clap_config;
pub mod config_file;
pub mod startup_config;

// Re-export.
pub use clap_config::*;
pub use config_file::*;
pub use startup_config::*;
