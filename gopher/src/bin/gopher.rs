// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! For more information on how to use CLAP, here are some resources:
//! 1. [Tutorial](https://developerlife.com/2023/09/17/tuify-clap/)
//! 2. [Video](https://youtu.be/lzMYDA6St0s)

use clap::Parser;
use r3bl_gopher::{CLIArg, DisplayPreference, StartupConfig, TracingConfig, ok, run_app,
                  run_dump, set_mimalloc_in_main, try_initialize_logging_global};

#[tokio::main(flavor = "current_thread")]
async fn main() -> miette::Result<()> {
    set_mimalloc_in_main!();

    let cli_arg = CLIArg::parse();
    let startup_config = StartupConfig::try_load(&cli_arg)?;

    let should_log = startup_config.enable_logging;

    if should_log {
        // Raw mode owns the display, so the TUI only logs to a file.
        let tracing_config = if startup_config.dump {
            TracingConfig::new_file_and_display(
                None,
                DisplayPreference::Stderr,
                tracing_core::LevelFilter::DEBUG,
            )
        } else {
            TracingConfig::new_file(None, tracing_core::LevelFilter::DEBUG)
        };
        try_initialize_logging_global(tracing_config).ok();
        // % is Display, ? is Debug.
        tracing::debug!(
            message = "Start logging...",
            cli_arg = ?cli_arg,
            startup_config = ?startup_config
        );
    }

    if startup_config.dump {
        run_dump(startup_config).await?;
    } else {
        run_app(startup_config).await?;
    }

    should_log.then(|| {
        tracing::debug!(message = "Stop logging...");
    });

    ok!()
}
