// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io::Write;

use crossterm::{cursor::{Hide, Show},
                event::{DisableMouseCapture, EnableMouseCapture},
                execute,
                terminal::{EnterAlternateScreen, LeaveAlternateScreen,
                           disable_raw_mode, enable_raw_mode}};
use miette::IntoDiagnostic;

use crate::{DEBUG_GOPHER_SURFACE, ok};

/// To use this directly, you need to make sure to call [start](RawMode::start) which
/// enables raw mode, switches to the alternate screen, and captures the mouse. Then make
/// sure to call [end](RawMode::end) when you are done, even if the app failed.
#[derive(Debug, Clone, Copy)]
pub struct RawMode;

impl RawMode {
    /// # Errors
    ///
    /// Returns an error if the terminal doesn't support raw mode, or the escape
    /// sequences can't be written.
    pub fn start(output: &mut impl Write) -> miette::Result<()> {
        enable_raw_mode().into_diagnostic()?;
        execute!(output, EnterAlternateScreen, EnableMouseCapture, Hide)
            .into_diagnostic()?;

        DEBUG_GOPHER_SURFACE.then(|| {
            tracing::debug!(message = "Raw mode started");
        });

        ok!()
    }

    /// # Errors
    ///
    /// Returns an error if raw mode can't be disabled, or the escape sequences can't be
    /// written.
    pub fn end(output: &mut impl Write) -> miette::Result<()> {
        execute!(output, Show, DisableMouseCapture, LeaveAlternateScreen)
            .into_diagnostic()?;
        disable_raw_mode().into_diagnostic()?;

        DEBUG_GOPHER_SURFACE.then(|| {
            tracing::debug!(message = "Raw mode ended");
        });

        ok!()
    }
}
