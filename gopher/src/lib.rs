// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # r3bl-gopher
//!
//! A minimal [Gopher](https://www.rfc-editor.org/rfc/rfc1436) client for the terminal.
//!
//! It connects to a Gopher server, fetches a selector's content over a plain TCP
//! request/response exchange, and renders the result either as a scrollable plain text
//! document or as a navigable directory listing with keyboard and mouse selectable links.
//!
//! # Architecture
//!
//! The pieces are wired leaves first:
//!
//! 1. [`protocol`] - [`fetch`] opens a TCP stream, writes `selector + "\r\n"`, reads until
//!    the peer closes, and splits the bytes into CRLF delimited lines. [`parse`] turns
//!    those lines into a [`ParsedPage`] (text, directory, server error).
//! 2. [`navigation`] - the [`Navigator`] owns the current [`PageState`] and the back
//!    history, and executes the `jump`, `back`, `home`, `reload`, and `move_selection`
//!    transitions.
//! 3. [`render`] - [`build`] translates a [`PageState`] into an ordered list of
//!    [`DisplayOp`]s.
//! 4. [`surface`] - anything that implements [`DisplaySurface`] paints those ops. The
//!    [`CrosstermSurface`] paints to the terminal, the [`SurfaceBuffer`] keeps them in
//!    memory (used by tests and by `--dump` mode).
//! 5. [`app`] - glues input events to navigation transitions and display ops.
//!
//! # Run the `gopher` binary target
//!
//! ```bash
//! cargo run --bin gopher -- gopher.floodgap.com
//! cargo run --bin gopher -- --dump -p 70 -s /gopher gopher.floodgap.com
//! ```
//!
//! Pass `--enable-logging` to write a `log.txt` file in the current folder.

// Enforce strict error handling in production library code only. Tests are allowed to
// use .unwrap() (workspace `Cargo.toml` config allows it).
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

pub const DEBUG_GOPHER_TRANSPORT: bool = true;
pub const DEBUG_GOPHER_NAVIGATION: bool = true;
pub const DEBUG_GOPHER_SURFACE: bool = false;

// Attach.
pub mod app;
pub mod common;
pub mod config;
pub mod log;
pub mod navigation;
pub mod protocol;
pub mod render;
pub mod surface;

// Re-export.
pub use app::*;
pub use common::*;
pub use config::*;
pub use log::*;
pub use navigation::*;
pub use protocol::*;
pub use render::*;
pub use surface::*;
