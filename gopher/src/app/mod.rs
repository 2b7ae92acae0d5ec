// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Wires user input to navigation, and navigation to the display surface.

// Attach.
pub mod gopher_app;
pub mod launcher;

// Re-export.
pub use gopher_app::*;
pub use launcher::*;
