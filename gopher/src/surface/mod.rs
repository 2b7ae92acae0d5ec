// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The Display Surface is the only thing that paints. It is driven exclusively by
//! [`crate::DisplayOps`], and it forwards user input back to the app as [`UserAction`]s.

// Attach.
pub mod crossterm_surface;
pub mod display_surface;
pub mod input_event;
pub mod raw_mode;
pub mod surface_buffer;

// Re-export.
pub use crossterm_surface::*;
pub use display_surface::*;
pub use input_event::*;
pub use raw_mode::*;
pub use surface_buffer::*;
