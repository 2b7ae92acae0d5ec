// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Include.
pub mod decl_macros;
pub mod ui_str;

// Reexport.
pub use ui_str::*;
