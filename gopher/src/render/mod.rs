// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach.
pub mod display_op;
pub mod render_instruction_builder;

// Re-export.
pub use display_op::*;
pub use render_instruction_builder::*;
