// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach.
pub mod navigator;
pub mod page_state;

// Re-export.
pub use navigator::*;
pub use page_state::*;
