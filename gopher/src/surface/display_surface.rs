// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{DisplayOp, DisplayOps};

/// Anything that can be painted by [`DisplayOp`]s.
///
/// Implementations must support: clearing all content, inserting a line w/ an optional
/// style, recording the most recently inserted line as a link anchor, highlighting the
/// anchor at a given index, and setting the address and status strings.
pub trait DisplaySurface {
    /// # Errors
    ///
    /// Returns an error if the op refers to something that doesn't exist (eg: an anchor
    /// index that was never marked), or if the surface can't be written to.
    fn apply(&mut self, op: &DisplayOp) -> miette::Result<()>;

    /// Apply all the `ops` in order, stopping at the first error.
    ///
    /// # Errors
    ///
    /// Returns the first error returned by [`DisplaySurface::apply`].
    fn apply_all(&mut self, ops: &DisplayOps) -> miette::Result<()> {
        for op in ops {
            self.apply(op)?;
        }
        Ok(())
    }
}
