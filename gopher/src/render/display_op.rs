// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::ops::{Deref, DerefMut};

use smallvec::SmallVec;

/// Convenient macro for creating and manipulating [`DisplayOps`] collections.
///
/// - `@new`: Create a new [`DisplayOps`] with optional initial operations.
/// - `@add_to`: Add operations to an existing [`DisplayOps`].
///
/// ```
/// use r3bl_gopher::*;
///
/// let mut ops = display_ops!(
///   @new
///   DisplayOp::ClearDisplay,
///   DisplayOp::SetAddress("DIR: host:70".to_string()),
/// );
/// display_ops!(
///   @add_to ops =>
///   DisplayOp::HighlightAnchor(0)
/// );
/// assert_eq!(ops.len(), 3);
/// ```
#[macro_export]
macro_rules! display_ops {
  // Empty.
  () => {
    $crate::DisplayOps::default()
  };

  // @new: Create a DisplayOps. If any ($arg_display_op)* are passed, then add them to its
  // list. Finally return it.
  (
    @new
    $(
      $arg_display_op: expr
    ),*
    $(,)*
  ) => {
    {
      let mut display_ops = $crate::DisplayOps::default();
      $(
        display_ops.list.push($arg_display_op);
      )*
      display_ops
    }
  };

  // @add_to: If any ($arg_display_op)* are passed, then add to it.
  (
    @add_to
    $arg_display_ops: expr
    =>
    $(
      $arg_display_op: expr
    ),*
    $(,)*
  ) => {
    {
      $(
        $arg_display_ops.list.push($arg_display_op);
      )*
    }
  };
}

/// How an inserted line is styled by the [`crate::DisplaySurface`]. A line with no style
/// uses the surface's default colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineStyle {
    /// Link to a directory. Blue.
    Dir,
    /// Link to a text file. Green.
    Item,
    /// Displayed, but not navigable.
    Unknown,
    /// Server error. Red.
    Error,
}

/// One instruction for the [`crate::DisplaySurface`]. The surface only ever changes in
/// response to these.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DisplayOp {
    /// Remove all content, anchors, highlight, and reset both status strings.
    ClearDisplay,
    /// The single line that shows the current address.
    SetAddress(String),
    /// The single line that shows a transient status message.
    SetStatus(String),
    InsertLine {
        text: String,
        maybe_style: Option<LineStyle>,
    },
    /// Record the position of the most recently inserted line as the next link anchor.
    /// Anchors are numbered in the order they are marked, which is also the order of
    /// [`crate::PageState::entries`].
    MarkLinkAnchor,
    /// Highlight the anchor at this index (and un-highlight any other).
    HighlightAnchor(usize),
}

/// For ease of use, please use the [`display_ops`!] macro.
///
/// An ordered list of [`DisplayOp`]s. Order matters: [`DisplayOp::MarkLinkAnchor`]
/// refers to the line inserted right before it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DisplayOps {
    pub list: SmallVec<[DisplayOp; 8]>,
}

impl Deref for DisplayOps {
    type Target = SmallVec<[DisplayOp; 8]>;

    fn deref(&self) -> &Self::Target { &self.list }
}

impl DerefMut for DisplayOps {
    fn deref_mut(&mut self) -> &mut Self::Target { &mut self.list }
}

impl<'a> IntoIterator for &'a DisplayOps {
    type Item = &'a DisplayOp;
    type IntoIter = std::slice::Iter<'a, DisplayOp>;

    fn into_iter(self) -> Self::IntoIter { self.list.iter() }
}

impl DisplayOps {
    /// Insert a line w/ an optional style.
    pub fn insert_line(&mut self, text: impl Into<String>, maybe_style: Option<LineStyle>) {
        self.list.push(DisplayOp::InsertLine {
            text: text.into(),
            maybe_style,
        });
    }
}
