// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::{Debug, Formatter},
          io::Write};

use crossterm::{cursor::MoveTo,
                queue,
                style::{Attribute, Color, Print, ResetColor, SetAttribute,
                        SetBackgroundColor, SetForegroundColor},
                terminal::{Clear, ClearType}};
use miette::IntoDiagnostic;

use crate::{DEBUG_GOPHER_SURFACE, DisplayOp, DisplaySurface, LineStyle, SurfaceBuffer,
            SurfaceLine, ok};

pub mod crossterm_surface_constants {
    /// The control label column (`" DIR    "` etc) is highlighted up to this width.
    pub const HIGHLIGHT_WIDTH: usize = 6;
    /// The address row at the top and the status row at the bottom.
    pub const CHROME_ROW_COUNT: u16 = 2;
    /// Rows scrolled per mouse wheel notch.
    pub const WHEEL_SCROLL_ROWS: isize = 3;
    /// Tab stops are this many columns apart.
    pub const TAB_WIDTH: usize = 8;
    /// Painted in place of any control char that comes from the server.
    pub const CONTROL_CHAR_REPLACEMENT: char = '\u{FFFD}';
}

use crossterm_surface_constants::{CHROME_ROW_COUNT, CONTROL_CHAR_REPLACEMENT,
                                  HIGHLIGHT_WIDTH, TAB_WIDTH};

/// Paints a [`SurfaceBuffer`] to a terminal using crossterm. Row 0 is the address, the
/// last row is the status, and everything in between is a scrollable viewport onto the
/// content lines.
///
/// Applying ops only updates the model (and the scroll position). Nothing is written
/// until [`CrosstermSurface::paint`] is called. Text is passed through
/// [`sanitize_for_terminal`] on its way out, so the buffer keeps the raw text.
pub struct CrosstermSurface<W: Write> {
    buffer: SurfaceBuffer,
    scroll_offset: usize,
    /// Columns, rows.
    size: (u16, u16),
    output: W,
}

impl<W: Write> Debug for CrosstermSurface<W> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrosstermSurface")
            .field("buffer", &self.buffer)
            .field("scroll_offset", &self.scroll_offset)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

impl<W: Write> CrosstermSurface<W> {
    pub fn new(output: W, size: (u16, u16)) -> Self {
        Self {
            buffer: SurfaceBuffer::default(),
            scroll_offset: 0,
            size,
            output,
        }
    }

    #[must_use]
    pub fn buffer(&self) -> &SurfaceBuffer { &self.buffer }

    #[must_use]
    pub fn scroll_offset(&self) -> usize { self.scroll_offset }

    pub fn output_mut(&mut self) -> &mut W { &mut self.output }

    /// Number of rows available for content lines.
    #[must_use]
    pub fn viewport_height(&self) -> usize {
        usize::from(self.size.1.saturating_sub(CHROME_ROW_COUNT))
    }

    pub fn resize(&mut self, size: (u16, u16)) {
        self.size = size;
        self.scroll_offset = self.scroll_offset.min(self.max_scroll_offset());
        self.scroll_to_highlight();
    }

    /// Positive `delta` scrolls towards the end of the content.
    pub fn scroll_by(&mut self, delta: isize) {
        let scroll_offset = if delta.is_negative() {
            self.scroll_offset.saturating_sub(delta.unsigned_abs())
        } else {
            self.scroll_offset.saturating_add(delta.unsigned_abs())
        };
        self.scroll_offset = scroll_offset.min(self.max_scroll_offset());
    }

    /// Scroll by one viewport height, in the direction of the sign of `pages`.
    pub fn scroll_pages(&mut self, pages: isize) {
        let height = isize::try_from(self.viewport_height()).unwrap_or(isize::MAX);
        self.scroll_by(pages.saturating_mul(height));
    }

    /// Map a terminal row (eg: from a mouse click) to the anchor painted on it.
    #[must_use]
    pub fn anchor_at_row(&self, row: u16) -> Option<usize> {
        let content_row = usize::from(row.checked_sub(1)?);
        if content_row >= self.viewport_height() {
            return None;
        }
        self.buffer.anchor_at_line(self.scroll_offset + content_row)
    }

    fn max_scroll_offset(&self) -> usize {
        self.buffer
            .lines()
            .len()
            .saturating_sub(self.viewport_height())
    }

    /// Keep the highlighted line inside the viewport.
    fn scroll_to_highlight(&mut self) {
        let Some(line_index) = self.buffer.highlighted_line() else {
            return;
        };
        let height = self.viewport_height();
        if height == 0 {
            return;
        }
        if line_index < self.scroll_offset {
            self.scroll_offset = line_index;
        } else if line_index >= self.scroll_offset + height {
            self.scroll_offset = line_index + 1 - height;
        }
    }

    /// Write the whole screen and flush.
    ///
    /// # Errors
    ///
    /// Returns an error if the output can't be written to.
    pub fn paint(&mut self) -> miette::Result<()> {
        let (cols, rows) = self.size;
        let width = usize::from(cols);
        let highlighted_line = self.buffer.highlighted_line();

        queue!(self.output, ResetColor, Clear(ClearType::All)).into_diagnostic()?;

        // Address.
        let address = sanitize_for_terminal(self.buffer.address());
        queue!(
            self.output,
            MoveTo(0, 0),
            SetAttribute(Attribute::Bold),
            Print(truncate(&address, width)),
            SetAttribute(Attribute::Reset),
        )
        .into_diagnostic()?;

        // Content.
        let visible_lines = self
            .buffer
            .lines()
            .iter()
            .enumerate()
            .skip(self.scroll_offset)
            .take(self.viewport_height());
        for (row, (line_index, line)) in (1_u16..).zip(visible_lines) {
            queue!(self.output, MoveTo(0, row)).into_diagnostic()?;
            paint_line(
                &mut self.output,
                line,
                width,
                Some(line_index) == highlighted_line,
            )?;
        }

        // Status.
        if rows > 1 {
            let status = sanitize_for_terminal(self.buffer.status());
            queue!(
                self.output,
                MoveTo(0, rows - 1),
                SetAttribute(Attribute::Dim),
                Print(truncate(&status, width)),
                SetAttribute(Attribute::Reset),
            )
            .into_diagnostic()?;
        }

        self.output.flush().into_diagnostic()?;

        DEBUG_GOPHER_SURFACE.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(
                message = "Painted surface",
                scroll_offset = %self.scroll_offset,
                size = ?self.size,
            );
        });

        ok!()
    }
}

impl<W: Write> DisplaySurface for CrosstermSurface<W> {
    fn apply(&mut self, op: &DisplayOp) -> miette::Result<()> {
        self.buffer.apply(op)?;
        match op {
            DisplayOp::ClearDisplay => self.scroll_offset = 0,
            DisplayOp::HighlightAnchor(_) => self.scroll_to_highlight(),
            _ => {}
        }
        ok!()
    }
}

fn style_color(style: LineStyle) -> Option<Color> {
    match style {
        LineStyle::Dir => Some(Color::Blue),
        LineStyle::Item => Some(Color::Green),
        LineStyle::Error => Some(Color::Red),
        LineStyle::Unknown => None,
    }
}

fn paint_line(
    output: &mut impl Write,
    line: &SurfaceLine,
    width: usize,
    is_highlighted: bool,
) -> miette::Result<()> {
    let sanitized = sanitize_for_terminal(&line.text);
    let text = truncate(&sanitized, width);
    let (head, tail) = if is_highlighted {
        split_at_char(text, HIGHLIGHT_WIDTH)
    } else {
        ("", text)
    };

    if let Some(color) = line.maybe_style.and_then(style_color) {
        queue!(output, SetForegroundColor(color)).into_diagnostic()?;
    }
    if !head.is_empty() {
        queue!(
            output,
            SetBackgroundColor(Color::Yellow),
            Print(head),
            SetBackgroundColor(Color::Reset),
        )
        .into_diagnostic()?;
    }
    queue!(output, Print(tail), ResetColor).into_diagnostic()?;

    ok!()
}

/// Make server supplied text safe to write to a tty. Tabs are expanded to spaces (so
/// that one char is one column), and every other control char (ESC, CR, BEL, etc) is
/// replaced w/ [`CONTROL_CHAR_REPLACEMENT`] so it can't move the cursor or start an
/// escape sequence.
#[must_use]
pub fn sanitize_for_terminal(text: &str) -> String {
    let mut it = String::with_capacity(text.len());
    let mut column = 0;
    for ch in text.chars() {
        if ch == '\t' {
            let pad = TAB_WIDTH - column % TAB_WIDTH;
            it.extend(std::iter::repeat_n(' ', pad));
            column += pad;
        } else {
            it.push(if ch.is_control() { CONTROL_CHAR_REPLACEMENT } else { ch });
            column += 1;
        }
    }
    it
}

/// Keep at most `width` chars.
fn truncate(text: &str, width: usize) -> &str { split_at_char(text, width).0 }

/// Split after the first `count` chars (never inside a char).
fn split_at_char(text: &str, count: usize) -> (&str, &str) {
    match text.char_indices().nth(count) {
        Some((byte_index, _)) => text.split_at(byte_index),
        None => (text, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DisplayOps, EntryKind, Location, PageState, build, display_ops};
    use pretty_assertions::assert_eq;

    /// A directory w/ `count` entries, each on its own line, w/ the first highlighted.
    fn directory_ops(count: usize) -> DisplayOps {
        let mut ops = display_ops!(@new DisplayOp::ClearDisplay);
        for index in 0..count {
            ops.insert_line(format!(" DIR    Entry {index}"), Some(LineStyle::Dir));
            display_ops!(@add_to ops => DisplayOp::MarkLinkAnchor);
        }
        display_ops!(@add_to ops => DisplayOp::HighlightAnchor(0));
        ops
    }

    #[test]
    fn test_split_at_char() {
        assert_eq!(split_at_char(" DIR    x", 6), (" DIR  ", "  x"));
        assert_eq!(split_at_char("ab", 6), ("ab", ""));
        assert_eq!(split_at_char("héllo", 2), ("hé", "llo"));
        assert_eq!(truncate("hello", 3), "hel");
    }

    #[test]
    fn test_highlight_scrolls_into_view() {
        // 5 rows: address, 3 content rows, status.
        let mut surface = CrosstermSurface::new(Vec::<u8>::new(), (40, 5));
        surface.apply_all(&directory_ops(10)).unwrap();
        assert_eq!(surface.scroll_offset(), 0);

        surface.apply(&DisplayOp::HighlightAnchor(7)).unwrap();
        assert_eq!(surface.scroll_offset(), 5);

        surface.apply(&DisplayOp::HighlightAnchor(2)).unwrap();
        assert_eq!(surface.scroll_offset(), 2);
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut surface = CrosstermSurface::new(Vec::<u8>::new(), (40, 5));
        surface.apply_all(&directory_ops(10)).unwrap();

        surface.scroll_by(-4);
        assert_eq!(surface.scroll_offset(), 0);

        surface.scroll_pages(10);
        assert_eq!(surface.scroll_offset(), 7);

        surface.apply(&DisplayOp::ClearDisplay).unwrap();
        assert_eq!(surface.scroll_offset(), 0);
    }

    #[test]
    fn test_anchor_at_row_accounts_for_scroll() {
        let mut surface = CrosstermSurface::new(Vec::<u8>::new(), (40, 5));
        surface.apply_all(&directory_ops(10)).unwrap();

        assert_eq!(surface.anchor_at_row(0), None);
        assert_eq!(surface.anchor_at_row(1), Some(0));
        assert_eq!(surface.anchor_at_row(3), Some(2));
        // The status row.
        assert_eq!(surface.anchor_at_row(4), None);

        surface.scroll_by(4);
        assert_eq!(surface.anchor_at_row(1), Some(4));
    }

    #[test]
    fn test_paint_writes_address_content_and_status() {
        let mut surface = CrosstermSurface::new(Vec::<u8>::new(), (40, 5));
        surface.apply_all(&directory_ops(1)).unwrap();
        surface
            .apply(&DisplayOp::SetAddress("DIR: host:70".to_string()))
            .unwrap();
        surface.paint().unwrap();

        let painted = String::from_utf8_lossy(surface.output_mut()).to_string();
        assert!(painted.contains("DIR: host:70"));
        // Highlighted head and plain tail are printed separately.
        assert!(painted.contains(" DIR  "));
        assert!(painted.contains("  Entry 0"));
        assert!(painted.contains(&crate::status_line("")));
    }

    #[test]
    fn test_sanitize_for_terminal() {
        assert_eq!(sanitize_for_terminal("plain"), "plain");
        assert_eq!(sanitize_for_terminal("a\tb"), "a       b");
        assert_eq!(sanitize_for_terminal("\tx"), "        x");
        assert_eq!(sanitize_for_terminal("1234567\tx"), "1234567 x");
        assert_eq!(sanitize_for_terminal("over\rwrite"), "over\u{FFFD}write");
        assert_eq!(
            sanitize_for_terminal("\x1b[2J\x07"),
            "\u{FFFD}[2J\u{FFFD}"
        );
        assert_eq!(sanitize_for_terminal("héllo"), "héllo");
    }

    #[test]
    fn test_paint_does_not_write_escape_sequences_from_content() {
        let location = Location::new("host", 70, "/evil\x1b[2J", EntryKind::TextFile);
        let page_state = PageState::from_response(location, vec![
            "evil\x1b]0;pwned\x07\x1b[2J tail".to_string(),
            ".".to_string(),
        ]);
        let mut surface = CrosstermSurface::new(Vec::<u8>::new(), (80, 5));
        surface.apply_all(&build(&page_state)).unwrap();
        surface
            .apply(&DisplayOp::SetStatus("bad\x1b]0;status\x07".to_string()))
            .unwrap();
        surface.paint().unwrap();

        let painted = String::from_utf8_lossy(surface.output_mut()).to_string();
        assert!(!painted.contains("\x1b]0;"));
        assert!(!painted.contains("\x1b[2J"));
        assert!(!painted.contains('\x07'));
        assert!(painted.contains("evil\u{FFFD}]0;pwned\u{FFFD}\u{FFFD}[2J tail"));

        // The model keeps the raw text.
        assert!(surface.buffer().lines()[0].text.contains("\x1b]0;pwned\x07"));
    }
}
