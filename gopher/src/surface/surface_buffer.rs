// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{DisplayOp, DisplaySurface, LineStyle, status_line};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceLine {
    pub text: String,
    pub maybe_style: Option<LineStyle>,
}

/// In memory model of a display surface. It holds exactly what the ops describe, and
/// nothing about how or where it is painted. The [`crate::CrosstermSurface`] paints from
/// one of these, and tests assert against one directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceBuffer {
    lines: Vec<SurfaceLine>,
    /// Line index of each anchor, in the order they were marked.
    anchors: Vec<usize>,
    maybe_highlighted_anchor: Option<usize>,
    address: String,
    status: String,
}

impl Default for SurfaceBuffer {
    fn default() -> Self {
        Self {
            lines: vec![],
            anchors: vec![],
            maybe_highlighted_anchor: None,
            address: String::new(),
            status: status_line(""),
        }
    }
}

impl SurfaceBuffer {
    #[must_use]
    pub fn lines(&self) -> &[SurfaceLine] { &self.lines }

    #[must_use]
    pub fn anchors(&self) -> &[usize] { &self.anchors }

    #[must_use]
    pub fn address(&self) -> &str { &self.address }

    #[must_use]
    pub fn status(&self) -> &str { &self.status }

    #[must_use]
    pub fn highlighted_anchor(&self) -> Option<usize> { self.maybe_highlighted_anchor }

    /// Line index of the highlighted anchor.
    #[must_use]
    pub fn highlighted_line(&self) -> Option<usize> {
        self.maybe_highlighted_anchor
            .and_then(|it| self.anchors.get(it).copied())
    }

    /// Which anchor (if any) was marked on the line at `line_index`. This is how a click
    /// is mapped back to an entry.
    #[must_use]
    pub fn anchor_at_line(&self, line_index: usize) -> Option<usize> {
        self.anchors.iter().position(|it| *it == line_index)
    }

    /// Address, content lines, then status, one per line. The highlighted line is marked
    /// w/ a `>` in the first column.
    #[must_use]
    pub fn to_plain_text(&self) -> String {
        let highlighted_line = self.highlighted_line();
        let mut it = String::new();
        it.push_str(&self.address);
        it.push('\n');
        for (index, line) in self.lines.iter().enumerate() {
            let marker = if Some(index) == highlighted_line { '>' } else { ' ' };
            it.push(marker);
            it.push_str(&line.text);
            it.push('\n');
        }
        it.push_str(&self.status);
        it.push('\n');
        it
    }
}

impl DisplaySurface for SurfaceBuffer {
    fn apply(&mut self, op: &DisplayOp) -> miette::Result<()> {
        match op {
            DisplayOp::ClearDisplay => *self = SurfaceBuffer::default(),
            DisplayOp::SetAddress(it) => self.address.clone_from(it),
            DisplayOp::SetStatus(it) => self.status.clone_from(it),
            DisplayOp::InsertLine { text, maybe_style } => self.lines.push(SurfaceLine {
                text: text.clone(),
                maybe_style: *maybe_style,
            }),
            DisplayOp::MarkLinkAnchor => {
                let Some(last_line_index) = self.lines.len().checked_sub(1) else {
                    miette::bail!("Can't mark a link anchor before any line is inserted");
                };
                self.anchors.push(last_line_index);
            }
            DisplayOp::HighlightAnchor(index) => {
                if *index >= self.anchors.len() {
                    miette::bail!(
                        "Can't highlight anchor {index}, only {} are marked",
                        self.anchors.len()
                    );
                }
                self.maybe_highlighted_anchor = Some(*index);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DisplayOps, display_ops};
    use pretty_assertions::assert_eq;

    fn sample_ops() -> DisplayOps {
        let mut ops = display_ops!(
            @new
            DisplayOp::ClearDisplay,
            DisplayOp::SetAddress("DIR: host:70".to_string()),
        );
        ops.insert_line("        Info", Some(LineStyle::Unknown));
        ops.insert_line(" DIR    Menu", Some(LineStyle::Dir));
        display_ops!(@add_to ops => DisplayOp::MarkLinkAnchor);
        ops.insert_line("TEXT    Readme", Some(LineStyle::Item));
        display_ops!(@add_to ops => DisplayOp::MarkLinkAnchor, DisplayOp::HighlightAnchor(1));
        ops
    }

    #[test]
    fn test_apply_records_lines_anchors_and_highlight() {
        let mut buffer = SurfaceBuffer::default();
        buffer.apply_all(&sample_ops()).unwrap();

        assert_eq!(buffer.address(), "DIR: host:70");
        assert_eq!(buffer.lines().len(), 3);
        assert_eq!(buffer.anchors(), &[1, 2]);
        assert_eq!(buffer.highlighted_anchor(), Some(1));
        assert_eq!(buffer.highlighted_line(), Some(2));
        assert_eq!(buffer.anchor_at_line(1), Some(0));
        assert_eq!(buffer.anchor_at_line(0), None);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut buffer = SurfaceBuffer::default();
        buffer.apply_all(&sample_ops()).unwrap();
        buffer.apply(&DisplayOp::SetStatus("busy".to_string())).unwrap();

        buffer.apply(&DisplayOp::ClearDisplay).unwrap();

        assert_eq!(buffer, SurfaceBuffer::default());
        assert_eq!(buffer.status(), status_line(""));
    }

    #[test]
    fn test_invalid_ops_are_errors() {
        let mut buffer = SurfaceBuffer::default();
        assert!(buffer.apply(&DisplayOp::MarkLinkAnchor).is_err());
        assert!(buffer.apply(&DisplayOp::HighlightAnchor(0)).is_err());
    }

    #[test]
    fn test_to_plain_text_marks_highlighted_line() {
        let mut buffer = SurfaceBuffer::default();
        buffer.apply_all(&sample_ops()).unwrap();

        let expected = format!(
            "DIR: host:70\n         Info\n  DIR    Menu\n>TEXT    Readme\n{}\n",
            status_line("")
        );
        assert_eq!(buffer.to_plain_text(), expected);
    }
}
