// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{DirectoryEntry, Location, ParsedPage, parse};

/// The currently displayed page. History snapshots are whole [`PageState`] values, and
/// every transition replaces the live one wholesale, so a snapshot never aliases the
/// page on screen.
///
/// Invariant: `selected_index` is [`None`] iff there are no entries, otherwise it is a
/// valid index into [`PageState::entries`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageState {
    location: Location,
    raw_lines: Vec<String>,
    page: ParsedPage,
    selected_index: Option<usize>,
}

impl PageState {
    /// A page that has not been fetched yet. Nothing to display and nothing to select.
    #[must_use]
    pub fn unloaded(location: Location) -> Self {
        let page = ParsedPage::empty(location.kind());
        Self {
            location,
            raw_lines: vec![],
            page,
            selected_index: None,
        }
    }

    /// Parse `raw_lines` as the kind of `location`. The first entry (if any) is
    /// selected.
    #[must_use]
    pub fn from_response(location: Location, raw_lines: Vec<String>) -> Self {
        let page = parse(&raw_lines, location.kind());
        let selected_index = (!page.entries().is_empty()).then_some(0);
        Self {
            location,
            raw_lines,
            page,
            selected_index,
        }
    }

    #[must_use]
    pub fn location(&self) -> &Location { &self.location }

    #[must_use]
    pub fn raw_lines(&self) -> &[String] { &self.raw_lines }

    #[must_use]
    pub fn page(&self) -> &ParsedPage { &self.page }

    #[must_use]
    pub fn entries(&self) -> &[DirectoryEntry] { self.page.entries() }

    #[must_use]
    pub fn selected_index(&self) -> Option<usize> { self.selected_index }

    #[must_use]
    pub fn selected_entry(&self) -> Option<&DirectoryEntry> {
        self.selected_index.and_then(|it| self.entries().get(it))
    }

    /// Move the selection by `delta`, wrapping around in both directions. Does nothing
    /// if there are no entries.
    #[must_use]
    pub fn with_selection_moved(self, delta: isize) -> Self {
        let len = self.entries().len();
        if len == 0 {
            return self;
        }
        let current = self.selected_index.unwrap_or(0);
        let selected_index = Some(wrap_index(current, delta, len));
        Self {
            selected_index,
            ..self
        }
    }

    /// Select the entry at `index`. Out of range indices are ignored.
    #[must_use]
    pub fn with_selection(self, index: usize) -> Self {
        if index >= self.entries().len() {
            return self;
        }
        Self {
            selected_index: Some(index),
            ..self
        }
    }

    /// Select the first entry, if there is one.
    #[must_use]
    pub fn with_selection_reset(self) -> Self {
        let selected_index = (!self.entries().is_empty()).then_some(0);
        Self {
            selected_index,
            ..self
        }
    }
}

/// `(current + delta) mod len`, for a `len` that is not zero.
fn wrap_index(current: usize, delta: isize, len: usize) -> usize {
    let step = delta.unsigned_abs() % len;
    if delta >= 0 {
        (current + step) % len
    } else {
        (current + len - step) % len
    }
}
