// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{DEBUG_GOPHER_NAVIGATION, Fetch, Location, PageState, TransportError};

/// What a transition did to the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Transition {
    /// A different page is current, or the current page was re-fetched. Re-render it.
    PageChanged,
    /// Only the selection changed. Re-highlight.
    SelectionChanged,
    /// Nothing happened.
    Unchanged,
}

/// The navigation state machine. It exclusively owns the current [`PageState`] and the
/// back history (snapshots taken before navigating away).
///
/// There is a single state, viewing a page. Transitions that need the network take a
/// [`Fetch`] implementation, and are all or nothing: if the fetch fails, the error is
/// returned and the current page and history are left exactly as they were.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    current: PageState,
    history: Vec<PageState>,
}

impl Navigator {
    /// The home page is not fetched until [`Navigator::start`] is called.
    #[must_use]
    pub fn new(home: Location) -> Self {
        Self {
            current: PageState::unloaded(home),
            history: vec![],
        }
    }

    #[must_use]
    pub fn current(&self) -> &PageState { &self.current }

    #[must_use]
    pub fn history(&self) -> &[PageState] { &self.history }

    /// Fetch the home page.
    ///
    /// # Errors
    ///
    /// Returns the [`TransportError`] if the fetch fails.
    pub async fn start(
        &mut self,
        fetcher: &mut impl Fetch,
    ) -> Result<Transition, TransportError> {
        self.reload(fetcher).await
    }

    /// Follow the entry at `entry_index`. The current page is pushed onto the history.
    /// This is a no-op (no fetch, no history push) if the index doesn't point to an
    /// entry, which is always the case on a page w/out entries.
    ///
    /// # Errors
    ///
    /// Returns the [`TransportError`] if the fetch fails.
    pub async fn jump(
        &mut self,
        fetcher: &mut impl Fetch,
        entry_index: usize,
    ) -> Result<Transition, TransportError> {
        let Some(entry) = self.current.entries().get(entry_index) else {
            return Ok(Transition::Unchanged);
        };
        let target = entry.location();

        DEBUG_GOPHER_NAVIGATION.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(message = "jump", entry_index = %entry_index, target = %target);
        });

        let raw_lines = fetcher.fetch(&target).await?;
        let next = PageState::from_response(target, raw_lines);
        let previous = std::mem::replace(&mut self.current, next);
        self.history.push(previous);

        Ok(Transition::PageChanged)
    }

    /// [`Navigator::jump`] to the selected entry, if any.
    ///
    /// # Errors
    ///
    /// Returns the [`TransportError`] if the fetch fails.
    pub async fn activate_selection(
        &mut self,
        fetcher: &mut impl Fetch,
    ) -> Result<Transition, TransportError> {
        match self.current.selected_index() {
            Some(entry_index) => self.jump(fetcher, entry_index).await,
            None => Ok(Transition::Unchanged),
        }
    }

    /// Restore the most recent history snapshot, w/out going to the network.
    pub fn back(&mut self) -> Transition {
        let Some(previous) = self.history.pop() else {
            return Transition::Unchanged;
        };

        DEBUG_GOPHER_NAVIGATION.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(message = "back", location = %previous.location());
        });

        self.current = previous;
        Transition::PageChanged
    }

    /// Drop all but the oldest snapshot, go [`Navigator::back`] to it, and select its
    /// first entry.
    pub fn home(&mut self) -> Transition {
        self.history.truncate(1);
        let transition = self.back();
        let current = std::mem::take(&mut self.current);
        self.current = current.with_selection_reset();

        match transition {
            Transition::PageChanged => Transition::PageChanged,
            _ if self.current.selected_index().is_some() => Transition::SelectionChanged,
            _ => Transition::Unchanged,
        }
    }

    /// Re-fetch the current location and replace the current page in place. The history
    /// is not touched.
    ///
    /// # Errors
    ///
    /// Returns the [`TransportError`] if the fetch fails.
    pub async fn reload(
        &mut self,
        fetcher: &mut impl Fetch,
    ) -> Result<Transition, TransportError> {
        let location = self.current.location().clone();

        DEBUG_GOPHER_NAVIGATION.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(message = "reload", location = %location);
        });

        let raw_lines = fetcher.fetch(&location).await?;
        self.current = PageState::from_response(location, raw_lines);

        Ok(Transition::PageChanged)
    }

    /// Move the selection by `delta`, wrapping in both directions.
    pub fn move_selection(&mut self, delta: isize) -> Transition {
        if self.current.entries().is_empty() {
            return Transition::Unchanged;
        }
        let current = std::mem::take(&mut self.current);
        self.current = current.with_selection_moved(delta);
        Transition::SelectionChanged
    }

    /// Select the entry at `entry_index` w/out following it.
    pub fn select(&mut self, entry_index: usize) -> Transition {
        if entry_index >= self.current.entries().len()
            || self.current.selected_index() == Some(entry_index)
        {
            return Transition::Unchanged;
        }
        let current = std::mem::take(&mut self.current);
        self.current = current.with_selection(entry_index);
        Transition::SelectionChanged
    }
}
