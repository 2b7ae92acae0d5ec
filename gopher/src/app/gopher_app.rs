// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{DisplayOps, Fetch, Location, Navigator, Transition, TransportError, build,
            build_selection_update, build_status_update, display_ops, fetch_failed_msg};

/// A navigation request, after the surface has resolved any screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    /// Fetch and show the home page.
    Start,
    MoveSelection(isize),
    /// Follow the selected link.
    Activate,
    /// A link anchor was clicked. Selects it, or follows it if it was already selected.
    Click { anchor: usize },
    Back,
    Home,
    Reload,
}

/// Glues [`NavAction`]s to [`Navigator`] transitions, and transitions to the
/// [`DisplayOps`] that show their result.
#[derive(Debug)]
pub struct GopherApp<F: Fetch> {
    navigator: Navigator,
    fetcher: F,
}

impl<F: Fetch> GopherApp<F> {
    #[must_use]
    pub fn new(home: Location, fetcher: F) -> Self {
        Self {
            navigator: Navigator::new(home),
            fetcher,
        }
    }

    #[must_use]
    pub fn navigator(&self) -> &Navigator { &self.navigator }

    #[must_use]
    pub fn fetcher(&self) -> &F { &self.fetcher }

    /// The location that `action` is going to fetch, if it needs the network. This lets
    /// the surface show a status message before the fetch starts.
    #[must_use]
    pub fn pending_fetch(&self, action: NavAction) -> Option<Location> {
        let current = self.navigator.current();
        match action {
            NavAction::Start | NavAction::Reload => Some(current.location().clone()),
            NavAction::Activate => current.selected_entry().map(|it| it.location()),
            NavAction::Click { anchor } if current.selected_index() == Some(anchor) => {
                current.entries().get(anchor).map(|it| it.location())
            }
            _ => None,
        }
    }

    /// Run `action`, and return the ops that show its result. A failed fetch leaves the
    /// page as it was, and only replaces the status line with the cause.
    pub async fn dispatch(&mut self, action: NavAction) -> DisplayOps {
        match self.try_dispatch(action).await {
            Ok(ops) => ops,
            Err(error) => {
                // % is Display, ? is Debug.
                tracing::error!(
                    message = "Fetch failed",
                    action = ?action,
                    error = %error_chain(&error)
                );

                let mut ops = if action == NavAction::Start {
                    // Nothing is on screen yet, so show the address that failed.
                    build(self.navigator.current())
                } else {
                    display_ops!()
                };
                ops.extend(build_status_update(&fetch_failed_msg(error_chain(&error))).list);
                ops
            }
        }
    }

    /// Same as [`GopherApp::dispatch`], but the transport error is returned instead of
    /// being turned into a status message.
    ///
    /// # Errors
    ///
    /// Returns the [`TransportError`] if `action` needed a fetch, and it failed.
    pub async fn try_dispatch(
        &mut self,
        action: NavAction,
    ) -> Result<DisplayOps, TransportError> {
        let navigator = &mut self.navigator;
        let fetcher = &mut self.fetcher;

        let transition = match action {
            NavAction::Start => navigator.start(fetcher).await?,
            NavAction::Reload => navigator.reload(fetcher).await?,
            NavAction::Activate => navigator.activate_selection(fetcher).await?,
            NavAction::Click { anchor } => {
                if navigator.current().selected_index() == Some(anchor) {
                    navigator.jump(fetcher, anchor).await?
                } else {
                    navigator.select(anchor)
                }
            }
            NavAction::MoveSelection(delta) => navigator.move_selection(delta),
            NavAction::Back => navigator.back(),
            NavAction::Home => navigator.home(),
        };

        Ok(match transition {
            Transition::PageChanged => build(self.navigator.current()),
            Transition::SelectionChanged => build_selection_update(self.navigator.current()),
            Transition::Unchanged => display_ops!(),
        })
    }
}

/// The error, followed by each of its sources, separated by `": "`.
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut it = error.to_string();
    let mut maybe_source = error.source();
    while let Some(source) = maybe_source {
        it.push_str(": ");
        it.push_str(&source.to_string());
        maybe_source = source.source();
    }
    it
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DisplayOp, DisplaySurface, EntryKind, SurfaceBuffer, status_line,
                test_fixtures::*};
    use pretty_assertions::assert_eq;

    async fn started() -> (GopherApp<MockFetcher>, SurfaceBuffer) {
        let mut app = GopherApp::new(Location::home("host", 70, ""), mock_site());
        let mut surface = SurfaceBuffer::default();
        surface
            .apply_all(&app.dispatch(NavAction::Start).await)
            .unwrap();
        (app, surface)
    }

    #[tokio::test]
    async fn test_start_renders_home_directory() {
        let (_app, surface) = started().await;
        assert_eq!(surface.address(), "DIR: host:70");
        assert_eq!(surface.lines().len(), 3);
        assert_eq!(surface.highlighted_anchor(), Some(0));
        assert_eq!(surface.status(), status_line(""));
    }

    #[tokio::test]
    async fn test_move_selection_only_updates_highlight() {
        let (mut app, _surface) = started().await;
        let ops = app.dispatch(NavAction::MoveSelection(1)).await;
        assert_eq!(ops.to_vec(), vec![DisplayOp::HighlightAnchor(1)]);
    }

    #[tokio::test]
    async fn test_activate_then_back() {
        let (mut app, mut surface) = started().await;

        surface
            .apply_all(&app.dispatch(NavAction::Activate).await)
            .unwrap();
        assert_eq!(surface.address(), "DIR: host:70/a");

        surface
            .apply_all(&app.dispatch(NavAction::Back).await)
            .unwrap();
        assert_eq!(surface.address(), "DIR: host:70");
        assert_eq!(app.fetcher().fetched.len(), 2);
    }

    #[tokio::test]
    async fn test_click_selects_then_follows() {
        let (mut app, mut surface) = started().await;

        assert_eq!(app.pending_fetch(NavAction::Click { anchor: 1 }), None);
        surface
            .apply_all(&app.dispatch(NavAction::Click { anchor: 1 }).await)
            .unwrap();
        assert_eq!(surface.highlighted_anchor(), Some(1));

        assert_eq!(
            app.pending_fetch(NavAction::Click { anchor: 1 }),
            Some(Location::new("host", 70, "/b.txt", EntryKind::TextFile))
        );
        surface
            .apply_all(&app.dispatch(NavAction::Click { anchor: 1 }).await)
            .unwrap();
        assert_eq!(surface.address(), "TEXT: host:70/b.txt");
        assert_eq!(surface.lines()[0].text, "    Hello");
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_page_and_sets_status() {
        let fetcher = mock_site().with("", &["1Broken\t/missing\thost\t70", "."]);
        let mut app = GopherApp::new(Location::home("host", 70, ""), fetcher);
        let mut surface = SurfaceBuffer::default();
        surface
            .apply_all(&app.dispatch(NavAction::Start).await)
            .unwrap();
        let before = surface.lines().to_vec();

        surface
            .apply_all(&app.dispatch(NavAction::Activate).await)
            .unwrap();

        assert_eq!(surface.lines(), before.as_slice());
        assert_eq!(surface.address(), "DIR: host:70");
        assert!(surface.status().contains("[FETCH FAILED] Could not connect to host:70/missing"));
        assert_eq!(app.navigator().history().len(), 0);
    }

    #[tokio::test]
    async fn test_failed_start_shows_address_and_status() {
        let mut app = GopherApp::new(Location::home("host", 70, "/nope"), mock_site());
        let mut surface = SurfaceBuffer::default();
        surface
            .apply_all(&app.dispatch(NavAction::Start).await)
            .unwrap();

        assert_eq!(surface.address(), "DIR: host:70/nope");
        assert!(surface.lines().is_empty());
        assert!(surface.status().contains("[FETCH FAILED]"));
    }

    #[tokio::test]
    async fn test_try_dispatch_returns_transport_error() {
        let mut app = GopherApp::new(Location::home("host", 70, "/nope"), mock_site());
        let result = app.try_dispatch(NavAction::Start).await;
        assert!(matches!(result, Err(TransportError::Connect { .. })));
    }

    #[test]
    fn test_error_chain_includes_sources() {
        let error = TransportError::Connect {
            address: "host:70".to_string(),
            source: std::io::Error::other("refused"),
        };
        assert_eq!(error_chain(&error), "Could not connect to host:70: refused");
    }
}
