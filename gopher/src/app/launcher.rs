// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io::Write;

use crossterm::event::{Event, EventStream};
use futures_util::{Stream, StreamExt};
use miette::IntoDiagnostic;

use crate::{CrosstermSurface, DisplaySurface, Fetch, GopherApp, Location, NavAction,
            RawMode, StartupConfig, SurfaceBuffer, TcpFetcher, UserAction,
            build_status_update, fetching_msg, ok};

/// Take over the terminal, browse until the user quits, then give the terminal back.
/// The terminal is restored even if the event loop fails.
///
/// # Errors
///
/// Returns an error if the terminal can't be put into (or taken out of) raw mode, or
/// can't be painted.
pub async fn run_app(startup_config: StartupConfig) -> miette::Result<()> {
    let mut app = GopherApp::new(
        startup_config.home_location(),
        TcpFetcher::new(startup_config.maybe_fetch_timeout),
    );

    let size = crossterm::terminal::size().into_diagnostic()?;
    let mut surface = CrosstermSurface::new(std::io::stdout(), size);

    RawMode::start(surface.output_mut())?;
    let result = run_event_loop(&mut app, &mut surface, EventStream::new()).await;
    let end_result = RawMode::end(surface.output_mut());

    result.and(end_result)
}

/// Fetch the home page, then handle `events` until the user quits or the stream ends.
/// Each fetch is awaited inline, so no event is handled while one is in flight.
///
/// # Errors
///
/// Returns an error if reading an event fails, or the surface can't be painted.
pub async fn run_event_loop<F: Fetch, W: Write>(
    app: &mut GopherApp<F>,
    surface: &mut CrosstermSurface<W>,
    mut events: impl Stream<Item = std::io::Result<Event>> + Unpin,
) -> miette::Result<()> {
    dispatch_and_paint(app, surface, NavAction::Start).await?;

    while let Some(maybe_event) = events.next().await {
        let event = maybe_event.into_diagnostic()?;
        let Ok(user_action) = UserAction::try_from(event) else {
            continue;
        };

        let nav_action = match user_action {
            UserAction::Quit => break,
            UserAction::Scroll(rows) => {
                surface.scroll_by(rows);
                surface.paint()?;
                continue;
            }
            UserAction::ScrollPage(pages) => {
                surface.scroll_pages(pages);
                surface.paint()?;
                continue;
            }
            UserAction::Resize { cols, rows } => {
                surface.resize((cols, rows));
                surface.paint()?;
                continue;
            }
            UserAction::Click { row } => match surface.anchor_at_row(row) {
                Some(anchor) => NavAction::Click { anchor },
                None => continue,
            },
            UserAction::MoveSelection(delta) => NavAction::MoveSelection(delta),
            UserAction::Activate => NavAction::Activate,
            UserAction::Back => NavAction::Back,
            UserAction::Home => NavAction::Home,
            UserAction::Reload => NavAction::Reload,
        };

        dispatch_and_paint(app, surface, nav_action).await?;
    }

    ok!()
}

async fn dispatch_and_paint<F: Fetch, W: Write>(
    app: &mut GopherApp<F>,
    surface: &mut CrosstermSurface<W>,
    nav_action: NavAction,
) -> miette::Result<()> {
    if let Some(location) = app.pending_fetch(nav_action) {
        surface.apply_all(&build_status_update(&fetching_msg(&location)))?;
        surface.paint()?;
    }

    let ops = app.dispatch(nav_action).await;
    if !ops.is_empty() {
        surface.apply_all(&ops)?;
        surface.paint()?;
    }

    ok!()
}

/// Fetch `home` once, and return the page as plain text, exactly as the surface would
/// hold it.
///
/// # Errors
///
/// Returns the transport error if the fetch fails.
pub async fn dump_page(home: Location, fetcher: impl Fetch) -> miette::Result<String> {
    let mut app = GopherApp::new(home, fetcher);
    let ops = app.try_dispatch(NavAction::Start).await?;

    let mut buffer = SurfaceBuffer::default();
    buffer.apply_all(&ops)?;

    Ok(buffer.to_plain_text())
}

/// [`dump_page`] over the network, and print the result to stdout.
///
/// # Errors
///
/// Returns the transport error if the fetch fails.
pub async fn run_dump(startup_config: StartupConfig) -> miette::Result<()> {
    let plain_text = dump_page(
        startup_config.home_location(),
        TcpFetcher::new(startup_config.maybe_fetch_timeout),
    )
    .await?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(plain_text.as_bytes()).into_diagnostic()?;
    stdout.flush().into_diagnostic()?;

    ok!()
}
