// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Drive the [`Navigator`] against a real Gopher server listening on the loopback
//! interface.

use std::collections::HashMap;

use pretty_assertions::assert_eq;
use r3bl_gopher::{DisplaySurface, EntryKind, GopherApp, Location, NavAction, Navigator,
                  ParsedPage, SurfaceBuffer, TcpFetcher, Transition, TransportError,
                  dump_page};
use tokio::{io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
            net::TcpListener,
            task::JoinHandle};

const LOOPBACK: &str = "127.0.0.1";

/// A running fixture server. It is shut down when this is dropped.
struct FixtureServer {
    port: u16,
    handle: JoinHandle<()>,
}

impl Drop for FixtureServer {
    fn drop(&mut self) { self.handle.abort(); }
}

impl FixtureServer {
    fn home(&self) -> Location { Location::home(LOOPBACK, self.port, "") }
}

/// Links in a listing need the server's port, so bind first, then build the pages.
async fn spawn_fixture_server() -> FixtureServer {
    let listener = TcpListener::bind((LOOPBACK, 0)).await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let pages = fixture_pages(port);
    let handle = tokio::spawn(serve(listener, pages));
    FixtureServer { port, handle }
}

/// Answer each request w/ the page for its selector, then close the connection. An
/// unknown selector gets a type `3` error line.
async fn serve(listener: TcpListener, pages: HashMap<String, Vec<String>>) {
    while let Ok((stream, _)) = listener.accept().await {
        let (reader, mut writer) = stream.into_split();
        let mut request = String::new();
        if BufReader::new(reader).read_line(&mut request).await.is_err() {
            continue;
        }
        let selector = request.trim_end_matches(['\r', '\n']);

        let body = match pages.get(selector) {
            Some(lines) => lines.join("\r\n") + "\r\n",
            None => {
                format!("3'{selector}' does not exist\terror\terror.host\t1\r\n.\r\n")
            }
        };
        _ = writer.write_all(body.as_bytes()).await;
        _ = writer.shutdown().await;
    }
}

fn menu(port: u16, items: &[(char, &str, &str)]) -> Vec<String> {
    items
        .iter()
        .map(|(kind, display, selector)| {
            format!("{kind}{display}\t{selector}\t{LOOPBACK}\t{port}")
        })
        .chain(std::iter::once(".".to_string()))
        .collect()
}

fn fixture_pages(port: u16) -> HashMap<String, Vec<String>> {
    let mut root = vec!["iWelcome to the fixture\t\terror.host\t1".to_string()];
    root.extend(menu(port, &[
        ('1', "Docs", "/docs"),
        ('0', "About", "/about.txt"),
        ('0', "Missing", "/missing.txt"),
    ]));

    HashMap::from([
        (String::new(), root),
        (
            "/docs".to_string(),
            menu(port, &[('0', "Intro", "/docs/intro.txt")]),
        ),
        (
            "/about.txt".to_string(),
            vec!["About this server".to_string(), "..".to_string(), ".".to_string()],
        ),
        (
            "/docs/intro.txt".to_string(),
            vec!["Intro".to_string(), ".".to_string()],
        ),
    ])
}

fn text_content(navigator: &Navigator) -> Vec<String> {
    match navigator.current().page() {
        ParsedPage::Text { content, .. } => content.clone(),
        other => panic!("expected a text page, got {other:?}"),
    }
}

#[tokio::test]
async fn test_start_fetches_home_listing() {
    let server = spawn_fixture_server().await;
    let mut fetcher = TcpFetcher::default();
    let mut navigator = Navigator::new(server.home());

    assert_eq!(
        navigator.start(&mut fetcher).await.unwrap(),
        Transition::PageChanged
    );

    let current = navigator.current();
    assert_eq!(current.entries().len(), 3);
    assert_eq!(current.selected_index(), Some(0));
    assert_eq!(current.raw_lines().len(), 5);
    assert_eq!(current.entries()[0].location().selector(), "/docs");
}

#[tokio::test]
async fn test_jump_to_text_and_back() {
    let server = spawn_fixture_server().await;
    let mut fetcher = TcpFetcher::default();
    let mut navigator = Navigator::new(server.home());
    navigator.start(&mut fetcher).await.unwrap();

    assert_eq!(
        navigator.jump(&mut fetcher, 1).await.unwrap(),
        Transition::PageChanged
    );
    assert_eq!(navigator.current().location().kind(), EntryKind::TextFile);
    assert_eq!(text_content(&navigator), vec!["About this server", "."]);
    assert_eq!(navigator.history().len(), 1);

    assert_eq!(navigator.back(), Transition::PageChanged);
    assert_eq!(navigator.current().location().selector(), "");
    assert!(navigator.history().is_empty());
}

#[tokio::test]
async fn test_deep_jump_then_home() {
    let server = spawn_fixture_server().await;
    let mut fetcher = TcpFetcher::default();
    let mut navigator = Navigator::new(server.home());
    navigator.start(&mut fetcher).await.unwrap();

    navigator.jump(&mut fetcher, 0).await.unwrap();
    navigator.jump(&mut fetcher, 0).await.unwrap();
    assert_eq!(text_content(&navigator), vec!["Intro"]);
    assert_eq!(navigator.history().len(), 2);

    assert_eq!(navigator.home(), Transition::PageChanged);
    assert_eq!(navigator.current().location().selector(), "");
    assert_eq!(navigator.current().selected_index(), Some(0));
    assert!(navigator.history().is_empty());
}

#[tokio::test]
async fn test_missing_text_is_server_error() {
    let server = spawn_fixture_server().await;
    let mut fetcher = TcpFetcher::default();
    let mut navigator = Navigator::new(server.home());
    navigator.start(&mut fetcher).await.unwrap();

    navigator.jump(&mut fetcher, 2).await.unwrap();
    match navigator.current().page() {
        ParsedPage::ServerError { message, flags } => {
            assert_eq!(message, "'/missing.txt' does not exist");
            assert!(flags.trailing_data_omitted);
        }
        other => panic!("expected a server error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_reload_keeps_history() {
    let server = spawn_fixture_server().await;
    let mut fetcher = TcpFetcher::default();
    let mut navigator = Navigator::new(server.home());
    navigator.start(&mut fetcher).await.unwrap();
    navigator.jump(&mut fetcher, 0).await.unwrap();

    assert_eq!(
        navigator.reload(&mut fetcher).await.unwrap(),
        Transition::PageChanged
    );
    assert_eq!(navigator.current().location().selector(), "/docs");
    assert_eq!(navigator.history().len(), 1);
}

#[tokio::test]
async fn test_connection_refused_leaves_state_unchanged() {
    // Grab a free port, then close it.
    let closed_port = {
        let listener = TcpListener::bind((LOOPBACK, 0)).await.unwrap();
        listener.local_addr().unwrap().port()
    };
    let mut fetcher = TcpFetcher::default();
    let mut navigator = Navigator::new(Location::home(LOOPBACK, closed_port, ""));
    let before = navigator.clone();

    let result = navigator.start(&mut fetcher).await;

    assert!(matches!(result, Err(TransportError::Connect { .. })));
    assert_eq!(navigator, before);
}

#[tokio::test]
async fn test_app_renders_to_surface_buffer() {
    let server = spawn_fixture_server().await;
    let mut app = GopherApp::new(server.home(), TcpFetcher::default());
    let mut surface = SurfaceBuffer::default();

    surface
        .apply_all(&app.dispatch(NavAction::Start).await)
        .unwrap();
    assert_eq!(surface.address(), format!("DIR: {LOOPBACK}:{}", server.port));
    assert_eq!(surface.lines()[0].text, "        Welcome to the fixture");
    assert_eq!(surface.lines()[1].text, " DIR    Docs");
    assert_eq!(surface.anchors(), &[1, 2, 3]);
    assert_eq!(surface.highlighted_line(), Some(1));

    surface
        .apply_all(&app.dispatch(NavAction::MoveSelection(-1)).await)
        .unwrap();
    assert_eq!(surface.highlighted_anchor(), Some(2));
}

#[tokio::test]
async fn test_dump_page_over_tcp() {
    let server = spawn_fixture_server().await;
    let home = Location::new(LOOPBACK, server.port, "/docs", EntryKind::Directory);

    let plain_text = dump_page(home, TcpFetcher::default()).await.unwrap();

    assert!(plain_text.contains(">TEXT    Intro\n"));
}
