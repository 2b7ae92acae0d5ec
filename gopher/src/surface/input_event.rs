// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
                       MouseButton, MouseEvent, MouseEventKind};

use crate::crossterm_surface_constants::WHEEL_SCROLL_ROWS;

/// What the user asked for, independent of which key or mouse gesture they used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    /// Positive is down.
    MoveSelection(isize),
    /// Follow the selected link.
    Activate,
    Back,
    Home,
    Reload,
    /// Left click on this terminal row.
    Click { row: u16 },
    /// Scroll the viewport by this many rows. Positive is down.
    Scroll(isize),
    /// Scroll the viewport by this many pages. Positive is down.
    ScrollPage(isize),
    Resize { cols: u16, rows: u16 },
    Quit,
}

/// Events that don't map to anything the user can ask for (eg: key release, focus
/// changes, paste) are `Err(())`.
impl TryFrom<Event> for UserAction {
    type Error = ();

    fn try_from(event: Event) -> Result<Self, Self::Error> {
        match event {
            Event::Key(key_event) => UserAction::try_from(key_event),
            Event::Mouse(mouse_event) => UserAction::try_from(mouse_event),
            Event::Resize(cols, rows) => Ok(UserAction::Resize { cols, rows }),
            _ => Err(()),
        }
    }
}

impl TryFrom<KeyEvent> for UserAction {
    type Error = ();

    fn try_from(key_event: KeyEvent) -> Result<Self, Self::Error> {
        if key_event.kind == KeyEventKind::Release {
            return Err(());
        }

        if key_event.modifiers.contains(KeyModifiers::CONTROL) {
            return match key_event.code {
                KeyCode::Char('c' | 'd') => Ok(UserAction::Quit),
                _ => Err(()),
            };
        }

        match key_event.code {
            KeyCode::Up | KeyCode::Char('k') => Ok(UserAction::MoveSelection(-1)),
            KeyCode::Down | KeyCode::Char('j') => Ok(UserAction::MoveSelection(1)),
            KeyCode::Right | KeyCode::Enter | KeyCode::Char('l') => {
                Ok(UserAction::Activate)
            }
            KeyCode::Left | KeyCode::Backspace | KeyCode::Char('h') => {
                Ok(UserAction::Back)
            }
            KeyCode::Home | KeyCode::Char('H') => Ok(UserAction::Home),
            KeyCode::F(5) | KeyCode::Char('r') => Ok(UserAction::Reload),
            KeyCode::PageUp => Ok(UserAction::ScrollPage(-1)),
            KeyCode::PageDown | KeyCode::Char(' ') => Ok(UserAction::ScrollPage(1)),
            KeyCode::Esc | KeyCode::Char('q') => Ok(UserAction::Quit),
            _ => Err(()),
        }
    }
}

impl TryFrom<MouseEvent> for UserAction {
    type Error = ();

    fn try_from(mouse_event: MouseEvent) -> Result<Self, Self::Error> {
        match mouse_event.kind {
            MouseEventKind::Down(MouseButton::Left) => Ok(UserAction::Click {
                row: mouse_event.row,
            }),
            MouseEventKind::ScrollUp => Ok(UserAction::Scroll(-WHEEL_SCROLL_ROWS)),
            MouseEventKind::ScrollDown => Ok(UserAction::Scroll(WHEEL_SCROLL_ROWS)),
            _ => Err(()),
        }
    }
}
