// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::fmt::{Display, Formatter, Result};

pub mod location_constants {
    /// Well known Gopher port.
    pub const DEFAULT_PORT: u16 = 70;
    /// Public Gopher server used when no host is configured.
    pub const DEFAULT_HOST: &str = "legume.ocaml.nl";
    /// The empty selector asks the server for its root listing.
    pub const DEFAULT_SELECTOR: &str = "";

    pub const TEXT_FILE_CHAR: char = '0';
    pub const DIRECTORY_CHAR: char = '1';
    pub const SERVER_ERROR_CHAR: char = '3';
    pub const INFO_CHAR: char = 'i';
}

use location_constants::{DEFAULT_HOST, DEFAULT_PORT, DEFAULT_SELECTOR, DIRECTORY_CHAR,
                         TEXT_FILE_CHAR};

/// The item type of a Gopher resource. Derived from the first character of a directory
/// line, or assumed ([`EntryKind::Directory`]) for the home page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EntryKind {
    TextFile,
    #[default]
    Directory,
    Unknown(char),
}

impl From<char> for EntryKind {
    fn from(type_char: char) -> Self {
        match type_char {
            TEXT_FILE_CHAR => EntryKind::TextFile,
            DIRECTORY_CHAR => EntryKind::Directory,
            other => EntryKind::Unknown(other),
        }
    }
}

impl EntryKind {
    #[must_use]
    pub fn type_char(self) -> char {
        match self {
            EntryKind::TextFile => TEXT_FILE_CHAR,
            EntryKind::Directory => DIRECTORY_CHAR,
            EntryKind::Unknown(it) => it,
        }
    }

    /// Only text files and directories can be fetched and displayed.
    #[must_use]
    pub fn is_navigable(self) -> bool {
        matches!(self, EntryKind::TextFile | EntryKind::Directory)
    }

    /// Prefix used in the address line.
    #[must_use]
    pub fn address_prefix(self) -> String {
        match self {
            EntryKind::TextFile => "TEXT".to_string(),
            EntryKind::Directory => "DIR".to_string(),
            EntryKind::Unknown(it) => format!("?[{it}]"),
        }
    }
}

/// Identifies a fetchable resource. There are no setters, a [`Location`] is immutable
/// once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    host: String,
    port: u16,
    selector: String,
    kind: EntryKind,
}

impl Default for Location {
    fn default() -> Self { Self::home(DEFAULT_HOST, DEFAULT_PORT, DEFAULT_SELECTOR) }
}

impl Location {
    pub fn new(
        host: impl Into<String>,
        port: u16,
        selector: impl Into<String>,
        kind: EntryKind,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            selector: selector.into(),
            kind,
        }
    }

    /// The home page of a server is always assumed to be a directory.
    pub fn home(host: impl Into<String>, port: u16, selector: impl Into<String>) -> Self {
        Self::new(host, port, selector, EntryKind::Directory)
    }

    #[must_use]
    pub fn host(&self) -> &str { &self.host }

    #[must_use]
    pub fn port(&self) -> u16 { self.port }

    #[must_use]
    pub fn selector(&self) -> &str { &self.selector }

    #[must_use]
    pub fn kind(&self) -> EntryKind { self.kind }

    /// Eg: `DIR: gopher.example:70/menu`.
    #[must_use]
    pub fn address_line(&self) -> String {
        format!("{}: {self}", self.kind.address_prefix())
    }
}

/// Eg: `gopher.example:70/menu`. The selector is appended as is, since selectors
/// usually start with a `/`.
impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{}:{}{}", self.host, self.port, self.selector)
    }
}
