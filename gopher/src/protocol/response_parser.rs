// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Interpret the raw lines of a response according to the kind of document that was
//! requested.
//!
//! Both kinds share one preprocessing step: every line is split again on `\n`, since
//! some servers send bare newlines instead of CRLF.
//!
//! # Text documents
//!
//! | Line                           | Meaning                                            |
//! | :----------------------------- | :------------------------------------------------- |
//! | first line `3...` w/ 4+ fields | server error, rest of the response is omitted      |
//! | `.`                            | end of document, anything after it is omitted      |
//! | `..`                           | dot stuffed line, un-escaped to `.`                |
//! | anything else                  | content, kept verbatim                             |
//!
//! # Directory listings
//!
//! Each line is `<type><display text>\t<selector>\t<host>\t<port>`. Only types `0` and
//! `1` become [`DirectoryEntry`] values, every other line is display only.

use crate::{EntryKind, Location, MalformedReason, ParseError,
            location_constants::{DIRECTORY_CHAR, INFO_CHAR, SERVER_ERROR_CHAR,
                                 TEXT_FILE_CHAR}};

pub mod parser_constants {
    pub const END_OF_DOCUMENT: &str = ".";
    pub const ESCAPED_DOT: &str = "..";
    pub const FIELD_SEPARATOR: char = '\t';
    /// Display text, selector, host, port.
    pub const ENTRY_FIELD_COUNT: usize = 4;
}

use parser_constants::{END_OF_DOCUMENT, ENTRY_FIELD_COUNT, ESCAPED_DOT, FIELD_SEPARATOR};

/// Soft advisory flags. These are never errors, they only show up as a status
/// annotation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseFlags {
    /// No `.` terminator line was seen.
    pub possibly_incomplete: bool,
    /// Content followed the terminator (or a server error line).
    pub trailing_data_omitted: bool,
}

/// The result of [`parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedPage {
    Text {
        content: Vec<String>,
        flags: ParseFlags,
    },
    Directory(DirectoryListing),
    /// A Gopher type `3` response to a text request.
    ServerError {
        message: String,
        flags: ParseFlags,
    },
    /// The requested kind has no renderer.
    Unsupported { kind: char },
}

impl Default for ParsedPage {
    fn default() -> Self { ParsedPage::empty(EntryKind::default()) }
}

impl ParsedPage {
    /// A page that hasn't been fetched yet.
    #[must_use]
    pub fn empty(kind: EntryKind) -> Self {
        match kind {
            EntryKind::TextFile => ParsedPage::Text {
                content: vec![],
                flags: ParseFlags::default(),
            },
            EntryKind::Directory => ParsedPage::Directory(DirectoryListing::default()),
            EntryKind::Unknown(kind) => ParsedPage::Unsupported { kind },
        }
    }

    /// The navigable links. Always empty unless this is a directory.
    #[must_use]
    pub fn entries(&self) -> &[DirectoryEntry] {
        match self {
            ParsedPage::Directory(listing) => &listing.entries,
            _ => &[],
        }
    }

    #[must_use]
    pub fn flags(&self) -> ParseFlags {
        match self {
            ParsedPage::Text { flags, .. } | ParsedPage::ServerError { flags, .. } => {
                *flags
            }
            ParsedPage::Directory(listing) => listing.flags,
            ParsedPage::Unsupported { .. } => ParseFlags::default(),
        }
    }
}

/// A parsed directory listing. [`DirectoryListing::lines`] holds every displayed line in
/// order, [`DirectoryListing::entries`] only the navigable ones.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DirectoryListing {
    pub lines: Vec<DirectoryLine>,
    pub entries: Vec<DirectoryEntry>,
    pub malformed: Vec<ParseError>,
    pub flags: ParseFlags,
}

/// One displayed line of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryLine {
    pub label: ControlLabel,
    pub display_text: String,
    /// Index into [`DirectoryListing::entries`] if this line is a link.
    pub maybe_entry_index: Option<usize>,
}

impl DirectoryLine {
    /// Control column label followed by the display text.
    #[must_use]
    pub fn rendered_text(&self) -> String {
        format!("{}{}", self.label.column_text(), self.display_text)
    }
}

/// What is shown in the control column on the left of each directory line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlLabel {
    Info,
    Text,
    Dir,
    Other(char),
}

impl From<char> for ControlLabel {
    fn from(type_char: char) -> Self {
        match type_char {
            INFO_CHAR => ControlLabel::Info,
            TEXT_FILE_CHAR => ControlLabel::Text,
            DIRECTORY_CHAR => ControlLabel::Dir,
            other => ControlLabel::Other(other),
        }
    }
}

impl ControlLabel {
    #[must_use]
    pub fn column_text(self) -> String {
        match self {
            ControlLabel::Info => "        ".to_string(),
            ControlLabel::Text => "TEXT    ".to_string(),
            ControlLabel::Dir => " DIR    ".to_string(),
            ControlLabel::Other(it) => format!("?[{it}]    "),
        }
    }
}

/// A navigable line of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub kind: EntryKind,
    pub display_text: String,
    pub selector: String,
    pub host: String,
    pub port: u16,
}

impl DirectoryEntry {
    /// Where activating this entry goes.
    #[must_use]
    pub fn location(&self) -> Location {
        Location::new(&self.host, self.port, &self.selector, self.kind)
    }
}

/// Interpret raw response `lines` as a document of `expected_kind`.
#[must_use]
pub fn parse(lines: &[String], expected_kind: EntryKind) -> ParsedPage {
    let lines = split_embedded_newlines(lines);
    match expected_kind {
        EntryKind::TextFile => parse_text(&lines),
        EntryKind::Directory => ParsedPage::Directory(parse_directory(&lines)),
        EntryKind::Unknown(kind) => ParsedPage::Unsupported { kind },
    }
}

/// Defends against servers that break lines with `\n` instead of `\r\n`.
#[must_use]
pub fn split_embedded_newlines(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .flat_map(|line| line.split('\n'))
        .map(str::to_owned)
        .collect()
}

/// Lines are expected to be preprocessed by [`split_embedded_newlines`].
#[must_use]
pub fn parse_text(lines: &[String]) -> ParsedPage {
    if let Some(message) =
        lines.first().map(String::as_str).and_then(try_parse_server_error)
    {
        return ParsedPage::ServerError {
            message,
            flags: ParseFlags {
                possibly_incomplete: false,
                trailing_data_omitted: lines.len() > 1,
            },
        };
    }

    let mut content = vec![];
    let mut flags = ParseFlags::default();
    let mut got_end = false;

    for line in lines {
        if got_end {
            flags.trailing_data_omitted = true;
            break;
        }
        match line.as_str() {
            END_OF_DOCUMENT => got_end = true,
            ESCAPED_DOT => content.push(END_OF_DOCUMENT.to_string()),
            _ => content.push(line.clone()),
        }
    }

    flags.possibly_incomplete = !got_end;
    ParsedPage::Text { content, flags }
}

/// A line like `3File not found\terr\thost\t70` is a server error if it has at least 4
/// tab separated fields. The message is field 0 without the leading type character.
fn try_parse_server_error(line: &str) -> Option<String> {
    let rest = line.strip_prefix(SERVER_ERROR_CHAR)?;
    let fields: Vec<&str> = rest.split(FIELD_SEPARATOR).collect();
    (fields.len() >= ENTRY_FIELD_COUNT).then(|| fields[0].to_string())
}

/// Lines are expected to be preprocessed by [`split_embedded_newlines`].
#[must_use]
pub fn parse_directory(lines: &[String]) -> DirectoryListing {
    let mut listing = DirectoryListing::default();
    let mut got_end = false;

    for (index, line) in lines.iter().enumerate() {
        if got_end {
            listing.flags.trailing_data_omitted = true;
            break;
        }
        if line == END_OF_DOCUMENT {
            got_end = true;
            continue;
        }
        let mut chars = line.chars();
        let Some(type_char) = chars.next() else {
            continue;
        };
        let rest = chars.as_str();

        let line_number = index + 1;
        let (display_text, maybe_entry) = match parse_entry_fields(type_char, rest) {
            Ok(it) => it,
            Err((display_text, reason)) => {
                listing.malformed.push(ParseError::MalformedEntry {
                    line_number,
                    line: line.clone(),
                    reason,
                });
                (display_text, None)
            }
        };

        let maybe_entry_index = maybe_entry.map(|entry| {
            listing.entries.push(entry);
            listing.entries.len() - 1
        });

        listing.lines.push(DirectoryLine {
            label: ControlLabel::from(type_char),
            display_text,
            maybe_entry_index,
        });
    }

    listing.flags.possibly_incomplete = !got_end;
    listing
}

type EntryFieldsResult = Result<(String, Option<DirectoryEntry>), (String, MalformedReason)>;

/// Returns the display text, and the entry if `type_char` is navigable. A navigable line
/// with missing fields or a bad port is an error, but its display text is still
/// returned so that it can be rendered display only.
fn parse_entry_fields(type_char: char, rest: &str) -> EntryFieldsResult {
    let fields: Vec<&str> = rest.split(FIELD_SEPARATOR).collect();
    let display_text = fields[0].to_string();

    let kind = EntryKind::from(type_char);
    if !kind.is_navigable() {
        return Ok((display_text, None));
    }

    let [_, selector, host, port, ..] = fields.as_slice() else {
        let found = fields.len();
        return Err((display_text, MalformedReason::MissingFields { found }));
    };

    let Ok(port) = port.trim().parse::<u16>() else {
        return Err((display_text, MalformedReason::InvalidPort((*port).to_string())));
    };

    let entry = DirectoryEntry {
        kind,
        display_text: display_text.clone(),
        selector: (*selector).to_string(),
        host: (*host).to_string(),
        port,
    };
    Ok((display_text, Some(entry)))
}
