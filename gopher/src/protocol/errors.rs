// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::time::Duration;

/// Fatal to the fetch attempt that produced it. The [`crate::Navigator`] leaves the
/// previously displayed page unchanged, and the app surfaces the cause in the status
/// line. There are no automatic retries.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum TransportError {
    /// Name resolution failed, or the connection was refused or reset.
    #[error("Could not connect to {address}")]
    #[diagnostic(
        code(r3bl_gopher::transport::connect),
        help("Check the host name and port, and that the server is reachable")
    )]
    Connect {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not send selector to {address}")]
    #[diagnostic(code(r3bl_gopher::transport::send))]
    Send {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// The response was truncated by an I/O error before the peer closed the stream.
    #[error("Incomplete read from {address}")]
    #[diagnostic(code(r3bl_gopher::transport::read))]
    Read {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Timed out after {after:?} while fetching from {address}")]
    #[diagnostic(
        code(r3bl_gopher::transport::timed_out),
        help("Increase or remove `--timeout-secs`")
    )]
    TimedOut { address: String, after: Duration },
}

/// Why a directory line could not be turned into a [`crate::DirectoryEntry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedReason {
    /// Fewer than the 4 tab separated fields (display, selector, host, port).
    MissingFields { found: usize },
    /// The port field is not an unsigned 16 bit integer.
    InvalidPort(String),
}

impl std::fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MalformedReason::MissingFields { found } => {
                write!(f, "expected 4 tab separated fields, found {found}")
            }
            MalformedReason::InvalidPort(port) => write!(f, "invalid port '{port}'"),
        }
    }
}

/// Never fatal to the whole page. The offending line is rendered display only, and the
/// error is kept on the [`crate::DirectoryListing`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
pub enum ParseError {
    #[error("Malformed directory entry on line {line_number}: {reason}")]
    #[diagnostic(code(r3bl_gopher::parser::malformed_entry))]
    MalformedEntry {
        /// 1 based, counted after splitting on embedded newlines.
        line_number: usize,
        line: String,
        reason: MalformedReason,
    },
}
