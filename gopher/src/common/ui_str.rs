// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::fmt::Display;

/// Every status line starts with this banner.
pub const VERSION_BANNER: &str = concat!("-=[ r3bl gopher ", env!("CARGO_PKG_VERSION"), " ]=-");

/// Left margin for each line of a plain text document.
pub const PLAIN_TEXT_PADDING: &str = "    ";

pub const SERVER_ERROR_PREFIX: &str = "[SERVER ERROR] ";
pub const TRAILING_DATA_OMITTED: &str = "[TRAILING DATA OMITTED]";
pub const POSSIBLY_INCOMPLETE: &str = "[POSSIBLY INCOMPLETE]";
pub const FETCH_FAILED: &str = "[FETCH FAILED]";
pub const UNSUPPORTED_ITEM_TYPE: &str = "[UNSUPPORTED ITEM TYPE]";

/// The status line shown to the user: the banner, then the message (if any) after a
/// single space.
#[must_use]
pub fn status_line(message: &str) -> String {
    if message.is_empty() {
        VERSION_BANNER.to_string()
    } else {
        format!("{VERSION_BANNER} {message}")
    }
}

#[must_use]
pub fn fetch_failed_msg(cause: impl Display) -> String {
    format!("{FETCH_FAILED} {cause}")
}

#[must_use]
pub fn fetching_msg(address: impl Display) -> String { format!("Fetching {address} ...") }

#[must_use]
pub fn unsupported_item_type_msg(kind: char) -> String {
    format!("{UNSUPPORTED_ITEM_TYPE} ?[{kind}]")
}
