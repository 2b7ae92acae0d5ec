// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{ControlLabel, DirectoryListing, DisplayOp, DisplayOps, LineStyle,
            PLAIN_TEXT_PADDING, POSSIBLY_INCOMPLETE, PageState, ParseFlags,
            ParsedPage, SERVER_ERROR_PREFIX, TRAILING_DATA_OMITTED, display_ops,
            status_line, unsupported_item_type_msg};

/// Translate the whole page into display ops: clear, address line, content, an optional
/// status annotation, and (for directories w/ entries) the highlight on the selected
/// anchor.
#[must_use]
pub fn build(page_state: &PageState) -> DisplayOps {
    let mut ops = display_ops!(
        @new
        DisplayOp::ClearDisplay,
        DisplayOp::SetAddress(page_state.location().address_line()),
    );

    match page_state.page() {
        ParsedPage::Text { content, .. } => {
            for line in content {
                ops.insert_line(format!("{PLAIN_TEXT_PADDING}{line}"), None);
            }
        }
        ParsedPage::ServerError { message, .. } => {
            ops.insert_line(
                format!("{SERVER_ERROR_PREFIX}{message}"),
                Some(LineStyle::Error),
            );
        }
        ParsedPage::Directory(listing) => add_directory_lines(&mut ops, listing),
        ParsedPage::Unsupported { kind } => {
            ops.insert_line(unsupported_item_type_msg(*kind), Some(LineStyle::Error));
        }
    }

    if let Some(annotation) = status_annotation(page_state.page().flags()) {
        display_ops!(@add_to ops => DisplayOp::SetStatus(status_line(&annotation)));
    }

    ops.extend(build_selection_update(page_state).list);
    ops
}

/// Just the highlight op for the current selection. Used when only the selection moved.
#[must_use]
pub fn build_selection_update(page_state: &PageState) -> DisplayOps {
    match page_state.selected_index() {
        Some(it) if !page_state.entries().is_empty() => {
            display_ops!(@new DisplayOp::HighlightAnchor(it))
        }
        _ => display_ops!(),
    }
}

/// Replace the status line with a message, leaving everything else on screen as is.
#[must_use]
pub fn build_status_update(message: &str) -> DisplayOps {
    display_ops!(@new DisplayOp::SetStatus(status_line(message)))
}

fn add_directory_lines(ops: &mut DisplayOps, listing: &DirectoryListing) {
    for line in &listing.lines {
        let maybe_entry = line
            .maybe_entry_index
            .and_then(|index| listing.entries.get(index));
        let maybe_style = match (maybe_entry, line.label) {
            (Some(_), ControlLabel::Dir) => Some(LineStyle::Dir),
            (Some(_), ControlLabel::Text) => Some(LineStyle::Item),
            _ => Some(LineStyle::Unknown),
        };
        ops.insert_line(line.rendered_text(), maybe_style);
        if maybe_entry.is_some() {
            display_ops!(@add_to ops => DisplayOp::MarkLinkAnchor);
        }
    }
}

/// Both flags can be set on a directory that has trailing data and was also cut short,
/// in which case both annotations are shown.
fn status_annotation(flags: ParseFlags) -> Option<String> {
    let mut annotation = String::new();
    if flags.trailing_data_omitted {
        annotation.push_str(TRAILING_DATA_OMITTED);
    }
    if flags.possibly_incomplete {
        annotation.push_str(POSSIBLY_INCOMPLETE);
    }
    (!annotation.is_empty()).then_some(annotation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EntryKind, Location, VERSION_BANNER};
    use pretty_assertions::assert_eq;

    fn page(kind: EntryKind, raw_lines: &[&str]) -> PageState {
        PageState::from_response(
            Location::new("gopher.example", 70, "/sel", kind),
            raw_lines.iter().map(|it| (*it).to_string()).collect(),
        )
    }

    fn insert(text: &str, maybe_style: Option<LineStyle>) -> DisplayOp {
        DisplayOp::InsertLine {
            text: text.to_string(),
            maybe_style,
        }
    }

    #[test]
    fn test_build_text_page() {
        let ops = build(&page(EntryKind::TextFile, &["hello", "..", "."]));
        assert_eq!(
            ops.to_vec(),
            vec![
                DisplayOp::ClearDisplay,
                DisplayOp::SetAddress("TEXT: gopher.example:70/sel".to_string()),
                insert("    hello", None),
                insert("    .", None),
            ]
        );
    }

    #[test]
    fn test_build_text_page_with_trailing_data_sets_status() {
        let ops = build(&page(EntryKind::TextFile, &["hello", ".", "junk"]));
        assert_eq!(
            ops.last(),
            Some(&DisplayOp::SetStatus(format!(
                "{VERSION_BANNER} [TRAILING DATA OMITTED]"
            )))
        );
    }

    #[test]
    fn test_build_incomplete_text_page_sets_status() {
        let ops = build(&page(EntryKind::TextFile, &["hello"]));
        assert_eq!(
            ops.last(),
            Some(&DisplayOp::SetStatus(format!("{VERSION_BANNER} [POSSIBLY INCOMPLETE]")))
        );
    }

    #[test]
    fn test_build_server_error() {
        let ops = build(&page(EntryKind::TextFile, &["3Not found\terr\thost\t70"]));
        assert_eq!(
            ops.to_vec(),
            vec![
                DisplayOp::ClearDisplay,
                DisplayOp::SetAddress("TEXT: gopher.example:70/sel".to_string()),
                insert("[SERVER ERROR] Not found", Some(LineStyle::Error)),
            ]
        );
    }

    #[test]
    fn test_build_directory_marks_anchors_and_highlights_selection() {
        let ops = build(&page(EntryKind::Directory, &[
            "iHello",
            "1Menu\t/menu\thost\t70",
            "0Readme\t/readme\thost\t70",
            "9Binary\t/bin\thost\t70",
            "1Broken",
            ".",
        ]));
        assert_eq!(
            ops.to_vec(),
            vec![
                DisplayOp::ClearDisplay,
                DisplayOp::SetAddress("DIR: gopher.example:70/sel".to_string()),
                insert("        Hello", Some(LineStyle::Unknown)),
                insert(" DIR    Menu", Some(LineStyle::Dir)),
                DisplayOp::MarkLinkAnchor,
                insert("TEXT    Readme", Some(LineStyle::Item)),
                DisplayOp::MarkLinkAnchor,
                insert("?[9]    Binary", Some(LineStyle::Unknown)),
                insert(" DIR    Broken", Some(LineStyle::Unknown)),
                DisplayOp::HighlightAnchor(0),
            ]
        );
    }

    #[test]
    fn test_build_directory_without_entries_has_no_highlight() {
        let ops = build(&page(EntryKind::Directory, &["iJust info", "."]));
        assert!(!ops.iter().any(|it| matches!(it, DisplayOp::HighlightAnchor(_))));
    }

    #[test]
    fn test_build_directory_status_comes_before_highlight() {
        let ops = build(&page(EntryKind::Directory, &["1Menu\t/menu\thost\t70"]));
        let tail = &ops[ops.len() - 2..];
        assert_eq!(
            tail,
            &[
                DisplayOp::SetStatus(format!("{VERSION_BANNER} [POSSIBLY INCOMPLETE]")),
                DisplayOp::HighlightAnchor(0),
            ]
        );
    }

    #[test]
    fn test_build_selection_update() {
        let state = page(EntryKind::Directory, &[
            "1A\t/a\thost\t70",
            "1B\t/b\thost\t70",
            ".",
        ])
        .with_selection(1);
        assert_eq!(
            build_selection_update(&state).to_vec(),
            vec![DisplayOp::HighlightAnchor(1)]
        );

        let text = page(EntryKind::TextFile, &["x", "."]);
        assert!(build_selection_update(&text).is_empty());
    }
}
