use crate::parsers::{ParseResult, ParsedPage};

/// Page separator inside plain text documents
pub const PAGE_BREAK: char = '\x0c';

/// Parses plain text into pages.
///
/// Form feeds split the document into pages. Each page keeps its first
/// non-empty line as heading and has its whitespace collapsed.
pub fn parse(text: &str) -> ParseResult {
    // Handle empty input
    if text.trim().is_empty() {
        return ParseResult::default();
    }

    let pages = text.split(PAGE_BREAK).map(parse_page).collect();
    ParseResult::new(pages)
}

/// Parses a single page of text
pub fn parse_page(page: &str) -> ParsedPage {
    let heading = first_line(page).map(normalize_whitespace);
    ParsedPage {
        heading,
        text: normalize_whitespace(page),
    }
}

/// First line with any non-whitespace content
pub fn first_line(text: &str) -> Option<&str> {
    text.lines().map(str::trim).find(|line| !line.is_empty())
}

/// Collapses every run of whitespace (newlines included) into a single space
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
