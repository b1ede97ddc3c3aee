use crate::parsers::text::normalize_whitespace;
use crate::parsers::{ParseResult, ParsedPage};
use scraper::{Html, Selector};

/// Parses an HTML document into a single page.
///
/// The heading is the `<title>`, falling back to the first `<h1>`; the text is
/// everything inside `<body>`.
pub fn parse(html: &str) -> ParseResult {
    let doc = Html::parse_document(html);

    let text = select_text(&doc, "body").unwrap_or_default();
    if text.is_empty() {
        return ParseResult::default();
    }

    let heading = select_text(&doc, "title").or_else(|| select_text(&doc, "h1"));
    ::log::debug!("HTML parser found heading {:?}", heading);

    ParseResult::new(vec![ParsedPage { heading, text }])
}

/// Normalised text of the first element matching `selector`, if any and non-empty
fn select_text(doc: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    let element = doc.select(&selector).next()?;
    let text = normalize_whitespace(&element.text().collect::<Vec<_>>().join(" "));
    if text.is_empty() { None } else { Some(text) }
}
