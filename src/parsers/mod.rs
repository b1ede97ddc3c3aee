pub mod html;
pub mod keywords;
pub mod text;

#[cfg(test)]
mod tests;

use crate::config::{IngestConfig, RankingConfig};
use crate::errors::{EngineError, Result};
use crate::pages::Page;
use std::path::Path;

/// Document formats that can be turned into pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserType {
    /// HTML document, text taken from the body
    Html,
    /// Plain text, form feeds separate pages
    Text,
}

impl ParserType {
    /// Determines the parser type from a file path's extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "txt" | "md" | "text" => {
                ::log::debug!("Classifying as Text: {}", path.display());
                Ok(ParserType::Text)
            }
            "html" | "htm" => {
                ::log::debug!("Classifying as HTML: {}", path.display());
                Ok(ParserType::Html)
            }
            _ => Err(EngineError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// One page of a parsed document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPage {
    /// Heading candidate (first line, or the HTML title)
    pub heading: Option<String>,
    /// Whitespace-normalised text
    pub text: String,
}

/// Result of parsing a document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseResult {
    pub pages: Vec<ParsedPage>,
}

impl ParseResult {
    pub fn new(pages: Vec<ParsedPage>) -> Self {
        Self { pages }
    }
}

/// Main parser that delegates to specific format parsers
pub struct Parser;

impl Parser {
    /// Parse content based on the parser type
    pub fn parse(content: &str, parser_type: ParserType) -> ParseResult {
        match parser_type {
            ParserType::Html => html::parse(content),
            ParserType::Text => text::parse(content),
        }
    }
}

/// Read and ingest the document at `path`, numbering pages from `first_id`
pub fn ingest_file<P: AsRef<Path>>(
    path: P,
    first_id: u64,
    config: &IngestConfig,
    weights: &RankingConfig,
) -> Result<Vec<Page>> {
    let path = path.as_ref();
    let parser_type = ParserType::from_path(path)?;
    let content = std::fs::read_to_string(path)?;
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Untitled");

    let pages = ingest_str(&content, parser_type, name, first_id, config, weights)?;
    ::log::info!("Ingested {} pages from {}", pages.len(), path.display());
    Ok(pages)
}

/// Turn a document into page records ranked with `weights`.
///
/// The first page is titled by its heading (or `name` when it has none),
/// later pages are titled `Page N`. Blank pages are skipped. Fails when the
/// ids starting at `first_id` run past `u64::MAX`.
pub fn ingest_str(
    content: &str,
    parser_type: ParserType,
    name: &str,
    first_id: u64,
    config: &IngestConfig,
    weights: &RankingConfig,
) -> Result<Vec<Page>> {
    let parsed = Parser::parse(content, parser_type);
    let mut records = Vec::new();
    let mut next_id = Some(first_id);

    for (index, page) in parsed.pages.iter().enumerate() {
        if page.text.is_empty() {
            continue;
        }

        let id = next_id.ok_or(EngineError::IdSpaceExhausted(u64::MAX))?;
        next_id = id.checked_add(1);

        let title = match (index, &page.heading) {
            (0, Some(heading)) => heading.clone(),
            (0, None) => name.to_string(),
            _ => format!("Page {}", index + 1),
        };

        let mut record = Page {
            id,
            title,
            content: preview(&page.text, config.preview_chars),
            keywords: keywords::extract(&page.text, config),
            category: config.category.clone(),
            url: None,
            click_probability: config.click_probability,
            stay_probability: config.stay_probability,
            return_rate: config.return_rate,
            rank: 0.0,
            related_pages: Vec::new(),
        };
        record.normalize(weights);
        records.push(record);
    }

    Ok(records)
}

/// First `max_chars` characters of `text`, with `...` appended when cut
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", text[..cut].trim_end()),
        None => text.to_string(),
    }
}
