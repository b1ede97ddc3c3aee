use crate::config::{KeywordMatch, SearchConfig};
use crate::pages::Page;

/// A search query split into lowercase terms
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    terms: Vec<String>,
}

impl Query {
    /// Split `raw` on whitespace. Returns `None` for an empty or whitespace-only query.
    pub fn parse(raw: &str) -> Option<Self> {
        let terms: Vec<String> = raw.split_whitespace().map(str::to_lowercase).collect();
        if terms.is_empty() {
            None
        } else {
            Some(Self { terms })
        }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Whether any term matches the page's title, content or keywords
    pub fn matches(&self, page: &Page, mode: KeywordMatch) -> bool {
        let title = page.title.to_lowercase();
        let content = page.content.to_lowercase();

        self.terms.iter().any(|term| {
            title.contains(term.as_str())
                || content.contains(term.as_str())
                || page.keywords.iter().any(|keyword| {
                    let keyword = keyword.to_lowercase();
                    match mode {
                        KeywordMatch::Substring => keyword.contains(term.as_str()),
                        KeywordMatch::Exact => keyword == *term,
                    }
                })
        })
    }
}

/// Pages matching `query` with substring keyword matching
pub fn search<'a>(query: &str, pages: &'a [Page]) -> Vec<&'a Page> {
    search_with(query, pages, &SearchConfig::default())
}

/// Pages matching `query`, in the order they appear in `pages`.
///
/// An empty or whitespace-only query matches nothing.
pub fn search_with<'a>(query: &str, pages: &'a [Page], config: &SearchConfig) -> Vec<&'a Page> {
    let Some(query) = Query::parse(query) else {
        ::log::debug!("Empty query, no results");
        return Vec::new();
    };

    let results: Vec<&Page> = pages
        .iter()
        .filter(|page| query.matches(page, config.keyword_match))
        .collect();

    ::log::debug!(
        "Query {:?} matched {} of {} pages",
        query.terms(),
        results.len(),
        pages.len()
    );
    results
}

/// Sort search results by rank, highest first; equal ranks keep their order
pub fn rank_order(mut results: Vec<&Page>) -> Vec<&Page> {
    results.sort_by(|a, b| b.rank.total_cmp(&a.rank));
    results
}
