use crate::config::IngestConfig;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\W+").expect("Keyword split pattern should be valid"));

/// Common words that never make useful keywords
const STOPWORDS: &[&str] = &[
    "about", "above", "after", "again", "their", "these", "those", "which", "while", "there",
    "where", "would", "could", "should", "other", "being", "every", "under",
];

/// Extract a small, deduplicated set of lowercase keywords from `text`.
///
/// Words shorter than `min_keyword_len`, purely numeric words and stopwords
/// are dropped. The first `max_keywords` distinct words are kept in order.
pub fn extract(text: &str, config: &IngestConfig) -> Vec<String> {
    let lowered = text.to_lowercase();
    let extra: HashSet<String> = config.stopwords.iter().map(|s| s.to_lowercase()).collect();
    let mut seen = HashSet::new();

    NON_WORD
        .split(&lowered)
        .filter(|word| word.chars().count() >= config.min_keyword_len)
        .filter(|word| !word.chars().all(|c| c.is_ascii_digit()))
        .filter(|word| !STOPWORDS.contains(word) && !extra.contains(*word))
        .filter(|word| seen.insert(*word))
        .take(config.max_keywords)
        .map(str::to_string)
        .collect()
}
