use crate::config::{EngineConfig, RankingConfig};
use crate::errors::{EngineError, Result};
use crate::filter;
use crate::ranking::{self, RankSnapshot};
use crate::relations::{self, Edge};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// A searchable record with engagement metrics and a derived rank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Unique, stable identifier
    pub id: u64,

    pub title: String,

    pub content: String,

    /// Lowercase tokens, kept in insertion order for display
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Display-only label
    #[serde(default)]
    pub category: String,

    /// Display-only link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    pub click_probability: f64,

    pub stay_probability: f64,

    pub return_rate: f64,

    /// Derived from the three metrics, never authoritative on input
    #[serde(default)]
    pub rank: f64,

    /// Declared or resolved neighbours of this page
    #[serde(default, deserialize_with = "deserialize_page_ids")]
    pub related_pages: Vec<u64>,
}

impl Page {
    /// Create a page with the given metrics; the rank is computed immediately
    pub fn new(
        id: u64,
        title: impl Into<String>,
        content: impl Into<String>,
        keywords: &[&str],
        click_probability: f64,
        stay_probability: f64,
        return_rate: f64,
    ) -> Self {
        let mut page = Self {
            id,
            title: title.into(),
            content: content.into(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            category: String::new(),
            url: None,
            click_probability,
            stay_probability,
            return_rate,
            rank: 0.0,
            related_pages: Vec::new(),
        };
        page.normalize(&RankingConfig::default());
        page
    }

    /// Set the category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the display URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Declare related page ids
    pub fn with_related(mut self, ids: &[u64]) -> Self {
        self.related_pages = ids.to_vec();
        self
    }

    /// Clamp the metrics into `[0, 1]`, lowercase the keywords and recompute the rank
    pub fn normalize(&mut self, weights: &RankingConfig) {
        self.click_probability = ranking::clamp_unit(self.click_probability);
        self.stay_probability = ranking::clamp_unit(self.stay_probability);
        self.return_rate = ranking::clamp_unit(self.return_rate);
        for keyword in &mut self.keywords {
            *keyword = keyword.trim().to_lowercase();
        }
        self.keywords.retain(|k| !k.is_empty());
        self.recompute_rank(weights);
    }

    /// Recompute `rank` from the current metrics
    pub fn recompute_rank(&mut self, weights: &RankingConfig) {
        self.rank = ranking::calculate_rank(self, weights);
    }

    /// Whether this page and `other` share at least one keyword
    pub fn shares_keyword_with(&self, other: &Page) -> bool {
        self.keywords
            .iter()
            .any(|k| other.keywords.iter().any(|o| o == k))
    }
}

/// Partial update of a page, as sent to a store's `patch`.
///
/// `rank` is not patchable; it is recomputed whenever a patch is applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub click_probability: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stay_probability: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_rate: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_pages: Option<Vec<u64>>,
}

impl PagePatch {
    /// Apply the patch to `page`, then re-clamp and re-rank it
    pub fn apply(&self, page: &mut Page, weights: &RankingConfig) {
        if let Some(title) = &self.title {
            page.title = title.clone();
        }
        if let Some(content) = &self.content {
            page.content = content.clone();
        }
        if let Some(keywords) = &self.keywords {
            page.keywords = keywords.clone();
        }
        if let Some(category) = &self.category {
            page.category = category.clone();
        }
        if let Some(url) = &self.url {
            page.url = Some(url.clone());
        }
        if let Some(value) = self.click_probability {
            page.click_probability = value;
        }
        if let Some(value) = self.stay_probability {
            page.stay_probability = value;
        }
        if let Some(value) = self.return_rate {
            page.return_rate = value;
        }
        if let Some(ids) = &self.related_pages {
            page.related_pages = ids.clone();
        }
        page.normalize(weights);
    }
}

/// The caller-owned list of pages every engine operation works on
#[derive(Debug, Clone, Default)]
pub struct PageSet {
    pages: Vec<Page>,
    config: EngineConfig,
}

impl PageSet {
    /// Wrap `pages`, normalising every record against `config`
    pub fn new(mut pages: Vec<Page>, config: EngineConfig) -> Self {
        for page in &mut pages {
            page.normalize(&config.ranking);
        }
        Self { pages, config }
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn into_pages(self) -> Vec<Page> {
        self.pages
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Look up a page by id
    pub fn get(&self, id: u64) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == id)
    }

    /// One past the largest id in the set
    pub fn next_id(&self) -> Result<u64> {
        match self.pages.iter().map(|p| p.id).max() {
            Some(max) => max.checked_add(1).ok_or(EngineError::IdSpaceExhausted(max)),
            None => Ok(1),
        }
    }

    /// Append pages, normalising them first
    pub fn extend(&mut self, pages: impl IntoIterator<Item = Page>) {
        for mut page in pages {
            page.normalize(&self.config.ranking);
            self.pages.push(page);
        }
    }

    /// Pages matching `query`, in set order
    pub fn search(&self, query: &str) -> Vec<&Page> {
        filter::search_with(query, &self.pages, &self.config.search)
    }

    /// Pages matching `query`, highest rank first
    pub fn ranked_search(&self, query: &str) -> Vec<&Page> {
        filter::rank_order(self.search(query))
    }

    /// Apply a click on `id` to every page; returns false when `id` is unknown
    pub fn click(&mut self, id: u64) -> bool {
        ranking::apply_click_with(id, &mut self.pages, &self.config.ranking)
    }

    /// Pages sharing a keyword with `id`, up to the configured limit
    pub fn related(&self, id: u64) -> Vec<&Page> {
        relations::related_to(id, &self.pages, self.config.related_limit)
    }

    /// Edge list for the whole set
    pub fn edges(&self) -> Vec<Edge> {
        relations::edges(&self.pages, self.config.related_limit)
    }

    /// Edges into and out of `id`
    pub fn focus_edges(&self, id: u64) -> Vec<Edge> {
        relations::focus_edges(id, &self.pages)
    }

    /// Capture the current ranks for later comparison
    pub fn snapshot(&self) -> RankSnapshot {
        RankSnapshot::capture(&self.pages)
    }

    /// Store the resolver's result into each page's `related_pages`
    pub fn refresh_related(&mut self) {
        let limit = self.config.related_limit;
        let resolved: Vec<Vec<u64>> = self
            .pages
            .iter()
            .map(|p| {
                relations::related_to(p.id, &self.pages, limit)
                    .iter()
                    .map(|r| r.id)
                    .collect()
            })
            .collect();
        for (page, ids) in self.pages.iter_mut().zip(resolved) {
            page.related_pages = ids;
        }
    }
}

/// Page id as found in data files: either a number or a numeric string
#[derive(Deserialize)]
#[serde(untagged)]
enum PageIdRepr {
    Number(u64),
    Text(String),
}

fn deserialize_page_ids<'de, D>(deserializer: D) -> std::result::Result<Vec<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<PageIdRepr>>::deserialize(deserializer)?.unwrap_or_default();
    raw.into_iter()
        .map(|id| match id {
            PageIdRepr::Number(n) => Ok(n),
            PageIdRepr::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| de::Error::custom(format!("invalid page id: {s:?}"))),
        })
        .collect()
}
