use crate::config::RankingConfig;
use crate::errors::Result;
use crate::pages::Page;

const DEFAULT_PAGES_JSON: &str = include_str!("../data/default_pages.json");

/// The demo pages a fresh or reset store starts from, with ranks recomputed
pub fn default_pages() -> Result<Vec<Page>> {
    let mut pages: Vec<Page> = serde_json::from_str(DEFAULT_PAGES_JSON)?;
    let ranking = RankingConfig::default();
    for page in &mut pages {
        page.normalize(&ranking);
    }
    Ok(pages)
}
