use crate::config::RankingConfig;
use crate::errors::{EngineError, Result};
use crate::pages::{Page, PagePatch};
use crate::seed;
use std::fs;
use std::path::{Path, PathBuf};

/// Persistence collaborator holding the authoritative page list
pub trait PageStore {
    /// All pages in store order
    fn get_all(&self) -> Result<Vec<Page>>;

    /// A single page by id
    fn get_one(&self, id: u64) -> Result<Page>;

    /// Apply a partial update to one page
    fn patch(&mut self, id: u64, patch: &PagePatch) -> Result<()>;

    /// Replace the whole page list
    fn replace_all(&mut self, pages: Vec<Page>) -> Result<()>;
}

/// Replace the content of `store` with the built-in demo pages
pub fn reset(store: &mut dyn PageStore) -> Result<()> {
    let pages = seed::default_pages()?;
    ::log::info!("Resetting store to {} default pages", pages.len());
    store.replace_all(pages)
}

/// Page store kept entirely in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pages: Vec<Page>,
    ranking: RankingConfig,
}

impl MemoryStore {
    /// Hold `pages`, clamped and ranked with the default weights
    pub fn new(pages: Vec<Page>) -> Self {
        Self::with_ranking(pages, RankingConfig::default())
    }

    /// Hold `pages`, clamped and ranked with `ranking`
    pub fn with_ranking(mut pages: Vec<Page>, ranking: RankingConfig) -> Self {
        normalize_all(&mut pages, &ranking);
        Self { pages, ranking }
    }
}

/// Clamp and re-rank every page before it is stored
fn normalize_all(pages: &mut [Page], ranking: &RankingConfig) {
    for page in pages {
        page.normalize(ranking);
    }
}

impl PageStore for MemoryStore {
    fn get_all(&self) -> Result<Vec<Page>> {
        Ok(self.pages.clone())
    }

    fn get_one(&self, id: u64) -> Result<Page> {
        self.pages
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(EngineError::PageNotFound(id))
    }

    fn patch(&mut self, id: u64, patch: &PagePatch) -> Result<()> {
        let page = self
            .pages
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(EngineError::PageNotFound(id))?;
        patch.apply(page, &self.ranking);
        Ok(())
    }

    fn replace_all(&mut self, mut pages: Vec<Page>) -> Result<()> {
        normalize_all(&mut pages, &self.ranking);
        self.pages = pages;
        Ok(())
    }
}

/// Page store backed by a JSON array file.
///
/// A missing or unreadable file falls back to the demo pages; the file is only
/// written when the store is modified. Loaded pages are clamped and re-ranked.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl JsonFileStore {
    /// Open the store at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with(path, RankingConfig::default())
    }

    /// Open the store at `path`, ranking patched pages with `ranking`
    pub fn open_with<P: AsRef<Path>>(path: P, ranking: RankingConfig) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let pages = Self::load(&path)?;
        Ok(Self {
            path,
            inner: MemoryStore::with_ranking(pages, ranking),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> Result<Vec<Page>> {
        if !path.exists() {
            ::log::info!(
                "Store {} does not exist, starting from default pages",
                path.display()
            );
            return seed::default_pages();
        }

        let contents = fs::read_to_string(path)?;
        match serde_json::from_str::<Vec<Page>>(&contents) {
            Ok(pages) => {
                ::log::debug!("Loaded {} pages from {}", pages.len(), path.display());
                Ok(pages)
            }
            Err(e) => {
                ::log::warn!(
                    "Could not parse {} ({}), starting from default pages",
                    path.display(),
                    e
                );
                seed::default_pages()
            }
        }
    }

    /// Write the whole list to a sibling temp file, then rename it over the store
    fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.inner.pages)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        ::log::debug!(
            "Saved {} pages to {}",
            self.inner.pages.len(),
            self.path.display()
        );
        Ok(())
    }
}

impl PageStore for JsonFileStore {
    fn get_all(&self) -> Result<Vec<Page>> {
        self.inner.get_all()
    }

    fn get_one(&self, id: u64) -> Result<Page> {
        self.inner.get_one(id)
    }

    fn patch(&mut self, id: u64, patch: &PagePatch) -> Result<()> {
        self.inner.patch(id, patch)?;
        self.save()
    }

    fn replace_all(&mut self, pages: Vec<Page>) -> Result<()> {
        self.inner.replace_all(pages)?;
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Page> {
        vec![
            Page::new(1, "Python", "basics", &["python"], 0.5, 0.5, 0.2),
            Page::new(2, "Java", "basics", &["java"], 0.3, 0.4, 0.1),
        ]
    }

    #[test]
    fn test_memory_store_get_and_patch() {
        let mut store = MemoryStore::new(sample());
        assert_eq!(store.get_all().unwrap().len(), 2);
        assert_eq!(store.get_one(2).unwrap().title, "Java");

        let patch = PagePatch {
            click_probability: Some(0.9),
            ..PagePatch::default()
        };
        store.patch(2, &patch).unwrap();
        let page = store.get_one(2).unwrap();
        assert_eq!(page.click_probability, 0.9);
        assert!((page.rank - (0.9 * 0.5 + 0.4 * 0.3 + 0.9 * 0.2) * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_memory_store_missing_id() {
        let mut store = MemoryStore::new(sample());
        assert!(matches!(store.get_one(7), Err(EngineError::PageNotFound(7))));
        assert!(matches!(
            store.patch(7, &PagePatch::default()),
            Err(EngineError::PageNotFound(7))
        ));
    }

    #[test]
    fn test_json_store_missing_file_uses_seed() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("pages.json")).unwrap();
        let expected = seed::default_pages().unwrap();
        assert_eq!(store.get_all().unwrap(), expected);
        // Nothing is written until the store changes
        assert!(!store.path().exists());
    }

    #[test]
    fn test_json_store_corrupt_file_uses_seed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pages.json");
        fs::write(&path, "{ not json").unwrap();

        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get_all().unwrap().len(), seed::default_pages().unwrap().len());
    }

    #[test]
    fn test_json_store_persists_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pages.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        store.replace_all(sample()).unwrap();
        store
            .patch(
                1,
                &PagePatch {
                    title: Some("Python 3".to_string()),
                    ..PagePatch::default()
                },
            )
            .unwrap();

        let reopened = JsonFileStore::open(&path).unwrap();
        let pages = reopened.get_all().unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].title, "Python 3");
    }

    #[test]
    fn test_json_store_normalizes_loaded_pages() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");
        // Shape written by the web app: string ids, stored rank, metrics out of range
        let json = r#"[
            {
                "id": 1, "title": "Python", "content": "basics",
                "keywords": ["Python"], "category": "programming",
                "clickProbability": 1.7, "stayProbability": 0.8, "returnRate": 0.2,
                "rank": 70, "relatedPages": ["2"]
            },
            {
                "id": 2, "title": "Java", "content": "basics",
                "keywords": ["java"], "category": "programming",
                "clickProbability": -0.3, "stayProbability": 0.5, "returnRate": 1.4,
                "rank": 12
            }
        ]"#;
        fs::write(&path, json).unwrap();

        let ranking = RankingConfig::default();
        let store = JsonFileStore::open(&path).unwrap();

        let first = store.get_one(1).unwrap();
        assert_eq!(first.click_probability, 1.0);
        assert_eq!(first.keywords, vec!["python"]);
        assert_eq!(first.related_pages, vec![2]);
        // 1.0 * 0.5 + 0.8 * 0.3 + 0.8 * 0.2
        assert!((first.rank - 90.0).abs() < 1e-9);

        for page in store.get_all().unwrap() {
            for metric in [page.click_probability, page.stay_probability, page.return_rate] {
                assert!((0.0..=1.0).contains(&metric));
            }
            assert!((page.rank - crate::ranking::calculate_rank(&page, &ranking)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_replace_all_normalizes() {
        let mut store = MemoryStore::new(Vec::new());
        let mut stale = Page::new(5, "Rust", "", &["rust"], 0.5, 0.5, 0.2);
        stale.click_probability = 3.0;
        stale.rank = 1.0;
        store.replace_all(vec![stale]).unwrap();

        let page = store.get_one(5).unwrap();
        assert_eq!(page.click_probability, 1.0);
        assert!((page.rank - (0.5 + 0.5 * 0.3 + 0.8 * 0.2) * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_json_store_saves_whole_click_at_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pages.json");
        let mut store = JsonFileStore::open(&path).unwrap();

        let mut pages = store.get_all().unwrap();
        assert!(crate::ranking::apply_click(1, &mut pages));
        store.replace_all(pages.clone()).unwrap();

        let reopened = JsonFileStore::open(&path).unwrap().get_all().unwrap();
        assert_eq!(reopened, pages);
        // The temp file is renamed over the store
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_reset() {
        let mut store = MemoryStore::new(sample());
        reset(&mut store).unwrap();
        assert_eq!(store.get_all().unwrap(), seed::default_pages().unwrap());
    }
}
