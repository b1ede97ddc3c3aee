use crate::pages::Page;
use serde::{Deserialize, Serialize};

/// Default number of related pages returned by the resolver
pub const DEFAULT_RELATED_LIMIT: usize = 3;

/// A directed edge between two pages, as consumed by a graph renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: u64,
    pub target: u64,
    /// Click probability of the source page
    pub weight: f64,
}

impl Edge {
    fn from_page(source: &Page, target: u64) -> Self {
        Self {
            source: source.id,
            target,
            weight: source.click_probability,
        }
    }
}

/// Pages sharing at least one keyword with page `id`.
///
/// The page itself is excluded and the result is the first `limit` matches in
/// set order. An unknown id yields an empty result.
pub fn related_to(id: u64, pages: &[Page], limit: usize) -> Vec<&Page> {
    let Some(current) = pages.iter().find(|p| p.id == id) else {
        ::log::debug!("No page {} to resolve relations for", id);
        return Vec::new();
    };

    let related: Vec<&Page> = pages
        .iter()
        .filter(|page| page.id != id && page.shares_keyword_with(current))
        .take(limit)
        .collect();

    ::log::debug!("Page {} has {} related pages", id, related.len());
    related
}

/// Edge list for the whole set.
///
/// Declared `related_pages` are used when a page has any (ids not present in
/// the set are skipped); otherwise edges come from the relation resolver.
pub fn edges(pages: &[Page], limit: usize) -> Vec<Edge> {
    let mut edges = Vec::new();

    for page in pages {
        if page.related_pages.is_empty() {
            edges.extend(
                related_to(page.id, pages, limit)
                    .into_iter()
                    .map(|target| Edge::from_page(page, target.id)),
            );
        } else {
            edges.extend(declared_targets(page, pages).map(|t| Edge::from_page(page, t)));
        }
    }

    edges
}

/// Declared edges leaving page `id` plus declared edges pointing at it
pub fn focus_edges(id: u64, pages: &[Page]) -> Vec<Edge> {
    let Some(current) = pages.iter().find(|p| p.id == id) else {
        return Vec::new();
    };

    let outgoing = declared_targets(current, pages).map(|t| Edge::from_page(current, t));
    let incoming = pages
        .iter()
        .filter(|page| page.id != id && page.related_pages.contains(&id))
        .map(|page| Edge::from_page(page, id));

    outgoing.chain(incoming).collect()
}

/// Declared neighbours of `page` that exist in `pages`
fn declared_targets<'a>(page: &'a Page, pages: &'a [Page]) -> impl Iterator<Item = u64> + 'a {
    page.related_pages
        .iter()
        .copied()
        .filter(move |target| *target != page.id && pages.iter().any(|p| p.id == *target))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(id: u64, keywords: &[&str], click: f64) -> Page {
        Page::new(id, format!("Page {id}"), "", keywords, click, 0.5, 0.2)
    }

    fn ids(pages: &[&Page]) -> Vec<u64> {
        pages.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_shared_keyword() {
        let pages = vec![
            page(1, &["python", "beginner"], 0.5),
            page(2, &["python", "advanced"], 0.5),
            page(3, &["java"], 0.5),
        ];
        assert_eq!(ids(&related_to(1, &pages, DEFAULT_RELATED_LIMIT)), vec![2]);
    }

    #[test]
    fn test_excludes_self_and_respects_limit() {
        let pages: Vec<Page> = (1..=6).map(|id| page(id, &["rust"], 0.5)).collect();
        let related = related_to(3, &pages, 3);
        assert_eq!(ids(&related), vec![1, 2, 4]);
        assert!(related.iter().all(|p| p.id != 3));

        assert!(related_to(3, &pages, 0).is_empty());
    }

    #[test]
    fn test_unknown_or_isolated() {
        let pages = vec![page(1, &["python"], 0.5), page(2, &["java"], 0.5)];
        assert!(related_to(99, &pages, 3).is_empty());
        assert!(related_to(1, &pages, 3).is_empty());
    }

    #[test]
    fn test_page_without_keywords() {
        let pages = vec![page(1, &[], 0.5), page(2, &[], 0.5)];
        assert!(related_to(1, &pages, 3).is_empty());
    }

    #[test]
    fn test_edges_prefer_declared_relations() {
        let pages = vec![
            page(1, &["python"], 0.4).with_related(&[2, 99]),
            page(2, &["python"], 0.7),
            page(3, &["java"], 0.1),
        ];
        let edges = edges(&pages, 3);

        assert_eq!(
            edges,
            vec![
                // Declared, dangling id 99 skipped
                Edge {
                    source: 1,
                    target: 2,
                    weight: 0.4,
                },
                // Derived from shared keywords
                Edge {
                    source: 2,
                    target: 1,
                    weight: 0.7,
                },
            ]
        );
    }

    #[test]
    fn test_focus_edges() {
        let pages = vec![
            page(1, &[], 0.4).with_related(&[2]),
            page(2, &[], 0.7).with_related(&[3]),
            page(3, &[], 0.1).with_related(&[2]),
        ];
        let edges = focus_edges(2, &pages);
        assert_eq!(
            edges,
            vec![
                Edge {
                    source: 2,
                    target: 3,
                    weight: 0.7,
                },
                Edge {
                    source: 1,
                    target: 2,
                    weight: 0.4,
                },
                Edge {
                    source: 3,
                    target: 2,
                    weight: 0.1,
                },
            ]
        );
        assert!(focus_edges(42, &pages).is_empty());
    }
}
