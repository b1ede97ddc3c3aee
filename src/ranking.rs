use crate::config::RankingConfig;
use crate::pages::Page;
use std::collections::HashMap;

/// Upper bound of a page rank
pub const MAX_RANK: f64 = 100.0;

/// Clamp an engagement metric into `[0, 1]`; non-finite values become 0
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Rank of a page as a pure function of its three metrics:
///
/// `(click * w_click + stay * w_stay + (1 - return) * w_return) * 100`, clamped to `[0, 100]`.
pub fn calculate_rank(page: &Page, weights: &RankingConfig) -> f64 {
    let score = page.click_probability * weights.click_weight
        + page.stay_probability * weights.stay_weight
        + (1.0 - page.return_rate) * weights.return_weight;
    let rank = score * MAX_RANK;
    if rank.is_finite() {
        rank.clamp(0.0, MAX_RANK)
    } else {
        0.0
    }
}

/// Apply a click on `clicked_id` with the default weights and steps
pub fn apply_click(clicked_id: u64, pages: &mut [Page]) -> bool {
    apply_click_with(clicked_id, pages, &RankingConfig::default())
}

/// Apply a click on `clicked_id` to the whole set.
///
/// The clicked page gains click and stay probability, every other page loses
/// click probability, and every page gets its rank recomputed. An unknown id
/// leaves the set untouched and returns false.
pub fn apply_click_with(clicked_id: u64, pages: &mut [Page], config: &RankingConfig) -> bool {
    if !pages.iter().any(|p| p.id == clicked_id) {
        ::log::warn!("Click on unknown page {} ignored", clicked_id);
        return false;
    }

    for page in pages.iter_mut() {
        if page.id == clicked_id {
            page.click_probability = clamp_unit(page.click_probability + config.click_boost);
            page.stay_probability = clamp_unit(page.stay_probability + config.stay_boost);
        } else {
            page.click_probability = clamp_unit(page.click_probability - config.click_decay);
        }
        page.recompute_rank(config);
    }

    ::log::debug!(
        "Applied click on page {} across {} pages",
        clicked_id,
        pages.len()
    );
    true
}

/// Direction of a rank change between two snapshots
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RankChange {
    Up(f64),
    Down(f64),
    Unchanged,
}

/// Ranks captured before an update, used to show how each page moved
#[derive(Debug, Clone, Default)]
pub struct RankSnapshot {
    ranks: HashMap<u64, f64>,
}

impl RankSnapshot {
    pub fn capture(pages: &[Page]) -> Self {
        Self {
            ranks: pages.iter().map(|p| (p.id, p.rank)).collect(),
        }
    }

    /// Rank of `id` at capture time
    pub fn rank_of(&self, id: u64) -> Option<f64> {
        self.ranks.get(&id).copied()
    }

    /// How `page` moved since the snapshot; pages not in the snapshot count as unchanged
    pub fn change(&self, page: &Page) -> RankChange {
        match self.rank_of(page.id) {
            Some(previous) if page.rank > previous => RankChange::Up(page.rank - previous),
            Some(previous) if page.rank < previous => RankChange::Down(previous - page.rank),
            _ => RankChange::Unchanged,
        }
    }
}
