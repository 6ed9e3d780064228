//! Weighted Reward Catalog
//!
//! Filters the host's catalog into a cached draw pool and draws item IDs
//! with value-inverse weighting: cheap items come up often, expensive ones
//! rarely, and every poolable item keeps a nonzero chance.

use rand::Rng;
use std::collections::HashSet;

use reward_events::CatalogEntry;

use crate::config::RewardConfig;

/// Pool weighting constants.
pub mod catalog_constants {
    /// Flat offset added to every weight so ceiling-value items keep a
    /// nonzero chance.
    pub const BASE_WEIGHT_OFFSET: i64 = 10;
}

/// One poolable item with its draw weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedEntry {
    pub id: String,
    pub weight: u32,
}

/// A cached draw pool over the host catalog.
#[derive(Debug, Clone, Default)]
pub struct WeightedPool {
    entries: Vec<WeightedEntry>,
    total_weight: u64,
}

impl WeightedPool {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn total_weight(&self) -> u64 {
        self.total_weight
    }

    pub fn entries(&self) -> &[WeightedEntry] {
        &self.entries
    }

    /// Draw one item ID by weight. Returns None on an empty pool.
    pub fn draw<R: Rng>(&self, rng: &mut R) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }
        let roll = rng.gen_range(0..self.total_weight);
        Some(self.entry_at(roll))
    }

    /// Walk cumulative weights until one passes the roll.
    fn entry_at(&self, roll: u64) -> &str {
        let mut cumulative = 0u64;
        for entry in &self.entries {
            cumulative += u64::from(entry.weight);
            if roll < cumulative {
                return &entry.id;
            }
        }

        // Fallback to last entry (unreachable while roll < total_weight)
        &self.entries[self.entries.len() - 1].id
    }
}

/// Build a pool from host catalog rows under the configured filters.
///
/// A row is poolable when its value is positive and at or below the
/// ceiling, and its category (if any) is not excluded.
pub fn build_pool(
    entries: &[CatalogEntry],
    value_ceiling: i32,
    excluded: &HashSet<String>,
) -> WeightedPool {
    let mut pool_entries = Vec::new();
    let mut total_weight = 0u64;

    for entry in entries {
        if entry.value <= 0 || entry.value > value_ceiling {
            continue;
        }
        if let Some(category) = &entry.category {
            if excluded.contains(category) {
                continue;
            }
        }

        let weight = entry_weight(entry.value, value_ceiling);
        total_weight += u64::from(weight);
        pool_entries.push(WeightedEntry {
            id: entry.id.clone(),
            weight,
        });
    }

    WeightedPool {
        entries: pool_entries,
        total_weight,
    }
}

/// Weight for a poolable value, floored at 1.
fn entry_weight(value: i32, value_ceiling: i32) -> u32 {
    let weight =
        i64::from(value_ceiling) - i64::from(value) + catalog_constants::BASE_WEIGHT_OFFSET;
    weight.max(1) as u32
}

/// The cached pool plus its staleness flag.
///
/// Rebuilds are explicit: the engine rebuilds on day start when the pool
/// is stale or empty, and retries once when a draw finds it empty.
#[derive(Debug, Clone)]
pub struct WeightedCatalog {
    pool: WeightedPool,
    needs_rebuild: bool,
}

impl WeightedCatalog {
    /// A catalog that has never been built. The first day start fills it.
    pub fn new() -> Self {
        Self {
            pool: WeightedPool::default(),
            needs_rebuild: true,
        }
    }

    /// Marks the pool stale so the next day start rebuilds it.
    pub fn mark_stale(&mut self) {
        self.needs_rebuild = true;
    }

    pub fn needs_rebuild(&self) -> bool {
        self.needs_rebuild
    }

    pub fn pool(&self) -> &WeightedPool {
        &self.pool
    }

    /// Rebuild the pool from the given catalog rows.
    pub fn rebuild(&mut self, entries: &[CatalogEntry], rewards: &RewardConfig) {
        self.pool = build_pool(entries, rewards.value_ceiling, &rewards.excluded_categories);
        self.needs_rebuild = false;
        tracing::debug!(
            "Rebuilt reward pool: {} of {} catalog rows poolable, total weight {}",
            self.pool.len(),
            entries.len(),
            self.pool.total_weight()
        );
    }

    /// Draw one item ID by weight. Returns None on an empty pool.
    pub fn draw<R: Rng>(&self, rng: &mut R) -> Option<&str> {
        self.pool.draw(rng)
    }
}

impl Default for WeightedCatalog {
    fn default() -> Self {
        Self::new()
    }
}
