//! Scripted Game Host
//!
//! A stand-in game adapter: generates a cast of actors and an item
//! catalog, rolls the gift traffic, scripts the blocking dialogue, and
//! records every effect the engine sends back.

use rand::rngs::SmallRng;
use rand::Rng;
use std::collections::HashMap;
use std::ops::RangeInclusive;

use reward_core::{GameHost, HostError, NotificationKind};
use reward_events::{CatalogEntry, GiftTaste, TriggerEvent};

/// Name list for generated actors
const ACTOR_NAMES: &[&str] = &[
    "ingrid", "olaf", "maren", "sven", "astrid", "bjorn", "freya", "gunnar", "hilda", "leif",
    "ragna", "sigrid", "thorin", "ylva", "knut", "dagny", "eira", "rune", "orm", "viggo",
];

/// Item lists for each catalog category
const FORAGE_ITEMS: &[&str] = &[
    "wild_posy", "chanterelle", "winter_root", "salt_berry", "moss_bundle", "pine_resin",
];

const COOKED_ITEMS: &[&str] = &[
    "honey_loaf", "smoked_perch", "barley_stew", "bramble_tart", "herb_butter",
];

const MINERAL_ITEMS: &[&str] = &[
    "amber_shard", "geode_core", "copper_nugget", "quartz_spur", "slate_disc",
];

const JUNK_ITEMS: &[&str] = &[
    "river_pebble", "broken_cup", "rusty_cog", "frayed_rope", "bent_nail",
];

const TREASURE_ITEMS: &[&str] = &["sun_opal", "carved_idol", "gilded_chalice"];

const QUEST_ITEMS: &[&str] = &["elder_letter", "signet_ring", "sealed_writ"];

/// Configuration for host generation
pub struct CastConfig {
    pub actor_count: usize,
    pub max_relationship_level: i32,
}

impl Default for CastConfig {
    fn default() -> Self {
        Self {
            actor_count: 12,
            max_relationship_level: 10,
        }
    }
}

/// The simulated game the engine plays against.
///
/// Dialogue visibility is driven by [`SimHost::open_dialogue`] and
/// [`SimHost::tick_dialogue`]; everything the engine grants or announces
/// is recorded for the end-of-run summary.
#[derive(Debug)]
pub struct SimHost {
    actors: Vec<String>,
    levels: HashMap<String, i32>,
    catalog_rows: Vec<CatalogEntry>,
    dialogue_ticks_remaining: u32,
    /// (actor_id, item_id) per successful grant
    pub grants: Vec<(String, String)>,
    /// Messages the engine surfaced
    pub notifications: Vec<String>,
    /// Sound cues requested
    pub sounds_played: u64,
}

impl SimHost {
    /// Generate a cast and catalog from the given RNG.
    pub fn generate(config: &CastConfig, rng: &mut SmallRng) -> Self {
        let offset = rng.gen_range(0..ACTOR_NAMES.len());
        let mut actors = Vec::with_capacity(config.actor_count);
        let mut levels = HashMap::new();
        for index in 0..config.actor_count {
            let actor_id = generate_actor_id(index, offset);
            levels.insert(
                actor_id.clone(),
                rng.gen_range(0..=config.max_relationship_level),
            );
            actors.push(actor_id);
        }

        Self {
            actors,
            levels,
            catalog_rows: generate_catalog(rng),
            dialogue_ticks_remaining: 0,
            grants: Vec::new(),
            notifications: Vec::new(),
            sounds_played: 0,
        }
    }

    /// Actor IDs in generation order.
    pub fn actors(&self) -> &[String] {
        &self.actors
    }

    pub fn catalog_len(&self) -> usize {
        self.catalog_rows.len()
    }

    /// A random actor handing over a random catalog item with a rolled
    /// taste, or `None` when the cast or the catalog is empty.
    pub fn random_gift(&self, rng: &mut SmallRng) -> Option<TriggerEvent> {
        if self.actors.is_empty() || self.catalog_rows.is_empty() {
            return None;
        }
        let actor_id = self.actors[rng.gen_range(0..self.actors.len())].clone();
        let item_id = self.catalog_rows[rng.gen_range(0..self.catalog_rows.len())]
            .id
            .clone();

        let trigger = TriggerEvent::new(actor_id, item_id);
        Some(match random_taste(rng) {
            Some(taste) => trigger.with_taste(taste),
            None => trigger,
        })
    }

    /// Open the blocking dialogue for at least `ticks` more ticks.
    pub fn open_dialogue(&mut self, ticks: u32) {
        self.dialogue_ticks_remaining = self.dialogue_ticks_remaining.max(ticks);
    }

    /// Run the dialogue countdown by one tick.
    pub fn tick_dialogue(&mut self) {
        self.dialogue_ticks_remaining = self.dialogue_ticks_remaining.saturating_sub(1);
    }
}

impl GameHost for SimHost {
    fn is_blocking_dialogue_visible(&self) -> bool {
        self.dialogue_ticks_remaining > 0
    }

    fn relationship_level(&self, actor_id: &str) -> i32 {
        self.levels.get(actor_id).copied().unwrap_or(0)
    }

    fn catalog(&self) -> Vec<CatalogEntry> {
        self.catalog_rows.clone()
    }

    fn grant_item(&mut self, actor_id: &str, item_id: &str) -> Result<(), HostError> {
        self.grants
            .push((actor_id.to_string(), item_id.to_string()));
        Ok(())
    }

    fn notify(&mut self, message: &str, _kind: NotificationKind) {
        self.notifications.push(message.to_string());
    }

    fn play_sound(&mut self, name: &str) {
        tracing::debug!("Sound cue: {}", name);
        self.sounds_played += 1;
    }
}

/// Sorted ticks at which gifts land during one day.
///
/// A day with no ticks gets an empty schedule.
pub fn gift_schedule(gifts_per_day: usize, ticks_per_day: u64, rng: &mut SmallRng) -> Vec<u64> {
    if ticks_per_day == 0 {
        return Vec::new();
    }
    let mut ticks: Vec<u64> = (0..gifts_per_day)
        .map(|_| rng.gen_range(0..ticks_per_day))
        .collect();
    ticks.sort_unstable();
    ticks
}

/// Actor ID for a cast slot, unique even past the name list length.
fn generate_actor_id(index: usize, offset: usize) -> String {
    let base = ACTOR_NAMES[(index + offset) % ACTOR_NAMES.len()];
    if index < ACTOR_NAMES.len() {
        base.to_string()
    } else {
        format!("{}_{}", base, index / ACTOR_NAMES.len())
    }
}

/// Generate a full catalog with per-category value ranges.
fn generate_catalog(rng: &mut SmallRng) -> Vec<CatalogEntry> {
    let mut rows = Vec::new();
    push_category(&mut rows, FORAGE_ITEMS, "forage", 20..=120, rng);
    push_category(&mut rows, COOKED_ITEMS, "cooked", 60..=250, rng);
    push_category(&mut rows, MINERAL_ITEMS, "mineral", 80..=400, rng);
    push_category(&mut rows, JUNK_ITEMS, "junk", 1..=20, rng);
    // Mostly above the default value ceiling
    push_category(&mut rows, TREASURE_ITEMS, "treasure", 450..=900, rng);
    // Excluded from pools by category under the default config
    push_category(&mut rows, QUEST_ITEMS, "quest", 50..=300, rng);
    rows
}

fn push_category(
    rows: &mut Vec<CatalogEntry>,
    ids: &[&str],
    category: &str,
    values: RangeInclusive<i32>,
    rng: &mut SmallRng,
) {
    for id in ids {
        let value = rng.gen_range(values.clone());
        rows.push(CatalogEntry::new(*id, value).with_category(category));
    }
}

/// Taste roll, skewed toward the middle; some hosts report none at all.
fn random_taste(rng: &mut SmallRng) -> Option<GiftTaste> {
    match rng.gen_range(0..12) {
        0 => Some(GiftTaste::Love),
        1..=2 => Some(GiftTaste::Like),
        3..=6 => Some(GiftTaste::Neutral),
        7..=8 => Some(GiftTaste::Dislike),
        9 => Some(GiftTaste::Hate),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_generation_is_deterministic() {
        let config = CastConfig::default();
        let mut rng1 = SmallRng::seed_from_u64(42);
        let mut rng2 = SmallRng::seed_from_u64(42);

        let host1 = SimHost::generate(&config, &mut rng1);
        let host2 = SimHost::generate(&config, &mut rng2);

        assert_eq!(host1.actors, host2.actors);
        assert_eq!(host1.levels, host2.levels);
        assert_eq!(host1.catalog_rows, host2.catalog_rows);
    }

    #[test]
    fn test_actor_ids_are_unique() {
        let config = CastConfig {
            actor_count: 50,
            max_relationship_level: 10,
        };
        let mut rng = SmallRng::seed_from_u64(7);

        let host = SimHost::generate(&config, &mut rng);

        let mut ids = host.actors.clone();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_catalog_covers_all_categories() {
        let mut rng = SmallRng::seed_from_u64(7);
        let host = SimHost::generate(&CastConfig::default(), &mut rng);

        for category in ["forage", "cooked", "mineral", "junk", "treasure", "quest"] {
            assert!(
                host.catalog_rows
                    .iter()
                    .any(|row| row.category.as_deref() == Some(category)),
                "missing category {}",
                category
            );
        }
    }

    #[test]
    fn test_random_gift_draws_from_cast_and_catalog() {
        let mut rng = SmallRng::seed_from_u64(11);
        let host = SimHost::generate(&CastConfig::default(), &mut rng);

        for _ in 0..50 {
            let trigger = host.random_gift(&mut rng).unwrap();
            assert!(host.actors.contains(&trigger.actor_id));
            assert!(host
                .catalog_rows
                .iter()
                .any(|row| row.id == trigger.item_id));
        }
    }

    #[test]
    fn test_random_gift_with_empty_cast() {
        let mut rng = SmallRng::seed_from_u64(11);
        let config = CastConfig {
            actor_count: 0,
            ..CastConfig::default()
        };
        let host = SimHost::generate(&config, &mut rng);

        assert!(host.actors().is_empty());
        assert!(host.random_gift(&mut rng).is_none());
    }

    #[test]
    fn test_random_gift_with_empty_catalog() {
        let mut rng = SmallRng::seed_from_u64(11);
        let mut host = SimHost::generate(&CastConfig::default(), &mut rng);
        host.catalog_rows.clear();

        assert!(host.random_gift(&mut rng).is_none());
    }

    #[test]
    fn test_gift_schedule_is_sorted_and_in_range() {
        let mut rng = SmallRng::seed_from_u64(11);
        let ticks = gift_schedule(6, 1200, &mut rng);

        assert_eq!(ticks.len(), 6);
        assert!(ticks.windows(2).all(|pair| pair[0] <= pair[1]));
        assert!(ticks.iter().all(|&tick| tick < 1200));
    }

    #[test]
    fn test_gift_schedule_with_no_ticks() {
        let mut rng = SmallRng::seed_from_u64(11);
        assert!(gift_schedule(6, 0, &mut rng).is_empty());
    }

    #[test]
    fn test_dialogue_countdown() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut host = SimHost::generate(&CastConfig::default(), &mut rng);

        assert!(!host.is_blocking_dialogue_visible());
        host.open_dialogue(2);
        assert!(host.is_blocking_dialogue_visible());

        host.tick_dialogue();
        assert!(host.is_blocking_dialogue_visible());
        host.tick_dialogue();
        assert!(!host.is_blocking_dialogue_visible());

        // A longer request never shortens an open dialogue.
        host.open_dialogue(5);
        host.open_dialogue(2);
        host.tick_dialogue();
        host.tick_dialogue();
        host.tick_dialogue();
        assert!(host.is_blocking_dialogue_visible());
    }
}
