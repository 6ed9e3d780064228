//! Sample data fixtures for testing.
//!
//! This module provides ready-made test data for other crates to use.
//! Enable the `test-fixtures` feature to access these helpers.
//!
//! # Example
//!
//! ```ignore
//! // In your Cargo.toml:
//! // [dev-dependencies]
//! // reward-events = { path = "../reward-events", features = ["test-fixtures"] }
//!
//! use reward_events::fixtures;
//!
//! let catalog = fixtures::sample_catalog();
//! ```

use crate::{CatalogEntry, GiftTaste, TriggerEvent};

/// Returns the sample catalog from the fixtures file.
///
/// Contains 15 items spanning the interesting cases:
/// - values from -10 to 800, including one zero-value and one
///   negative-value row (never poolable)
/// - two "quest" rows (excluded by a default reward config)
/// - two rows above a value ceiling of 500
/// - junk, forage, mineral, cooking and artifact categories
///
/// Under a ceiling of 500 with "quest" excluded, exactly 9 rows are
/// poolable.
pub fn sample_catalog() -> Vec<CatalogEntry> {
    let json = include_str!("../tests/fixtures/sample_catalog.json");
    serde_json::from_str(json).expect("Failed to parse sample_catalog.json")
}

/// Returns a specific catalog entry by ID from the sample catalog.
pub fn get_entry(id: &str) -> Option<CatalogEntry> {
    sample_catalog().into_iter().find(|e| e.id == id)
}

/// Returns a gift trigger the actor feels neutral about.
pub fn neutral_gift(actor_id: &str) -> TriggerEvent {
    TriggerEvent::new(actor_id, "wild_posy").with_taste(GiftTaste::Neutral)
}

/// Returns a gift trigger the actor hates.
pub fn hated_gift(actor_id: &str) -> TriggerEvent {
    TriggerEvent::new(actor_id, "rusty_cog").with_taste(GiftTaste::Hate)
}
