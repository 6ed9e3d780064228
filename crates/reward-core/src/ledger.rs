//! Daily Reset Ledger
//!
//! Tracks which actors have already received a reaction today, so each
//! actor reacts at most once per day. The host's day-start signal clears
//! it; nothing is persisted across process restarts.

use std::collections::HashSet;

/// Per-day record of delivered reactions.
///
/// Actors are marked only after a successful grant, so failed or empty
/// payouts leave the actor free to react again the same day.
#[derive(Debug, Clone, Default)]
pub struct DailyLedger {
    reacted: HashSet<String>,
}

impl DailyLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether the actor already received a reaction today.
    pub fn has_reacted_today(&self, actor_id: &str) -> bool {
        self.reacted.contains(actor_id)
    }

    /// Mark that the actor's reaction was delivered.
    pub fn mark_reacted(&mut self, actor_id: impl Into<String>) {
        self.reacted.insert(actor_id.into());
    }

    /// Clear the ledger for a new day.
    pub fn reset_for_new_day(&mut self) {
        self.reacted.clear();
    }

    /// Number of actors that reacted today.
    pub fn len(&self) -> usize {
        self.reacted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reacted.is_empty()
    }
}
