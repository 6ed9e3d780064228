//! Host Interface
//!
//! Everything game-facing goes through this trait: the engine never touches
//! host state directly, which keeps it testable with a scripted fake and
//! portable across host adapters.

use thiserror::Error;

use reward_events::CatalogEntry;

/// Errors a host can report back to the engine.
///
/// Only granting is fallible. Notifications and sounds are fire-and-forget
/// by signature, so a misbehaving sink can never disturb the reaction state
/// machine; an adapter over a throwing game API catches at its own
/// boundary.
#[derive(Error, Debug)]
pub enum HostError {
    /// The host refused or failed to grant the item
    #[error("Item grant failed: {0}")]
    GrantFailed(String),
}

/// Category of a host notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    /// An item was granted to the player
    ItemGranted,
    /// General informational message
    Info,
}

/// The engine's window onto the running game.
pub trait GameHost {
    /// Whether a blocking dialogue UI is currently on screen.
    fn is_blocking_dialogue_visible(&self) -> bool;

    /// The player's relationship level with the actor (may be negative).
    fn relationship_level(&self, actor_id: &str) -> i32;

    /// A snapshot of the obtainable-item catalog.
    fn catalog(&self) -> Vec<CatalogEntry>;

    /// Put the item into the player's possession on behalf of the actor.
    fn grant_item(&mut self, actor_id: &str, item_id: &str) -> Result<(), HostError>;

    /// Show a notification to the player.
    fn notify(&mut self, message: &str, kind: NotificationKind);

    /// Play a sound cue.
    fn play_sound(&mut self, name: &str);
}
