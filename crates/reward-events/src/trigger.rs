//! Trigger Events
//!
//! One observed gift, as reported by the host adapter. The engine consumes
//! these and decides whether to schedule a deferred reaction.

use serde::{Deserialize, Serialize};

/// The receiving actor's taste for a gifted item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GiftTaste {
    Love,
    Like,
    Neutral,
    Dislike,
    Hate,
}

impl GiftTaste {
    /// True for the tastes that make a gift eligible under a
    /// penalty-direction policy.
    pub fn is_negative(&self) -> bool {
        matches!(self, GiftTaste::Dislike | GiftTaste::Hate)
    }

    /// Returns all taste variants.
    pub fn all() -> &'static [GiftTaste] {
        &[
            GiftTaste::Love,
            GiftTaste::Like,
            GiftTaste::Neutral,
            GiftTaste::Dislike,
            GiftTaste::Hate,
        ]
    }
}

/// One observed gift: an actor received an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerEvent {
    /// The actor who received the gift.
    pub actor_id: String,
    /// The gifted item.
    pub item_id: String,
    /// The actor's taste for the item, when the host can classify it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taste: Option<GiftTaste>,
}

impl TriggerEvent {
    /// Create a trigger with an unclassified taste.
    pub fn new(actor_id: impl Into<String>, item_id: impl Into<String>) -> Self {
        Self {
            actor_id: actor_id.into(),
            item_id: item_id.into(),
            taste: None,
        }
    }

    /// Attach the actor's taste for the item.
    pub fn with_taste(mut self, taste: GiftTaste) -> Self {
        self.taste = Some(taste);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taste_serializes_as_snake_case() {
        assert_eq!(
            serde_json::to_string(&GiftTaste::Dislike).unwrap(),
            "\"dislike\""
        );
        let parsed: GiftTaste = serde_json::from_str("\"hate\"").unwrap();
        assert_eq!(parsed, GiftTaste::Hate);
    }

    #[test]
    fn only_dislike_and_hate_are_negative() {
        for taste in GiftTaste::all() {
            let expected = matches!(taste, GiftTaste::Dislike | GiftTaste::Hate);
            assert_eq!(taste.is_negative(), expected, "taste {:?}", taste);
        }
    }

    #[test]
    fn builder_attaches_taste() {
        let trigger = TriggerEvent::new("maren", "rusty_cog").with_taste(GiftTaste::Hate);
        assert_eq!(trigger.actor_id, "maren");
        assert_eq!(trigger.item_id, "rusty_cog");
        assert_eq!(trigger.taste, Some(GiftTaste::Hate));
    }

    #[test]
    fn taste_field_is_optional_in_json() {
        let trigger: TriggerEvent =
            serde_json::from_str(r#"{"actor_id": "olaf", "item_id": "wild_posy"}"#).unwrap();
        assert_eq!(trigger.taste, None);

        let json = serde_json::to_string(&trigger).unwrap();
        assert!(!json.contains("taste"));
    }
}
