//! Catalog Rows
//!
//! Item rows as the host reports them. The engine never mutates the
//! catalog; it only filters and weights these rows into a draw pool.

use serde::{Deserialize, Serialize};

/// One obtainable item in the host's catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Host-side item identifier (e.g. "amber_shard").
    pub id: String,
    /// Base value in the host's currency. Rows with a non-positive value
    /// never enter a draw pool.
    pub value: i32,
    /// Optional host-side category tag (e.g. "quest", "junk").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl CatalogEntry {
    /// Create an entry with no category tag.
    pub fn new(id: impl Into<String>, value: i32) -> Self {
        Self {
            id: id.into(),
            value,
            category: None,
        }
    }

    /// Attach a category tag.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let entry = CatalogEntry::new("geode_core", 480).with_category("mineral");
        assert_eq!(entry.id, "geode_core");
        assert_eq!(entry.value, 480);
        assert_eq!(entry.category.as_deref(), Some("mineral"));
    }

    #[test]
    fn category_is_omitted_from_json_when_absent() {
        let entry = CatalogEntry::new("river_pebble", 1);
        let json = serde_json::to_string(&entry).unwrap();
        assert!(!json.contains("category"));
    }

    #[test]
    fn deserializes_with_and_without_category() {
        let bare: CatalogEntry =
            serde_json::from_str(r#"{"id": "iou_note", "value": -10}"#).unwrap();
        assert_eq!(bare.category, None);

        let tagged: CatalogEntry =
            serde_json::from_str(r#"{"id": "elder_letter", "value": 100, "category": "quest"}"#)
                .unwrap();
        assert_eq!(tagged.category.as_deref(), Some("quest"));
    }

    #[test]
    fn round_trips_through_json() {
        let entry = CatalogEntry::new("sun_opal", 800).with_category("mineral");
        let json = serde_json::to_string(&entry).unwrap();
        let back: CatalogEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }
}
