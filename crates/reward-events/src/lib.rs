//! Shared data types for the deferred reward engine.
//!
//! This crate contains pure data structures with no engine logic.
//! It is a dependency for all other crates in the workspace.

pub mod catalog;
pub mod trigger;

#[cfg(feature = "test-fixtures")]
pub mod fixtures;

// Re-export catalog types
pub use catalog::CatalogEntry;

// Re-export trigger types
pub use trigger::{GiftTaste, TriggerEvent};
