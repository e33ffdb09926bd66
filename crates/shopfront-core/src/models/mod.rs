//! Data models for Shopfront

mod item;
mod overlay;
mod stats;

pub use item::{Item, ItemDraft, ItemId, ItemPatch, Rating};
pub use overlay::{CatalogEntry, OverlayKind, OverlayRecord};
pub use stats::OverlayStats;
