//! shopfront-core - Core library for Shopfront
//!
//! Layers locally persisted product edits on top of a read-only catalog API.
//! The remote catalog accepts writes but never reflects them back, so every
//! create, update, and delete is kept as an overlay record and merged into
//! reads by [`Catalog`].

pub mod catalog;
pub mod config;
pub mod error;
pub mod gateway;
pub mod models;
pub mod store;
pub mod util;

#[cfg(test)]
mod testing;

pub use catalog::Catalog;
pub use config::CatalogConfig;
pub use error::{Error, Result};
pub use models::{CatalogEntry, Item, ItemDraft, ItemId, ItemPatch, OverlayRecord, OverlayStats};
