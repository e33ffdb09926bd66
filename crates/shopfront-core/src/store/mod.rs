//! Persistent overlay store.
//!
//! The whole overlay collection lives in one durable slot as a JSON array and
//! is re-read on every access. Reads never fail: a missing slot is an empty
//! collection and an unreadable one is quarantined and treated as empty.
//! Writes replace the entire collection and report failures to the caller.

mod persistence;

use std::collections::HashMap;

pub use persistence::{FileOverlayPersistence, MemoryOverlayPersistence, OverlayPersistence};

use crate::error::Result;
use crate::models::{ItemId, OverlayRecord};

#[derive(Debug, Clone)]
pub struct OverlayStore<P: OverlayPersistence> {
    persistence: P,
}

impl<P: OverlayPersistence> OverlayStore<P> {
    pub const fn new(persistence: P) -> Self {
        Self { persistence }
    }

    pub const fn persistence(&self) -> &P {
        &self.persistence
    }

    /// Load every record in persisted order.
    pub fn load_all(&self) -> Vec<OverlayRecord> {
        let raw = match self.persistence.load() {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(error) => {
                tracing::warn!("Failed to read overlay records: {}", error);
                return Vec::new();
            }
        };

        if raw.trim().is_empty() {
            return Vec::new();
        }

        match serde_json::from_str::<Vec<OverlayRecord>>(&raw) {
            Ok(records) => records,
            Err(error) => {
                tracing::warn!("Overlay records are unreadable, starting empty: {}", error);
                if let Err(error) = self.persistence.quarantine() {
                    tracing::warn!("Failed to quarantine overlay records: {}", error);
                }
                Vec::new()
            }
        }
    }

    /// Atomically replace the persisted collection.
    ///
    /// Records sharing an id collapse into one: the last occurrence wins and
    /// keeps the position of the first.
    pub fn save_all(&self, records: &[OverlayRecord]) -> Result<()> {
        let records = dedupe_by_id(records);
        let blob = serde_json::to_string(&records)?;
        self.persistence.save(&blob)
    }

    pub fn find_by_id(&self, id: ItemId) -> Option<OverlayRecord> {
        self.load_all().into_iter().find(|record| record.id() == id)
    }

    pub fn find_by_original_id(&self, original_id: ItemId) -> Option<OverlayRecord> {
        self.load_all()
            .into_iter()
            .find(|record| record.original_id == Some(original_id))
    }

    /// Wipe the persisted slot.
    pub fn clear(&self) -> Result<()> {
        self.persistence.clear()
    }
}

fn dedupe_by_id(records: &[OverlayRecord]) -> Vec<OverlayRecord> {
    let mut positions: HashMap<ItemId, usize> = HashMap::with_capacity(records.len());
    let mut unique: Vec<OverlayRecord> = Vec::with_capacity(records.len());

    for record in records {
        if let Some(&index) = positions.get(&record.id()) {
            unique[index] = record.clone();
        } else {
            positions.insert(record.id(), unique.len());
            unique.push(record.clone());
        }
    }

    unique
}
