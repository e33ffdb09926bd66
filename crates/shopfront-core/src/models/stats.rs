//! Overlay statistics model

use serde::{Deserialize, Serialize};

use super::overlay::{OverlayKind, OverlayRecord};

/// Counts over the persisted overlay collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayStats {
    /// Every persisted record, tombstones included
    pub total: usize,
    /// Local-only records that are not tombstoned
    pub local: usize,
    /// Edited remote records that are not tombstoned
    pub modified: usize,
    /// Tombstoned records
    pub deleted: usize,
}

impl OverlayStats {
    #[must_use]
    pub fn from_records(records: &[OverlayRecord]) -> Self {
        records.iter().fold(
            Self {
                total: records.len(),
                ..Self::default()
            },
            |mut stats, record| {
                match record.kind() {
                    OverlayKind::LocalOnly => stats.local += 1,
                    OverlayKind::Modified => stats.modified += 1,
                    OverlayKind::Tombstone => stats.deleted += 1,
                    OverlayKind::Untouched => {}
                }
                stats
            },
        )
    }

    /// Remote-derived records that are neither local, modified, nor deleted
    #[must_use]
    pub const fn untouched(&self) -> usize {
        self.total
            .saturating_sub(self.local + self.modified + self.deleted)
    }
}
