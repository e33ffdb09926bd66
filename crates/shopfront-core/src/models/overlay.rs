//! Overlay records and merged catalog entries

use serde::{Deserialize, Serialize};

use super::item::{Item, ItemId, ItemPatch, Rating};

const PLACEHOLDER_TITLE: &str = "Deleted product";
const PLACEHOLDER_DESCRIPTION: &str = "This product was deleted";
const PLACEHOLDER_CATEGORY: &str = "deleted";

/// A locally persisted create/update/delete intent layered over the catalog.
///
/// The record carries a full copy of the item fields so it can stand in for
/// the remote item in merged reads. Flags use camelCase keys in the persisted
/// JSON; missing flags decode as `false`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayRecord {
    #[serde(flatten)]
    pub item: Item,
    /// Created here; no remote counterpart
    #[serde(default)]
    pub is_local_only: bool,
    /// Fields edited here override the remote item
    #[serde(default)]
    pub is_modified: bool,
    /// Tombstone
    #[serde(default)]
    pub is_deleted: bool,
    /// Remote item this record was derived from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_id: Option<ItemId>,
    /// Creation timestamp (Unix ms)
    #[serde(default)]
    pub created_at: i64,
    /// Last update timestamp (Unix ms)
    #[serde(default)]
    pub updated_at: i64,
}

/// Classification of an overlay record, used for stats and display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayKind {
    /// Created locally, visible
    LocalOnly,
    /// Remote item with local edits, visible
    Modified,
    /// Hidden from merged reads
    Tombstone,
    /// Remote-derived record carrying no local edit
    Untouched,
}

impl OverlayRecord {
    /// A brand-new local product with no remote counterpart
    #[must_use]
    pub fn local(mut item: Item, now: i64) -> Self {
        item.rating = Some(Rating::default());
        Self {
            item,
            is_local_only: true,
            is_modified: true,
            is_deleted: false,
            original_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// An unmodified copy of a remote item, linked back through `original_id`
    #[must_use]
    pub fn derived_from(remote: Item, now: i64) -> Self {
        let original_id = Some(remote.id);
        Self {
            item: remote,
            is_local_only: false,
            is_modified: false,
            is_deleted: false,
            original_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Tombstone for an id that could not be resolved anywhere
    #[must_use]
    pub fn placeholder_tombstone(id: ItemId, now: i64) -> Self {
        let item = Item {
            id,
            title: PLACEHOLDER_TITLE.to_string(),
            price: 0.0,
            description: PLACEHOLDER_DESCRIPTION.to_string(),
            category: PLACEHOLDER_CATEGORY.to_string(),
            image: String::new(),
            rating: None,
        };
        Self {
            item,
            is_local_only: false,
            is_modified: false,
            is_deleted: true,
            original_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[must_use]
    pub const fn id(&self) -> ItemId {
        self.item.id
    }

    /// Whether this record stands for `id`, directly or through `original_id`
    #[must_use]
    pub fn refers_to(&self, id: ItemId) -> bool {
        self.item.id == id || self.original_id == Some(id)
    }

    #[must_use]
    pub const fn kind(&self) -> OverlayKind {
        if self.is_deleted {
            OverlayKind::Tombstone
        } else if self.is_local_only {
            OverlayKind::LocalOnly
        } else if self.is_modified {
            OverlayKind::Modified
        } else {
            OverlayKind::Untouched
        }
    }

    /// Merge an edit into the record and mark it modified
    pub fn apply(&mut self, patch: ItemPatch, now: i64) {
        self.item.apply(patch);
        self.is_modified = true;
        self.updated_at = now;
    }

    pub const fn mark_deleted(&mut self, now: i64) {
        self.is_deleted = true;
        self.updated_at = now;
    }

    pub const fn mark_restored(&mut self, now: i64) {
        self.is_deleted = false;
        self.updated_at = now;
    }
}

/// One visible entry of the merged catalog view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum CatalogEntry {
    /// Served as-is from the remote catalog
    Remote(Item),
    /// Served from a local overlay record
    Overlay(OverlayRecord),
}

impl CatalogEntry {
    #[must_use]
    pub const fn item(&self) -> &Item {
        match self {
            Self::Remote(item) => item,
            Self::Overlay(record) => &record.item,
        }
    }

    #[must_use]
    pub const fn id(&self) -> ItemId {
        self.item().id
    }

    #[must_use]
    pub const fn overlay(&self) -> Option<&OverlayRecord> {
        match self {
            Self::Remote(_) => None,
            Self::Overlay(record) => Some(record),
        }
    }

    #[must_use]
    pub const fn is_local_only(&self) -> bool {
        matches!(self, Self::Overlay(record) if record.is_local_only)
    }
}
