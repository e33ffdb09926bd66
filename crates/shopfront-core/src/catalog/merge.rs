//! Reconciliation of the remote catalog with local overlay records.

use std::collections::HashSet;

use crate::models::{CatalogEntry, Item, ItemId, OverlayRecord};

/// Whether any overlay tombstones `id`, directly or through `original_id`.
pub fn is_tombstoned(overlays: &[OverlayRecord], id: ItemId) -> bool {
    overlays
        .iter()
        .any(|record| record.is_deleted && record.refers_to(id))
}

/// The live overlay that replaces remote item `id`, if any.
///
/// A record keyed by `id` wins over one that merely links to it.
pub fn live_override(overlays: &[OverlayRecord], id: ItemId) -> Option<&OverlayRecord> {
    let live = || overlays.iter().filter(|record| !record.is_deleted);
    live()
        .find(|record| record.id() == id)
        .or_else(|| live().find(|record| record.original_id == Some(id)))
}

/// Merge a remote snapshot with the overlay collection.
///
/// Local-only creations come first, newest first; the remote items follow in
/// the remote's own order, each replaced by its live overlay when one exists.
/// Tombstoned ids never appear.
pub fn merge_catalog(remote: Vec<Item>, overlays: &[OverlayRecord]) -> Vec<CatalogEntry> {
    let remote_ids = remote.iter().map(|item| item.id).collect::<HashSet<_>>();

    let mut local_only = overlays
        .iter()
        .filter(|record| {
            record.is_local_only
                && !record.is_deleted
                && record.original_id.is_none()
                && !remote_ids.contains(&record.id())
        })
        .collect::<Vec<_>>();
    local_only.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let merged_remote = remote
        .into_iter()
        .filter(|item| !is_tombstoned(overlays, item.id))
        .map(|item| match live_override(overlays, item.id) {
            Some(record) => CatalogEntry::Overlay(record.clone()),
            None => CatalogEntry::Remote(item),
        });

    local_only
        .into_iter()
        .map(|record| CatalogEntry::Overlay(record.clone()))
        .chain(merged_remote)
        .collect()
}

/// The view served when the remote catalog is unreachable.
pub fn local_view(overlays: &[OverlayRecord]) -> Vec<CatalogEntry> {
    overlays
        .iter()
        .filter(|record| !record.is_deleted)
        .cloned()
        .map(CatalogEntry::Overlay)
        .collect()
}
