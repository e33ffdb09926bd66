//! Merged product catalog: remote reads reconciled with local overlays.
//!
//! Reads combine the remote catalog with the overlay store. Writes land in the
//! overlay store first, synchronously, and are then mirrored to the remote on
//! a detached task whose outcome never reaches the caller.

mod id;
mod merge;
mod mirror;

use std::future::Future;

pub use id::IdGenerator;
pub use merge::{is_tombstoned, live_override, local_view, merge_catalog};
pub use mirror::{MirrorIntent, MirrorQueue};

use crate::config::CatalogConfig;
use crate::error::{Error, Result};
use crate::gateway::{
    CatalogGateway, HttpCatalogGateway, LoginCredentials, LoginToken, RemoteResult,
};
use crate::models::{CatalogEntry, Item, ItemDraft, ItemId, ItemPatch, OverlayRecord, OverlayStats};
use crate::store::{FileOverlayPersistence, OverlayPersistence, OverlayStore};
use crate::util::unix_millis_now;

pub struct Catalog<G: CatalogGateway, P: OverlayPersistence> {
    gateway: G,
    store: OverlayStore<P>,
    ids: IdGenerator,
    mirrors: MirrorQueue,
}

impl Catalog<HttpCatalogGateway, FileOverlayPersistence> {
    /// Catalog backed by the HTTP gateway and the on-disk overlay file.
    pub fn open(config: &CatalogConfig) -> Result<Self> {
        let gateway = HttpCatalogGateway::new(config.api_base_url()?, config.request_timeout())?;
        let overlay_path = config.overlay_path()?;
        tracing::debug!(
            "Opening catalog at {} with overlays in {}",
            gateway.base_url(),
            overlay_path.display()
        );
        let store = OverlayStore::new(FileOverlayPersistence::new(overlay_path));
        Ok(Self::new(gateway, store))
    }
}

impl<G: CatalogGateway, P: OverlayPersistence> Catalog<G, P> {
    pub fn new(gateway: G, store: OverlayStore<P>) -> Self {
        Self {
            gateway,
            store,
            ids: IdGenerator::new(),
            mirrors: MirrorQueue::new(),
        }
    }

    pub const fn store(&self) -> &OverlayStore<P> {
        &self.store
    }

    pub const fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Every visible product. Falls back to local records when the remote is down.
    pub async fn list_products(&self) -> Vec<CatalogEntry> {
        let remote = self.gateway.list_items().await;
        let overlays = self.store.load_all();

        match remote {
            Ok(items) => merge_catalog(items, &overlays),
            Err(error) => {
                tracing::warn!(
                    "Failed to load remote catalog, showing local products only: {}",
                    error
                );
                local_view(&overlays)
            }
        }
    }

    /// One product, overlay first, then remote.
    pub async fn get_product(&self, id: ItemId) -> Result<CatalogEntry> {
        let mut overlays = self.store.load_all();
        if is_tombstoned(&overlays, id) {
            return Err(Error::NotFound(id));
        }
        if let Some(index) = overlays.iter().position(|record| record.id() == id) {
            return Ok(CatalogEntry::Overlay(overlays.swap_remove(index)));
        }

        let item = self.gateway.get_item(id).await.map_err(|error| {
            tracing::debug!("Failed to load product {} from remote: {}", id, error);
            Error::NotFound(id)
        })?;

        let linked = overlays
            .into_iter()
            .find(|record| !record.is_deleted && record.original_id == Some(item.id));
        Ok(linked.map_or(CatalogEntry::Remote(item), CatalogEntry::Overlay))
    }

    /// Tombstoned records, in store order.
    pub fn list_tombstones(&self) -> Vec<OverlayRecord> {
        self.store
            .load_all()
            .into_iter()
            .filter(|record| record.is_deleted)
            .collect()
    }

    /// Create a local-only product.
    pub async fn create_product(&self, draft: ItemDraft) -> Result<OverlayRecord> {
        let mut records = self.store.load_all();
        let id = self.ids.next(&records)?;
        let record = OverlayRecord::local(Item::from_draft(id, draft.clone()), unix_millis_now());

        records.push(record.clone());
        self.store.save_all(&records)?;
        tracing::info!("Created local product {}", id);

        self.mirror(MirrorIntent::Create, move |gateway| async move {
            gateway.create_item(&draft).await
        });
        Ok(record)
    }

    /// Edit a product, materializing an overlay on first edit.
    pub async fn update_product(&self, id: ItemId, patch: ItemPatch) -> Result<OverlayRecord> {
        let mut records = self.store.load_all();
        if is_tombstoned(&records, id) {
            return Err(Error::Conflict(id));
        }

        let record = if let Some(index) = records.iter().position(|record| record.id() == id) {
            records[index].apply(patch, unix_millis_now());
            self.store.save_all(&records)?;
            records.swap_remove(index)
        } else {
            let record = match self.gateway.get_item(id).await {
                Ok(remote) => {
                    let mut record = OverlayRecord::derived_from(remote, unix_millis_now());
                    record.apply(patch, record.updated_at);
                    record
                }
                Err(error) => {
                    tracing::debug!(
                        "Product {} not available remotely, editing as local: {}",
                        id,
                        error
                    );
                    let mut item = Item::from_draft(id, ItemDraft::default());
                    item.apply(patch);
                    OverlayRecord::local(item, unix_millis_now())
                }
            };
            self.persist_new(record)?
        };
        tracing::info!("Updated product {}", id);

        let draft = record.item.to_draft();
        self.mirror(MirrorIntent::Update(id), move |gateway| async move {
            gateway.update_item(id, &draft).await
        });
        Ok(record)
    }

    /// Tombstone a product.
    pub async fn delete_product(&self, id: ItemId) -> Result<OverlayRecord> {
        let mut records = self.store.load_all();

        let record = if let Some(index) = records.iter().position(|record| record.id() == id) {
            records[index].mark_deleted(unix_millis_now());
            self.store.save_all(&records)?;
            records.swap_remove(index)
        } else {
            let record = match self.gateway.get_item(id).await {
                Ok(remote) => {
                    let mut record = OverlayRecord::derived_from(remote, unix_millis_now());
                    record.mark_deleted(record.updated_at);
                    record
                }
                Err(error) => {
                    tracing::debug!(
                        "Product {} not available remotely, storing placeholder: {}",
                        id,
                        error
                    );
                    OverlayRecord::placeholder_tombstone(id, unix_millis_now())
                }
            };
            self.persist_new(record)?
        };
        tracing::info!("Deleted product {}", id);

        self.mirror(MirrorIntent::Delete(id), move |gateway| async move {
            gateway.delete_item(id).await
        });
        Ok(record)
    }

    /// Clear the tombstone on a deleted product.
    pub fn restore_product(&self, id: ItemId) -> Result<OverlayRecord> {
        let mut records = self.store.load_all();
        let index = records
            .iter()
            .position(|record| record.id() == id)
            .ok_or(Error::NotFound(id))?;
        if !records[index].is_deleted {
            return Err(Error::InvalidState(id));
        }

        records[index].mark_restored(unix_millis_now());
        self.store.save_all(&records)?;
        tracing::info!("Restored product {}", id);
        Ok(records.swap_remove(index))
    }

    /// Permanently drop every tombstone. Returns how many were removed.
    pub fn purge_tombstones(&self) -> Result<usize> {
        let records = self.store.load_all();
        let before = records.len();
        let kept = records
            .into_iter()
            .filter(|record| !record.is_deleted)
            .collect::<Vec<_>>();
        let purged = before - kept.len();

        if purged > 0 {
            self.store.save_all(&kept)?;
            tracing::info!("Purged {} deleted products", purged);
        }
        Ok(purged)
    }

    pub fn get_stats(&self) -> OverlayStats {
        OverlayStats::from_records(&self.store.load_all())
    }

    /// Forget every local edit.
    pub fn clear_all_local_data(&self) -> Result<()> {
        self.store.clear()?;
        tracing::info!("Cleared local product data");
        Ok(())
    }

    pub async fn login(&self, credentials: &LoginCredentials) -> Result<LoginToken> {
        Ok(self.gateway.login(credentials).await?)
    }

    /// Wait for outstanding remote mirrors.
    pub async fn flush_mirrors(&self) {
        self.mirrors.flush().await;
    }

    /// Append a freshly materialized record, re-reading the store since the
    /// remote lookup may have yielded to other operations.
    fn persist_new(&self, record: OverlayRecord) -> Result<OverlayRecord> {
        let mut records = self.store.load_all();
        records.push(record.clone());
        self.store.save_all(&records)?;
        Ok(record)
    }

    fn mirror<F, Fut>(&self, intent: MirrorIntent, call: F)
    where
        F: FnOnce(G) -> Fut,
        Fut: Future<Output = RemoteResult<()>> + Send + 'static,
    {
        self.mirrors.spawn(intent, call(self.gateway.clone()));
    }
}
