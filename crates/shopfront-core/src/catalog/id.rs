//! Identifier synthesis for locally created products.

use std::collections::HashSet;
use std::sync::atomic::{AtomicI64, Ordering};

use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::{ItemId, OverlayRecord};
use crate::util::unix_millis_now;

const RANDOM_SPAN: u128 = 1000;

/// Issues ids far above the remote catalog's small sequential ids.
///
/// Each id is `millis * 1000 + random(0..1000)`, bumped so it is strictly
/// greater than every id this generator already issued and every id present
/// in the overlay collection. Once nothing above those is representable, the
/// highest unused id at or below the timestamp candidate is issued instead.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last_issued: AtomicI64,
}

impl IdGenerator {
    pub const fn new() -> Self {
        Self {
            last_issued: AtomicI64::new(0),
        }
    }

    pub fn next(&self, existing: &[OverlayRecord]) -> Result<ItemId> {
        let random = i64::try_from(Uuid::new_v4().as_u128() % RANDOM_SPAN).unwrap_or_default();
        let candidate = unix_millis_now().saturating_mul(1000).saturating_add(random);
        let floor = existing
            .iter()
            .map(|record| record.id().get())
            .max()
            .unwrap_or(0);

        let above = |last: i64| -> Option<i64> {
            Some(
                candidate
                    .max(last.checked_add(1)?)
                    .max(floor.checked_add(1)?),
            )
        };

        match self
            .last_issued
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, above)
        {
            Ok(previous) => above(previous).map(ItemId::new).ok_or_else(exhausted),
            Err(last) => {
                tracing::warn!(
                    "No product id above {} is available, reusing a free lower id",
                    floor.max(last)
                );
                unused_at_or_below(candidate, existing)
            }
        }
    }
}

fn unused_at_or_below(start: i64, existing: &[OverlayRecord]) -> Result<ItemId> {
    let taken = existing
        .iter()
        .map(|record| record.id().get())
        .collect::<HashSet<_>>();
    (1..=start.max(1))
        .rev()
        .find(|id| !taken.contains(id))
        .map(ItemId::new)
        .ok_or_else(exhausted)
}

fn exhausted() -> Error {
    Error::Storage("no unused product id is available".to_string())
}
