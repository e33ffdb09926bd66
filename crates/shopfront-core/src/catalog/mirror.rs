//! Best-effort replay of local mutations against the remote catalog.

use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex};

use tokio::task::JoinHandle;

use crate::gateway::RemoteResult;
use crate::models::ItemId;

/// The mutation being mirrored, for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorIntent {
    Create,
    Update(ItemId),
    Delete(ItemId),
}

impl fmt::Display for MirrorIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::Update(id) => write!(f, "update of {id}"),
            Self::Delete(id) => write!(f, "delete of {id}"),
        }
    }
}

/// Detached mirror tasks.
///
/// A failed mirror is only ever logged. Handles are kept so a caller that is
/// about to exit can give outstanding mirrors a chance to finish.
#[derive(Debug, Clone, Default)]
pub struct MirrorQueue {
    pending: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl MirrorQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `call` on a detached task. Must be called inside a tokio runtime.
    pub fn spawn<F>(&self, intent: MirrorIntent, call: F)
    where
        F: Future<Output = RemoteResult<()>> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            match call.await {
                Ok(()) => tracing::debug!("Mirrored {} to remote catalog", intent),
                Err(error) => tracing::info!(
                    "Remote catalog did not accept {}; kept locally only: {}",
                    intent,
                    error
                ),
            }
        });

        match self.pending.lock() {
            Ok(mut pending) => {
                pending.retain(|handle| !handle.is_finished());
                pending.push(handle);
            }
            Err(_) => tracing::warn!("Mirror queue lock poisoned; {} left untracked", intent),
        }
    }

    /// Number of mirrors that have not finished yet.
    pub fn pending(&self) -> usize {
        self.pending.lock().map_or(0, |pending| {
            pending.iter().filter(|handle| !handle.is_finished()).count()
        })
    }

    /// Wait for every mirror spawned so far, including ones spawned while waiting.
    pub async fn flush(&self) {
        loop {
            let handles = match self.pending.lock() {
                Ok(mut pending) => std::mem::take(&mut *pending),
                Err(_) => return,
            };
            if handles.is_empty() {
                return;
            }
            for handle in handles {
                if let Err(error) = handle.await {
                    tracing::warn!("Mirror task aborted: {}", error);
                }
            }
        }
    }
}
