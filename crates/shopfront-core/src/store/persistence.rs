//! Backends for the single durable overlay slot.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::{Error, Result};

/// Durable storage for the serialized overlay collection.
///
/// The slot holds one opaque blob; parsing and recovery live in
/// [`OverlayStore`](super::OverlayStore).
pub trait OverlayPersistence: Clone + Send + Sync + 'static {
    /// Read the raw blob, `None` when nothing was ever saved
    fn load(&self) -> Result<Option<String>>;

    /// Replace the raw blob
    fn save(&self, blob: &str) -> Result<()>;

    /// Remove the slot entirely
    fn clear(&self) -> Result<()>;

    /// Move an unreadable blob out of the way so the next save starts clean
    fn quarantine(&self) -> Result<()> {
        self.clear()
    }
}

/// Overlay slot stored as a JSON file on disk
#[derive(Debug, Clone)]
pub struct FileOverlayPersistence {
    path: PathBuf,
}

impl FileOverlayPersistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl OverlayPersistence for FileOverlayPersistence {
    fn load(&self) -> Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn save(&self, blob: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let temp_path = self.temp_path();
        std::fs::write(&temp_path, blob)?;
        std::fs::rename(&temp_path, &self.path)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }

    fn quarantine(&self) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }

        let Some(base_name) = self.path.file_name().and_then(|name| name.to_str()) else {
            return self.clear();
        };
        let timestamp = chrono::Utc::now().timestamp_millis();
        let backup_path = self
            .path
            .with_file_name(format!("{base_name}.corrupt-{timestamp}"));

        std::fs::rename(&self.path, &backup_path)?;
        tracing::warn!(
            "Moved unreadable overlay file from {} to {}",
            self.path.display(),
            backup_path.display()
        );
        Ok(())
    }
}

/// Process-local overlay slot, for tests and throwaway sessions
#[derive(Debug, Clone, Default)]
pub struct MemoryOverlayPersistence {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryOverlayPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing raw blob
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(blob.into()))),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<String>>> {
        self.slot
            .lock()
            .map_err(|_| Error::Storage("overlay slot lock poisoned".to_string()))
    }
}

impl OverlayPersistence for MemoryOverlayPersistence {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.lock()?.clone())
    }

    fn save(&self, blob: &str) -> Result<()> {
        *self.lock()? = Some(blob.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.lock()? = None;
        Ok(())
    }
}
