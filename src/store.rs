//! JSON snapshot persistence for the club.

use crate::models::Club;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Errors reading or writing a snapshot.
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "snapshot I/O error: {}", e),
            StoreError::Json(e) => write!(f, "snapshot format error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            StoreError::Json(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Json(e)
    }
}

/// Where the club is saved. Without a path the store is memory only and saving is a no-op.
///
/// Saves are serialized: only one snapshot is being encoded or written at a time, so the file
/// always ends up holding the state seen by the last save to take the lock.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    path: Option<PathBuf>,
    save_lock: Mutex<()>,
}

impl SnapshotStore {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            path,
            save_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Load the club. A missing file (or no path) gives an empty club.
    pub fn load(&self) -> Result<Club, StoreError> {
        let Some(path) = &self.path else {
            return Ok(Club::new());
        };
        match std::fs::read_to_string(path) {
            Ok(text) => {
                let club: Club = serde_json::from_str(&text)?;
                log::info!(
                    "Loaded snapshot {}: {} players, {} matches",
                    path.display(),
                    club.players.len(),
                    club.matches.len()
                );
                Ok(club)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No snapshot at {}, starting empty", path.display());
                Ok(Club::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn encode(club: &Club) -> Result<Vec<u8>, StoreError> {
        Ok(serde_json::to_vec_pretty(club)?)
    }

    /// Take the save lock, call `snapshot` for the bytes, then write them.
    ///
    /// `snapshot` runs while the lock is held, so a save that starts after a change always
    /// encodes that change and can never be overwritten by an older encoding.
    pub async fn save<F>(&self, snapshot: F) -> Result<(), StoreError>
    where
        F: FnOnce() -> Result<Vec<u8>, StoreError>,
    {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let _guard = self.save_lock.lock().await;
        let bytes = snapshot()?;
        replace_file(path, &bytes).await
    }

    /// Write already encoded bytes under the save lock.
    pub async fn write(&self, bytes: Vec<u8>) -> Result<(), StoreError> {
        self.save(move || Ok(bytes)).await
    }
}

/// Replace `path` with `bytes` via a temporary file next to it.
async fn replace_file(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, bytes).await?;
    tokio::fs::rename(&tmp, path).await?;
    log::debug!("Saved snapshot {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}
