//! Snapshot persistence for the whole catalogue.
//!
//! The catalogue is saved as one versioned JSON document carrying a
//! SHA-256 checksum of its works, and loaded back with both checked.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use fs2::FileExt;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tokio::fs;

use super::catalogue::Catalogue;
use crate::domain::Work;
use crate::error::{LibraryError, LibraryResult};

/// Snapshot format version
pub const SNAPSHOT_VERSION: u32 = 1;

/// On-disk envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Snapshot {
    version: u32,
    checksum: String,
    next_id: i64,
    works: Vec<Work>,
}

/// Hex SHA-256 of the serialized works
pub fn checksum(works: &[Work]) -> LibraryResult<String> {
    let payload = serde_json::to_vec(works)?;
    let mut hasher = Sha256::new();
    hasher.update(&payload);
    Ok(hex::encode(hasher.finalize()))
}

/// Save the catalogue, replacing any previous snapshot at `path`
pub async fn save(catalogue: &Catalogue, path: &Path) -> LibraryResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let snapshot = Snapshot {
        version: SNAPSHOT_VERSION,
        checksum: checksum(catalogue.works())?,
        next_id: catalogue.next_id(),
        works: catalogue.works().to_vec(),
    };
    let content = serde_json::to_string_pretty(&snapshot)?;

    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(false)
        .open(path)
        .map_err(|e| LibraryError::FileOperation {
            path: path.to_path_buf(),
            message: format!("Failed to open snapshot: {e}"),
        })?;

    file.lock_exclusive()?;
    file.set_len(0)?;
    file.write_all(content.as_bytes())?;
    file.flush()?;

    // Lock is released when file is dropped
    tracing::debug!(path = %path.display(), works = catalogue.len(), "Catalogue saved");
    Ok(())
}

/// Load a catalogue snapshot; a missing file yields an empty catalogue
pub async fn load(path: &Path) -> LibraryResult<Catalogue> {
    if !path.exists() {
        return Ok(Catalogue::new());
    }

    let content = fs::read_to_string(path)
        .await
        .map_err(|e| LibraryError::FileOperation {
            path: path.to_path_buf(),
            message: format!("Failed to read snapshot: {e}"),
        })?;

    let snapshot: Snapshot = serde_json::from_str(&content)?;

    if snapshot.version != SNAPSHOT_VERSION {
        return Err(LibraryError::Snapshot {
            message: format!(
                "unsupported version {} (expected {})",
                snapshot.version, SNAPSHOT_VERSION
            ),
        });
    }

    let actual = checksum(&snapshot.works)?;
    if actual != snapshot.checksum {
        return Err(LibraryError::Snapshot {
            message: format!(
                "checksum mismatch in {}: stored {}, computed {}",
                path.display(),
                snapshot.checksum,
                actual
            ),
        });
    }

    Ok(Catalogue::from_parts(snapshot.works, snapshot.next_id))
}
