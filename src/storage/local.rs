//! Local filesystem snapshot store.
//!
//! Writes go through a temp file and a rename so a crash mid-write leaves
//! the previous baseline readable.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::{Availability, ProductAvailability};
use crate::storage::SnapshotStore;

/// Entry of the list layout written by earlier deployments.
#[derive(Debug, Deserialize)]
struct LegacyEntry {
    product_name: String,
    availability: Availability,
}

/// Accepted on-disk layouts.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StateFile {
    Map(ProductAvailability),
    List(Vec<LegacyEntry>),
}

impl From<StateFile> for ProductAvailability {
    fn from(file: StateFile) -> Self {
        match file {
            StateFile::Map(snapshot) => snapshot,
            StateFile::List(entries) => entries
                .into_iter()
                .map(|e| (e.product_name, e.availability))
                .collect(),
        }
    }
}

/// JSON file snapshot store.
#[derive(Debug, Clone)]
pub struct LocalSnapshotStore {
    path: PathBuf,
}

impl LocalSnapshotStore {
    /// Create a store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, bytes: &[u8]) -> Result<()> {
        self.ensure_dir().await?;

        let tmp = self.path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(&self) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }
}

#[async_trait]
impl SnapshotStore for LocalSnapshotStore {
    async fn load(&self) -> Result<ProductAvailability> {
        let Some(bytes) = self.read_bytes().await? else {
            log::info!("No baseline at {}, starting empty", self.path.display());
            return Ok(ProductAvailability::new());
        };

        let file: StateFile = serde_json::from_slice(&bytes)
            .map_err(|e| AppError::corrupt_state(&self.path, e))?;
        if matches!(file, StateFile::List(_)) {
            log::info!(
                "Baseline {} uses the list layout; it will be rewritten as a map",
                self.path.display()
            );
        }
        Ok(file.into())
    }

    async fn save(&self, snapshot: &ProductAvailability) -> Result<()> {
        let mut bytes = serde_json::to_vec_pretty(snapshot)?;
        bytes.push(b'\n');
        self.write_bytes(&bytes).await?;
        log::debug!(
            "Saved {} products to {}",
            snapshot.len(),
            self.path.display()
        );
        Ok(())
    }
}
