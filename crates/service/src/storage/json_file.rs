use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::errors::ServiceError;
use crate::hospitals::Hospital;
use crate::storage::HospitalStorage;

/// JSON file-backed storage.
///
/// Persists the collection as a pretty-printed JSON array, read in full and
/// rewritten in full on every save. Intended for lightweight state where a
/// database is overkill.
pub struct JsonFileStorage {
    file_path: PathBuf,
}

impl JsonFileStorage {
    /// Initialize the storage from a path. Creates the parent directory and
    /// an empty-array file if missing.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Self, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await.ok();
        }
        if fs::metadata(&file_path).await.is_err() {
            write_pretty(&file_path, &[]).await?;
        }
        Ok(Self { file_path })
    }
}

async fn write_pretty(path: &Path, hospitals: &[Hospital]) -> Result<(), ServiceError> {
    let data =
        serde_json::to_vec_pretty(hospitals).map_err(|e| ServiceError::Storage(e.to_string()))?;
    fs::write(path, data)
        .await
        .map_err(|e| ServiceError::Storage(e.to_string()))
}

#[async_trait]
impl HospitalStorage for JsonFileStorage {
    async fn load(&self) -> Result<Vec<Hospital>, ServiceError> {
        let bytes = fs::read(&self.file_path)
            .await
            .map_err(|e| ServiceError::Storage(e.to_string()))?;
        // Malformed content is an error, not an empty collection; there is
        // no repair path for corrupted storage.
        serde_json::from_slice(&bytes).map_err(|e| ServiceError::Storage(e.to_string()))
    }

    async fn save(&self, hospitals: &[Hospital]) -> Result<(), ServiceError> {
        write_pretty(&self.file_path, hospitals).await
    }
}
