use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::ServiceError;
use crate::hospitals::Hospital;
use crate::storage::HospitalStorage;

/// In-memory storage, mainly for tests and embedding.
///
/// The lock guards only the vector itself and is released between `load`
/// and `save`, matching the file-backed store's non-atomic
/// read-modify-write cycle.
#[derive(Default)]
pub struct MemoryStorage {
    inner: RwLock<Vec<Hospital>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HospitalStorage for MemoryStorage {
    async fn load(&self) -> Result<Vec<Hospital>, ServiceError> {
        Ok(self.inner.read().await.clone())
    }

    async fn save(&self, hospitals: &[Hospital]) -> Result<(), ServiceError> {
        *self.inner.write().await = hospitals.to_vec();
        Ok(())
    }
}
