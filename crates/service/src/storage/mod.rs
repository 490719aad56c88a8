//! Storage port for the hospital collection.
//!
//! Implementations persist the full ordered collection as one unit: `load`
//! reads everything, `save` rewrites everything. No lock is held across a
//! load/save pair, so two concurrent mutations can interleave their read and
//! write phases; callers own the read-modify-write cycle.

use async_trait::async_trait;

use crate::errors::ServiceError;
use crate::hospitals::Hospital;

pub mod json_file;
pub mod memory;

/// Load/save abstraction over the persisted hospital collection.
#[async_trait]
pub trait HospitalStorage: Send + Sync {
    /// Read the full collection in insertion order.
    async fn load(&self) -> Result<Vec<Hospital>, ServiceError>;
    /// Replace the full collection.
    async fn save(&self, hospitals: &[Hospital]) -> Result<(), ServiceError>;
}
