use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;
use crate::storage::HospitalStorage;

/// Hospital record as persisted and served.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Hospital {
    pub id: u64,
    pub name: String,
    pub patient_count: i64,
    pub location: String,
}

/// Create/update input: no id, which the server assigns.
///
/// Fields are optional so that an absent key and an explicit `null` both
/// reach the required-field check instead of failing JSON extraction.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HospitalInput {
    pub name: Option<String>,
    pub patient_count: Option<i64>,
    pub location: Option<String>,
}

impl HospitalInput {
    /// Required-field check. A field counts as missing when it is absent,
    /// null, an empty string, or a zero patient count. Whitespace-only
    /// strings and negative counts pass. Returns the unwrapped fields.
    pub fn into_validated(self) -> Result<(String, i64, String), ServiceError> {
        match (self.name, self.patient_count, self.location) {
            (Some(name), Some(count), Some(location))
                if !name.is_empty() && count != 0 && !location.is_empty() =>
            {
                Ok((name, count, location))
            }
            _ => Err(ServiceError::Validation("missing hospital information".into())),
        }
    }
}

/// CRUD facade over the storage port.
///
/// Every call loads the collection fresh from storage and, for mutations,
/// writes it back in full before returning.
pub struct HospitalStore {
    storage: Arc<dyn HospitalStorage>,
}

impl HospitalStore {
    pub fn new(storage: Arc<dyn HospitalStorage>) -> Arc<Self> {
        Arc::new(Self { storage })
    }

    /// List all hospitals in insertion order.
    pub async fn list(&self) -> Result<Vec<Hospital>, ServiceError> {
        self.storage.load().await
    }

    /// Create a new hospital, appended to the end of the collection.
    ///
    /// The id is one past the last record's id, or 1 for an empty
    /// collection. Deleting the tail record therefore frees its id for the
    /// next create.
    pub async fn create(&self, input: HospitalInput) -> Result<Hospital, ServiceError> {
        let (name, patient_count, location) = input.into_validated()?;
        let mut hospitals = self.storage.load().await?;
        let id = hospitals.last().map_or(1, |h| h.id + 1);
        let rec = Hospital { id, name, patient_count, location };
        hospitals.push(rec.clone());
        self.storage.save(&hospitals).await?;
        Ok(rec)
    }

    /// Replace the record with the given id in place, keeping its position.
    pub async fn update(&self, id: u64, input: HospitalInput) -> Result<Hospital, ServiceError> {
        let (name, patient_count, location) = input.into_validated()?;
        let mut hospitals = self.storage.load().await?;
        let slot = hospitals
            .iter_mut()
            .find(|h| h.id == id)
            .ok_or_else(|| ServiceError::not_found("hospital"))?;
        *slot = Hospital { id, name, patient_count, location };
        let rec = slot.clone();
        self.storage.save(&hospitals).await?;
        Ok(rec)
    }

    /// Remove the record with the given id; returns whether it existed.
    /// Nothing is written when the id has no match.
    pub async fn delete(&self, id: u64) -> Result<bool, ServiceError> {
        let mut hospitals = self.storage.load().await?;
        let Some(pos) = hospitals.iter().position(|h| h.id == id) else {
            return Ok(false);
        };
        hospitals.remove(pos);
        self.storage.save(&hospitals).await?;
        Ok(true)
    }
}
