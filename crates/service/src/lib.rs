//! Service layer providing CRUD operations over the hospital collection.
//! - Separates business logic from the HTTP layer.
//! - Persists through a swappable storage port.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod hospitals;
pub mod storage;
