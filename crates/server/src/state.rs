use std::sync::Arc;

use service::hospitals::HospitalStore;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct ServerState {
    pub hospitals: Arc<HospitalStore>,
}
