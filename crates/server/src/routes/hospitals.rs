use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use service::errors::ServiceError;
use service::hospitals::{Hospital, HospitalInput};

use crate::errors::JsonApiError;
use crate::state::ServerState;

/// List all hospital records.
pub async fn list_hospitals(
    State(state): State<ServerState>,
) -> Result<Json<Vec<Hospital>>, JsonApiError> {
    let store = state.hospitals.clone();
    store.list().await.map(Json).map_err(|e| {
        JsonApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error",
            Some(e.to_string()),
        )
    })
}

/// Create a hospital record.
pub async fn create_hospital(
    State(state): State<ServerState>,
    Json(input): Json<HospitalInput>,
) -> Result<(StatusCode, Json<Hospital>), JsonApiError> {
    let store = state.hospitals.clone();
    store
        .create(input)
        .await
        .map(|rec| (StatusCode::CREATED, Json(rec)))
        .map_err(|e| match e {
            ServiceError::Validation(msg) => {
                JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", Some(msg))
            }
            _ => JsonApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
                Some(e.to_string()),
            ),
        })
}

/// Update the hospital record with the given id.
pub async fn update_hospital(
    State(state): State<ServerState>,
    Path(id): Path<u64>,
    Json(input): Json<HospitalInput>,
) -> Result<Json<Hospital>, JsonApiError> {
    let store = state.hospitals.clone();
    store.update(id, input).await.map(Json).map_err(|e| match e {
        ServiceError::Validation(msg) => {
            JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", Some(msg))
        }
        ServiceError::NotFound(_) => {
            JsonApiError::new(StatusCode::NOT_FOUND, "Not Found", Some(e.to_string()))
        }
        _ => JsonApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error",
            Some(e.to_string()),
        ),
    })
}

/// Delete the hospital record with the given id.
pub async fn delete_hospital(
    State(state): State<ServerState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, JsonApiError> {
    let store = state.hospitals.clone();
    match store.delete(id).await {
        Ok(true) => Ok(StatusCode::NO_CONTENT),
        Ok(false) => Err(JsonApiError::new(
            StatusCode::NOT_FOUND,
            "Not Found",
            Some("hospital not found".into()),
        )),
        Err(e) => Err(JsonApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error",
            Some(e.to_string()),
        )),
    }
}
