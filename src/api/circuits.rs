//! Circuit API endpoints.
//!
//! Failure statuses are fixed per route: create and update answer 400,
//! list and delete answer 500. The error code in the body names the cause.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use super::{bad_body, fail, ApiResult};
use crate::models::{Circuit, CreateCircuitRequest, UpdateCircuitRequest};
use crate::AppState;

/// GET /api/circuits - List all circuits.
pub async fn list_circuits(State(state): State<AppState>) -> ApiResult<Json<Vec<Circuit>>> {
    match state.repo.list_circuits().await {
        Ok(circuits) => Ok(Json(circuits)),
        Err(e) => Err(fail(e, StatusCode::INTERNAL_SERVER_ERROR)),
    }
}

/// POST /api/circuits - Create a new circuit.
pub async fn create_circuit(
    State(state): State<AppState>,
    body: Result<Json<CreateCircuitRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Circuit>)> {
    let Json(request) = body.map_err(|r| fail(bad_body(r), StatusCode::BAD_REQUEST))?;

    let new = request
        .validate()
        .map_err(|e| fail(e, StatusCode::BAD_REQUEST))?;

    match state.repo.create_circuit(&new).await {
        Ok(circuit) => {
            tracing::info!(circuit_id = %circuit.id, name = %circuit.name, "Created circuit");
            Ok((StatusCode::CREATED, Json(circuit)))
        }
        Err(e) => Err(fail(e, StatusCode::BAD_REQUEST)),
    }
}

/// PUT /api/circuits/:id - Update a circuit.
pub async fn update_circuit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<UpdateCircuitRequest>, JsonRejection>,
) -> ApiResult<Json<Circuit>> {
    let Json(request) = body.map_err(|r| fail(bad_body(r), StatusCode::BAD_REQUEST))?;

    let changes = request
        .validate()
        .map_err(|e| fail(e, StatusCode::BAD_REQUEST))?;

    match state.repo.update_circuit(&id, &changes).await {
        Ok(circuit) => {
            tracing::info!(circuit_id = %id, "Updated circuit");
            Ok(Json(circuit))
        }
        Err(e) => Err(fail(e, StatusCode::BAD_REQUEST)),
    }
}

/// DELETE /api/circuits/:id - Delete a circuit.
pub async fn delete_circuit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    match state.repo.delete_circuit(&id).await {
        Ok(()) => {
            tracing::info!(circuit_id = %id, "Deleted circuit");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(e) => Err(fail(e, StatusCode::INTERNAL_SERVER_ERROR)),
    }
}
