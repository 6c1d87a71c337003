//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    domain::RoomId,
    infrastructure::dto::http::{RoomResponseDto, StoredMessageDto},
    ui::state::AppState,
};

/// Room lookup for a patient.
///
/// Failures are reported in-band through the `error` field of a 200 response;
/// the web client branches on its presence rather than on the status code.
pub async fn get_chat_room(
    State(state): State<Arc<AppState>>,
    Path(patient_id): Path<String>,
) -> Json<RoomResponseDto> {
    match state.resolve_room_usecase.execute(&patient_id).await {
        Ok(resolved) => Json(RoomResponseDto::found(
            resolved.room_id.into_string(),
            resolved.helper_id,
        )),
        Err(e) => {
            tracing::warn!("Room resolution failed for patient '{}': {}", patient_id, e);
            Json(RoomResponseDto::error(e.to_string()))
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get the recorded message history of a room
pub async fn get_room_messages(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<Vec<StoredMessageDto>>, StatusCode> {
    let room_id = RoomId::new(room_id).map_err(|_| StatusCode::BAD_REQUEST)?;

    let messages = state.room_history_usecase.execute(&room_id).await;

    // Domain Model から DTO への変換
    let message_dtos: Vec<StoredMessageDto> =
        messages.into_iter().map(StoredMessageDto::from).collect();

    Ok(Json(message_dtos))
}
