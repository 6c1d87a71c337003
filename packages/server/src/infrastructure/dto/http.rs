//! HTTP API response DTOs.

use serde::Serialize;

/// Response of the room-resolution endpoint.
///
/// Failures are reported in-band through the `error` field (the web client
/// branches on its presence), so both shapes share one DTO.
#[derive(Debug, Serialize)]
pub struct RoomResponseDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub helper_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RoomResponseDto {
    /// Success shape: room id and canonical helper id
    pub fn found(room_id: String, helper_id: String) -> Self {
        Self {
            room_id: Some(room_id),
            helper_id: Some(helper_id),
            error: None,
        }
    }

    /// In-band error shape
    pub fn error(message: String) -> Self {
        Self {
            room_id: None,
            helper_id: None,
            error: Some(message),
        }
    }
}

/// One message of a room's history
#[derive(Debug, Serialize)]
pub struct StoredMessageDto {
    pub room_id: String,
    pub sender: String,
    pub text: String,
    pub sent_at: String,
}
