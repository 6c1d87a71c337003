//! Room resolution for two-party conversations.
//!
//! The room service is the sole authority for room assignment. A surface asks
//! it once per conversation; a fresh "start chat" action always re-resolves.

use async_trait::async_trait;
use serde::Deserialize;

use super::error::ChatError;

/// Opaque identifier of a two-party conversation room.
///
/// Obtained from the room service, or composed directly by the
/// dashboard-initiated flow that already knows both party ids. Both forms
/// address the same room-scoped WebSocket endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomId(String);

impl RoomId {
    /// Wrap a resolved room id
    pub fn new(id: String) -> Self {
        Self(id)
    }

    /// Compose the room id from both party ids (dashboard flow)
    pub fn compose(patient_id: &str, helper_id: &str) -> Self {
        Self(format!("{}_{}", patient_id, helper_id))
    }

    /// Get the room id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Successful room resolution: the room id and the canonical helper id
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRoom {
    pub room_id: RoomId,
    pub helper_id: String,
}

/// Maps a counterpart to the stable room for that conversation
#[async_trait]
pub trait RoomResolver: Send + Sync {
    /// Resolve the room for a conversation with `counterpart_id`.
    ///
    /// Any failure (network, non-2xx status, explicit error in the response)
    /// is reported as [`ChatError::ResolutionFailed`]; no retry is attempted.
    async fn resolve_room(&self, counterpart_id: &str) -> Result<ResolvedRoom, ChatError>;
}

/// Response body of the room service.
///
/// The service reports failures in-band through the `error` field rather than
/// through the HTTP status.
#[derive(Debug, Deserialize)]
struct RoomResponseDto {
    #[serde(default)]
    room_id: Option<String>,
    #[serde(default)]
    helper_id: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// HTTP-backed room resolver (`GET {base}/chat/room/{counterpartId}`)
pub struct HttpRoomResolver {
    base_url: String,
    http: reqwest::Client,
}

impl HttpRoomResolver {
    /// Create a resolver against the given API base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: reqwest::Client::new(),
        }
    }

    fn room_url(&self, counterpart_id: &str) -> String {
        format!(
            "{}/chat/room/{}",
            self.base_url.trim_end_matches('/'),
            counterpart_id
        )
    }
}

#[async_trait]
impl RoomResolver for HttpRoomResolver {
    async fn resolve_room(&self, counterpart_id: &str) -> Result<ResolvedRoom, ChatError> {
        let url = self.room_url(counterpart_id);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ChatError::ResolutionFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ChatError::ResolutionFailed(format!(
                "room service returned HTTP {}",
                response.status()
            )));
        }

        let body: RoomResponseDto = response
            .json()
            .await
            .map_err(|e| ChatError::ResolutionFailed(e.to_string()))?;

        if let Some(error) = body.error {
            return Err(ChatError::ResolutionFailed(error));
        }

        match (body.room_id, body.helper_id) {
            (Some(room_id), Some(helper_id)) => Ok(ResolvedRoom {
                room_id: RoomId::new(room_id),
                helper_id,
            }),
            _ => Err(ChatError::ResolutionFailed(
                "room id missing from response".to_string(),
            )),
        }
    }
}
