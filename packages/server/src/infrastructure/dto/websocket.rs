//! WebSocket frame DTOs.

use serde::{Deserialize, Serialize};

/// Flat chat frame as carried on the wire.
///
/// `sender` is one of `patient` / `helper`; `clientId` is an opaque
/// correlation value the sending client uses to recognize its own echoed
/// frames. Unknown extra fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatFrameDto {
    pub sender: String,
    pub text: String,
    #[serde(rename = "clientId", default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
}
