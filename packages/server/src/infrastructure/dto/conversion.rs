//! Conversion logic between DTOs and domain entities.

use sahaya_shared::time::timestamp_to_ist_rfc3339;

use crate::domain::StoredMessage;
use crate::infrastructure::dto::http::StoredMessageDto;

// ========================================
// Domain Entity → DTO
// ========================================

impl From<StoredMessage> for StoredMessageDto {
    fn from(model: StoredMessage) -> Self {
        Self {
            room_id: model.room_id.into_string(),
            sender: model.sender,
            text: model.text.into_string(),
            sent_at: timestamp_to_ist_rfc3339(model.sent_at.value()),
        }
    }
}
