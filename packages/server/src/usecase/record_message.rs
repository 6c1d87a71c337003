//! UseCase: メッセージ記録処理
//!
//! リレー済みのメッセージを履歴ストアに追記する。記録はリレーの後段で
//! 行われるベストエフォート処理で、失敗してもリレー自体は成立している。

use std::sync::Arc;

use sahaya_shared::time::get_ist_timestamp;

use crate::domain::{MessageStore, MessageText, RoomId, StoredMessage, Timestamp};

use super::error::RecordMessageError;

/// メッセージ記録のユースケース
pub struct RecordMessageUseCase {
    /// MessageStore（履歴ストアの抽象化）
    store: Arc<dyn MessageStore>,
}

impl RecordMessageUseCase {
    /// 新しい RecordMessageUseCase を作成
    pub fn new(store: Arc<dyn MessageStore>) -> Self {
        Self { store }
    }

    /// メッセージ記録を実行
    ///
    /// # Arguments
    ///
    /// * `room_id` - 発言のあったルームの ID（複合形式）
    /// * `sender` - ワイヤ上の sender タグ
    /// * `text` - メッセージ本文
    pub async fn execute(
        &self,
        room_id: &RoomId,
        sender: String,
        text: MessageText,
    ) -> Result<(), RecordMessageError> {
        let Some((patient_id, helper_id)) = room_id.split() else {
            return Err(RecordMessageError::MalformedRoomId(
                room_id.as_str().to_string(),
            ));
        };

        let message = StoredMessage::new(
            room_id.clone(),
            patient_id.to_string(),
            helper_id.to_string(),
            sender,
            text,
            Timestamp::new(get_ist_timestamp()),
        );

        self.store
            .append(message)
            .await
            .map_err(|e| RecordMessageError::Store(e.to_string()))
    }
}
