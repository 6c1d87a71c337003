//! ドメイン層のエンティティ

use super::value_object::{MessageText, RoomId, Timestamp};

/// リレー済みチャットメッセージの履歴レコード
///
/// ルーム ID から分解した両者の ID を列として持つ。sender タグは
/// ワイヤ上の文字列をそのまま保持する（表示側の正規化はクライアントの責務）。
#[derive(Debug, Clone, PartialEq)]
pub struct StoredMessage {
    pub room_id: RoomId,
    pub patient_id: String,
    pub helper_id: String,
    pub sender: String,
    pub text: MessageText,
    pub sent_at: Timestamp,
}

impl StoredMessage {
    /// 新しい StoredMessage を作成
    pub fn new(
        room_id: RoomId,
        patient_id: String,
        helper_id: String,
        sender: String,
        text: MessageText,
        sent_at: Timestamp,
    ) -> Self {
        Self {
            room_id,
            patient_id,
            helper_id,
            sender,
            text,
            sent_at,
        }
    }
}
