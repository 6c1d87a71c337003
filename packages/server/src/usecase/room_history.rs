//! UseCase: ルーム履歴取得処理

use std::sync::Arc;

use crate::domain::{MessageStore, RoomId, StoredMessage};

/// ルーム履歴取得のユースケース
pub struct RoomHistoryUseCase {
    /// MessageStore（履歴ストアの抽象化）
    store: Arc<dyn MessageStore>,
}

impl RoomHistoryUseCase {
    /// 新しい RoomHistoryUseCase を作成
    pub fn new(store: Arc<dyn MessageStore>) -> Self {
        Self { store }
    }

    /// ルームのメッセージ履歴を古い順に取得
    pub async fn execute(&self, room_id: &RoomId) -> Vec<StoredMessage> {
        self.store.messages_for_room(room_id).await
    }
}
