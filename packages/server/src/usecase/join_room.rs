//! UseCase: ルーム参加処理
//!
//! ルームへの WebSocket 接続を配送先として登録する。重複接続の拒否は
//! 行わない（同じ参加者が複数端末から同じルームに入ることを許す）。

use std::sync::Arc;

use crate::domain::{ConnectionId, PusherChannel, RoomId, RoomPusher};

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    /// RoomPusher（メッセージ配送の抽象化）
    pusher: Arc<dyn RoomPusher>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(pusher: Arc<dyn RoomPusher>) -> Self {
        Self { pusher }
    }

    /// ルーム参加を実行し、払い出した接続 ID を返す
    ///
    /// # Arguments
    ///
    /// * `room_id` - 参加先ルームの ID
    /// * `sender` - この接続へのメッセージ送信用チャンネル
    pub async fn execute(&self, room_id: &RoomId, sender: PusherChannel) -> ConnectionId {
        let connection_id = ConnectionId::generate();
        self.pusher
            .register_connection(room_id, connection_id.clone(), sender)
            .await;
        connection_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::message_pusher::WebSocketRoomPusher;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_join_registers_the_connection() {
        // テスト項目: 参加した接続がルームの配送先に登録される
        // given (前提条件):
        let pusher = Arc::new(WebSocketRoomPusher::new());
        let usecase = JoinRoomUseCase::new(pusher.clone());
        let room_id = RoomId::compose("p-1", "h-9");
        let (tx, _rx) = mpsc::unbounded_channel();

        // when (操作):
        let _connection_id = usecase.execute(&room_id, tx).await;

        // then (期待する結果):
        assert_eq!(pusher.connection_count(&room_id).await, 1);
    }

    #[tokio::test]
    async fn test_multiple_connections_may_join_the_same_room() {
        // テスト項目: 同じルームに複数の接続が参加できる
        // given (前提条件):
        let pusher = Arc::new(WebSocketRoomPusher::new());
        let usecase = JoinRoomUseCase::new(pusher.clone());
        let room_id = RoomId::compose("p-1", "h-9");
        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();

        // when (操作):
        let first = usecase.execute(&room_id, tx1).await;
        let second = usecase.execute(&room_id, tx2).await;

        // then (期待する結果): 接続 ID は重複しない
        assert_ne!(first, second);
        assert_eq!(pusher.connection_count(&room_id).await, 2);
    }
}
