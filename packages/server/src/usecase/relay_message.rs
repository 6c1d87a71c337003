//! UseCase: メッセージリレー処理
//!
//! 受信したフレームをルーム内の全ての接続へそのまま配送する。送信元の
//! 接続も配送対象に含まれる（クライアント側が correlation id で自分の
//! フレームを識別する前提の、素朴なブロードキャスト）。

use std::sync::Arc;

use crate::domain::{RoomId, RoomPusher};

/// メッセージリレーのユースケース
pub struct RelayMessageUseCase {
    /// RoomPusher（メッセージ配送の抽象化）
    pusher: Arc<dyn RoomPusher>,
}

impl RelayMessageUseCase {
    /// 新しい RelayMessageUseCase を作成
    pub fn new(pusher: Arc<dyn RoomPusher>) -> Self {
        Self { pusher }
    }

    /// リレーを実行し、配送できた接続数を返す
    ///
    /// # Arguments
    ///
    /// * `room_id` - 配送先ルームの ID
    /// * `raw_frame` - 受信したままのフレーム（再シリアライズしない）
    pub async fn execute(&self, room_id: &RoomId, raw_frame: &str) -> usize {
        self.pusher.broadcast_to_room(room_id, raw_frame).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ConnectionId, RoomPusher};
    use crate::infrastructure::message_pusher::WebSocketRoomPusher;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_relay_reaches_every_connection_including_the_sender() {
        // テスト項目: リレーが送信元を含むルーム内の全接続に届く
        // given (前提条件): 同じルームに 2 接続（送信側と相手側）
        let pusher = Arc::new(WebSocketRoomPusher::new());
        let usecase = RelayMessageUseCase::new(pusher.clone());
        let room_id = RoomId::compose("p-1", "h-9");
        let (sender_tx, mut sender_rx) = mpsc::unbounded_channel();
        let (peer_tx, mut peer_rx) = mpsc::unbounded_channel();
        pusher
            .register_connection(&room_id, ConnectionId::generate(), sender_tx)
            .await;
        pusher
            .register_connection(&room_id, ConnectionId::generate(), peer_tx)
            .await;

        // when (操作):
        let frame = r#"{"sender":"helper","text":"hi","clientId":"100"}"#;
        let delivered = usecase.execute(&room_id, frame).await;

        // then (期待する結果): 送信元にもエコーされる
        assert_eq!(delivered, 2);
        assert_eq!(sender_rx.recv().await.as_deref(), Some(frame));
        assert_eq!(peer_rx.recv().await.as_deref(), Some(frame));
    }

    #[tokio::test]
    async fn test_relay_to_an_unknown_room_delivers_nothing() {
        // テスト項目: 接続のないルームへのリレーは何も配送しない
        // given (前提条件):
        let pusher = Arc::new(WebSocketRoomPusher::new());
        let usecase = RelayMessageUseCase::new(pusher);
        let room_id = RoomId::compose("p-1", "h-9");

        // when (操作):
        let delivered = usecase.execute(&room_id, r#"{"sender":"patient","text":"hi"}"#).await;

        // then (期待する結果):
        assert_eq!(delivered, 0);
    }
}
