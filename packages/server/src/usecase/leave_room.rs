//! UseCase: ルーム退出処理

use std::sync::Arc;

use crate::domain::{ConnectionId, RoomId, RoomPusher};

/// ルーム退出のユースケース
pub struct LeaveRoomUseCase {
    /// RoomPusher（メッセージ配送の抽象化）
    pusher: Arc<dyn RoomPusher>,
}

impl LeaveRoomUseCase {
    /// 新しい LeaveRoomUseCase を作成
    pub fn new(pusher: Arc<dyn RoomPusher>) -> Self {
        Self { pusher }
    }

    /// ルーム退出を実行（登録されていない接続の退出も安全に処理される）
    pub async fn execute(&self, room_id: &RoomId, connection_id: &ConnectionId) {
        self.pusher
            .unregister_connection(room_id, connection_id)
            .await;
    }
}
