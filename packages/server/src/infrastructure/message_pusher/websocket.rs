//! WebSocket を使った RoomPusher 実装
//!
//! ## 責務
//!
//! - ルームごとの接続と、その WebSocket sender の管理
//! - ルーム内の全接続へのメッセージ配送
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`src/ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、配送に使用します。
//!
//! 配送に失敗した sender は切断済みの接続とみなし、配送の過程で
//! レジストリから取り除きます。空になったルームも破棄します。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, PusherChannel, RoomId, RoomPusher};

/// WebSocket を使った RoomPusher 実装
///
/// ## フィールド
///
/// - `rooms`: ルーム ID → (接続 ID → sender) の 2 段マップ
pub struct WebSocketRoomPusher {
    rooms: Mutex<HashMap<String, HashMap<ConnectionId, PusherChannel>>>,
}

impl WebSocketRoomPusher {
    /// 新しい WebSocketRoomPusher を作成
    pub fn new() -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for WebSocketRoomPusher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoomPusher for WebSocketRoomPusher {
    async fn register_connection(
        &self,
        room_id: &RoomId,
        connection_id: ConnectionId,
        sender: PusherChannel,
    ) {
        let mut rooms = self.rooms.lock().await;
        rooms
            .entry(room_id.as_str().to_string())
            .or_default()
            .insert(connection_id.clone(), sender);
        tracing::debug!(
            "Connection {} registered to room '{}'",
            connection_id,
            room_id.as_str()
        );
    }

    async fn unregister_connection(&self, room_id: &RoomId, connection_id: &ConnectionId) {
        let mut rooms = self.rooms.lock().await;
        if let Some(connections) = rooms.get_mut(room_id.as_str()) {
            connections.remove(connection_id);
            if connections.is_empty() {
                rooms.remove(room_id.as_str());
            }
        }
        tracing::debug!(
            "Connection {} unregistered from room '{}'",
            connection_id,
            room_id.as_str()
        );
    }

    async fn broadcast_to_room(&self, room_id: &RoomId, content: &str) -> usize {
        let mut rooms = self.rooms.lock().await;

        let Some(connections) = rooms.get_mut(room_id.as_str()) else {
            return 0;
        };

        let mut delivered = 0;
        let mut dead: Vec<ConnectionId> = Vec::new();

        for (connection_id, sender) in connections.iter() {
            if sender.send(content.to_string()).is_ok() {
                delivered += 1;
            } else {
                tracing::warn!(
                    "Connection {} in room '{}' is gone; pruning",
                    connection_id,
                    room_id.as_str()
                );
                dead.push(connection_id.clone());
            }
        }

        for connection_id in dead {
            connections.remove(&connection_id);
        }
        if connections.is_empty() {
            rooms.remove(room_id.as_str());
        }

        delivered
    }

    async fn connection_count(&self, room_id: &RoomId) -> usize {
        let rooms = self.rooms.lock().await;
        rooms
            .get(room_id.as_str())
            .map(|connections| connections.len())
            .unwrap_or(0)
    }
}
