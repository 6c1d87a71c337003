//! RoomPusher trait 定義
//!
//! ルーム内の接続へのメッセージ配送を抽象化します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use std::fmt;

use async_trait::async_trait;
use tokio::sync::mpsc;
use uuid::Uuid;

use super::value_object::RoomId;

/// 接続ごとのメッセージ送信チャンネル
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// ルーム内の 1 接続を識別する ID
///
/// 同じ参加者が複数の端末から同じルームに接続することがあるため、
/// 参加者 ID ではなく接続単位で識別する。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// 新しい接続 ID を生成
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// ルーム単位のメッセージ配送インターフェース
#[async_trait]
pub trait RoomPusher: Send + Sync {
    /// ルームに接続を登録
    async fn register_connection(
        &self,
        room_id: &RoomId,
        connection_id: ConnectionId,
        sender: PusherChannel,
    );

    /// ルームから接続を登録解除（空になったルームは破棄される）
    async fn unregister_connection(&self, room_id: &RoomId, connection_id: &ConnectionId);

    /// ルーム内の全ての接続へ配送し、配送できた件数を返す
    ///
    /// 送信元の接続も配送対象に含まれる。クライアントは correlation id で
    /// 自分のフレームを見分ける前提。
    async fn broadcast_to_room(&self, room_id: &RoomId, content: &str) -> usize;

    /// ルーム内の接続数を取得
    async fn connection_count(&self, room_id: &RoomId) -> usize;
}
