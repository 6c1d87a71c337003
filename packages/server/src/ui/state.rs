//! Server state shared across handlers.

use std::sync::Arc;

use crate::usecase::{
    JoinRoomUseCase, LeaveRoomUseCase, RecordMessageUseCase, RelayMessageUseCase,
    ResolveRoomUseCase, RoomHistoryUseCase,
};

/// Shared application state
pub struct AppState {
    /// ResolveRoomUseCase（ルーム解決のユースケース）
    pub resolve_room_usecase: Arc<ResolveRoomUseCase>,
    /// JoinRoomUseCase（ルーム参加のユースケース）
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    /// LeaveRoomUseCase（ルーム退出のユースケース）
    pub leave_room_usecase: Arc<LeaveRoomUseCase>,
    /// RelayMessageUseCase（メッセージリレーのユースケース）
    pub relay_message_usecase: Arc<RelayMessageUseCase>,
    /// RecordMessageUseCase（メッセージ記録のユースケース）
    pub record_message_usecase: Arc<RecordMessageUseCase>,
    /// RoomHistoryUseCase（ルーム履歴取得のユースケース）
    pub room_history_usecase: Arc<RoomHistoryUseCase>,
}
