//! UseCase: ルーム解決処理
//!
//! 患者 ID から担当ヘルパーを引き、両者が共有する複合ルーム ID を払い出す。
//! このサーバーがルーム割り当ての唯一の authority であり、クライアントは
//! 会話ごとに一度だけ問い合わせる。

use std::sync::Arc;

use crate::domain::{AssignmentDirectory, RoomId};

use super::error::ResolveRoomError;

/// ルーム解決の結果
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRoom {
    pub room_id: RoomId,
    pub helper_id: String,
}

/// ルーム解決のユースケース
pub struct ResolveRoomUseCase {
    /// AssignmentDirectory（割り当て参照の抽象化）
    directory: Arc<dyn AssignmentDirectory>,
}

impl ResolveRoomUseCase {
    /// 新しい ResolveRoomUseCase を作成
    pub fn new(directory: Arc<dyn AssignmentDirectory>) -> Self {
        Self { directory }
    }

    /// ルーム解決を実行
    ///
    /// # Arguments
    ///
    /// * `patient_id` - ルームを求めている患者の ID
    ///
    /// # Returns
    ///
    /// * `Ok(ResolvedRoom)` - ルーム ID と担当ヘルパー ID
    /// * `Err(ResolveRoomError)` - 未割り当て、または参照失敗
    pub async fn execute(&self, patient_id: &str) -> Result<ResolvedRoom, ResolveRoomError> {
        let helper_id = self
            .directory
            .assigned_helper(patient_id)
            .await
            .map_err(|e| ResolveRoomError::Directory(e.to_string()))?
            .ok_or(ResolveRoomError::NoHelperAssigned)?;

        Ok(ResolvedRoom {
            room_id: RoomId::compose(patient_id, &helper_id),
            helper_id,
        })
    }
}
