//! UseCase 層のエラー

use thiserror::Error;

/// ルーム解決のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveRoomError {
    /// 患者にヘルパーが割り当てられていない
    ///
    /// 文言はそのまま Web クライアントのエラーバナーに表示される。
    #[error("No helper assigned to this patient.")]
    NoHelperAssigned,

    /// 割り当ての参照に失敗した
    #[error("directory lookup failed: {0}")]
    Directory(String),
}

/// メッセージ記録のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordMessageError {
    /// 複合形式でないルーム ID からは保存列を導出できない
    #[error("room id '{0}' is not a composite id")]
    MalformedRoomId(String),

    /// ストアへの追記に失敗した
    #[error("failed to append message: {0}")]
    Store(String),
}
