//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;
use thiserror::Error;

use super::{entity::StoredMessage, value_object::RoomId};

/// Repository 層のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// 患者と担当ヘルパーの割り当てを引くインターフェース
///
/// ルーム解決の唯一の情報源。UseCase 層はこの trait に依存し、
/// Infrastructure 層の具体的な実装には依存しない。
#[async_trait]
pub trait AssignmentDirectory: Send + Sync {
    /// 患者に割り当てられたヘルパーの ID を取得（未割り当てなら None）
    async fn assigned_helper(&self, patient_id: &str) -> Result<Option<String>, RepositoryError>;
}

/// メッセージ履歴への追記専用インターフェース
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// メッセージを履歴に追加
    async fn append(&self, message: StoredMessage) -> Result<(), RepositoryError>;

    /// ルームのメッセージ履歴を古い順に取得
    async fn messages_for_room(&self, room_id: &RoomId) -> Vec<StoredMessage>;
}
