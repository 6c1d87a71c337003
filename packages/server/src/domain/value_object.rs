//! ドメイン層の値オブジェクト
//!
//! 不正な値を型の生成時点で弾くための薄いラッパー群。

use thiserror::Error;

/// 値オブジェクトの生成エラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("room id must not be empty")]
    EmptyRoomId,

    #[error("message text must not be empty")]
    EmptyMessageText,
}

/// 二者間の会話ルームを識別する ID
///
/// 正準形は `{patient_id}_{helper_id}` の複合形式。ルーム解決サービスが
/// 払い出すのもこの形式で、ストレージ列への分解は [`RoomId::split`] で行う。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoomId(String);

impl RoomId {
    /// 新しい RoomId を作成（空文字は不可）
    pub fn new(id: String) -> Result<Self, DomainError> {
        if id.trim().is_empty() {
            return Err(DomainError::EmptyRoomId);
        }
        Ok(Self(id))
    }

    /// 両者の ID から複合ルーム ID を組み立てる
    pub fn compose(patient_id: &str, helper_id: &str) -> Self {
        Self(format!("{}_{}", patient_id, helper_id))
    }

    /// 複合ルーム ID を (patient_id, helper_id) に分解する
    ///
    /// 複合形式でない ID に対しては `None` を返す。
    pub fn split(&self) -> Option<(&str, &str)> {
        self.0.split_once('_')
    }

    /// Get the room id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the room id and return the inner string
    pub fn into_string(self) -> String {
        self.0
    }
}

/// チャットメッセージの本文（空文字は不可）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageText(String);

impl MessageText {
    /// 新しい MessageText を作成
    pub fn new(text: String) -> Result<Self, DomainError> {
        if text.trim().is_empty() {
            return Err(DomainError::EmptyMessageText);
        }
        Ok(Self(text))
    }

    /// Get the text as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the text and return the inner string
    pub fn into_string(self) -> String {
        self.0
    }
}

/// Unix タイムスタンプ（ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    /// 新しい Timestamp を作成
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    /// Get the timestamp value in milliseconds
    pub fn value(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_id_rejects_empty_string() {
        // テスト項目: 空文字からは RoomId を生成できない
        // given (前提条件):
        let id = "".to_string();

        // when (操作):
        let result = RoomId::new(id);

        // then (期待する結果):
        assert_eq!(result, Err(DomainError::EmptyRoomId));
    }

    #[test]
    fn test_composed_room_id_splits_back_into_both_party_ids() {
        // テスト項目: 複合ルーム ID が両者の ID に分解できる
        // given (前提条件):
        let room_id = RoomId::compose("p-1", "h-9");

        // when (操作):
        let result = room_id.split();

        // then (期待する結果):
        assert_eq!(result, Some(("p-1", "h-9")));
    }

    #[test]
    fn test_room_id_with_uuid_parties_splits_at_the_first_separator() {
        // テスト項目: UUID 形式の ID でも最初の区切りで分解される
        // given (前提条件): ハイフンを含む UUID、区切りはアンダースコア
        let patient = "040f5544-6a7c-42e1-92ac-5e82c8003bc3";
        let helper = "7b10c8de-91a2-4f3b-8c44-1f2a3b4c5d6e";
        let room_id = RoomId::compose(patient, helper);

        // when (操作):
        let result = room_id.split();

        // then (期待する結果):
        assert_eq!(result, Some((patient, helper)));
    }

    #[test]
    fn test_non_composite_room_id_does_not_split() {
        // テスト項目: 複合形式でない ID は分解できない
        // given (前提条件):
        let room_id = RoomId::new("plainroom".to_string()).unwrap();

        // when (操作):
        let result = room_id.split();

        // then (期待する結果):
        assert_eq!(result, None);
    }

    #[test]
    fn test_message_text_rejects_whitespace_only() {
        // テスト項目: 空白のみの本文からは MessageText を生成できない
        // given (前提条件):
        let text = "   ".to_string();

        // when (操作):
        let result = MessageText::new(text);

        // then (期待する結果):
        assert_eq!(result, Err(DomainError::EmptyMessageText));
    }

    #[test]
    fn test_message_text_preserves_content() {
        // テスト項目: 生成した MessageText が本文をそのまま保持する
        // given (前提条件):
        let text = "Take your medicine".to_string();

        // when (操作):
        let result = MessageText::new(text).unwrap();

        // then (期待する結果):
        assert_eq!(result.as_str(), "Take your medicine");
    }
}
