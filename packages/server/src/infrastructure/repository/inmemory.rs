//! InMemory Repository 実装
//!
//! ドメイン層が定義する AssignmentDirectory / MessageStore trait の
//! 具体的な実装。HashMap / Vec をインメモリ DB として使用します。
//!
//! ## 技術的負債
//!
//! 割り当てとメッセージ履歴はプロセス内にのみ保持され、再起動で失われます。
//! ホスティング DB を導入する際は、ここに同じ trait の実装を追加します：
//!
//! ```text
//! DB Row → StoredMessage (ドメインモデル)
//! ```

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    AssignmentDirectory, MessageStore, RepositoryError, RoomId, StoredMessage,
};

/// インメモリ AssignmentDirectory 実装
///
/// 患者 ID → 担当ヘルパー ID のマップを保持します。
pub struct InMemoryAssignmentDirectory {
    assignments: Mutex<HashMap<String, String>>,
}

impl InMemoryAssignmentDirectory {
    /// 空のディレクトリを作成
    pub fn new() -> Self {
        Self {
            assignments: Mutex::new(HashMap::new()),
        }
    }

    /// 患者にヘルパーを割り当てる（起動時のシード用）
    pub async fn assign(&self, patient_id: &str, helper_id: &str) {
        let mut assignments = self.assignments.lock().await;
        assignments.insert(patient_id.to_string(), helper_id.to_string());
    }
}

impl Default for InMemoryAssignmentDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AssignmentDirectory for InMemoryAssignmentDirectory {
    async fn assigned_helper(&self, patient_id: &str) -> Result<Option<String>, RepositoryError> {
        let assignments = self.assignments.lock().await;
        Ok(assignments.get(patient_id).cloned())
    }
}

/// インメモリ MessageStore 実装
pub struct InMemoryMessageStore {
    messages: Mutex<Vec<StoredMessage>>,
}

impl InMemoryMessageStore {
    /// 空のストアを作成
    pub fn new() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
        }
    }
}

impl Default for InMemoryMessageStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn append(&self, message: StoredMessage) -> Result<(), RepositoryError> {
        let mut messages = self.messages.lock().await;
        messages.push(message);
        Ok(())
    }

    async fn messages_for_room(&self, room_id: &RoomId) -> Vec<StoredMessage> {
        let messages = self.messages.lock().await;
        messages
            .iter()
            .filter(|m| &m.room_id == room_id)
            .cloned()
            .collect()
    }
}
