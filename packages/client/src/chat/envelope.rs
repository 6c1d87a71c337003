//! Chat message envelope and its wire representation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of a message sender as shown in a conversation log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SenderRole {
    /// The patient side of the conversation
    Patient,
    /// The assigned health worker side of the conversation
    Helper,
    /// Local-only synthetic entries (connection announcements); never transmitted
    System,
}

impl SenderRole {
    /// Tag carried on the wire for this role. System entries are local-only
    /// and have no wire tag.
    pub fn wire_tag(&self) -> Option<&'static str> {
        match self {
            SenderRole::Patient => Some("patient"),
            SenderRole::Helper => Some("helper"),
            SenderRole::System => None,
        }
    }

    /// Parse a wire tag back into a role. Unknown tags yield `None`.
    pub fn from_wire_tag(tag: &str) -> Option<SenderRole> {
        match tag {
            "patient" => Some(SenderRole::Patient),
            "helper" => Some(SenderRole::Helper),
            _ => None,
        }
    }

    /// The other party of a two-party conversation. System has no peer and
    /// maps to itself.
    pub fn peer(&self) -> SenderRole {
        match self {
            SenderRole::Patient => SenderRole::Helper,
            SenderRole::Helper => SenderRole::Patient,
            SenderRole::System => SenderRole::System,
        }
    }
}

/// Opaque value a sender attaches to its own outbound frames so it can
/// recognize them when the relay echoes them back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrelationId(String);

impl CorrelationId {
    /// Generate a fresh correlation id, unique within this session
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the correlation id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the correlation id and return the inner string
    pub fn into_string(self) -> String {
        self.0
    }
}

/// One entry of a conversation log.
///
/// Envelopes are immutable once appended: the log is an append-only sequence
/// ordered by local creation/arrival, never reordered and never rewritten.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageEnvelope {
    /// Local display identity (send timestamp for own entries, arrival
    /// timestamp for inbound ones); distinct from the correlation id
    pub id: i64,
    /// Role this entry is displayed under
    pub sender: SenderRole,
    /// Display text
    pub text: String,
    /// Present only on entries this session originated
    pub correlation_id: Option<CorrelationId>,
}

impl MessageEnvelope {
    /// Synthetic local entry (e.g. a connection announcement)
    pub fn system(id: i64, text: String) -> Self {
        Self {
            id,
            sender: SenderRole::System,
            text,
            correlation_id: None,
        }
    }

    /// Entry for a message this session is sending
    pub fn outbound(id: i64, sender: SenderRole, text: String, correlation_id: CorrelationId) -> Self {
        Self {
            id,
            sender,
            text,
            correlation_id: Some(correlation_id),
        }
    }

    /// Entry for a message received from the channel
    pub fn inbound(id: i64, sender: SenderRole, text: String) -> Self {
        Self {
            id,
            sender,
            text,
            correlation_id: None,
        }
    }
}

/// Flat wire frame exchanged over the chat WebSocket.
///
/// The transport carries plain JSON text frames with a `sender` tag, the
/// message `text`, and an optional `clientId` correlation field. There is no
/// binary framing and no schema versioning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatFrame {
    pub sender: String,
    pub text: String,
    #[serde(rename = "clientId", default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
}

impl ChatFrame {
    /// Deserialize one inbound text frame
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Serialize the frame for transmission
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_tag_for_conversation_roles() {
        // テスト項目: patient / helper ロールにはワイヤタグがあり、system にはない
        // given (前提条件):

        // when (操作):

        // then (期待する結果):
        assert_eq!(SenderRole::Patient.wire_tag(), Some("patient"));
        assert_eq!(SenderRole::Helper.wire_tag(), Some("helper"));
        assert_eq!(SenderRole::System.wire_tag(), None);
    }

    #[test]
    fn test_from_wire_tag_with_unknown_tag() {
        // テスト項目: 未知のワイヤタグは None として扱われる
        // given (前提条件):
        let tag = "moderator";

        // when (操作):
        let result = SenderRole::from_wire_tag(tag);

        // then (期待する結果):
        assert_eq!(result, None);
    }

    #[test]
    fn test_peer_role_is_the_other_party() {
        // テスト項目: peer() が会話の相手側のロールを返す
        // given (前提条件):

        // when (操作):

        // then (期待する結果):
        assert_eq!(SenderRole::Patient.peer(), SenderRole::Helper);
        assert_eq!(SenderRole::Helper.peer(), SenderRole::Patient);
    }

    #[test]
    fn test_correlation_ids_are_unique_within_a_session() {
        // テスト項目: 生成した correlation id は重複しない
        // given (前提条件):

        // when (操作):
        let first = CorrelationId::generate();
        let second = CorrelationId::generate();

        // then (期待する結果):
        assert_ne!(first, second);
    }

    #[test]
    fn test_frame_serializes_correlation_field_as_client_id() {
        // テスト項目: correlation フィールドが `clientId` キーで直列化される
        // given (前提条件):
        let frame = ChatFrame {
            sender: "helper".to_string(),
            text: "Take your medicine".to_string(),
            client_id: Some("100".to_string()),
        };

        // when (操作):
        let json = frame.to_json().unwrap();

        // then (期待する結果):
        assert!(json.contains("\"clientId\":\"100\""));
        assert!(json.contains("\"sender\":\"helper\""));
    }

    #[test]
    fn test_frame_omits_absent_correlation_field() {
        // テスト項目: correlation id が無いフレームには `clientId` キーが出力されない
        // given (前提条件):
        let frame = ChatFrame {
            sender: "patient".to_string(),
            text: "Okay, thanks".to_string(),
            client_id: None,
        };

        // when (操作):
        let json = frame.to_json().unwrap();

        // then (期待する結果):
        assert!(!json.contains("clientId"));
    }

    #[test]
    fn test_frame_parses_without_correlation_field() {
        // テスト項目: `clientId` キーを持たないフレームもパースできる
        // given (前提条件):
        let json = r#"{"sender":"patient","text":"hi"}"#;

        // when (操作):
        let frame = ChatFrame::parse(json).unwrap();

        // then (期待する結果):
        assert_eq!(frame.sender, "patient");
        assert_eq!(frame.text, "hi");
        assert_eq!(frame.client_id, None);
    }

    #[test]
    fn test_frame_parse_rejects_non_json_payload() {
        // テスト項目: JSON でないペイロードはパースエラーになる
        // given (前提条件):
        let payload = "not json at all";

        // when (操作):
        let result = ChatFrame::parse(payload);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_frame_parse_rejects_missing_fields() {
        // テスト項目: 必須フィールドを欠いたペイロードはパースエラーになる
        // given (前提条件):
        let payload = r#"{"sender":"helper"}"#;

        // when (操作):
        let result = ChatFrame::parse(payload);

        // then (期待する結果):
        assert!(result.is_err());
    }
}
