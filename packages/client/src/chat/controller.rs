//! Per-surface chat session controller.
//!
//! Each UI surface (patient dashboard, helper dashboard) owns exactly one
//! controller. The controller resolves the room, owns the channel session in
//! a single slot, and maintains the ordered message log the surface renders
//! from. Outbound messages are appended optimistically before the network is
//! touched; inbound frames pass through self-echo suppression before being
//! appended.

use std::sync::Arc;

use tokio::sync::mpsc;

use sahaya_shared::time::{Clock, SystemClock};

use super::{
    channel::{ChannelEvent, ChannelSession},
    envelope::{ChatFrame, CorrelationId, MessageEnvelope, SenderRole},
    error::ChatError,
    resolver::{RoomId, RoomResolver},
};

/// The party on the other end of a conversation (display data only)
#[derive(Debug, Clone)]
pub struct Peer {
    pub id: String,
    pub name: String,
}

impl Peer {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Orchestrates one conversation for one UI surface.
pub struct ChatController {
    /// Role this surface speaks as (`Patient` or `Helper`)
    role: SenderRole,
    /// Base URL of the room-scoped WebSocket endpoint
    ws_base: String,
    /// Append-only, ordered message log
    log: Vec<MessageEnvelope>,
    /// Single-slot session cell; nulled on end() so a stale handle can
    /// never be used
    session: Option<ChannelSession>,
    clock: Arc<dyn Clock>,
}

impl ChatController {
    /// Create a controller speaking as `role` against `ws_base`
    pub fn new(role: SenderRole, ws_base: impl Into<String>) -> Self {
        Self::with_clock(role, ws_base, Arc::new(SystemClock))
    }

    /// Create a controller with an injected clock (used by tests)
    pub fn with_clock(role: SenderRole, ws_base: impl Into<String>, clock: Arc<dyn Clock>) -> Self {
        Self {
            role,
            ws_base: ws_base.into(),
            log: Vec::new(),
            session: None,
            clock,
        }
    }

    /// Role this controller sends as
    pub fn role(&self) -> SenderRole {
        self.role
    }

    /// The ordered message log, oldest first
    pub fn log(&self) -> &[MessageEnvelope] {
        &self.log
    }

    /// Whether a channel session is currently held
    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    /// Start a chat with `peer`, resolving the room through `resolver`.
    ///
    /// On success the log is seeded with a connection announcement and a
    /// channel session is opened; the returned receiver carries the session's
    /// events. On resolution failure nothing is seeded and no session is
    /// created. `Ok(None)` means an open session already existed and was
    /// reused.
    pub async fn start(
        &mut self,
        peer: &Peer,
        resolver: &dyn RoomResolver,
    ) -> Result<Option<mpsc::UnboundedReceiver<ChannelEvent>>, ChatError> {
        let resolved = resolver.resolve_room(&peer.id).await?;
        Ok(self.open_room(resolved.room_id, &peer.name))
    }

    /// Start a chat in an already-known room (dashboard flow, composite id)
    pub fn start_in_room(
        &mut self,
        room_id: RoomId,
        peer_name: &str,
    ) -> Option<mpsc::UnboundedReceiver<ChannelEvent>> {
        self.open_room(room_id, peer_name)
    }

    fn open_room(
        &mut self,
        room_id: RoomId,
        peer_name: &str,
    ) -> Option<mpsc::UnboundedReceiver<ChannelEvent>> {
        // One live connection per surface: reuse an open session instead of
        // stacking a second one onto the same room
        if let Some(session) = &self.session
            && session.is_open()
        {
            tracing::debug!("Channel already open; reusing the existing connection");
            return None;
        }

        self.log.push(MessageEnvelope::system(
            self.clock.now_millis(),
            format!("You're now connected with {}.", peer_name),
        ));

        let url = format!(
            "{}/ws/{}",
            self.ws_base.trim_end_matches('/'),
            room_id.as_str()
        );
        tracing::info!("Opening chat channel to {}", url);
        let (session, events) = ChannelSession::connect(url);
        self.session = Some(session);
        Some(events)
    }

    /// Send a text message.
    ///
    /// Whitespace-only input is a no-op. Otherwise the message is appended to
    /// the local log first (optimistic echo) and then handed to the channel;
    /// if the transport is not open the frame is dropped and the optimistic
    /// entry stands with no error indicator.
    pub fn send_text(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }

        let correlation_id = CorrelationId::generate();
        let frame = ChatFrame {
            // send_text is only reachable for patient/helper surfaces; a
            // system-role controller is not constructible through the CLI
            sender: self.role.wire_tag().unwrap_or("patient").to_string(),
            text: text.to_string(),
            client_id: Some(correlation_id.as_str().to_string()),
        };

        self.log.push(MessageEnvelope::outbound(
            self.clock.now_millis(),
            self.role,
            text.to_string(),
            correlation_id,
        ));

        match &self.session {
            Some(session) => session.send_frame(&frame),
            None => tracing::warn!("No active channel; message kept locally only"),
        }
    }

    /// Apply one inbound frame to the log.
    ///
    /// A frame that carries this surface's own role together with a
    /// correlation id is one of our own messages echoed back by the relay and
    /// is discarded. Everything else is appended with the sender normalized
    /// to the other party's role, so the log always shows exactly two sides.
    pub fn apply_inbound(&mut self, frame: ChatFrame) {
        if self.is_self_echo(&frame) {
            tracing::debug!("Suppressed self-echo frame");
            return;
        }

        self.log.push(MessageEnvelope::inbound(
            self.clock.now_millis(),
            self.role.peer(),
            frame.text,
        ));
    }

    fn is_self_echo(&self, frame: &ChatFrame) -> bool {
        frame.client_id.is_some() && SenderRole::from_wire_tag(&frame.sender) == Some(self.role)
    }

    /// End the conversation: close the channel and clear the session slot.
    /// Safe to call any number of times; the log is kept for display.
    pub fn end(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.close();
            tracing::info!("Chat channel closed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::channel::ChannelState;
    use crate::chat::resolver::ResolvedRoom;
    use async_trait::async_trait;
    use sahaya_shared::time::FixedClock;

    // Hand-rolled resolver doubles for controller tests
    struct StaticResolver {
        room_id: &'static str,
        helper_id: &'static str,
    }

    #[async_trait]
    impl RoomResolver for StaticResolver {
        async fn resolve_room(&self, _counterpart_id: &str) -> Result<ResolvedRoom, ChatError> {
            Ok(ResolvedRoom {
                room_id: RoomId::new(self.room_id.to_string()),
                helper_id: self.helper_id.to_string(),
            })
        }
    }

    struct FailingResolver;

    #[async_trait]
    impl RoomResolver for FailingResolver {
        async fn resolve_room(&self, _counterpart_id: &str) -> Result<ResolvedRoom, ChatError> {
            Err(ChatError::ResolutionFailed("not found".to_string()))
        }
    }

    fn helper_controller() -> ChatController {
        ChatController::with_clock(
            SenderRole::Helper,
            "ws://127.0.0.1:1",
            Arc::new(FixedClock::new(1_000)),
        )
    }

    /// Controller with a recording transport in the session slot; returns the
    /// receiver holding every transmitted frame.
    fn helper_controller_with_transport(
        state: ChannelState,
    ) -> (ChatController, tokio::sync::mpsc::UnboundedReceiver<String>) {
        let mut controller = helper_controller();
        let (session, transmitted) = ChannelSession::with_recording_transport(state);
        controller.session = Some(session);
        (controller, transmitted)
    }

    #[test]
    fn test_send_text_appends_exactly_one_optimistic_entry() {
        // テスト項目: 送信時にローカルログへ楽観的エントリが 1 件追加される
        // given (前提条件): トランスポートが未接続でも同じ
        let (mut controller, _transmitted) =
            helper_controller_with_transport(ChannelState::Connecting);

        // when (操作):
        controller.send_text("hello");

        // then (期待する結果):
        assert_eq!(controller.log().len(), 1);
        assert_eq!(controller.log()[0].text, "hello");
        assert_eq!(controller.log()[0].sender, SenderRole::Helper);
        assert!(controller.log()[0].correlation_id.is_some());
    }

    #[test]
    fn test_send_text_without_open_transport_transmits_nothing() {
        // テスト項目: トランスポートが Open でない間は送出フレームが 0 件
        // given (前提条件):
        let (mut controller, mut transmitted) =
            helper_controller_with_transport(ChannelState::Connecting);

        // when (操作):
        controller.send_text("hello");

        // then (期待する結果): ログには残るがフレームは送出されない
        assert_eq!(controller.log().len(), 1);
        assert!(transmitted.try_recv().is_err());
    }

    #[test]
    fn test_send_text_without_any_session_still_appends() {
        // テスト項目: セッションが無くても楽観的エントリは追加される
        // given (前提条件): start していないコントローラ
        let mut controller = helper_controller();

        // when (操作):
        controller.send_text("hello");

        // then (期待する結果): ロールバックは行われない
        assert_eq!(controller.log().len(), 1);
        assert_eq!(controller.log()[0].text, "hello");
    }

    #[test]
    fn test_send_text_rejects_whitespace_only_input() {
        // テスト項目: 空白のみのテキストは no-op になる
        // given (前提条件):
        let (mut controller, mut transmitted) = helper_controller_with_transport(ChannelState::Open);

        // when (操作):
        controller.send_text("   ");
        controller.send_text("");
        controller.send_text("\t\n");

        // then (期待する結果):
        assert!(controller.log().is_empty());
        assert!(transmitted.try_recv().is_err());
    }

    #[test]
    fn test_own_role_frame_with_correlation_id_is_suppressed() {
        // テスト項目: 自ロール + correlation id 付きの受信フレームは破棄される
        // given (前提条件): helper として送信済み
        let (mut controller, mut transmitted) = helper_controller_with_transport(ChannelState::Open);
        controller.send_text("Take your medicine");
        let sent_json = transmitted.try_recv().unwrap();
        let echoed = ChatFrame::parse(&sent_json).unwrap();
        let len_before = controller.log().len();

        // when (操作): リレーが自分のフレームをエコーしてくる
        controller.apply_inbound(echoed);

        // then (期待する結果): ログは変化しない
        assert_eq!(controller.log().len(), len_before);
    }

    #[test]
    fn test_peer_frame_is_appended_and_displayed_as_the_other_party() {
        // テスト項目: 相手のフレームは相手ロールに正規化されて追加される
        // given (前提条件):
        let (mut controller, _transmitted) = helper_controller_with_transport(ChannelState::Open);

        // when (操作):
        controller.apply_inbound(ChatFrame {
            sender: "patient".to_string(),
            text: "Okay, thanks".to_string(),
            client_id: None,
        });

        // then (期待する結果):
        assert_eq!(controller.log().len(), 1);
        assert_eq!(controller.log()[0].sender, SenderRole::Patient);
        assert_eq!(controller.log()[0].text, "Okay, thanks");
    }

    #[test]
    fn test_own_role_frame_without_correlation_id_is_appended() {
        // テスト項目: correlation id を持たない自ロールのフレームは追加される
        // given (前提条件): 別端末からの自ロール発言を想定
        let (mut controller, _transmitted) = helper_controller_with_transport(ChannelState::Open);

        // when (操作):
        controller.apply_inbound(ChatFrame {
            sender: "helper".to_string(),
            text: "from another device".to_string(),
            client_id: None,
        });

        // then (期待する結果): 相手ロールに正規化されて表示される
        assert_eq!(controller.log().len(), 1);
        assert_eq!(controller.log()[0].sender, SenderRole::Patient);
    }

    #[test]
    fn test_unknown_sender_tag_is_normalized_to_the_peer_role() {
        // テスト項目: 未知の sender タグは相手ロールとして表示される
        // given (前提条件):
        let (mut controller, _transmitted) = helper_controller_with_transport(ChannelState::Open);

        // when (操作):
        controller.apply_inbound(ChatFrame {
            sender: "moderator".to_string(),
            text: "hi".to_string(),
            client_id: Some("x".to_string()),
        });

        // then (期待する結果):
        assert_eq!(controller.log().len(), 1);
        assert_eq!(controller.log()[0].sender, SenderRole::Patient);
    }

    #[test]
    fn test_log_preserves_local_event_order() {
        // テスト項目: ログが送信・受信イベントのローカル順序を保持する
        // given (前提条件):
        let (mut controller, _transmitted) = helper_controller_with_transport(ChannelState::Open);

        // when (操作):
        controller.send_text("first");
        controller.apply_inbound(ChatFrame {
            sender: "patient".to_string(),
            text: "second".to_string(),
            client_id: None,
        });
        controller.send_text("third");

        // then (期待する結果): 追加順のまま、並べ替えも削除もされない
        let texts: Vec<&str> = controller.log().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_resolution_failure_creates_no_session_and_no_log_entry() {
        // テスト項目: ルーム解決失敗時はセッションもログ seed も作られない
        // given (前提条件):
        let mut controller = helper_controller();
        let peer = Peer::new("p-1", "Asha");

        // when (操作):
        let result = controller.start(&peer, &FailingResolver).await;

        // then (期待する結果):
        assert!(matches!(result, Err(ChatError::ResolutionFailed(_))));
        assert!(!controller.has_session());
        assert!(controller.log().is_empty());
    }

    #[tokio::test]
    async fn test_start_seeds_the_log_with_a_connection_announcement() {
        // テスト項目: 解決成功時にシステムエントリ 1 件でログが seed される
        // given (前提条件):
        let mut controller = helper_controller();
        let resolver = StaticResolver {
            room_id: "p-1_h-9",
            helper_id: "h-9",
        };
        let peer = Peer::new("p-1", "Lakshmi");

        // when (操作):
        let events = controller.start(&peer, &resolver).await.unwrap();

        // then (期待する結果):
        assert!(events.is_some());
        assert!(controller.has_session());
        assert_eq!(controller.log().len(), 1);
        assert_eq!(controller.log()[0].sender, SenderRole::System);
        assert_eq!(controller.log()[0].text, "You're now connected with Lakshmi.");
    }

    #[test]
    fn test_open_session_is_reused_on_a_second_start() {
        // テスト項目: Open なセッションがある間の再 start は no-op になる
        // given (前提条件):
        let (mut controller, _transmitted) = helper_controller_with_transport(ChannelState::Open);

        // when (操作):
        let events = controller.start_in_room(RoomId::new("p-1_h-9".to_string()), "Lakshmi");

        // then (期待する結果): 新しい接続は張られず、seed も追加されない
        assert!(events.is_none());
        assert!(controller.log().is_empty());
    }

    #[test]
    fn test_end_clears_the_session_slot_and_is_idempotent() {
        // テスト項目: end がセッションスロットを空にし、複数回呼んでも安全
        // given (前提条件):
        let (mut controller, _transmitted) = helper_controller_with_transport(ChannelState::Open);
        controller.send_text("bye");

        // when (操作):
        controller.end();
        controller.end();

        // then (期待する結果): スロットは空、ログは表示用に残る
        assert!(!controller.has_session());
        assert_eq!(controller.log().len(), 1);
    }

    #[test]
    fn test_scenario_helper_conversation_round_trip() {
        // テスト項目: helper 側の一連の送受信シナリオでログが期待通りに変化する
        // given (前提条件): helper がルーム解決済みでチャネルが Open
        let (mut controller, mut transmitted) = helper_controller_with_transport(ChannelState::Open);
        controller.log.push(MessageEnvelope::system(
            1_000,
            "You're now connected with Lakshmi.".to_string(),
        ));

        // when (操作): メッセージを送信し、自分のエコーと相手の返信を受信する
        controller.send_text("Take your medicine");
        let sent = ChatFrame::parse(&transmitted.try_recv().unwrap()).unwrap();
        controller.apply_inbound(sent); // echoed back by the relay
        controller.apply_inbound(ChatFrame {
            sender: "patient".to_string(),
            text: "Okay, thanks".to_string(),
            client_id: None,
        });

        // then (期待する結果): [system, helper, patient] の 3 件のみ
        let log = controller.log();
        assert_eq!(log.len(), 3);
        assert_eq!(log[0].sender, SenderRole::System);
        assert_eq!(log[1].sender, SenderRole::Helper);
        assert_eq!(log[1].text, "Take your medicine");
        assert_eq!(log[2].sender, SenderRole::Patient);
        assert_eq!(log[2].text, "Okay, thanks");
    }
}
