//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::usecase::{
    JoinRoomUseCase, LeaveRoomUseCase, RecordMessageUseCase, RelayMessageUseCase,
    ResolveRoomUseCase, RoomHistoryUseCase,
};

use super::{
    handler::{
        http::{get_chat_room, get_room_messages, health_check},
        websocket::websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Chat relay server
///
/// This struct encapsulates the server's use cases and provides methods to
/// build the router or run the server directly.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     resolve_room_usecase,
///     join_room_usecase,
///     leave_room_usecase,
///     relay_message_usecase,
///     record_message_usecase,
///     room_history_usecase,
/// );
/// server.run("127.0.0.1".to_string(), 8003).await?;
/// ```
pub struct Server {
    /// ResolveRoomUseCase（ルーム解決のユースケース）
    resolve_room_usecase: Arc<ResolveRoomUseCase>,
    /// JoinRoomUseCase（ルーム参加のユースケース）
    join_room_usecase: Arc<JoinRoomUseCase>,
    /// LeaveRoomUseCase（ルーム退出のユースケース）
    leave_room_usecase: Arc<LeaveRoomUseCase>,
    /// RelayMessageUseCase（メッセージリレーのユースケース）
    relay_message_usecase: Arc<RelayMessageUseCase>,
    /// RecordMessageUseCase（メッセージ記録のユースケース）
    record_message_usecase: Arc<RecordMessageUseCase>,
    /// RoomHistoryUseCase（ルーム履歴取得のユースケース）
    room_history_usecase: Arc<RoomHistoryUseCase>,
}

impl Server {
    /// Create a new Server instance
    pub fn new(
        resolve_room_usecase: Arc<ResolveRoomUseCase>,
        join_room_usecase: Arc<JoinRoomUseCase>,
        leave_room_usecase: Arc<LeaveRoomUseCase>,
        relay_message_usecase: Arc<RelayMessageUseCase>,
        record_message_usecase: Arc<RecordMessageUseCase>,
        room_history_usecase: Arc<RoomHistoryUseCase>,
    ) -> Self {
        Self {
            resolve_room_usecase,
            join_room_usecase,
            leave_room_usecase,
            relay_message_usecase,
            record_message_usecase,
            room_history_usecase,
        }
    }

    /// Build the router (also used to serve on a pre-bound listener in tests)
    pub fn into_router(self) -> Router {
        let app_state = Arc::new(AppState {
            resolve_room_usecase: self.resolve_room_usecase,
            join_room_usecase: self.join_room_usecase,
            leave_room_usecase: self.leave_room_usecase,
            relay_message_usecase: self.relay_message_usecase,
            record_message_usecase: self.record_message_usecase,
            room_history_usecase: self.room_history_usecase,
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/ws/{room_id}", get(websocket_handler))
            // HTTP エンドポイント
            .route("/chat/room/{patient_id}", get(get_chat_room))
            .route("/api/health", get(health_check))
            .route("/api/rooms/{room_id}/messages", get(get_room_messages))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the chat relay server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8003)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address
    /// or if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.into_router();

        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        // Start the server
        tracing::info!("Chat relay server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws/{{room_id}}", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Set up graceful shutdown signal handler
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
