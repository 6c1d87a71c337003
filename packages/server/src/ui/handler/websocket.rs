//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        Path, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{MessageText, RoomId},
    infrastructure::dto::websocket::ChatFrameDto,
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<impl IntoResponse, StatusCode> {
    // Convert String -> RoomId (Domain Model)
    let room_id = match RoomId::new(room_id) {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!("Rejecting connection with invalid room id: {}", e);
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, room_id)))
}

/// Spawns a task that receives frames from the rx channel and pushes them to
/// the WebSocket sender.
///
/// This function handles the outbound flow: frames relayed within the room
/// (the connection's own included) are sent to this connection.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            // Send the frame to this connection
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, room_id: RoomId) {
    let (sender, mut receiver) = socket.split();

    // Create a channel for frames relayed to this connection
    let (tx, rx) = mpsc::unbounded_channel();

    let connection_id = state.join_room_usecase.execute(&room_id, tx).await;
    tracing::info!(
        "Connection {} joined room '{}'",
        connection_id,
        room_id.as_str()
    );

    // Spawn a task to push relayed frames to this connection
    let mut send_task = pusher_loop(rx, sender);

    let state_clone = state.clone();
    let room_id_clone = room_id.clone();

    // Spawn a task to receive frames from this connection
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Received frame: {}", text);

                    // A frame must at least be JSON to be relayed; anything
                    // else is dropped without affecting the connection
                    if serde_json::from_str::<serde_json::Value>(&text).is_err() {
                        tracing::warn!(
                            "Dropping malformed frame in room '{}'",
                            room_id_clone.as_str()
                        );
                        continue;
                    }

                    // Relay the frame as received to every connection of the
                    // room, the sender's own included
                    let delivered = state_clone
                        .relay_message_usecase
                        .execute(&room_id_clone, &text)
                        .await;
                    tracing::debug!(
                        "Relayed frame to {} connection(s) in room '{}'",
                        delivered,
                        room_id_clone.as_str()
                    );

                    // Record the message best-effort: a frame the relay
                    // accepted is still delivered even when it cannot be
                    // recorded. Convert String -> Domain Models.
                    match serde_json::from_str::<ChatFrameDto>(&text) {
                        Ok(frame) => match MessageText::new(frame.text) {
                            Ok(message_text) => {
                                if let Err(e) = state_clone
                                    .record_message_usecase
                                    .execute(&room_id_clone, frame.sender, message_text)
                                    .await
                                {
                                    tracing::warn!("Failed to record message: {}", e);
                                }
                            }
                            Err(e) => {
                                tracing::warn!("Message not recorded: {}", e);
                            }
                        },
                        Err(e) => {
                            tracing::warn!(
                                "Message not recorded (unrecognized frame shape): {}",
                                e
                            );
                        }
                    }
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!(
                        "Connection in room '{}' requested close",
                        room_id_clone.as_str()
                    );
                    break;
                }
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Remove this connection from the room registry
    state
        .leave_room_usecase
        .execute(&room_id, &connection_id)
        .await;
    tracing::info!(
        "Connection {} left room '{}'",
        connection_id,
        room_id.as_str()
    );
}
