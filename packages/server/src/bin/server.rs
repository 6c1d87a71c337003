//! Chat relay server for patient / health-worker conversations.
//!
//! Resolves rooms from patient-to-helper assignments and relays chat frames
//! between every connection of a room, recording them to the message history.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin sahaya-server
//! cargo run --bin sahaya-server -- --port 8003 --assign p-1=h-9 --assign p-2=h-9
//! ```

use std::sync::Arc;

use clap::Parser;

use sahaya_server::{
    infrastructure::{
        message_pusher::WebSocketRoomPusher,
        repository::{InMemoryAssignmentDirectory, InMemoryMessageStore},
    },
    ui::Server,
    usecase::{
        JoinRoomUseCase, LeaveRoomUseCase, RecordMessageUseCase, RelayMessageUseCase,
        ResolveRoomUseCase, RoomHistoryUseCase,
    },
};
use sahaya_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "sahaya-server")]
#[command(about = "Chat relay server for patient / health-worker conversations", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8003")]
    port: u16,

    /// Seed a patient-to-helper assignment (repeatable), e.g. --assign p-1=h-9
    #[arg(short = 'a', long = "assign", value_name = "PATIENT=HELPER")]
    assignments: Vec<String>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. Repositories
    // 2. RoomPusher
    // 3. UseCases
    // 4. Server

    // 1. Create repositories (in-memory database)
    let directory = Arc::new(InMemoryAssignmentDirectory::new());
    for pair in &args.assignments {
        match pair.split_once('=') {
            Some((patient_id, helper_id)) => {
                directory.assign(patient_id, helper_id).await;
                tracing::info!("Assigned helper '{}' to patient '{}'", helper_id, patient_id);
            }
            None => {
                tracing::error!("Invalid --assign value '{}'; expected PATIENT=HELPER", pair);
                std::process::exit(1);
            }
        }
    }
    if args.assignments.is_empty() {
        tracing::warn!(
            "No assignments seeded; room resolution will fail until the server is restarted with --assign"
        );
    }
    let store = Arc::new(InMemoryMessageStore::new());

    // 2. Create RoomPusher (WebSocket implementation)
    let pusher = Arc::new(WebSocketRoomPusher::new());

    // 3. Create UseCases
    let resolve_room_usecase = Arc::new(ResolveRoomUseCase::new(directory.clone()));
    let join_room_usecase = Arc::new(JoinRoomUseCase::new(pusher.clone()));
    let leave_room_usecase = Arc::new(LeaveRoomUseCase::new(pusher.clone()));
    let relay_message_usecase = Arc::new(RelayMessageUseCase::new(pusher.clone()));
    let record_message_usecase = Arc::new(RecordMessageUseCase::new(store.clone()));
    let room_history_usecase = Arc::new(RoomHistoryUseCase::new(store.clone()));

    // 4. Create and run the server
    let server = Server::new(
        resolve_room_usecase,
        join_room_usecase,
        leave_room_usecase,
        relay_message_usecase,
        record_message_usecase,
        room_history_usecase,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
