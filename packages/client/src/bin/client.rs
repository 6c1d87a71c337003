//! Interactive chat client for patients and health workers.
//!
//! Connects to the chat relay and exchanges messages with the other party of
//! a conversation. The helper surface resolves the room through the room
//! service; the patient surface addresses the room directly from both party
//! ids.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin sahaya-client -- --role helper --user-id h-9 --peer-id p-1 --peer-name Lakshmi
//! cargo run --bin sahaya-client -- --role patient --user-id p-1 --peer-id h-9 --peer-name Asha
//! ```

use clap::{Parser, ValueEnum};

use sahaya_client::chat::{ChatController, HttpRoomResolver, Peer, RoomId, SenderRole};
use sahaya_client::console::run_console;
use sahaya_client::feed;
use sahaya_shared::logger::setup_logger;

/// Which side of the conversation this client speaks for
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Role {
    Patient,
    Helper,
}

#[derive(Parser, Debug)]
#[command(name = "sahaya-client")]
#[command(about = "Chat client for patients and their assigned health workers", long_about = None)]
struct Args {
    /// Which side of the conversation this client speaks for
    #[arg(short = 'r', long, value_enum)]
    role: Role,

    /// Your own user id
    #[arg(short = 'i', long)]
    user_id: String,

    /// The other party's id (patient id when run as helper, helper id when
    /// run as patient)
    #[arg(short = 'p', long)]
    peer_id: String,

    /// Display name of the other party
    #[arg(short = 'n', long, default_value = "your contact")]
    peer_name: String,

    /// Base URL of the chat API
    #[arg(long, default_value = "http://127.0.0.1:8003")]
    api_base: String,

    /// Base URL of the chat WebSocket endpoint
    #[arg(long, default_value = "ws://127.0.0.1:8003")]
    ws_base: String,

    /// Also trigger a feed refresh in this language before starting the chat
    #[arg(long)]
    refresh_feed_lang: Option<String>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // Best-effort feed refresh; the chat does not depend on its outcome
    if let Some(lang) = &args.refresh_feed_lang {
        let http = reqwest::Client::new();
        feed::trigger_generation(&http, &args.api_base, &args.user_id, lang).await;
    }

    let (controller, events) = match args.role {
        Role::Helper => {
            let mut controller = ChatController::new(SenderRole::Helper, args.ws_base.clone());
            let resolver = HttpRoomResolver::new(args.api_base.clone());
            let peer = Peer::new(args.peer_id.clone(), args.peer_name.clone());
            match controller.start(&peer, &resolver).await {
                Ok(Some(events)) => (controller, events),
                Ok(None) => {
                    tracing::error!("A chat is already open for this surface");
                    std::process::exit(1);
                }
                Err(e) => {
                    tracing::error!("Cannot start chat: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Role::Patient => {
            let mut controller = ChatController::new(SenderRole::Patient, args.ws_base.clone());
            let room_id = RoomId::compose(&args.user_id, &args.peer_id);
            match controller.start_in_room(room_id, &args.peer_name) {
                Some(events) => (controller, events),
                None => {
                    tracing::error!("A chat is already open for this surface");
                    std::process::exit(1);
                }
            }
        }
    };

    if let Err(e) = run_console(controller, events, &args.user_id, &args.peer_name).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
