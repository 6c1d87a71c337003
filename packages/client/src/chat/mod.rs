//! Real-time chat between a patient and their assigned health worker.
//!
//! The pieces compose bottom-up:
//!
//! - [`envelope`]: the message unit and its flat wire frame
//! - [`resolver`]: mapping a counterpart to a stable room id
//! - [`channel`]: one live WebSocket connection bound to a room
//! - [`controller`]: the per-surface orchestrator owning the message log

mod channel;
mod controller;
mod envelope;
mod error;
mod resolver;

pub use channel::{ChannelEvent, ChannelSession, ChannelState};
pub use controller::{ChatController, Peer};
pub use envelope::{ChatFrame, CorrelationId, MessageEnvelope, SenderRole};
pub use error::ChatError;
pub use resolver::{HttpRoomResolver, ResolvedRoom, RoomId, RoomResolver};
