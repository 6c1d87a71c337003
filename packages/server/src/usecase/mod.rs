//! UseCase layer: one application operation per type.

mod error;
mod join_room;
mod leave_room;
mod record_message;
mod relay_message;
mod resolve_room;
mod room_history;

pub use error::{RecordMessageError, ResolveRoomError};
pub use join_room::JoinRoomUseCase;
pub use leave_room::LeaveRoomUseCase;
pub use record_message::RecordMessageUseCase;
pub use relay_message::RelayMessageUseCase;
pub use resolve_room::{ResolveRoomUseCase, ResolvedRoom};
pub use room_history::RoomHistoryUseCase;
