//! Chat relay and room-resolution server for the Sahaya application.
//!
//! The server is the authority for room assignment (a patient chats with the
//! helper assigned to them) and relays chat frames between every connection
//! of a room. Relayed messages are also recorded to a message history.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
