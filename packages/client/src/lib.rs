//! Chat client core for the Sahaya patient / health-worker application.
//!
//! This crate implements the conversation side of the chat feature: room
//! resolution, the room-scoped WebSocket channel session, and the per-surface
//! session controller that maintains the ordered message log. It also carries
//! the fire-and-forget trigger for the external feed-generation service.

pub mod chat;
pub mod console;
pub mod feed;
