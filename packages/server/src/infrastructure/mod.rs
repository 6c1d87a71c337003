//! Infrastructure layer: concrete adapters behind the domain ports, plus the
//! DTOs of both protocols.

pub mod dto;
pub mod message_pusher;
pub mod repository;
